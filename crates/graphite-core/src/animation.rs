// File: crates/graphite-core/src/animation.rs
// Summary: Frame-stepped bar animations (grow, wave) computed against the drawn target geometry.
// Notes:
// - A run never touches the backend; the chart applies each FrameUpdate and
//   drops runs whose generation no longer matches the current draw.

use std::f64::consts::FRAC_PI_2;

use crate::geometry::Rect;
use crate::layout::{Backface, ShapeRecord};

pub const GROW_FRAMES: u32 = 30;
pub const WAVE_FRAMES: u32 = 60;

const EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Grow,
    Wave,
}

impl Effect {
    pub fn default_frames(self) -> u32 {
        match self {
            Effect::Grow => GROW_FRAMES,
            Effect::Wave => WAVE_FRAMES,
        }
    }
}

/// `sin(f/F * pi/2)^3`
pub fn easing(frame: u32, frames: u32) -> f64 {
    (frame as f64 / frames as f64 * FRAC_PI_2).sin().powi(3)
}

/// Height multiplier of the grow effect at `frame`; 0 at the start and 1 at the end.
pub fn grow_multiplier(frame: u32, frames: u32) -> f64 {
    let e = easing(frame, frames);
    frame as f64 / frames as f64 * e * e
}

/// Geometry applied for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameUpdate {
    pub frame: u32,
    /// `(record index, rect)` pairs.
    pub shapes: Vec<(usize, Rect)>,
    /// `(backface index, rect)` pairs.
    pub backfaces: Vec<(usize, Rect)>,
    pub finished: bool,
}

/// Result of one host tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Nothing is animating.
    Idle,
    Running { frame: u32, total: u32 },
    /// The last frame was applied on this tick.
    Finished,
}

#[derive(Clone, Debug)]
struct Track {
    record: usize,
    target: Rect,
    start_frame: f64,
    /// Track this segment sits on (stacked wave).
    follows: Option<usize>,
}

impl Track {
    fn rises(&self, baseline: f64) -> bool {
        self.target.bottom() <= baseline + EPS
    }
}

/// One in-flight animation over the drawn bars.
#[derive(Clone, Debug)]
pub struct AnimationRun {
    effect: Effect,
    frame: u32,
    total_frames: u32,
    generation: u64,
    baseline: f64,
    tracks: Vec<Track>,
    backfaces: Vec<Rect>,
}

impl AnimationRun {
    /// Grow every bar (and stacked backface) from the baseline.
    pub fn grow(records: &[ShapeRecord], backfaces: &[Backface], baseline: f64, frames: Option<u32>, generation: u64) -> Self {
        let tracks = bar_tracks(records)
            .map(|(record, target)| Track { record, target, start_frame: 0.0, follows: None })
            .collect();
        Self {
            effect: Effect::Grow,
            frame: 0,
            total_frames: frames_or_default(frames, Effect::Grow),
            generation,
            baseline,
            tracks,
            backfaces: backfaces.iter().map(|b| b.rect).collect(),
        }
    }

    /// Raise the bars one after another, left to right.
    ///
    /// With `stacked` set, every segment after the first in a group sits on
    /// the current top of the segment below it.
    pub fn wave(records: &[ShapeRecord], baseline: f64, stacked: bool, frames: Option<u32>, generation: u64) -> Self {
        let total_frames = frames_or_default(frames, Effect::Wave);
        let bars: Vec<(usize, Rect)> = bar_tracks(records).collect();
        let n = bars.len();
        let stagger = if n > 1 { (total_frames as f64 / 2.0) / (n - 1) as f64 } else { 0.0 };

        let mut tracks: Vec<Track> = Vec::with_capacity(n);
        for (i, (record, target)) in bars.into_iter().enumerate() {
            let follows = match tracks.last() {
                Some(prev) if stacked && records[prev.record].dataset_index == records[record].dataset_index => Some(i - 1),
                _ => None,
            };
            tracks.push(Track { record, target, start_frame: stagger * i as f64, follows });
        }
        Self {
            effect: Effect::Wave,
            frame: 0,
            total_frames,
            generation,
            baseline,
            tracks,
            backfaces: Vec::new(),
        }
    }

    pub fn effect(&self) -> Effect { self.effect }
    pub fn generation(&self) -> u64 { self.generation }
    pub fn total_frames(&self) -> u32 { self.total_frames }

    /// Next frame to be applied.
    pub fn frame(&self) -> u32 { self.frame }

    pub fn is_finished(&self) -> bool { self.frame > self.total_frames }

    /// Compute the next frame; `None` once the final frame has been produced.
    pub fn step(&mut self) -> Option<FrameUpdate> {
        if self.is_finished() {
            return None;
        }
        let f = self.frame;
        let update = match self.effect {
            Effect::Grow => self.grow_frame(f),
            Effect::Wave => self.wave_frame(f),
        };
        self.frame += 1;
        Some(update)
    }

    fn grow_frame(&self, f: u32) -> FrameUpdate {
        let m = grow_multiplier(f, self.total_frames);
        let base = self.baseline;
        // Scaling about the baseline keeps stacked segments tiled
        let scale = |r: &Rect| Rect::new(r.x, base + m * (r.y - base), r.width, m * r.height);
        FrameUpdate {
            frame: f,
            shapes: self.tracks.iter().map(|t| (t.record, scale(&t.target))).collect(),
            backfaces: self.backfaces.iter().enumerate().map(|(i, r)| (i, scale(r))).collect(),
            finished: f >= self.total_frames,
        }
    }

    fn wave_frame(&self, f: u32) -> FrameUpdate {
        let per_bar = self.total_frames as f64 / 3.0;
        let frame = f as f64;
        let mut shapes: Vec<(usize, Rect)> = Vec::with_capacity(self.tracks.len());

        for t in &self.tracks {
            let h = t.target.height;
            let height = if frame > t.start_frame {
                ((frame - t.start_frame) / per_bar * h).min(h)
            } else {
                0.0
            };
            let y = match t.follows {
                Some(prev) => shapes[prev].1.y - height,
                None if t.rises(self.baseline) => self.baseline - height,
                None => t.target.y,
            };
            shapes.push((t.record, Rect::new(t.target.x, y, t.target.width, height)));
        }
        FrameUpdate { frame: f, shapes, backfaces: Vec::new(), finished: f >= self.total_frames }
    }
}

fn frames_or_default(frames: Option<u32>, effect: Effect) -> u32 {
    frames.filter(|f| *f > 0).unwrap_or_else(|| effect.default_frames())
}

fn bar_tracks(records: &[ShapeRecord]) -> impl Iterator<Item = (usize, Rect)> + '_ {
    records.iter().enumerate().filter_map(|(i, r)| r.rect().map(|rect| (i, *rect)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Paint;
    use crate::geometry::Geometry;

    fn record(group: usize, index: usize, rect: Rect) -> ShapeRecord {
        ShapeRecord {
            id: None,
            geometry: Geometry::Rect(rect),
            dataset_index: group,
            datapoint_index: index,
            sequential_index: group * 10 + index,
            value: rect.height,
            fill: Paint::BLACK,
        }
    }

    fn drain(run: &mut AnimationRun) -> Vec<FrameUpdate> {
        std::iter::from_fn(|| run.step()).collect()
    }

    #[test]
    fn multiplier_runs_from_zero_to_one() {
        assert_eq!(grow_multiplier(0, 30), 0.0);
        assert!((grow_multiplier(30, 30) - 1.0).abs() < 1e-12);
        let mut prev = 0.0;
        for f in 0..=30 {
            let m = grow_multiplier(f, 30);
            assert!(m >= prev);
            prev = m;
        }
    }

    #[test]
    fn grow_emits_frames_zero_through_total_and_lands_on_target() {
        let target = Rect::new(10.0, 50.0, 20.0, 165.0);
        let mut run = AnimationRun::grow(&[record(0, 0, target)], &[], 215.0, Some(10), 1);
        let frames = drain(&mut run);
        assert_eq!(frames.len(), 11);
        assert_eq!(frames.iter().filter(|u| u.finished).count(), 1);
        assert!(frames[10].finished);
        assert_eq!(frames[0].shapes[0].1.height, 0.0);
        assert_eq!(frames[0].shapes[0].1.y, 215.0);
        let last = frames[10].shapes[0].1;
        assert!((last.y - target.y).abs() < 1e-9 && (last.height - target.height).abs() < 1e-9);
        assert!(run.step().is_none());
    }

    #[test]
    fn grow_keeps_bottoms_on_the_baseline_and_hanging_bars_on_top() {
        let up = Rect::new(0.0, 35.0, 10.0, 90.0);
        let down = Rect::new(20.0, 125.0, 10.0, 45.0);
        let mut run = AnimationRun::grow(&[record(0, 0, up), record(1, 0, down)], &[], 125.0, None, 1);
        assert_eq!(run.total_frames(), GROW_FRAMES);
        for u in drain(&mut run) {
            assert!((u.shapes[0].1.bottom() - 125.0).abs() < 1e-9);
            assert!((u.shapes[1].1.y - 125.0).abs() < 1e-9);
        }
    }

    #[test]
    fn grow_keeps_stacks_tiled_and_backfaces_following() {
        let a = Rect::new(0.0, 155.0, 10.0, 60.0);
        let b = Rect::new(0.0, 95.0, 10.0, 60.0);
        let face = Backface { id: None, group: 0, rect: Rect::new(0.0, 95.0, 10.0, 120.0) };
        let mut run = AnimationRun::grow(&[record(0, 0, a), record(0, 1, b)], &[face], 215.0, Some(5), 1);
        for u in drain(&mut run) {
            let (s0, s1) = (u.shapes[0].1, u.shapes[1].1);
            assert!((s1.bottom() - s0.y).abs() < 1e-9);
            assert!((u.backfaces[0].1.height - (s0.height + s1.height)).abs() < 1e-9);
        }
    }

    #[test]
    fn wave_staggers_bars_and_finishes_full_height() {
        let recs: Vec<ShapeRecord> = (0..4).map(|i| record(i, 0, Rect::new(i as f64 * 20.0, 115.0, 10.0, 100.0))).collect();
        let mut run = AnimationRun::wave(&recs, 215.0, false, None, 1);
        let frames = drain(&mut run);
        assert_eq!(frames.len(), WAVE_FRAMES as usize + 1);
        // frame 0 holds everything flat
        assert!(frames[0].shapes.iter().all(|(_, r)| r.height == 0.0));
        // the last bar starts at frames/2
        assert_eq!(frames[30].shapes[3].1.height, 0.0);
        assert!(frames[31].shapes[3].1.height > 0.0);
        assert!(frames[1].shapes[0].1.height > 0.0);
        let last = frames.last().unwrap();
        assert!(last.finished);
        for (i, r) in &last.shapes {
            assert_eq!(*r, recs[*i].rect().copied().unwrap());
        }
    }

    #[test]
    fn wave_stacks_segments_on_the_one_below() {
        let recs = vec![
            record(0, 0, Rect::new(0.0, 155.0, 10.0, 60.0)),
            record(0, 1, Rect::new(0.0, 95.0, 10.0, 60.0)),
        ];
        let mut run = AnimationRun::wave(&recs, 215.0, true, Some(12), 1);
        for u in drain(&mut run) {
            let (s0, s1) = (u.shapes[0].1, u.shapes[1].1);
            assert!((s1.bottom() - s0.y).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_frames_use_the_default() {
        let run = AnimationRun::wave(&[], 0.0, false, Some(0), 1);
        assert_eq!(run.total_frames(), WAVE_FRAMES);
    }
}
