// File: crates/graphite-core/src/layout/bar.rs
// Summary: Bar geometry for single, grouped and stacked layouts (mirrored scales included).

use crate::color::Paint;
use crate::data::{BarData, BarEntry, Grouping};
use crate::geometry::{Geometry, Rect};
use crate::layout::{Backface, ShapeRecord};
use crate::mapper::{baseline_y, value_to_y};
use crate::scale::Scale;
use crate::types::PlotArea;

/// Inputs shared by every bar in one layout pass.
#[derive(Clone, Debug)]
pub struct BarParams<'a> {
    pub area: &'a PlotArea,
    pub scale: &'a Scale,
    pub grouping: Grouping,
    pub hmargin: f64,
    pub hmargin_grouped: f64,
    /// Emit one backface per stacked group.
    pub shadow: bool,
    /// Resolved palette; never empty.
    pub colors: &'a [Paint],
    pub colors_sequential: bool,
}

impl BarParams<'_> {
    /// Color for a flat bar or a segment at `inner` inside its group.
    fn color(&self, seq: usize, inner: Option<usize>) -> Paint {
        let last = || self.colors[self.colors.len() - 1].clone();
        let cycled = |j: usize| self.colors[j % self.colors.len()].clone();
        match (self.colors_sequential, inner) {
            (true, _) => self.colors.get(seq).cloned().unwrap_or_else(last),
            (false, None) => self.colors[0].clone(),
            (false, Some(j)) => cycled(j),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BarLayout {
    pub records: Vec<ShapeRecord>,
    pub backfaces: Vec<Backface>,
}

/// How the scale sits relative to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScaleSign {
    /// `min >= 0`: bars rise from the minimum.
    NonNegative,
    /// `min < 0 < max`: bars rise or hang from the zero line.
    Straddling,
    /// `max <= 0`: bars hang from the maximum (top of the plot).
    NonPositive,
}

fn scale_sign(scale: &Scale) -> ScaleSign {
    if scale.min >= 0.0 {
        ScaleSign::NonNegative
    } else if scale.max > 0.0 {
        ScaleSign::Straddling
    } else {
        ScaleSign::NonPositive
    }
}

/// Top edge and height of a bar for `value`, or `None` when the value is
/// missing or outside the scale.
///
/// The height is the distance of the value from the nearer scale bound (or
/// from zero when the scale straddles it).
pub fn bar_extent(value: f64, scale: &Scale, area: &PlotArea) -> Option<(f64, f64)> {
    let y_value = value_to_y(value, scale, area)?;
    let span = scale.span();
    let plot_h = area.graph_height();
    match scale_sign(scale) {
        ScaleSign::NonNegative => {
            let height = (value - scale.min) / span * plot_h;
            Some((area.bottom() - height, height))
        }
        ScaleSign::Straddling => {
            let height = value.abs() / span * plot_h;
            let zero = value_to_y(0.0, scale, area)?;
            Some((if value < 0.0 { zero } else { y_value }, height))
        }
        ScaleSign::NonPositive => {
            let height = (scale.max - value) / span * plot_h;
            Some((area.gutters.top, height))
        }
    }
}

/// Lay out every bar of `data`.
///
/// Missing, non-finite and out-of-domain values produce no record, but the
/// sequential index still advances so colors and tooltips stay aligned.
pub fn layout_bars(data: &BarData, p: &BarParams<'_>) -> BarLayout {
    let mut out = BarLayout::default();
    if data.is_empty() {
        return out;
    }
    let area = p.area;
    let segment = area.graph_width() / data.len() as f64;
    let mut seq = 0usize;

    for (i, entry) in data.entries.iter().enumerate() {
        match entry {
            BarEntry::Value(v) => {
                let width = segment - 2.0 * p.hmargin;
                let x = area.gutters.left + p.hmargin + segment * i as f64;
                match v.and_then(|v| bar_extent(v, p.scale, area).map(|e| (v, e))) {
                    Some((value, (y, height))) => out.records.push(ShapeRecord {
                        id: None,
                        geometry: Geometry::Rect(Rect::new(x, y, width, height)),
                        dataset_index: i,
                        datapoint_index: 0,
                        sequential_index: seq,
                        value,
                        fill: p.color(seq, None),
                    }),
                    None => tracing::trace!(index = i, "bar skipped: missing or out of domain"),
                }
                seq += 1;
            }
            BarEntry::Group(group) => match p.grouping {
                Grouping::Grouped => {
                    layout_grouped(group, i, segment, &mut seq, p, &mut out);
                }
                Grouping::Stacked => {
                    layout_stacked(group, i, segment, &mut seq, p, &mut out);
                }
            },
        }
    }
    out
}

fn layout_grouped(
    group: &[Option<f64>],
    i: usize,
    segment: f64,
    seq: &mut usize,
    p: &BarParams<'_>,
    out: &mut BarLayout,
) {
    let n = group.len().max(1) as f64;
    let inner = segment - 2.0 * p.hmargin;
    let width = (inner - (n - 1.0) * p.hmargin_grouped) / n;

    for (j, v) in group.iter().enumerate() {
        let x = p.area.gutters.left + segment * i as f64 + width * j as f64 + p.hmargin + j as f64 * p.hmargin_grouped;
        match v.and_then(|v| bar_extent(v, p.scale, p.area).map(|e| (v, e))) {
            Some((value, (y, height))) => out.records.push(ShapeRecord {
                id: None,
                geometry: Geometry::Rect(Rect::new(x, y, width, height)),
                dataset_index: i,
                datapoint_index: j,
                sequential_index: *seq,
                value,
                fill: p.color(*seq, Some(j)),
            }),
            None => tracing::trace!(group = i, index = j, "grouped bar skipped"),
        }
        *seq += 1;
    }
}

fn layout_stacked(
    group: &[Option<f64>],
    i: usize,
    segment: f64,
    seq: &mut usize,
    p: &BarParams<'_>,
    out: &mut BarLayout,
) {
    let area = p.area;
    let scale = p.scale;
    let span = scale.span();
    let plot_h = area.graph_height();
    let width = segment - 2.0 * p.hmargin;
    let x = area.gutters.left + segment * i as f64 + p.hmargin;
    let base = baseline_y(scale, area);
    let base_value = 0f64.clamp(scale.min, scale.max);
    let tolerance = span * 1e-9;

    let mut cursor = base;
    let mut reached = base_value;
    for (j, v) in group.iter().enumerate() {
        let value = match v {
            Some(v) if v.is_finite() => *v,
            _ => {
                tracing::trace!(group = i, index = j, "stacked segment skipped: missing value");
                *seq += 1;
                continue;
            }
        };
        reached += value.abs();
        if reached > scale.max + tolerance {
            tracing::trace!(group = i, index = j, "stacked segment skipped: above scale");
            *seq += 1;
            continue;
        }
        let height = value.abs() / span * plot_h;
        cursor -= height;
        out.records.push(ShapeRecord {
            id: None,
            geometry: Geometry::Rect(Rect::new(x, cursor, width, height)),
            dataset_index: i,
            datapoint_index: j,
            sequential_index: *seq,
            value,
            fill: p.color(*seq, Some(j)),
        });
        *seq += 1;
    }

    // sized from the emitted segments so it never outgrows the stack
    if p.shadow && !group.is_empty() {
        let full = base - cursor;
        out.backfaces.push(Backface { id: None, group: i, rect: Rect::new(x, cursor, width, full) });
    }
}
