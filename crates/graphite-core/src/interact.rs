// File: crates/graphite-core/src/interact.rs
// Summary: Hit-testing, single highlight overlay and tooltip resolution.

use crate::backend::{Attr, Backend, PointerKind, ShapeId, ShapeKind};
use crate::color::Paint;
use crate::error::BackendError;
use crate::geometry::Rect;

/// Class tag carried by the highlight overlay shape.
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// Interactive shape registered during draw.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipTarget {
    /// The drawn mark (bar or point marker).
    pub shape: ShapeId,
    /// Transparent hit shape, when the mark has one (scatter points).
    pub hotspot_shape: Option<ShapeId>,
    pub hotspot: Rect,
    pub sequential_index: usize,
    pub dataset_index: usize,
    pub datapoint_index: usize,
    pub text: String,
}

impl TooltipTarget {
    pub fn matches(&self, id: ShapeId) -> bool {
        self.shape == id || self.hotspot_shape == Some(id)
    }
}

/// Shape id to tooltip target, in paint order.
#[derive(Clone, Debug, Default)]
pub struct DispatchTable {
    targets: Vec<TooltipTarget>,
}

impl DispatchTable {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, target: TooltipTarget) {
        self.targets.push(target);
    }

    pub fn len(&self) -> usize { self.targets.len() }
    pub fn is_empty(&self) -> bool { self.targets.is_empty() }
    pub fn clear(&mut self) { self.targets.clear(); }
    pub fn iter(&self) -> impl Iterator<Item = &TooltipTarget> { self.targets.iter() }

    /// Topmost target whose hotspot contains (x, y).
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&TooltipTarget> {
        self.targets.iter().rev().find(|t| t.hotspot.contains(x, y))
    }

    /// Target owning `id`, as the mark itself or as its hotspot.
    pub fn lookup(&self, id: ShapeId) -> Option<&TooltipTarget> {
        self.targets.iter().find(|t| t.matches(id))
    }

    /// Keep hotspots of animated bars in step with their geometry.
    pub fn update_mark(&mut self, shape: ShapeId, rect: Rect) {
        if let Some(t) = self.targets.iter_mut().find(|t| t.shape == shape && t.hotspot_shape.is_none()) {
            t.hotspot = rect;
        }
    }
}

/// A pointer event in chart pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn click(x: f64, y: f64) -> Self { Self { kind: PointerKind::Click, x, y } }
    pub fn mouse_move(x: f64, y: f64) -> Self { Self { kind: PointerKind::MouseMove, x, y } }
}

/// Tooltip shown for the highlighted shape; the host renders it.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub sequential_index: usize,
    pub dataset_index: usize,
    pub datapoint_index: usize,
    /// Anchor at the top centre of the hotspot.
    pub x: f64,
    pub y: f64,
}

impl From<&TooltipTarget> for Tooltip {
    fn from(t: &TooltipTarget) -> Self {
        Tooltip {
            text: t.text.clone(),
            sequential_index: t.sequential_index,
            dataset_index: t.dataset_index,
            datapoint_index: t.datapoint_index,
            x: t.hotspot.x + t.hotspot.width / 2.0,
            y: t.hotspot.y,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HighlightStyle {
    pub fill: Paint,
    pub stroke: Paint,
    pub linewidth: f64,
}

/// Outcome of one pointer interaction.
#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    /// Event kind does not show tooltips on this chart.
    Ignored,
    /// Same target as the active highlight; nothing changed.
    Unchanged(Tooltip),
    Shown(Tooltip),
    /// The event hit nothing and the highlight was removed.
    Cleared,
}

impl Interaction {
    pub fn tooltip(&self) -> Option<&Tooltip> {
        match self {
            Interaction::Unchanged(t) | Interaction::Shown(t) => Some(t),
            Interaction::Ignored | Interaction::Cleared => None,
        }
    }
}

/// At most one overlay exists at any time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted { overlay: ShapeId, target: ShapeId, tooltip: Tooltip },
}

impl HighlightState {
    pub fn is_active(&self) -> bool {
        matches!(self, HighlightState::Highlighted { .. })
    }

    pub fn target(&self) -> Option<ShapeId> {
        match self {
            HighlightState::Highlighted { target, .. } => Some(*target),
            HighlightState::Idle => None,
        }
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        match self {
            HighlightState::Highlighted { tooltip, .. } => Some(tooltip),
            HighlightState::Idle => None,
        }
    }

    /// Remove the overlay, if any.
    pub fn clear<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<(), BackendError> {
        if let HighlightState::Highlighted { overlay, .. } = std::mem::take(self) {
            match backend.remove_shape(overlay) {
                // already gone with a cleared surface
                Ok(()) | Err(BackendError::UnknownHandle(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Drop the state without touching the backend (the surface was cleared).
    pub fn forget(&mut self) {
        *self = HighlightState::Idle;
    }

    /// Replace any current overlay with one over `target`.
    pub fn show<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        target: &TooltipTarget,
        style: &HighlightStyle,
    ) -> Result<Tooltip, BackendError> {
        self.clear(backend)?;
        let r = target.hotspot;
        let overlay = backend.create_shape(
            ShapeKind::Rect,
            vec![
                Attr::X(r.x),
                Attr::Y(r.y),
                Attr::Width(r.width),
                Attr::Height(r.height),
                Attr::Fill(style.fill.clone()),
                Attr::Stroke(style.stroke.clone()),
                Attr::StrokeWidth(style.linewidth),
                Attr::Class(HIGHLIGHT_CLASS.into()),
            ],
        )?;
        let tooltip = Tooltip::from(target);
        *self = HighlightState::Highlighted { overlay, target: target.shape, tooltip: tooltip.clone() };
        Ok(tooltip)
    }

    /// Move the overlay with its bar while an animation resizes it.
    pub fn follow<B: Backend + ?Sized>(&mut self, backend: &mut B, shape: ShapeId, rect: Rect) -> Result<(), BackendError> {
        let HighlightState::Highlighted { overlay, target, tooltip } = self else {
            return Ok(());
        };
        if *target != shape {
            return Ok(());
        }
        backend.set_attribute(*overlay, Attr::Y(rect.y))?;
        backend.set_attribute(*overlay, Attr::Height(rect.height))?;
        tooltip.y = rect.y;
        Ok(())
    }

    /// Apply one interaction: `hit` is the target under the pointer, if any.
    pub fn interact<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        event: PointerKind,
        configured: PointerKind,
        hit: Option<&TooltipTarget>,
        style: &HighlightStyle,
    ) -> Result<Interaction, BackendError> {
        if event != configured {
            return Ok(Interaction::Ignored);
        }
        match hit {
            Some(t) if self.target() == Some(t.shape) => {
                Ok(Interaction::Unchanged(self.tooltip().cloned().unwrap_or_else(|| Tooltip::from(t))))
            }
            Some(t) => {
                tracing::debug!(shape = %t.shape, seq = t.sequential_index, "highlight");
                self.show(backend, t, style).map(Interaction::Shown)
            }
            None => {
                self.clear(backend)?;
                Ok(Interaction::Cleared)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Scene;

    fn target(shape: u64, rect: Rect, text: &str) -> TooltipTarget {
        TooltipTarget {
            shape: ShapeId(shape),
            hotspot_shape: None,
            hotspot: rect,
            sequential_index: shape as usize,
            dataset_index: 0,
            datapoint_index: 0,
            text: text.into(),
        }
    }

    fn style() -> HighlightStyle {
        HighlightStyle { fill: Paint::TRANSPARENT, stroke: Paint::BLACK, linewidth: 1.0 }
    }

    #[test]
    fn overlay_follows_its_target_only() {
        let mut scene = Scene::new();
        let mut state = HighlightState::Idle;
        let t = target(7, Rect::new(0.0, 50.0, 10.0, 10.0), "t");
        state.show(&mut scene, &t, &style()).unwrap();
        state.follow(&mut scene, ShapeId(8), Rect::new(0.0, 0.0, 10.0, 99.0)).unwrap();
        state.follow(&mut scene, ShapeId(7), Rect::new(0.0, 20.0, 10.0, 40.0)).unwrap();
        let overlay = scene.with_class(HIGHLIGHT_CLASS).next().unwrap();
        assert_eq!((overlay.attrs.y, overlay.attrs.height), (20.0, 40.0));
        assert_eq!(state.tooltip().map(|t| t.y), Some(20.0));
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut table = DispatchTable::new();
        table.insert(target(1, Rect::new(0.0, 0.0, 10.0, 10.0), "under"));
        table.insert(target(2, Rect::new(5.0, 5.0, 10.0, 10.0), "over"));
        assert_eq!(table.hit_test(7.0, 7.0).map(|t| t.text.as_str()), Some("over"));
        assert_eq!(table.hit_test(1.0, 1.0).map(|t| t.text.as_str()), Some("under"));
        assert!(table.hit_test(50.0, 50.0).is_none());
    }

    #[test]
    fn lookup_resolves_hotspot_ids() {
        let mut table = DispatchTable::new();
        let mut t = target(1, Rect::new(0.0, 0.0, 1.0, 1.0), "p");
        t.hotspot_shape = Some(ShapeId(9));
        table.insert(t);
        assert!(table.lookup(ShapeId(9)).is_some());
        assert!(table.lookup(ShapeId(1)).is_some());
        assert!(table.lookup(ShapeId(2)).is_none());
    }

    #[test]
    fn only_one_overlay_survives_any_sequence() {
        let mut scene = Scene::new();
        let a = target(100, Rect::new(0.0, 0.0, 10.0, 10.0), "a");
        let b = target(101, Rect::new(20.0, 0.0, 10.0, 10.0), "b");
        let mut state = HighlightState::Idle;
        let click = PointerKind::Click;

        let steps: [(PointerKind, Option<&TooltipTarget>); 6] =
            [(click, Some(&a)), (click, Some(&b)), (click, Some(&b)), (PointerKind::MouseMove, Some(&a)), (click, None), (click, Some(&a))];
        for (kind, hit) in steps {
            state.interact(&mut scene, kind, click, hit, &style()).unwrap();
            assert!(scene.with_class(HIGHLIGHT_CLASS).count() <= 1);
        }
        assert_eq!(state.target(), Some(a.shape));
        assert_eq!(scene.with_class(HIGHLIGHT_CLASS).count(), 1);
    }

    #[test]
    fn outcomes_follow_the_state_machine() {
        let mut scene = Scene::new();
        let a = target(100, Rect::new(0.0, 0.0, 10.0, 20.0), "a");
        let mut state = HighlightState::default();
        let click = PointerKind::Click;

        let shown = state.interact(&mut scene, click, click, Some(&a), &style()).unwrap();
        assert!(matches!(&shown, Interaction::Shown(t) if t.text == "a" && t.x == 5.0 && t.y == 0.0));
        let overlay = scene.with_class(HIGHLIGHT_CLASS).next().map(|n| n.id);

        let again = state.interact(&mut scene, click, click, Some(&a), &style()).unwrap();
        assert!(matches!(again, Interaction::Unchanged(_)));
        assert_eq!(scene.with_class(HIGHLIGHT_CLASS).next().map(|n| n.id), overlay);

        let ignored = state.interact(&mut scene, PointerKind::MouseMove, click, None, &style()).unwrap();
        assert_eq!(ignored, Interaction::Ignored);
        assert!(state.is_active());

        let cleared = state.interact(&mut scene, click, click, None, &style()).unwrap();
        assert_eq!(cleared, Interaction::Cleared);
        assert!(!state.is_active());
        assert_eq!(scene.len(), 0);
    }

    #[test]
    fn clearing_after_surface_reset_is_harmless() {
        let mut scene = Scene::new();
        let a = target(1, Rect::new(0.0, 0.0, 1.0, 1.0), "a");
        let mut state = HighlightState::Idle;
        state.show(&mut scene, &a, &style()).unwrap();
        scene.clear();
        assert!(state.clear(&mut scene).is_ok());
        assert_eq!(state, HighlightState::Idle);
    }
}
