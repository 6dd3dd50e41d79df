// File: crates/graphite-core/src/mapper.rs
// Summary: Coordinate mapper; linear value-to-pixel transforms with out-of-domain sentinels.

use crate::scale::Scale;
use crate::types::PlotArea;

/// Pixel Y for `value`, or `None` when it lies outside `[scale.min, scale.max]`.
///
/// Larger values map to smaller pixel Y (origin top-left).
#[inline]
pub fn value_to_y(value: f64, scale: &Scale, area: &PlotArea) -> Option<f64> {
    if !value.is_finite() || value < scale.min || value > scale.max {
        return None;
    }
    let span = scale.span();
    let frac = if span > 0.0 { (value - scale.min) / span } else { 0.0 };
    Some(area.bottom() - frac * area.graph_height())
}

/// Pixel X for `value` in the `[domain_min, domain_max]` domain, or `None`
/// when it lies outside.
#[inline]
pub fn value_to_x(value: f64, domain_min: f64, domain_max: f64, area: &PlotArea) -> Option<f64> {
    if !value.is_finite() || value < domain_min || value > domain_max {
        return None;
    }
    let span = domain_max - domain_min;
    let frac = if span > 0.0 { (value - domain_min) / span } else { 0.0 };
    Some(area.gutters.left + frac * area.graph_width())
}

/// Pixel Y that bars grow from: the zero line when zero is inside the
/// scale, otherwise the nearer scale bound.
pub fn baseline_y(scale: &Scale, area: &PlotArea) -> f64 {
    let anchor = 0f64.clamp(scale.min, scale.max);
    value_to_y(anchor, scale, area).unwrap_or_else(|| area.bottom())
}
