// File: crates/graphite-core/src/types.rs
// Summary: Shared types and constants (surface sizes, gutters, plot area).

/// Default surface width in pixels.
pub const WIDTH: f64 = 600.0;
/// Default surface height in pixels.
pub const HEIGHT: f64 = 250.0;

/// Pixel margins between the surface edge and the plot area.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gutters {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Gutters {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal gutter (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical gutter (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Gutters {
    fn default() -> Self {
        Self::new(35.0, 35.0, 35.0, 35.0)
    }
}

/// The surface size together with its gutters; every coordinate
/// computation in the core goes through one of these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub gutters: Gutters,
}

impl PlotArea {
    pub fn new(width: f64, height: f64, gutters: Gutters) -> Self {
        Self { width, height, gutters }
    }
    /// Width available to data (surface minus left/right gutters).
    pub fn graph_width(&self) -> f64 { self.width - self.gutters.hsum() }
    /// Height available to data (surface minus top/bottom gutters).
    pub fn graph_height(&self) -> f64 { self.height - self.gutters.vsum() }
    /// Pixel Y of the bottom edge of the plot.
    pub fn bottom(&self) -> f64 { self.height - self.gutters.bottom }
    /// Pixel X of the right edge of the plot.
    pub fn right(&self) -> f64 { self.width - self.gutters.right }
    pub fn is_empty(&self) -> bool {
        !(self.graph_width() > 0.0 && self.graph_height() > 0.0)
    }
}
