// File: crates/graphite-core/src/layout/mod.rs
// Summary: Layout engine entry point; shape records shared by animation and hit-testing.

pub mod bar;
pub mod scatter;

use crate::backend::ShapeId;
use crate::color::Paint;
use crate::geometry::{Geometry, Rect};

pub use bar::{layout_bars, BarLayout, BarParams};
pub use scatter::{place_points, Marker, PlacedPoint, Polyline, ScatterLayout, ScatterParams};

/// One rendered primitive, in draw order.
///
/// For bars `dataset_index` is the data entry (outer index) and
/// `datapoint_index` the position inside a group (0 for flat entries).
/// For scatter they are the dataset and the point inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeRecord {
    /// Backend handle, assigned once the shape is drawn.
    pub id: Option<ShapeId>,
    pub geometry: Geometry,
    pub dataset_index: usize,
    pub datapoint_index: usize,
    pub sequential_index: usize,
    pub value: f64,
    pub fill: Paint,
}

impl ShapeRecord {
    pub fn rect(&self) -> Option<&Rect> {
        self.geometry.as_rect()
    }
}

/// Full-height shadow shape behind one stacked group.
#[derive(Clone, Debug, PartialEq)]
pub struct Backface {
    pub id: Option<ShapeId>,
    pub group: usize,
    pub rect: Rect,
}
