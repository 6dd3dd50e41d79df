// File: crates/graphite-core/src/geometry.rs
// Summary: Geometry records for bars and points, plus pixel-rect helpers.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    /// Square of side `size` centred on (cx, cy).
    pub fn centered(cx: f64, cy: f64, size: f64) -> Self {
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }
    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }
    /// Edges are inclusive so zero-height bars can still be hit.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Geometry of one rendered primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Rect(Rect),
    Point { x: f64, y: f64, size: f64 },
}

impl Geometry {
    /// Interactive footprint of the primitive.
    pub fn bounds(&self) -> Rect {
        match *self {
            Geometry::Rect(r) => r,
            Geometry::Point { x, y, size } => Rect::centered(x, y, size),
        }
    }

    pub fn as_rect(&self) -> Option<&Rect> {
        match self {
            Geometry::Rect(r) => Some(r),
            Geometry::Point { .. } => None,
        }
    }

    pub fn as_rect_mut(&mut self) -> Option<&mut Rect> {
        match self {
            Geometry::Rect(r) => Some(r),
            Geometry::Point { .. } => None,
        }
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
