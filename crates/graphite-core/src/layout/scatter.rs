// File: crates/graphite-core/src/layout/scatter.rs
// Summary: Scatter placement: per-point style resolution, marker geometry and per-dataset polylines.

use crate::backend::{Attr, PathCommand, ShapeKind};
use crate::color::{resolve_paint, Fallback, Paint};
use crate::config::ChartOptions;
use crate::data::{ScatterData, ScatterPoint};
use crate::geometry::{clamp, Geometry};
use crate::layout::ShapeRecord;
use crate::mapper::{value_to_x, value_to_y};
use crate::scale::Scale;
use crate::types::PlotArea;

pub const DEFAULT_MARKER_SIZE: f64 = 7.0;

/// Marker drawn at a scatter point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    Cross,
    Plus,
    Triangle,
    Square,
    Circle,
    /// External image; placed once its dimensions are known.
    Image(String),
}

impl Marker {
    /// Parse a marker kind. Unknown kinds draw as a cross.
    pub fn parse(kind: &str) -> Self {
        if let Some(url) = kind.strip_prefix("image:") {
            return Marker::Image(url.to_string());
        }
        match kind {
            "cross" => Marker::Cross,
            "plus" => Marker::Plus,
            "triangle" => Marker::Triangle,
            "square" | "rect" => Marker::Square,
            "circle" | "dot" => Marker::Circle,
            other => {
                tracing::debug!(kind = other, "unknown marker kind, drawing a cross");
                Marker::Cross
            }
        }
    }

    /// Crosses and pluses are stroked; every other marker is filled.
    pub fn is_stroked(&self) -> bool {
        matches!(self, Marker::Cross | Marker::Plus)
    }
}

/// Backend shape kind and geometry attributes for `marker` centred on (x, y).
///
/// Image markers carry only their `href`; position and size are set when the
/// image has loaded.
pub fn marker_shape(marker: &Marker, x: f64, y: f64, size: f64) -> (ShapeKind, Vec<Attr>) {
    let h = size / 2.0;
    match marker {
        Marker::Cross => (
            ShapeKind::Path,
            vec![Attr::Path(vec![
                PathCommand::MoveTo(x - h, y - h),
                PathCommand::LineTo(x + h, y + h),
                PathCommand::MoveTo(x + h, y - h),
                PathCommand::LineTo(x - h, y + h),
            ])],
        ),
        Marker::Plus => (
            ShapeKind::Path,
            vec![Attr::Path(vec![
                PathCommand::MoveTo(x - h, y),
                PathCommand::LineTo(x + h, y),
                PathCommand::MoveTo(x, y - h),
                PathCommand::LineTo(x, y + h),
            ])],
        ),
        Marker::Triangle => (
            ShapeKind::Path,
            vec![Attr::Path(vec![
                PathCommand::MoveTo(x - h, y + h),
                PathCommand::LineTo(x, y - h),
                PathCommand::LineTo(x + h, y + h),
                PathCommand::Close,
            ])],
        ),
        Marker::Square => (
            ShapeKind::Rect,
            vec![Attr::X(x - h), Attr::Y(y - h), Attr::Width(size), Attr::Height(size)],
        ),
        Marker::Circle => (ShapeKind::Circle, vec![Attr::Cx(x), Attr::Cy(y), Attr::R(h)]),
        Marker::Image(url) => (ShapeKind::Image, vec![Attr::Href(url.clone())]),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPoint {
    pub record: ShapeRecord,
    pub marker: Marker,
    pub color: Paint,
    pub opacity: f64,
    pub tooltip: Option<String>,
}

impl PlacedPoint {
    pub fn center(&self) -> (f64, f64) {
        match self.record.geometry {
            Geometry::Point { x, y, .. } => (x, y),
            Geometry::Rect(r) => (r.x + r.width / 2.0, r.y + r.height / 2.0),
        }
    }

    pub fn size(&self) -> f64 {
        match self.record.geometry {
            Geometry::Point { size, .. } => size,
            Geometry::Rect(r) => r.width.max(r.height),
        }
    }
}

/// Connecting line through one dataset's placed points, in data order.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub dataset: usize,
    pub points: Vec<(f64, f64)>,
    pub color: Paint,
    pub width: f64,
}

#[derive(Clone, Debug)]
pub struct ScatterParams<'a> {
    pub area: &'a PlotArea,
    pub scale: &'a Scale,
    pub x_min: f64,
    pub x_max: f64,
    pub options: &'a ChartOptions,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterLayout {
    pub points: Vec<PlacedPoint>,
    pub lines: Vec<Polyline>,
}

/// Place every scatter point.
///
/// Style resolution runs per point, then per dataset, then the global
/// default, then the fixed fallback (cross, size 7, black, opaque). Points
/// outside either domain are skipped but still consume a sequential index.
pub fn place_points(data: &ScatterData, p: &ScatterParams<'_>) -> ScatterLayout {
    let opts = p.options;
    let palette = opts.palette(false);
    let mut out = ScatterLayout::default();
    let mut seq = 0usize;

    for (d, dataset) in data.datasets.iter().enumerate() {
        let mut line_points = Vec::new();
        for (i, point) in dataset.iter().enumerate() {
            let this_seq = seq;
            seq += 1;
            let Some((x, y)) = position(point, p) else {
                tracing::trace!(dataset = d, index = i, "scatter point skipped: outside domain");
                continue;
            };

            let kind = point
                .kind
                .clone()
                .or_else(|| opts.tickmarks_style.get(d))
                .unwrap_or_else(|| "cross".to_string());
            let size = point
                .size
                .or_else(|| opts.tickmarks_size.get(d))
                .filter(|s| s.is_finite() && *s >= 0.0)
                .unwrap_or(DEFAULT_MARKER_SIZE);
            let color = resolve_paint(
                &[point.color.as_deref(), palette.get(d).map(String::as_str), palette.first().map(String::as_str)],
                p.area,
                Fallback::Black,
            );
            let opacity = clamp(point.opacity.filter(|o| o.is_finite()).unwrap_or(1.0), 0.0, 1.0);
            let tooltip = point
                .tooltip
                .clone()
                .filter(|t| !t.is_empty())
                .or_else(|| opts.tooltip(this_seq).map(str::to_string));

            line_points.push((x, y));
            out.points.push(PlacedPoint {
                record: ShapeRecord {
                    id: None,
                    geometry: Geometry::Point { x, y, size },
                    dataset_index: d,
                    datapoint_index: i,
                    sequential_index: this_seq,
                    value: point.y.unwrap_or_default(),
                    fill: color.clone(),
                },
                marker: Marker::parse(&kind),
                color,
                opacity,
                tooltip,
            });
        }

        if opts.line.get(d).unwrap_or(false) && line_points.len() >= 2 {
            let line_colors = opts.line_colors.as_deref().unwrap_or(&[]);
            let color = resolve_paint(
                &[line_colors.get(d).map(String::as_str), line_colors.first().map(String::as_str)],
                p.area,
                Fallback::Black,
            );
            let width = opts.line_linewidth.get(d).unwrap_or(1.0);
            out.lines.push(Polyline { dataset: d, points: line_points, color, width });
        }
    }
    out
}

fn position(point: &ScatterPoint, p: &ScatterParams<'_>) -> Option<(f64, f64)> {
    let x = value_to_x(point.x?, p.x_min, p.x_max, p.area)?;
    let y = value_to_y(point.y?, p.scale, p.area)?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::config::PerDataset;
    use crate::scale::{compute_scale, ScaleOptions};
    use crate::types::Gutters;

    fn run(data: &ScatterData, opts: &ChartOptions) -> ScatterLayout {
        let area = PlotArea::new(600.0, 250.0, Gutters::default());
        let scale = compute_scale(&data.y_values(), &ScaleOptions::default());
        let x_max = data.max_x().unwrap_or(1.0);
        let p = ScatterParams { area: &area, scale: &scale, x_min: 0.0, x_max, options: opts };
        place_points(data, &p)
    }

    #[test]
    fn resolves_styles_from_point_then_dataset_then_fallback() {
        let data = ScatterData::many(vec![
            vec![ScatterPoint::new(1.0, 2.0).kind("circle").size(10.0).color("red"), ScatterPoint::new(2.0, 3.0)],
            vec![ScatterPoint::new(4.0, 5.0)],
        ]);
        let opts = ChartOptions {
            tickmarks_style: PerDataset::Each(vec!["square".into()]),
            tickmarks_size: PerDataset::Each(vec![4.0]),
            colors: Some(vec!["blue".into()]),
            ..ChartOptions::default()
        };
        let out = run(&data, &opts);
        assert_eq!(out.points.len(), 3);
        let first = &out.points[0];
        assert_eq!((first.marker.clone(), first.size()), (Marker::Circle, 10.0));
        assert_eq!(first.color, Paint::Solid(Rgba::rgb(255, 0, 0)));
        let second = &out.points[1];
        assert_eq!((second.marker.clone(), second.size()), (Marker::Square, 4.0));
        assert_eq!(second.color, Paint::Solid(Rgba::rgb(0, 0, 255)));
        let third = &out.points[2];
        assert_eq!((third.marker.clone(), third.size()), (Marker::Cross, DEFAULT_MARKER_SIZE));
        assert_eq!(third.color, Paint::Solid(Rgba::rgb(0, 0, 255)));
        assert_eq!(third.opacity, 1.0);
    }

    #[test]
    fn maps_points_into_the_plot() {
        let data = ScatterData::single(vec![ScatterPoint::new(0.0, 0.0), ScatterPoint::new(10.0, 10.0)]);
        let out = run(&data, &ChartOptions::default());
        assert_eq!(out.points[0].center(), (35.0, 215.0));
        assert_eq!(out.points[1].center(), (565.0, 35.0));
    }

    #[test]
    fn skipped_points_consume_sequence() {
        let data = ScatterData::single(vec![
            ScatterPoint::new(1.0, -4.0),
            ScatterPoint { x: None, y: Some(1.0), ..ScatterPoint::default() },
            ScatterPoint::new(2.0, 3.0),
        ]);
        let opts = ChartOptions { tooltips: Some(vec![Some("a".into()), Some("b".into()), Some("c".into())]), ..ChartOptions::default() };
        let out = run(&data, &opts);
        assert_eq!(out.points.len(), 1);
        assert_eq!(out.points[0].record.sequential_index, 2);
        assert_eq!(out.points[0].tooltip.as_deref(), Some("c"));
    }

    #[test]
    fn point_tooltip_wins_and_opacity_is_clamped() {
        let data = ScatterData::single(vec![ScatterPoint::new(1.0, 1.0).tooltip("mine").opacity(3.0)]);
        let opts = ChartOptions { tooltips: Some(vec![Some("global".into())]), ..ChartOptions::default() };
        let out = run(&data, &opts);
        assert_eq!(out.points[0].tooltip.as_deref(), Some("mine"));
        assert_eq!(out.points[0].opacity, 1.0);
    }

    #[test]
    fn lines_follow_data_order() {
        let data = ScatterData::many(vec![
            vec![ScatterPoint::new(3.0, 1.0), ScatterPoint::new(1.0, 2.0), ScatterPoint::new(2.0, 3.0)],
            vec![ScatterPoint::new(1.0, 1.0), ScatterPoint::new(2.0, 2.0)],
        ]);
        let opts = ChartOptions {
            line: PerDataset::Each(vec![true, false]),
            line_colors: Some(vec!["#00f".into()]),
            ..ChartOptions::default()
        };
        let out = run(&data, &opts);
        assert_eq!(out.lines.len(), 1);
        let line = &out.lines[0];
        assert_eq!(line.points.len(), 3);
        assert!(line.points[0].0 > line.points[1].0);
        assert_eq!(line.color, Paint::Solid(Rgba::rgb(0, 0, 255)));
    }

    #[test]
    fn marker_kinds_and_geometry() {
        assert_eq!(Marker::parse("dot"), Marker::Circle);
        assert_eq!(Marker::parse("rect"), Marker::Square);
        assert_eq!(Marker::parse("star"), Marker::Cross);
        assert_eq!(Marker::parse("image:/a.png"), Marker::Image("/a.png".into()));

        let (kind, attrs) = marker_shape(&Marker::Triangle, 10.0, 10.0, 4.0);
        assert_eq!(kind, ShapeKind::Path);
        assert_eq!(
            attrs,
            vec![Attr::Path(vec![
                PathCommand::MoveTo(8.0, 12.0),
                PathCommand::LineTo(10.0, 8.0),
                PathCommand::LineTo(12.0, 12.0),
                PathCommand::Close,
            ])]
        );
        let (kind, attrs) = marker_shape(&Marker::Circle, 10.0, 10.0, 4.0);
        assert_eq!(kind, ShapeKind::Circle);
        assert_eq!(attrs[2], Attr::R(2.0));
        let (kind, attrs) = marker_shape(&Marker::Image("/a.png".into()), 0.0, 0.0, 7.0);
        assert_eq!((kind, attrs.len()), (ShapeKind::Image, 1));
    }
}
