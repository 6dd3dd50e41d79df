// File: crates/graphite-core/src/decor.rs
// Summary: Background grid, axes, scale/axis labels, title and value labels emitted as backend shapes.

use crate::backend::{Attr, Backend, HAlign, PathCommand, ShapeId, ShapeKind, VAlign};
use crate::color::{resolve_paint, Fallback, Paint};
use crate::config::ChartOptions;
use crate::data::{BarData, BarEntry, Grouping};
use crate::error::BackendError;
use crate::layout::ShapeRecord;
use crate::mapper::{baseline_y, value_to_y};
use crate::scale::Scale;
use crate::types::PlotArea;

pub const GRID_CLASS: &str = "grid";
pub const AXIS_CLASS: &str = "axis";
pub const LABEL_CLASS: &str = "label";
pub const TITLE_CLASS: &str = "title";
pub const LABEL_ABOVE_CLASS: &str = "label-above";

/// Evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// How a text shape is anchored and painted.
#[derive(Clone, Debug)]
pub struct TextStyle<'c> {
    pub halign: HAlign,
    pub valign: VAlign,
    pub size: f64,
    pub color: Paint,
    pub class: &'c str,
}

impl TextStyle<'_> {
    /// Emit `text` anchored at `(x, y)`.
    pub fn emit<B: Backend + ?Sized>(&self, b: &mut B, text: &str, (x, y): (f64, f64)) -> Result<ShapeId, BackendError> {
        b.create_shape(
            ShapeKind::Text,
            vec![
                Attr::Text(text.to_string()),
                Attr::X(x),
                Attr::Y(y),
                Attr::FontSize(self.size),
                Attr::HAlign(self.halign),
                Attr::VAlign(self.valign),
                Attr::Fill(self.color.clone()),
                Attr::Class(self.class.into()),
            ],
        )
    }
}

/// Shared inputs of the decoration passes.
pub struct Decor<'a> {
    pub area: &'a PlotArea,
    pub scale: &'a Scale,
    pub options: &'a ChartOptions,
    /// Number of x segments (bars: data entries).
    pub segments: usize,
}

impl Decor<'_> {
    fn paint(&self, spec: &str) -> Paint {
        resolve_paint(&[Some(spec)], self.area, Fallback::Black)
    }

    fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Attr {
        Attr::Path(vec![PathCommand::MoveTo(x1, y1), PathCommand::LineTo(x2, y2)])
    }

    fn segment_edges(&self) -> Vec<f64> {
        linspace(self.area.gutters.left, self.area.right(), self.segments.max(1) + 1)
    }

    /// Background fill, grid lines and border.
    pub fn background<B: Backend + ?Sized>(&self, b: &mut B) -> Result<(), BackendError> {
        let a = self.area;
        let o = self.options;
        if let Some(bg) = &o.background_color {
            let fill = resolve_paint(&[Some(bg)], a, Fallback::Transparent);
            b.create_shape(
                ShapeKind::Rect,
                vec![
                    Attr::X(a.gutters.left),
                    Attr::Y(a.gutters.top),
                    Attr::Width(a.graph_width()),
                    Attr::Height(a.graph_height()),
                    Attr::Fill(fill),
                    Attr::Class(GRID_CLASS.into()),
                ],
            )?;
        }
        if !o.background_grid {
            return Ok(());
        }

        let stroke = self.paint(&o.background_grid_color);
        let grid_line = |attr: Attr| {
            vec![attr, Attr::Stroke(stroke.clone()), Attr::StrokeWidth(o.background_grid_linewidth), Attr::Class(GRID_CLASS.into())]
        };

        if o.background_grid_hlines {
            for label in &self.scale.labels {
                if let Some(y) = value_to_y(label.value, self.scale, a) {
                    b.create_shape(ShapeKind::Path, grid_line(self.line(a.gutters.left, y, a.right(), y)))?;
                }
            }
        }
        if o.background_grid_vlines {
            for x in self.segment_edges() {
                b.create_shape(ShapeKind::Path, grid_line(self.line(x, a.gutters.top, x, a.bottom())))?;
            }
        }
        if o.background_grid_border {
            b.create_shape(
                ShapeKind::Rect,
                vec![
                    Attr::X(a.gutters.left),
                    Attr::Y(a.gutters.top),
                    Attr::Width(a.graph_width()),
                    Attr::Height(a.graph_height()),
                    Attr::Fill(Paint::TRANSPARENT),
                    Attr::Stroke(stroke.clone()),
                    Attr::StrokeWidth(o.background_grid_linewidth),
                    Attr::Class(GRID_CLASS.into()),
                ],
            )?;
        }
        Ok(())
    }

    /// X axis along the baseline and Y axis along the left gutter, with tick marks.
    pub fn axes<B: Backend + ?Sized>(&self, b: &mut B) -> Result<(), BackendError> {
        let a = self.area;
        let o = self.options;
        let left = a.gutters.left;

        if o.xaxis {
            let stroke = self.paint(&o.xaxis_color);
            let y = baseline_y(self.scale, a);
            let mut path = vec![PathCommand::MoveTo(left, y), PathCommand::LineTo(a.right(), y)];
            if o.xaxis_tickmarks {
                for x in self.segment_edges() {
                    path.push(PathCommand::MoveTo(x, y));
                    path.push(PathCommand::LineTo(x, y + o.xaxis_tickmarks_length));
                }
            }
            b.create_shape(ShapeKind::Path, vec![Attr::Path(path), Attr::Stroke(stroke), Attr::Class(AXIS_CLASS.into())])?;
        }

        if o.yaxis {
            let stroke = self.paint(&o.yaxis_color);
            let mut path = vec![PathCommand::MoveTo(left, a.gutters.top), PathCommand::LineTo(left, a.bottom())];
            if o.yaxis_tickmarks {
                for label in &self.scale.labels {
                    if let Some(y) = value_to_y(label.value, self.scale, a) {
                        path.push(PathCommand::MoveTo(left - o.yaxis_tickmarks_length, y));
                        path.push(PathCommand::LineTo(left, y));
                    }
                }
            }
            b.create_shape(ShapeKind::Path, vec![Attr::Path(path), Attr::Stroke(stroke), Attr::Class(AXIS_CLASS.into())])?;
        }
        Ok(())
    }

    /// Scale labels right-aligned against the y axis, and one x label per segment.
    pub fn labels<B: Backend + ?Sized>(&self, b: &mut B) -> Result<(), BackendError> {
        let a = self.area;
        let o = self.options;
        let mut style = TextStyle {
            halign: HAlign::Left,
            valign: VAlign::Center,
            size: o.text_size,
            color: self.paint(&o.text_color),
            class: LABEL_CLASS,
        };

        if o.yaxis_scale {
            for label in &self.scale.labels {
                let Some(y) = value_to_y(label.value, self.scale, a) else { continue };
                let m = b.measure_text(&label.text, o.text_size);
                let x = a.gutters.left - o.yaxis_tickmarks_length - 2.0 - m.width;
                style.emit(b, &label.text, (x, y))?;
            }
        }

        if !o.xaxis_labels.is_empty() {
            style.halign = HAlign::Center;
            style.valign = VAlign::Top;
            let edges = self.segment_edges();
            let y = a.bottom() + o.xaxis_tickmarks_length + 2.0;
            for (text, pair) in o.xaxis_labels.iter().zip(edges.windows(2)) {
                let x = (pair[0] + pair[1]) / 2.0;
                style.emit(b, text, (x, y))?;
            }
        }
        Ok(())
    }

    /// Chart title centred in the top gutter.
    pub fn title<B: Backend + ?Sized>(&self, b: &mut B) -> Result<(), BackendError> {
        let o = self.options;
        if o.title.is_empty() {
            return Ok(());
        }
        let style = TextStyle {
            halign: HAlign::Center,
            valign: VAlign::Center,
            size: o.title_size,
            color: self.paint(&o.title_color),
            class: TITLE_CLASS,
        };
        style.emit(b, &o.title, (self.area.width / 2.0, self.area.gutters.top / 2.0))?;
        Ok(())
    }

    /// Value labels above positive bars and below negative ones.
    ///
    /// Stacked groups get one label for the group total, on the top segment.
    /// `labelsAboveSpecific` replaces the text by sequential index; a missing
    /// entry suppresses the label.
    pub fn labels_above<B: Backend + ?Sized>(
        &self,
        b: &mut B,
        data: &BarData,
        records: &[ShapeRecord],
    ) -> Result<Vec<ShapeId>, BackendError> {
        let o = self.options;
        let mut ids = Vec::new();
        if !o.labels_above {
            return Ok(ids);
        }
        let format = o.labels_above_format();
        let mut style = TextStyle {
            halign: HAlign::Center,
            valign: VAlign::Bottom,
            size: o.labels_above_size.unwrap_or(o.text_size),
            color: self.paint(o.labels_above_color.as_deref().unwrap_or(&o.text_color)),
            class: LABEL_ABOVE_CLASS,
        };

        for (k, rec) in records.iter().enumerate() {
            let Some(r) = rec.rect() else { continue };
            let stacked = o.grouping == Grouping::Stacked
                && matches!(data.entries.get(rec.dataset_index), Some(BarEntry::Group(_)));
            let value = if stacked {
                let is_top = records.get(k + 1).map_or(true, |n| n.dataset_index != rec.dataset_index);
                if !is_top {
                    continue;
                }
                records.iter().filter(|n| n.dataset_index == rec.dataset_index).map(|n| n.value).sum()
            } else {
                rec.value
            };

            let text = match &o.labels_above_specific {
                Some(specific) => match specific.get(rec.sequential_index).cloned().flatten() {
                    Some(t) => t,
                    None => continue,
                },
                None => format.format(value),
            };

            let x = r.x + r.width / 2.0 + o.labels_above_offsetx;
            let y = if value < 0.0 {
                style.valign = VAlign::Top;
                r.bottom() + 3.0 + o.labels_above_offsety
            } else {
                style.valign = VAlign::Bottom;
                r.y - 3.0 - o.labels_above_offsety
            };
            ids.push(style.emit(b, &text, (x, y))?);
        }
        Ok(ids)
    }
}
