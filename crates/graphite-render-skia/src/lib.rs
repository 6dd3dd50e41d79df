// File: crates/graphite-render-skia/src/lib.rs
// Summary: Skia raster backend; records shapes through the core scene and paints them to CPU surfaces / PNG.

pub mod text;

use std::collections::HashMap;

use anyhow::Result;
use graphite_core::backend::{Attr, Backend, Node, NodeAttrs, PathCommand, PointerKind, Scene, ShapeId, ShapeKind, TextMetrics};
use graphite_core::{BackendError, Paint, Rgba};
use skia_safe as skia;

pub use text::TextShaper;

/// Retained backend that rasterises its scene with Skia.
pub struct SkiaBackend {
    scene: Scene,
    shaper: TextShaper,
    width: i32,
    height: i32,
    background: skia::Color,
    images: HashMap<String, skia::Image>,
}

impl SkiaBackend {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            scene: Scene::new(),
            shaper: TextShaper::new(),
            width,
            height,
            background: skia::Color::WHITE,
            images: HashMap::new(),
        }
    }

    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = to_color(color, 1.0);
        self
    }

    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn size(&self) -> (i32, i32) { (self.width, self.height) }

    /// Decode image bytes for marker `href`; returns the image dimensions to
    /// report back through `Chart::image_loaded`.
    pub fn register_image(&mut self, href: &str, bytes: &[u8]) -> Result<(f64, f64)> {
        let image = skia::Image::from_encoded(skia::Data::new_copy(bytes))
            .ok_or_else(|| anyhow::anyhow!("failed to decode image '{href}'"))?;
        let dims = (image.width() as f64, image.height() as f64);
        self.images.insert(href.to_string(), image);
        Ok(dims)
    }

    /// Render the scene to PNG bytes using a CPU raster surface.
    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((self.width, self.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(self.background);

        for node in self.scene.nodes() {
            self.draw_node(canvas, node);
        }

        // Snapshot and encode PNG
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the scene to a PNG file at `output_png_path`.
    pub fn render_to_png(&self, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes()?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn draw_node(&self, canvas: &skia::Canvas, node: &Node) {
        let a = &node.attrs;
        match node.kind {
            ShapeKind::Group => {}
            ShapeKind::Rect => {
                let rect = skia::Rect::from_xywh(a.x as f32, a.y as f32, a.width as f32, a.height as f32);
                if let Some(shadow) = shadow_paint(a) {
                    let off = a.shadow.map_or((0.0, 0.0), |s| (s.offset_x as f32, s.offset_y as f32));
                    canvas.draw_rect(rect.with_offset(off), &shadow);
                }
                if let Some(fill) = fill_paint(a) {
                    canvas.draw_rect(rect, &fill);
                }
                if let Some(stroke) = stroke_paint(a) {
                    canvas.draw_rect(rect, &stroke);
                }
            }
            ShapeKind::Circle => {
                let center = (a.cx as f32, a.cy as f32);
                if let Some(fill) = fill_paint(a) {
                    canvas.draw_circle(center, a.r as f32, &fill);
                }
                if let Some(stroke) = stroke_paint(a) {
                    canvas.draw_circle(center, a.r as f32, &stroke);
                }
            }
            ShapeKind::Path => {
                let path = to_path(&a.path);
                if let Some(fill) = fill_paint(a) {
                    canvas.draw_path(&path, &fill);
                }
                if let Some(stroke) = stroke_paint(a) {
                    canvas.draw_path(&path, &stroke);
                }
            }
            ShapeKind::Image => {
                let Some(image) = a.href.as_ref().and_then(|h| self.images.get(h)) else { return };
                if a.width <= 0.0 || a.height <= 0.0 {
                    return;
                }
                let dst = skia::Rect::from_xywh(a.x as f32, a.y as f32, a.width as f32, a.height as f32);
                let mut paint = skia::Paint::default();
                paint.set_alpha_f(a.opacity.clamp(0.0, 1.0) as f32);
                canvas.draw_image_rect(image, None, dst, &paint);
            }
            ShapeKind::Text => {
                let color = match &a.fill {
                    Some(Paint::Solid(c)) => to_color(*c, a.opacity),
                    _ => skia::Color::BLACK,
                };
                self.shaper.draw_aligned(
                    canvas,
                    &a.text,
                    (a.x as f32, a.y as f32),
                    (a.halign, a.valign),
                    a.font_size as f32,
                    color,
                );
            }
        }
    }
}

impl Backend for SkiaBackend {
    fn create_shape(&mut self, kind: ShapeKind, attrs: Vec<Attr>) -> Result<ShapeId, BackendError> {
        self.scene.create_shape(kind, attrs)
    }

    fn set_attribute(&mut self, id: ShapeId, attr: Attr) -> Result<(), BackendError> {
        self.scene.set_attribute(id, attr)
    }

    fn add_event_listener(&mut self, id: ShapeId, event: PointerKind) -> Result<(), BackendError> {
        self.scene.add_event_listener(id, event)
    }

    fn measure_text(&self, text: &str, size: f64) -> TextMetrics {
        let (w, h) = self.shaper.measure(text, size as f32);
        TextMetrics { width: w as f64, height: h as f64 }
    }

    fn remove_shape(&mut self, id: ShapeId) -> Result<(), BackendError> {
        self.scene.remove_shape(id)
    }

    fn clear(&mut self) {
        tracing::trace!(shapes = self.scene.len(), "skia scene cleared");
        self.scene.clear();
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_color(c: Rgba, opacity: f64) -> skia::Color {
    let alpha = (c.a as f64 * opacity.clamp(0.0, 1.0) * 255.0).round().clamp(0.0, 255.0) as u8;
    skia::Color::from_argb(alpha, c.r, c.g, c.b)
}

fn to_paint(p: &Paint, opacity: f64) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    match p {
        Paint::Solid(c) => {
            paint.set_color(to_color(*c, opacity));
        }
        Paint::Linear(g) => {
            let colors: Vec<skia::Color> = g.stops.iter().map(|s| to_color(s.color, opacity)).collect();
            let offsets: Vec<f32> = g.stops.iter().map(|s| s.offset).collect();
            let shader = skia::Shader::linear_gradient(
                ((g.from.0 as f32, g.from.1 as f32), (g.to.0 as f32, g.to.1 as f32)),
                colors.as_slice(),
                Some(offsets.as_slice()),
                skia::TileMode::Clamp,
                None,
                None,
            );
            paint.set_shader(shader);
        }
    }
    paint
}

fn fill_paint(a: &NodeAttrs) -> Option<skia::Paint> {
    let fill = a.fill.as_ref().filter(|p| !p.is_transparent())?;
    let mut paint = to_paint(fill, a.opacity);
    paint.set_style(skia::paint::Style::Fill);
    Some(paint)
}

fn stroke_paint(a: &NodeAttrs) -> Option<skia::Paint> {
    let stroke = a.stroke.as_ref().filter(|p| !p.is_transparent())?;
    if a.stroke_width <= 0.0 {
        return None;
    }
    let mut paint = to_paint(stroke, a.opacity);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(a.stroke_width as f32);
    Some(paint)
}

fn shadow_paint(a: &NodeAttrs) -> Option<skia::Paint> {
    let s = a.shadow?;
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(to_color(Rgba::BLACK, s.opacity));
    if s.blur > 0.0 {
        paint.set_mask_filter(skia::MaskFilter::blur(skia::BlurStyle::Normal, (s.blur / 2.0) as f32, None));
    }
    Some(paint)
}

fn to_path(commands: &[PathCommand]) -> skia::Path {
    let mut path = skia::Path::new();
    for c in commands {
        match *c {
            PathCommand::MoveTo(x, y) => {
                path.move_to((x as f32, y as f32));
            }
            PathCommand::LineTo(x, y) => {
                path.line_to((x as f32, y as f32));
            }
            PathCommand::Close => {
                path.close();
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_fold_opacity_into_alpha() {
        let c = to_color(Rgba::rgba(10, 20, 30, 0.5), 0.5);
        assert_eq!((c.r(), c.g(), c.b()), (10, 20, 30));
        assert_eq!(c.a(), 64);
        assert_eq!(to_color(Rgba::WHITE, 2.0).a(), 255);
    }

    #[test]
    fn transparent_fills_are_not_painted() {
        let mut backend = SkiaBackend::new(10, 10);
        let id = backend.create_shape(ShapeKind::Rect, vec![Attr::Fill(Paint::TRANSPARENT)]).unwrap();
        let node = backend.scene().get(id).unwrap();
        assert!(fill_paint(&node.attrs).is_none());
        assert!(stroke_paint(&node.attrs).is_none());
    }
}
