// File: crates/graphite-render-skia/src/text.rs
// Summary: Text shaping for labels and titles using Skia textlayout; measures and paints aligned runs.

use graphite_core::backend::{HAlign, VAlign};
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Width of the longest line and total height.
    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0));
        (p.longest_line(), p.height())
    }

    /// Paint `text` anchored at (x, y) with the given alignment.
    pub fn draw_aligned(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        (x, y): (f32, f32),
        (halign, valign): (HAlign, VAlign),
        size: f32,
        color: skia::Color,
    ) {
        let p = self.layout(text, size, color);
        let (w, h) = (p.longest_line(), p.height());
        let left = match halign {
            HAlign::Left => x,
            HAlign::Center => x - w / 2.0,
            HAlign::Right => x - w,
        };
        let top = match valign {
            VAlign::Top => y,
            VAlign::Center => y - h / 2.0,
            VAlign::Bottom => y - h,
        };
        p.paint(canvas, (left, top));
    }
}
