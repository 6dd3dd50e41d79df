// File: crates/graphite-core/src/color.rs
// Summary: Color resolver; parses color and gradient specs into backend paint values.

use crate::types::PlotArea;

/// Straight (non-premultiplied) RGBA color; alpha in 0..=1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }
    /// Alpha as a byte, for backends that want ARGB8888.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, 0..=1.
    pub offset: f32,
    pub color: Rgba,
}

/// A linear gradient in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub stops: Vec<GradientStop>,
}

/// Paint value handed to the backend for fills and strokes.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

impl Paint {
    pub const BLACK: Paint = Paint::Solid(Rgba::BLACK);
    pub const TRANSPARENT: Paint = Paint::Solid(Rgba::TRANSPARENT);

    pub fn is_transparent(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a <= 0.0,
            Paint::Linear(g) => g.stops.iter().all(|s| s.color.a <= 0.0),
        }
    }
}

/// What a failed resolution falls back to once every candidate is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    Black,
    Transparent,
}

impl Fallback {
    fn paint(self) -> Paint {
        match self {
            Fallback::Black => Paint::BLACK,
            Fallback::Transparent => Paint::TRANSPARENT,
        }
    }
}

const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::rgb(0, 0, 0)),
    ("white", Rgba::rgb(255, 255, 255)),
    ("red", Rgba::rgb(255, 0, 0)),
    ("green", Rgba::rgb(0, 128, 0)),
    ("lime", Rgba::rgb(0, 255, 0)),
    ("blue", Rgba::rgb(0, 0, 255)),
    ("yellow", Rgba::rgb(255, 255, 0)),
    ("cyan", Rgba::rgb(0, 255, 255)),
    ("aqua", Rgba::rgb(0, 255, 255)),
    ("magenta", Rgba::rgb(255, 0, 255)),
    ("fuchsia", Rgba::rgb(255, 0, 255)),
    ("gray", Rgba::rgb(128, 128, 128)),
    ("grey", Rgba::rgb(128, 128, 128)),
    ("silver", Rgba::rgb(192, 192, 192)),
    ("maroon", Rgba::rgb(128, 0, 0)),
    ("olive", Rgba::rgb(128, 128, 0)),
    ("navy", Rgba::rgb(0, 0, 128)),
    ("purple", Rgba::rgb(128, 0, 128)),
    ("teal", Rgba::rgb(0, 128, 128)),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("pink", Rgba::rgb(255, 192, 203)),
    ("brown", Rgba::rgb(165, 42, 42)),
    ("gold", Rgba::rgb(255, 215, 0)),
    ("transparent", Rgba::TRANSPARENT),
];

/// Parse a single (non-gradient) color spec.
///
/// Accepts CSS names, `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)` and
/// `rgba(r,g,b,a)`. Returns `None` for anything else.
pub fn parse_color(spec: &str) -> Option<Rgba> {
    let s = spec.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, "rgba") {
        let parts = split_args(args)?;
        if parts.len() != 4 { return None; }
        let a: f32 = parts[3].parse().ok()?;
        if !a.is_finite() { return None; }
        return Some(Rgba::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a.clamp(0.0, 1.0)));
    }
    if let Some(args) = function_args(&lower, "rgb") {
        let parts = split_args(args)?;
        if parts.len() != 3 { return None; }
        return Some(Rgba::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?));
    }
    NAMED.iter().find(|(name, _)| *name == lower).map(|&(_, c)| c)
}

/// Parse a paint spec, including `Gradient(c1:c2:...)`.
///
/// Gradients run top to bottom across the plot area with evenly spaced stops,
/// so every bar sharing the gradient samples the same color ramp.
pub fn parse_paint(spec: &str, area: &PlotArea) -> Option<Paint> {
    let s = spec.trim();
    if let Some(args) = function_args(s, "Gradient").or_else(|| function_args(s, "gradient")) {
        let colors = args
            .split(':')
            .map(parse_color)
            .collect::<Option<Vec<_>>>()?;
        return match colors.len() {
            0 => None,
            1 => Some(Paint::Solid(colors[0])),
            n => {
                let stops = colors
                    .into_iter()
                    .enumerate()
                    .map(|(i, color)| GradientStop { offset: i as f32 / (n - 1) as f32, color })
                    .collect();
                Some(Paint::Linear(LinearGradient {
                    from: (area.gutters.left, area.gutters.top),
                    to: (area.gutters.left, area.bottom()),
                    stops,
                }))
            }
        };
    }
    parse_color(s).map(Paint::Solid)
}

/// Resolve the first usable spec among `candidates` (most specific first),
/// falling back to black or transparent when none parses.
pub fn resolve_paint(candidates: &[Option<&str>], area: &PlotArea, fallback: Fallback) -> Paint {
    for spec in candidates.iter().flatten() {
        if let Some(paint) = parse_paint(spec, area) {
            return paint;
        }
        tracing::debug!(spec = %spec, "unparseable color spec, trying next fallback");
    }
    fallback.paint()
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::rgb(nib(0)?, nib(1)?, nib(2)?)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f32 / 255.0)),
        _ => None,
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?.trim_start().strip_prefix('(')?.strip_suffix(')')
}

fn split_args(args: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) { None } else { Some(parts) }
}

fn channel(s: &str) -> Option<u8> {
    let v: f64 = s.parse().ok()?;
    if !v.is_finite() { return None; }
    Some(v.round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gutters, PlotArea};

    fn area() -> PlotArea {
        PlotArea::new(600.0, 250.0, Gutters::default())
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#f00"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(parse_color("#00ff7f"), Some(Rgba::rgb(0, 255, 127)));
        let c = parse_color("#ffffff80").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 255, 255));
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#ggg"), None);
    }

    #[test]
    fn parses_functional_and_named() {
        assert_eq!(parse_color("rgb(1, 2, 3)"), Some(Rgba::rgb(1, 2, 3)));
        assert_eq!(parse_color("rgba(255,255,255,0.7)"), Some(Rgba::rgba(255, 255, 255, 0.7)));
        assert_eq!(parse_color("Pink"), Some(Rgba::rgb(255, 192, 203)));
        assert_eq!(parse_color("rgba(0,0,0)"), None);
        assert_eq!(parse_color("not-a-color"), None);
    }

    #[test]
    fn gradient_spans_plot_height() {
        let paint = parse_paint("Gradient(red:#00f:white)", &area()).unwrap();
        let Paint::Linear(g) = paint else { panic!("expected gradient") };
        assert_eq!(g.stops.len(), 3);
        assert_eq!(g.stops[1].offset, 0.5);
        assert_eq!(g.from, (35.0, 35.0));
        assert_eq!(g.to, (35.0, 215.0));
    }

    #[test]
    fn malformed_gradient_is_rejected() {
        assert!(parse_paint("Gradient(red:nope)", &area()).is_none());
        assert_eq!(parse_paint("Gradient(red)", &area()), Some(Paint::Solid(Rgba::rgb(255, 0, 0))));
    }

    #[test]
    fn fallback_chain() {
        let a = area();
        let p = resolve_paint(&[Some("bogus"), Some("blue")], &a, Fallback::Black);
        assert_eq!(p, Paint::Solid(Rgba::rgb(0, 0, 255)));
        assert_eq!(resolve_paint(&[Some("bogus"), None], &a, Fallback::Black), Paint::BLACK);
        assert_eq!(resolve_paint(&[], &a, Fallback::Transparent), Paint::TRANSPARENT);
    }
}
