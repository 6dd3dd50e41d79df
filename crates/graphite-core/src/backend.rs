// File: crates/graphite-core/src/backend.rs
// Summary: Drawing backend trait (retained shapes with typed attributes) and an in-memory scene implementation.

use std::fmt;

use crate::color::Paint;
use crate::config::TooltipEvent;
use crate::error::BackendError;

/// Handle to a shape created by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Circle,
    Path,
    Image,
    Group,
    Text,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Path => "path",
            ShapeKind::Image => "image",
            ShapeKind::Group => "group",
            ShapeKind::Text => "text",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    #[default]
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropShadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub opacity: f64,
}

/// Pointer interactions a backend can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Click,
    MouseMove,
}

impl From<TooltipEvent> for PointerKind {
    fn from(e: TooltipEvent) -> Self {
        match e {
            TooltipEvent::Click => PointerKind::Click,
            TooltipEvent::MouseMove => PointerKind::MouseMove,
        }
    }
}

/// One typed shape attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Attr {
    X(f64),
    Y(f64),
    Width(f64),
    Height(f64),
    Cx(f64),
    Cy(f64),
    R(f64),
    Path(Vec<PathCommand>),
    Href(String),
    Text(String),
    FontSize(f64),
    HAlign(HAlign),
    VAlign(VAlign),
    Fill(Paint),
    Stroke(Paint),
    StrokeWidth(f64),
    Opacity(f64),
    Shadow(DropShadow),
    Parent(ShapeId),
    Class(String),
}

impl Attr {
    pub fn name(&self) -> &'static str {
        match self {
            Attr::X(_) => "x",
            Attr::Y(_) => "y",
            Attr::Width(_) => "width",
            Attr::Height(_) => "height",
            Attr::Cx(_) => "cx",
            Attr::Cy(_) => "cy",
            Attr::R(_) => "r",
            Attr::Path(_) => "d",
            Attr::Href(_) => "href",
            Attr::Text(_) => "text",
            Attr::FontSize(_) => "font-size",
            Attr::HAlign(_) => "halign",
            Attr::VAlign(_) => "valign",
            Attr::Fill(_) => "fill",
            Attr::Stroke(_) => "stroke",
            Attr::StrokeWidth(_) => "stroke-width",
            Attr::Opacity(_) => "opacity",
            Attr::Shadow(_) => "filter",
            Attr::Parent(_) => "parent",
            Attr::Class(_) => "class",
        }
    }

    /// Whether this attribute is meaningful on `kind`.
    pub fn applies_to(&self, kind: ShapeKind) -> bool {
        use ShapeKind::*;
        match self {
            Attr::X(_) | Attr::Y(_) => matches!(kind, Rect | Image | Text),
            Attr::Width(_) | Attr::Height(_) => matches!(kind, Rect | Image),
            Attr::Cx(_) | Attr::Cy(_) | Attr::R(_) => kind == Circle,
            Attr::Path(_) => kind == Path,
            Attr::Href(_) => kind == Image,
            Attr::Text(_) | Attr::FontSize(_) | Attr::HAlign(_) | Attr::VAlign(_) => kind == Text,
            _ => true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// The drawing surface injected into a chart.
///
/// Backends are retained-mode: shapes live until removed, and attributes can
/// be changed after creation (animation frames rely on this).
pub trait Backend {
    fn create_shape(&mut self, kind: ShapeKind, attrs: Vec<Attr>) -> Result<ShapeId, BackendError>;
    fn set_attribute(&mut self, id: ShapeId, attr: Attr) -> Result<(), BackendError>;
    /// Mark a shape as interactive for `event`. Hit resolution itself goes
    /// through the chart's dispatch table.
    fn add_event_listener(&mut self, id: ShapeId, event: PointerKind) -> Result<(), BackendError>;
    fn measure_text(&self, text: &str, size: f64) -> TextMetrics;
    fn remove_shape(&mut self, id: ShapeId) -> Result<(), BackendError>;
    /// Remove every shape.
    fn clear(&mut self);
}

/// Resolved attribute values of one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeAttrs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub path: Vec<PathCommand>,
    pub href: Option<String>,
    pub text: String,
    pub font_size: f64,
    pub halign: HAlign,
    pub valign: VAlign,
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub stroke_width: f64,
    pub opacity: f64,
    pub shadow: Option<DropShadow>,
    pub parent: Option<ShapeId>,
    pub class: Option<String>,
}

impl NodeAttrs {
    fn new() -> Self {
        Self { font_size: 12.0, stroke_width: 1.0, opacity: 1.0, ..Self::default() }
    }

    fn apply(&mut self, attr: Attr) {
        match attr {
            Attr::X(v) => self.x = v,
            Attr::Y(v) => self.y = v,
            Attr::Width(v) => self.width = v,
            Attr::Height(v) => self.height = v,
            Attr::Cx(v) => self.cx = v,
            Attr::Cy(v) => self.cy = v,
            Attr::R(v) => self.r = v,
            Attr::Path(p) => self.path = p,
            Attr::Href(h) => self.href = Some(h),
            Attr::Text(t) => self.text = t,
            Attr::FontSize(v) => self.font_size = v,
            Attr::HAlign(a) => self.halign = a,
            Attr::VAlign(a) => self.valign = a,
            Attr::Fill(p) => self.fill = Some(p),
            Attr::Stroke(p) => self.stroke = Some(p),
            Attr::StrokeWidth(v) => self.stroke_width = v,
            Attr::Opacity(v) => self.opacity = v,
            Attr::Shadow(s) => self.shadow = Some(s),
            Attr::Parent(p) => self.parent = Some(p),
            Attr::Class(c) => self.class = Some(c),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub attrs: NodeAttrs,
    pub listeners: Vec<PointerKind>,
}

/// In-memory retained scene; a complete [`Backend`] that records shapes in
/// creation order. Rasterising backends wrap it and paint its nodes.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self { Self::default() }

    /// Live nodes in paint order.
    pub fn nodes(&self) -> &[Node] { &self.nodes }

    pub fn get(&self, id: ShapeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn count(&self, kind: ShapeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Nodes tagged with `class`.
    pub fn with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.attrs.class.as_deref() == Some(class))
    }

    fn node_mut(&mut self, id: ShapeId) -> Result<&mut Node, BackendError> {
        self.nodes.iter_mut().find(|n| n.id == id).ok_or(BackendError::UnknownHandle(id.0))
    }
}

fn check(kind: ShapeKind, attr: &Attr) -> Result<(), BackendError> {
    if attr.applies_to(kind) {
        Ok(())
    } else {
        Err(BackendError::AttributeMismatch { attr: attr.name(), kind: kind.name() })
    }
}

impl Backend for Scene {
    fn create_shape(&mut self, kind: ShapeKind, attrs: Vec<Attr>) -> Result<ShapeId, BackendError> {
        let mut resolved = NodeAttrs::new();
        for attr in attrs {
            check(kind, &attr)?;
            resolved.apply(attr);
        }
        self.next_id += 1;
        let id = ShapeId(self.next_id);
        self.nodes.push(Node { id, kind, attrs: resolved, listeners: Vec::new() });
        Ok(id)
    }

    fn set_attribute(&mut self, id: ShapeId, attr: Attr) -> Result<(), BackendError> {
        let node = self.node_mut(id)?;
        check(node.kind, &attr)?;
        node.attrs.apply(attr);
        Ok(())
    }

    fn add_event_listener(&mut self, id: ShapeId, event: PointerKind) -> Result<(), BackendError> {
        let node = self.node_mut(id)?;
        if !node.listeners.contains(&event) {
            node.listeners.push(event);
        }
        Ok(())
    }

    fn measure_text(&self, text: &str, size: f64) -> TextMetrics {
        // Average glyph advance of a proportional sans face
        TextMetrics { width: text.chars().count() as f64 * size * 0.6, height: size }
    }

    fn remove_shape(&mut self, id: ShapeId) -> Result<(), BackendError> {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id && n.attrs.parent != Some(id));
        if self.nodes.len() == before {
            return Err(BackendError::UnknownHandle(id.0));
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}
