// File: crates/graphite-core/src/lib.rs
// Summary: Core library entry point; exports the public API for building, drawing, animating and interacting with charts.

pub mod animation;
pub mod axis;
pub mod backend;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod decor;
pub mod error;
pub mod geometry;
pub mod interact;
pub mod layout;
pub mod mapper;
pub mod scale;
pub mod types;

pub use animation::{AnimationRun, Effect, FrameStatus, FrameUpdate};
pub use axis::{XBound, YAxisMin};
pub use backend::{Attr, Backend, PointerKind, Scene, ShapeId, ShapeKind, TextMetrics};
pub use chart::{AnimationOptions, Chart, ChartConfig, ImageTicket, LifecycleEvent, PendingImage};
pub use color::{parse_color, parse_paint, resolve_paint, Paint, Rgba};
pub use config::{ChartOptions, PerDataset, TooltipEvent};
pub use data::{sequential_to_grouped, BarData, BarEntry, ChartData, Grouping, ScatterData, ScatterPoint};
pub use error::{BackendError, ChartError, ConfigError, Result};
pub use geometry::{Geometry, Rect};
pub use interact::{HighlightState, Interaction, PointerEvent, Tooltip};
pub use layout::{Backface, ShapeRecord};
pub use mapper::{value_to_x, value_to_y};
pub use scale::{compute_axis_scale, compute_scale, NumberFormat, Scale, ScaleOptions};
pub use types::{Gutters, PlotArea};
