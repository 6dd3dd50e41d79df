// File: crates/graphite-core/src/error.rs
// Summary: Error taxonomy for draw/animation calls and backend failures.

use thiserror::Error;

pub type Result<T, E = ChartError> = std::result::Result<T, E>;

/// Errors surfaced to the caller of `draw()`, `grow()`, `wave()` and friends.
///
/// Per-element anomalies (out-of-domain values, bad colors, missing tooltips)
/// are recovered locally and never show up here.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("drawing backend failed: {0}")]
    Backend(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown grouping mode '{0}' (expected 'grouped' or 'stacked')")]
    UnknownGrouping(String),
    #[error("unknown tooltip event '{0}' (expected 'click' or 'mousemove')")]
    UnknownEvent(String),
    #[error("unknown lifecycle event '{0}' (expected 'beforedraw' or 'draw')")]
    UnknownLifecycleEvent(String),
    #[error("unknown y-axis minimum '{0}' (expected a number, 'mirror', 'middle' or 'center')")]
    UnknownAxisMode(String),
    #[error("unparseable date '{0}'")]
    BadDate(String),
    #[error("plot area is empty: {width}x{height} surface leaves no room inside the gutters")]
    EmptyPlotArea { width: f64, height: f64 },
    #[error("axis bound {name} is not finite")]
    NonFiniteBound { name: &'static str },
    #[error("axis minimum {min} exceeds maximum {max}")]
    InvertedBounds { min: f64, max: f64 },
    #[error("x-axis domain is empty ({min}..{max})")]
    EmptyXDomain { min: f64, max: f64 },
    #[error("{0} is only supported by bar charts")]
    BarOnly(&'static str),
    #[error("malformed options document: {0}")]
    Document(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("unknown shape handle {0}")]
    UnknownHandle(u64),
    #[error("attribute '{attr}' does not apply to a {kind} shape")]
    AttributeMismatch { attr: &'static str, kind: &'static str },
    #[error("{0}")]
    Other(String),
}
