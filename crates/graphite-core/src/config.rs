// File: crates/graphite-core/src/config.rs
// Summary: Typed chart configuration with documented defaults; JSON option documents via serde.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::axis::{XBound, YAxisMin};
use crate::data::Grouping;
use crate::error::ConfigError;
use crate::scale::{NumberFormat, ScaleOptions};
use crate::types::{Gutters, PlotArea};

/// Palette used by bar charts when `colors` is not set.
pub const DEFAULT_BAR_COLORS: [&str; 20] = [
    "red", "#0f0", "#00f", "#ff0", "#0ff", "#0f0", "pink", "orange", "gray", "black",
    "red", "#0f0", "#00f", "#ff0", "#0ff", "#0f0", "pink", "orange", "gray", "black",
];

/// Interaction that shows a tooltip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TooltipEvent {
    Click,
    MouseMove,
}

impl FromStr for TooltipEvent {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("on").unwrap_or(s) {
            "click" => Ok(TooltipEvent::Click),
            "mousemove" => Ok(TooltipEvent::MouseMove),
            _ => Err(ConfigError::UnknownEvent(s.to_string())),
        }
    }
}

impl TryFrom<String> for TooltipEvent {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl fmt::Display for TooltipEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TooltipEvent::Click => "click",
            TooltipEvent::MouseMove => "mousemove",
        })
    }
}

/// A scalar default, or one value per dataset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PerDataset<T> {
    All(T),
    Each(Vec<T>),
}

impl<T: Clone> PerDataset<T> {
    /// Value for dataset `idx`: the per-dataset entry when present,
    /// otherwise the scalar default.
    pub fn get(&self, idx: usize) -> Option<T> {
        match self {
            PerDataset::All(v) => Some(v.clone()),
            PerDataset::Each(v) => v.get(idx).cloned(),
        }
    }
}

/// Every recognised chart option.
///
/// Keys use the camelCase names of the options document (`gutterLeft`,
/// `yaxisMin`, ...). Unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ChartOptions {
    pub gutter_left: f64,
    pub gutter_right: f64,
    pub gutter_top: f64,
    pub gutter_bottom: f64,

    pub background_color: Option<String>,
    pub background_grid: bool,
    pub background_grid_color: String,
    pub background_grid_linewidth: f64,
    pub background_grid_hlines: bool,
    pub background_grid_vlines: bool,
    pub background_grid_border: bool,

    /// Ordered paint list; bars default to [`DEFAULT_BAR_COLORS`], scatter to black.
    pub colors: Option<Vec<String>>,
    pub colors_sequential: bool,
    pub strokestyle: String,
    pub linewidth: f64,
    pub hmargin: f64,
    pub hmargin_grouped: f64,
    pub grouping: Grouping,

    pub yaxis: bool,
    pub yaxis_tickmarks: bool,
    pub yaxis_tickmarks_length: f64,
    pub yaxis_color: String,
    pub yaxis_scale: bool,
    pub yaxis_labels_count: usize,
    pub yaxis_units_pre: String,
    pub yaxis_units_post: String,
    pub yaxis_strict: bool,
    pub yaxis_decimals: usize,
    pub yaxis_point: String,
    pub yaxis_thousand: String,
    pub yaxis_round: bool,
    pub yaxis_max: Option<f64>,
    pub yaxis_min: YAxisMin,

    pub xaxis: bool,
    pub xaxis_tickmarks: bool,
    pub xaxis_tickmarks_length: f64,
    pub xaxis_color: String,
    pub xaxis_labels: Vec<String>,
    /// Scatter only: lower bound of the x domain.
    pub xaxis_min: XBound,
    /// Scatter only: upper bound of the x domain; defaults to the largest `x`.
    pub xaxis_max: Option<XBound>,

    pub labels_above: bool,
    pub labels_above_decimals: Option<usize>,
    pub labels_above_units_pre: Option<String>,
    pub labels_above_units_post: Option<String>,
    pub labels_above_specific: Option<Vec<Option<String>>>,
    pub labels_above_offsetx: f64,
    pub labels_above_offsety: f64,
    pub labels_above_size: Option<f64>,
    pub labels_above_color: Option<String>,

    pub text_color: String,
    pub text_size: f64,

    /// Tooltip text per sequential index (bars only; scatter points carry their own).
    pub tooltips: Option<Vec<Option<String>>>,
    /// Bars default to `click`, scatter to `mousemove`.
    pub tooltips_event: Option<TooltipEvent>,
    pub highlight_stroke: String,
    pub highlight_fill: String,
    pub highlight_linewidth: f64,

    pub title: String,
    pub title_size: f64,
    pub title_color: String,

    pub shadow: bool,
    pub shadow_offsetx: f64,
    pub shadow_offsety: f64,
    pub shadow_blur: f64,
    pub shadow_opacity: f64,

    pub tickmarks_style: PerDataset<String>,
    pub tickmarks_size: PerDataset<f64>,
    pub line: PerDataset<bool>,
    pub line_colors: Option<Vec<String>>,
    pub line_linewidth: PerDataset<f64>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            gutter_left: 35.0,
            gutter_right: 35.0,
            gutter_top: 35.0,
            gutter_bottom: 35.0,

            background_color: None,
            background_grid: true,
            background_grid_color: "#ddd".into(),
            background_grid_linewidth: 1.0,
            background_grid_hlines: true,
            background_grid_vlines: true,
            background_grid_border: true,

            colors: None,
            colors_sequential: false,
            strokestyle: "rgba(0,0,0,0)".into(),
            linewidth: 1.0,
            hmargin: 3.0,
            hmargin_grouped: 2.0,
            grouping: Grouping::Grouped,

            yaxis: true,
            yaxis_tickmarks: true,
            yaxis_tickmarks_length: 3.0,
            yaxis_color: "black".into(),
            yaxis_scale: true,
            yaxis_labels_count: 5,
            yaxis_units_pre: String::new(),
            yaxis_units_post: String::new(),
            yaxis_strict: false,
            yaxis_decimals: 0,
            yaxis_point: ".".into(),
            yaxis_thousand: ",".into(),
            yaxis_round: false,
            yaxis_max: None,
            yaxis_min: YAxisMin::default(),

            xaxis: true,
            xaxis_tickmarks: true,
            xaxis_tickmarks_length: 5.0,
            xaxis_color: "black".into(),
            xaxis_labels: Vec::new(),
            xaxis_min: XBound(0.0),
            xaxis_max: None,

            labels_above: false,
            labels_above_decimals: None,
            labels_above_units_pre: None,
            labels_above_units_post: None,
            labels_above_specific: None,
            labels_above_offsetx: 0.0,
            labels_above_offsety: 0.0,
            labels_above_size: None,
            labels_above_color: None,

            text_color: "black".into(),
            text_size: 12.0,

            tooltips: None,
            tooltips_event: None,
            highlight_stroke: "rgba(0,0,0,0)".into(),
            highlight_fill: "rgba(255,255,255,0.7)".into(),
            highlight_linewidth: 1.0,

            title: String::new(),
            title_size: 16.0,
            title_color: "black".into(),

            shadow: false,
            shadow_offsetx: 2.0,
            shadow_offsety: 2.0,
            shadow_blur: 2.0,
            shadow_opacity: 0.25,

            tickmarks_style: PerDataset::All("cross".into()),
            tickmarks_size: PerDataset::All(7.0),
            line: PerDataset::All(false),
            line_colors: None,
            line_linewidth: PerDataset::All(1.0),
        }
    }
}

impl ChartOptions {
    /// Parse an options document (a JSON object of camelCase keys).
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(doc).map_err(|e| ConfigError::Document(e.to_string()))
    }

    pub fn gutters(&self) -> Gutters {
        Gutters::new(self.gutter_left, self.gutter_right, self.gutter_top, self.gutter_bottom)
    }

    /// Check the options against the surface size.
    pub fn validate(&self, width: f64, height: f64) -> Result<PlotArea, ConfigError> {
        let g = self.gutters();
        let gutters_ok = [g.left, g.right, g.top, g.bottom].iter().all(|v| v.is_finite() && *v >= 0.0);
        let area = PlotArea::new(width, height, g);
        if !gutters_ok || !width.is_finite() || !height.is_finite() || area.is_empty() {
            return Err(ConfigError::EmptyPlotArea { width, height });
        }
        Ok(area)
    }

    /// Bar palette, or the scatter default when `bar` is false.
    pub fn palette(&self, bar: bool) -> Vec<String> {
        match &self.colors {
            Some(c) if !c.is_empty() => c.clone(),
            _ if bar => DEFAULT_BAR_COLORS.iter().map(|s| s.to_string()).collect(),
            _ => vec!["black".to_string()],
        }
    }

    pub fn y_format(&self) -> NumberFormat {
        NumberFormat {
            decimals: self.yaxis_decimals,
            point: self.yaxis_point.clone(),
            thousand: self.yaxis_thousand.clone(),
            units_pre: self.yaxis_units_pre.clone(),
            units_post: self.yaxis_units_post.clone(),
        }
    }

    /// Value-label format; unset fields inherit the y-axis format.
    pub fn labels_above_format(&self) -> NumberFormat {
        let base = self.y_format();
        NumberFormat {
            decimals: self.labels_above_decimals.unwrap_or(base.decimals),
            units_pre: self.labels_above_units_pre.clone().unwrap_or(base.units_pre),
            units_post: self.labels_above_units_post.clone().unwrap_or(base.units_post),
            ..base
        }
    }

    /// Scale inputs; an explicit maximum always makes the scale strict.
    pub fn scale_options(&self) -> ScaleOptions {
        ScaleOptions {
            min: 0.0,
            max: self.yaxis_max,
            strict: self.yaxis_strict || self.yaxis_max.is_some(),
            round: self.yaxis_round,
            label_count: self.yaxis_labels_count,
            format: self.y_format(),
        }
    }

    /// Tooltip text for sequential index `seq`; empty strings count as absent.
    pub fn tooltip(&self, seq: usize) -> Option<&str> {
        self.tooltips
            .as_ref()?
            .get(seq)?
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}
