// File: crates/graphite-core/src/data.rs
// Summary: Chart data model: bar entries (flat or nested) and scatter datasets.
// Notes:
// - Missing values are kept positionally as `None` so sequential indexes
//   (colors, tooltips) stay aligned with the caller's arrays.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Layout policy for nested bar entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Grouping {
    /// Side by side within the data segment.
    #[default]
    Grouped,
    /// Accumulated bottom to top.
    Stacked,
}

impl FromStr for Grouping {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grouped" => Ok(Grouping::Grouped),
            "stacked" => Ok(Grouping::Stacked),
            other => Err(ConfigError::UnknownGrouping(other.to_string())),
        }
    }
}

impl TryFrom<String> for Grouping {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Grouping::Grouped => "grouped",
            Grouping::Stacked => "stacked",
        })
    }
}

/// One position on the x axis of a bar chart.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BarEntry {
    /// A single bar; `None` marks a missing value.
    Value(Option<f64>),
    /// Several bars laid out according to the chart's [`Grouping`].
    Group(Vec<Option<f64>>),
}

impl BarEntry {
    /// Number of sequential indexes this entry occupies.
    pub fn width(&self) -> usize {
        match self {
            BarEntry::Value(_) => 1,
            BarEntry::Group(g) => g.len(),
        }
    }
}

impl From<f64> for BarEntry {
    fn from(v: f64) -> Self { BarEntry::Value(Some(v)) }
}

impl From<Vec<f64>> for BarEntry {
    fn from(v: Vec<f64>) -> Self { BarEntry::Group(v.into_iter().map(Some).collect()) }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct BarData {
    pub entries: Vec<BarEntry>,
}

impl BarData {
    pub fn new(entries: Vec<BarEntry>) -> Self { Self { entries } }

    /// Flat data, one bar per value.
    pub fn flat(values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(values.into_iter().map(BarEntry::from).collect())
    }

    /// Nested data, one group per inner vector.
    pub fn nested(groups: impl IntoIterator<Item = Vec<f64>>) -> Self {
        Self::new(groups.into_iter().map(BarEntry::from).collect())
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Candidate maxima for the y scale: the value for flat entries, the
    /// group maximum for grouped entries and, for stacked ones, the stack
    /// height (sum of magnitudes, matching how segments are stacked).
    pub fn max_candidates(&self, grouping: Grouping) -> Vec<f64> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                BarEntry::Value(v) => v.filter(|v| v.is_finite()),
                BarEntry::Group(g) => {
                    let finite = g.iter().flatten().copied().filter(|v| v.is_finite());
                    match grouping {
                        Grouping::Grouped => finite.reduce(f64::max),
                        Grouping::Stacked => Some(finite.map(f64::abs).sum()),
                    }
                }
            })
            .collect()
    }
}

/// Map a flat sequential index back to `(entry index, index inside the entry)`.
///
/// Stacked and grouped layouts pack several datapoints into one sequential
/// order; this undoes that packing. Flat entries resolve to `(i, 0)`.
pub fn sequential_to_grouped(seq: usize, data: &BarData) -> Option<(usize, usize)> {
    let mut start = 0;
    for (i, e) in data.entries.iter().enumerate() {
        let w = e.width();
        if seq < start + w {
            return Some((i, seq - start));
        }
        start += w;
    }
    None
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawTooltip {
    Text(String),
    Number(f64),
}

fn tooltip_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<RawTooltip> = Option::deserialize(de)?;
    Ok(raw.map(|t| match t {
        RawTooltip::Text(s) => s,
        RawTooltip::Number(n) => n.to_string(),
    }))
}

/// One scatter datapoint with optional per-point overrides.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// Marker kind (`cross`, `plus`, `triangle`, `square`, `circle`, `image:<url>`, ...).
    #[serde(default, rename = "type", alias = "shape")]
    pub kind: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default, deserialize_with = "tooltip_text")]
    pub tooltip: Option<String>,
}

impl ScatterPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScatter {
    Many(Vec<Vec<ScatterPoint>>),
    One(Vec<ScatterPoint>),
}

/// Scatter datasets; a single flat dataset is normalised into a list of one.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawScatter")]
pub struct ScatterData {
    pub datasets: Vec<Vec<ScatterPoint>>,
}

impl From<RawScatter> for ScatterData {
    fn from(raw: RawScatter) -> Self {
        match raw {
            RawScatter::Many(datasets) => Self { datasets },
            RawScatter::One(points) => Self { datasets: vec![points] },
        }
    }
}

impl ScatterData {
    pub fn single(points: Vec<ScatterPoint>) -> Self {
        Self { datasets: vec![points] }
    }
    pub fn many(datasets: Vec<Vec<ScatterPoint>>) -> Self {
        Self { datasets }
    }

    /// Every finite `y`, the candidate maxima for the y scale.
    pub fn y_values(&self) -> Vec<f64> {
        self.datasets.iter().flatten().filter_map(|p| p.y).filter(|v| v.is_finite()).collect()
    }

    /// Largest finite `x`, used when no x-axis maximum is configured.
    pub fn max_x(&self) -> Option<f64> {
        self.datasets.iter().flatten().filter_map(|p| p.x).filter(|v| v.is_finite()).reduce(f64::max)
    }
}

/// Data owned by one chart instance.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartData {
    Bar(BarData),
    Scatter(ScatterData),
}

impl From<BarData> for ChartData {
    fn from(d: BarData) -> Self { ChartData::Bar(d) }
}

impl From<ScatterData> for ChartData {
    fn from(d: ScatterData) -> Self { ChartData::Scatter(d) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_candidates_follow_grouping() {
        let d = BarData::nested(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(d.max_candidates(Grouping::Grouped), vec![2.0, 4.0]);
        assert_eq!(d.max_candidates(Grouping::Stacked), vec![3.0, 7.0]);
        let mixed = BarData::nested(vec![vec![5.0, -3.0]]);
        assert_eq!(mixed.max_candidates(Grouping::Stacked), vec![8.0]);
        let flat = BarData::new(vec![BarEntry::Value(Some(1.0)), BarEntry::Value(None), BarEntry::Value(Some(f64::NAN))]);
        assert_eq!(flat.max_candidates(Grouping::Grouped), vec![1.0]);
    }

    #[test]
    fn sequential_index_inverts_packing() {
        let d = BarData::new(vec![BarEntry::from(5.0), BarEntry::from(vec![1.0, 2.0, 3.0]), BarEntry::from(vec![4.0])]);
        assert_eq!(sequential_to_grouped(0, &d), Some((0, 0)));
        assert_eq!(sequential_to_grouped(1, &d), Some((1, 0)));
        assert_eq!(sequential_to_grouped(3, &d), Some((1, 2)));
        assert_eq!(sequential_to_grouped(4, &d), Some((2, 0)));
        assert_eq!(sequential_to_grouped(5, &d), None);
    }

    #[test]
    fn grouping_rejects_unknown_modes() {
        assert_eq!("stacked".parse::<Grouping>().unwrap(), Grouping::Stacked);
        assert_eq!("piled".parse::<Grouping>(), Err(ConfigError::UnknownGrouping("piled".into())));
    }

    #[test]
    fn deserializes_mixed_bar_data() {
        let d: BarData = serde_json::from_str("[1, null, [2, 3], [null, 4]]").unwrap();
        assert_eq!(d.entries.len(), 4);
        assert_eq!(d.entries[1], BarEntry::Value(None));
        assert_eq!(d.entries[3], BarEntry::Group(vec![None, Some(4.0)]));
    }

    #[test]
    fn deserializes_scatter_forms() {
        let one: ScatterData = serde_json::from_str(r#"[{"x":1,"y":2,"shape":"circle","tooltip":7}]"#).unwrap();
        assert_eq!(one.datasets.len(), 1);
        assert_eq!(one.datasets[0][0].kind.as_deref(), Some("circle"));
        assert_eq!(one.datasets[0][0].tooltip.as_deref(), Some("7"));
        let many: ScatterData = serde_json::from_str(r#"[[{"x":1,"y":2}],[{"x":3,"y":4}]]"#).unwrap();
        assert_eq!(many.datasets.len(), 2);
        assert_eq!(many.max_x(), Some(3.0));
    }
}
