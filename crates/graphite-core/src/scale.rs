// File: crates/graphite-core/src/scale.rs
// Summary: Y scale calculation (nice rounding, strict and mirrored modes) and label number formatting.

use crate::axis::YAxisMin;
use crate::error::ConfigError;

/// Max used when the data gives nothing above the minimum (e.g. all zeros).
pub const ZERO_SPAN_EPSILON: f64 = 1e-6;

/// Formatting applied to scale labels and value labels.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberFormat {
    pub decimals: usize,
    pub point: String,
    pub thousand: String,
    pub units_pre: String,
    pub units_post: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimals: 0,
            point: ".".into(),
            thousand: ",".into(),
            units_pre: String::new(),
            units_post: String::new(),
        }
    }
}

impl NumberFormat {
    /// Format `n` with fixed decimals, grouped thousands and units.
    pub fn format(&self, n: f64) -> String {
        let fixed = format!("{:.*}", self.decimals, n.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousand);
            }
            grouped.push(ch);
        }
        if let Some(frac) = frac_part {
            grouped.push_str(&self.point);
            grouped.push_str(frac);
        }

        // "-0" after rounding reads badly; only keep the sign for a visible magnitude
        let negative = n < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
        format!("{}{}{}{}", if negative { "-" } else { "" }, self.units_pre, grouped, self.units_post)
    }
}

/// Inputs to [`compute_scale`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOptions {
    pub min: f64,
    /// Explicit maximum; when `None` the data maximum is used.
    pub max: Option<f64>,
    /// Take the maximum exactly instead of rounding it up.
    pub strict: bool,
    /// Round the maximum up to the next power of ten.
    pub round: bool,
    pub label_count: usize,
    pub format: NumberFormat,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self { min: 0.0, max: None, strict: false, round: false, label_count: 5, format: NumberFormat::default() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScaleLabel {
    pub value: f64,
    pub text: String,
}

/// Derived y scale for one draw pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    pub decimals: usize,
    pub units_pre: String,
    pub units_post: String,
    pub label_count: usize,
    pub labels: Vec<ScaleLabel>,
}

impl Scale {
    pub fn span(&self) -> f64 { self.max - self.min }

    /// Whether `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_mirrored(&self) -> bool {
        self.min < 0.0 && self.max > 0.0 && self.max == -self.min
    }
}

/// Compute a scale from candidate maximum values.
///
/// Non-finite values are ignored. Unless `strict`, the maximum is rounded up
/// to a human-friendly boundary relative to `min`.
pub fn compute_scale(values: &[f64], opts: &ScaleOptions) -> Scale {
    let data_max = values.iter().copied().filter(|v| v.is_finite()).fold(f64::NEG_INFINITY, f64::max);
    let min = opts.min;
    let mut max = opts.max.unwrap_or(data_max);
    if !max.is_finite() || max <= min {
        max = min + ZERO_SPAN_EPSILON;
    }

    if !opts.strict {
        max = min + nice_span(max - min, opts.round);
    }

    let labels = make_labels(min, max, opts.label_count, &opts.format);
    Scale {
        min,
        max,
        decimals: opts.format.decimals,
        units_pre: opts.format.units_pre.clone(),
        units_post: opts.format.units_post.clone(),
        label_count: opts.label_count,
        labels,
    }
}

/// Compute the y scale for an axis minimum that may be symbolic.
///
/// Mirrored axes are computed twice: first from zero, then strictly
/// between `-max` and `max`, so the result is exactly symmetric.
pub fn compute_axis_scale(values: &[f64], y_min: YAxisMin, opts: &ScaleOptions) -> Result<Scale, ConfigError> {
    if let Some(max) = opts.max {
        if !max.is_finite() {
            return Err(ConfigError::NonFiniteBound { name: "yaxisMax" });
        }
    }
    match y_min {
        YAxisMin::Value(min) => {
            if !min.is_finite() {
                return Err(ConfigError::NonFiniteBound { name: "yaxisMin" });
            }
            if let Some(max) = opts.max {
                if min > max {
                    return Err(ConfigError::InvertedBounds { min, max });
                }
            }
            Ok(compute_scale(values, &ScaleOptions { min, ..opts.clone() }))
        }
        YAxisMin::Mirror => {
            let first = compute_scale(values, &ScaleOptions { min: 0.0, ..opts.clone() });
            let half = first.max;
            Ok(compute_scale(
                values,
                &ScaleOptions { min: -half, max: Some(half), strict: true, round: false, ..opts.clone() },
            ))
        }
    }
}

/// Round a positive span up to a friendly boundary.
fn nice_span(span: f64, round: bool) -> f64 {
    if span <= 1.0 {
        return ladder_ceiling(span);
    }
    let ceil = span.ceil();
    let digits = ceil.log10().floor() as i32 + 1;
    let interval = 10f64.powi((digits - 1).max(1));
    if round {
        return 10.0 * interval;
    }
    if ceil <= 10.0 {
        return if span <= 5.0 { 5.0 } else { 10.0 };
    }
    let mut top = interval;
    while top < ceil {
        top += interval / 2.0;
    }
    top
}

/// Smallest entry of 1, 0.5, 0.1, 0.05, 0.01, ... that is >= `span`.
fn ladder_ceiling(span: f64) -> f64 {
    let mut best = 1.0;
    for k in 0..10 {
        let base = 10f64.powi(-k);
        for candidate in [base, base / 2.0] {
            if candidate >= span {
                best = candidate;
            } else {
                return best;
            }
        }
    }
    best
}

fn make_labels(min: f64, max: f64, count: usize, format: &NumberFormat) -> Vec<ScaleLabel> {
    if count == 0 {
        return Vec::new();
    }
    let label = |value: f64| ScaleLabel { value, text: format.format(value) };
    let n = count as f64;
    if min < 0.0 && max > 0.0 {
        // Label each half outward from the zero line
        let mut out: Vec<ScaleLabel> = (1..=count).rev().map(|i| label(min * i as f64 / n)).collect();
        out.push(label(0.0));
        out.extend((1..=count).map(|i| label(max * i as f64 / n)));
        out
    } else {
        (0..=count).map(|i| label(min + (max - min) * i as f64 / n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ScaleOptions {
        ScaleOptions::default()
    }

    #[test]
    fn rounds_up_to_half_intervals() {
        assert_eq!(compute_scale(&[20.0], &opts()).max, 20.0);
        assert_eq!(compute_scale(&[21.0], &opts()).max, 25.0);
        assert_eq!(compute_scale(&[96.0], &opts()).max, 100.0);
        assert_eq!(compute_scale(&[140.0], &opts()).max, 150.0);
        assert_eq!(compute_scale(&[7.0], &opts()).max, 10.0);
        assert_eq!(compute_scale(&[3.0], &opts()).max, 5.0);
    }

    #[test]
    fn small_spans_use_the_ladder() {
        assert_eq!(compute_scale(&[0.3], &opts()).max, 0.5);
        assert_eq!(compute_scale(&[0.08], &opts()).max, 0.1);
        assert_eq!(compute_scale(&[1.0], &opts()).max, 1.0);
    }

    #[test]
    fn strict_and_round() {
        let strict = ScaleOptions { max: Some(23.0), strict: true, ..opts() };
        assert_eq!(compute_scale(&[5.0], &strict).max, 23.0);
        let round = ScaleOptions { round: true, ..opts() };
        assert_eq!(compute_scale(&[23.0], &round).max, 100.0);
    }

    #[test]
    fn all_zero_stays_positive() {
        let s = compute_scale(&[0.0, 0.0], &opts());
        assert!(s.max > s.min);
        let strict = compute_scale(&[0.0], &ScaleOptions { strict: true, ..opts() });
        assert_eq!(strict.max, ZERO_SPAN_EPSILON);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let s = compute_scale(&[f64::NAN, 12.0, f64::INFINITY], &opts());
        assert_eq!(s.max, 15.0);
    }

    #[test]
    fn mirror_is_symmetric() {
        let s = compute_axis_scale(&[10.0, -5.0, 20.0], YAxisMin::Mirror, &opts()).unwrap();
        assert_eq!((s.min, s.max), (-20.0, 20.0));
        assert!(s.is_mirrored());
        let s = compute_axis_scale(&[0.37], YAxisMin::Mirror, &opts()).unwrap();
        assert_eq!(s.max, -s.min);
    }

    #[test]
    fn inverted_bounds_are_config_errors() {
        let o = ScaleOptions { max: Some(5.0), ..opts() };
        let err = compute_axis_scale(&[1.0], YAxisMin::Value(10.0), &o).unwrap_err();
        assert_eq!(err, ConfigError::InvertedBounds { min: 10.0, max: 5.0 });
    }

    #[test]
    fn labels_cover_range() {
        let s = compute_scale(&[20.0], &opts());
        let texts: Vec<_> = s.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["0", "4", "8", "12", "16", "20"]);
        let m = compute_axis_scale(&[20.0], YAxisMin::Mirror, &opts()).unwrap();
        assert_eq!(m.labels.first().map(|l| l.value), Some(-20.0));
        assert_eq!(m.labels.last().map(|l| l.value), Some(20.0));
    }

    #[test]
    fn number_format_groups_thousands() {
        let f = NumberFormat { decimals: 2, units_pre: "$".into(), ..NumberFormat::default() };
        assert_eq!(f.format(1234567.891), "$1,234,567.89");
        assert_eq!(f.format(-12.5), "-$12.50");
        let eu = NumberFormat { point: ",".into(), thousand: ".".into(), units_post: "%".into(), ..NumberFormat::default() };
        assert_eq!(eu.format(1500.0), "1.500%");
        assert_eq!(NumberFormat::default().format(-0.2), "0");
    }
}
