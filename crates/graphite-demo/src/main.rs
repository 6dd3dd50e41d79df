// File: crates/graphite-demo/src/main.rs
// Summary: Demo loads a label/value CSV, animates a stacked bar chart to completion and renders bar and scatter PNGs.

use anyhow::{Context, Result};
use graphite_core::{
    AnimationOptions, BarData, Chart, ChartConfig, ChartOptions, FrameStatus, Grouping, PerDataset, ScatterData,
    ScatterPoint,
};
use graphite_render_skia::SkiaBackend;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const WIDTH: i32 = 640;
const HEIGHT: i32 = 360;

/// One CSV row: a category label followed by its stacked values.
struct Row {
    label: String,
    values: Vec<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rows = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(raw);
            load_rows(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => sample_rows(),
    };
    if rows.is_empty() {
        anyhow::bail!("no rows loaded; expected 'label,value[,value...]' lines");
    }
    tracing::info!(rows = rows.len(), "loaded data");

    let out_dir = PathBuf::from("target/out");
    std::fs::create_dir_all(&out_dir)?;

    // 1) Stacked bars, grown frame by frame
    let stacked = bar_chart(&rows, Grouping::Stacked);
    let mut chart = Chart::new(SkiaBackend::new(WIDTH, HEIGHT), stacked);
    chart.grow(AnimationOptions::default().frames(20).callback(|c: &mut Chart<SkiaBackend>| {
        tracing::info!(bars = c.records().len(), "grow finished");
    }))?;
    let frames = run_to_completion(&mut chart, Some(&out_dir.join("frames")))?;
    write(&chart, &out_dir.join("bars_stacked.png"))?;
    tracing::info!(frames, "stacked bars rendered");

    // 2) Grouped bars with the wave effect
    let grouped = bar_chart(&rows, Grouping::Grouped);
    let mut chart = Chart::new(SkiaBackend::new(WIDTH, HEIGHT), grouped);
    chart.wave(AnimationOptions::default())?;
    run_to_completion(&mut chart, None)?;
    write(&chart, &out_dir.join("bars_grouped.png"))?;

    // 3) Scatter of row totals against row index
    let points = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let total: f64 = r.values.iter().sum();
            ScatterPoint::new(i as f64 + 1.0, total).kind("circle").tooltip(format!("{}: {total}", r.label))
        })
        .collect();
    let options = ChartOptions {
        title: "Totals".into(),
        line: PerDataset::All(true),
        xaxis_max: Some((rows.len() as f64 + 1.0).into()),
        ..ChartOptions::default()
    };
    let config = ChartConfig::new("totals", ScatterData::single(points))
        .size(WIDTH as f64, HEIGHT as f64)
        .options(options);
    let mut chart = Chart::new(SkiaBackend::new(WIDTH, HEIGHT), config);
    chart.draw()?;
    write(&chart, &out_dir.join("scatter_totals.png"))?;

    Ok(())
}

fn bar_chart(rows: &[Row], grouping: Grouping) -> ChartConfig {
    let data = BarData::nested(rows.iter().map(|r| r.values.clone()));
    let options = ChartOptions {
        grouping,
        title: format!("{grouping} bars"),
        xaxis_labels: rows.iter().map(|r| r.label.clone()).collect(),
        colors: Some(vec!["Gradient(#c33:#f99)".into(), "#36a".into(), "#3a6".into()]),
        labels_above: grouping == Grouping::Stacked,
        shadow: true,
        ..ChartOptions::default()
    };
    ChartConfig::new(format!("bars-{grouping}"), data)
        .size(WIDTH as f64, HEIGHT as f64)
        .options(options)
}

/// Tick until the active run finishes; every fifth frame is written to
/// `frames_dir` when given.
fn run_to_completion(chart: &mut Chart<SkiaBackend>, frames_dir: Option<&Path>) -> Result<u32> {
    let mut frames = 0;
    loop {
        let status = chart.tick()?;
        frames += 1;
        if let Some(dir) = frames_dir {
            if frames % 5 == 0 {
                chart.backend().render_to_png(dir.join(format!("frame_{frames:03}.png")))?;
            }
        }
        if matches!(status, FrameStatus::Finished | FrameStatus::Idle) {
            return Ok(frames);
        }
    }
}

fn write(chart: &Chart<SkiaBackend>, path: &Path) -> Result<()> {
    chart.backend().render_to_png(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Load rows of `label,value[,value...]`; a header row is skipped when its
/// second column is not numeric.
fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let label = rec.get(0).unwrap_or_default().trim().to_string();
        let values: Option<Vec<f64>> = rec.iter().skip(1).map(|s| s.trim().parse::<f64>().ok()).collect();
        match values {
            Some(values) if !values.is_empty() => out.push(Row { label, values }),
            _ if line == 0 => tracing::debug!("skipping header row"),
            _ => tracing::warn!(line, "skipping row without numeric values"),
        }
    }
    Ok(out)
}

fn sample_rows() -> Vec<Row> {
    [("Mon", [4.0, 2.0, 1.0]), ("Tue", [3.0, 5.0, 2.0]), ("Wed", [6.0, 1.0, 3.0]), ("Thu", [2.0, 2.0, 2.0])]
        .into_iter()
        .map(|(label, values)| Row { label: label.into(), values: values.to_vec() })
        .collect()
}
