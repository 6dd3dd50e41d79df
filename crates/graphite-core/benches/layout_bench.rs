use graphite_core::layout::{layout_bars, place_points, BarParams, ScatterParams};
use graphite_core::{
    compute_scale, AnimationOptions, BarData, Chart, ChartConfig, ChartOptions, FrameStatus, Grouping, Paint, PlotArea,
    Rgba, ScaleOptions, ScatterData, ScatterPoint, Scene,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn gen_groups(n: usize, width: usize) -> BarData {
    BarData::nested((0..n).map(|i| (0..width).map(|j| ((i * 7 + j * 3) % 11) as f64 + 0.5).collect()))
}

fn gen_points(n: usize) -> ScatterData {
    ScatterData::single((0..n).map(|i| ScatterPoint::new(i as f64, (i as f64 * 0.01).sin() * 10.0 + 10.0)).collect())
}

fn bench_layout(c: &mut Criterion) {
    let area = PlotArea::new(1200.0, 600.0, Default::default());
    let colors = vec![Paint::Solid(Rgba::rgb(200, 40, 40)), Paint::Solid(Rgba::rgb(40, 40, 200))];
    let mut group = c.benchmark_group("layout");
    for &n in &[1_000usize, 10_000usize] {
        let data = gen_groups(n, 4);
        for grouping in [Grouping::Grouped, Grouping::Stacked] {
            let scale = compute_scale(&data.max_candidates(grouping), &ScaleOptions::default());
            group.bench_with_input(BenchmarkId::new(format!("bars_{grouping}"), n), &data, |b, d| {
                let params = BarParams {
                    area: &area,
                    scale: &scale,
                    grouping,
                    hmargin: 1.0,
                    hmargin_grouped: 0.0,
                    shadow: true,
                    colors: &colors,
                    colors_sequential: false,
                };
                b.iter(|| black_box(layout_bars(d, &params)));
            });
        }

        let points = gen_points(n);
        let scale = compute_scale(&points.y_values(), &ScaleOptions::default());
        let options = ChartOptions::default();
        group.bench_with_input(BenchmarkId::new("scatter", n), &points, |b, d| {
            let params = ScatterParams { area: &area, scale: &scale, x_min: 0.0, x_max: n as f64, options: &options };
            b.iter(|| black_box(place_points(d, &params)));
        });
    }
    group.finish();
}

fn bench_grow(c: &mut Criterion) {
    c.bench_function("grow_500_bars_30_frames", |b| {
        b.iter(|| {
            let data = BarData::flat((0..500).map(|i| (i % 17) as f64));
            let mut chart = Chart::new(Scene::new(), ChartConfig::new("bench", data));
            chart.grow(AnimationOptions::default()).expect("grow");
            while chart.tick().expect("tick") != FrameStatus::Finished {}
            black_box(chart.records().len())
        });
    });
}

criterion_group!(benches, bench_layout, bench_grow);
criterion_main!(benches);
