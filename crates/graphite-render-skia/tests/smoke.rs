// File: crates/graphite-render-skia/tests/smoke.rs
// Purpose: The Skia backend paints drawn and animated charts to valid PNGs.

use graphite_core::{
    AnimationOptions, Backend, BarData, Chart, ChartConfig, FrameStatus, ScatterData, ScatterPoint,
};
use graphite_render_skia::SkiaBackend;

fn decode(bytes: &[u8]) -> image::RgbaImage {
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    image::load_from_memory(bytes).expect("decode png").to_rgba8()
}

#[test]
fn renders_bar_chart_with_labels() {
    let config = ChartConfig::new("bars", BarData::flat([4.0, 8.0, 6.0])).size(300.0, 200.0);
    let mut chart = Chart::new(SkiaBackend::new(300, 200), config);
    chart.options_mut().title = "Sales".into();
    chart.draw().expect("draw");

    let img = decode(&chart.backend().render_to_png_bytes().expect("render"));
    assert_eq!(img.dimensions(), (300, 200));
    // the middle bar reaches the top of the scale; sample inside it
    let area = chart.area().copied().expect("area");
    let bar = chart.records()[1].geometry.bounds();
    let px = img.get_pixel((bar.x + bar.width / 2.0) as u32, (bar.y + bar.height / 2.0) as u32);
    assert_ne!(px.0, [255, 255, 255, 255]);
    assert!(bar.y >= area.gutters.top - 1e-9);
}

#[test]
fn text_measurement_is_positive() {
    let backend = SkiaBackend::new(10, 10);
    let m = backend.measure_text("12,000", 10.0);
    assert!(m.width > 0.0);
    assert!(m.height > 0.0);
    assert_eq!(backend.measure_text("", 10.0).width, 0.0);
}

#[test]
fn grow_to_completion_then_render_to_file() {
    let config = ChartConfig::new("grow", BarData::nested(vec![vec![1.0, 2.0], vec![3.0, 1.0]]));
    let mut chart = Chart::new(SkiaBackend::new(400, 250), config.size(400.0, 250.0));
    chart.grow(AnimationOptions::default().frames(5)).expect("grow");
    while chart.tick().expect("tick") != FrameStatus::Finished {}

    let out = std::path::PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("grow_final.png");
    chart.backend().render_to_png(&out).expect("write png");
    let bytes = std::fs::read(&out).expect("read back");
    decode(&bytes);
}

#[test]
fn registered_images_report_dimensions() {
    let mut png = Vec::new();
    let marker = image::RgbaImage::from_pixel(6, 4, image::Rgba([200, 0, 0, 255]));
    image::DynamicImage::ImageRgba8(marker)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .expect("encode marker");

    let data = ScatterData::single(vec![ScatterPoint::new(1.0, 1.0).kind("image:pin.png"), ScatterPoint::new(2.0, 2.0)]);
    let mut chart = Chart::new(SkiaBackend::new(200, 200), ChartConfig::new("img", data).size(200.0, 200.0));
    chart.draw().expect("draw");

    let pending = chart.pending_images()[0].clone();
    let (w, h) = chart.backend_mut().register_image(&pending.href, &png).expect("decode marker");
    assert_eq!((w, h), (6.0, 4.0));
    assert!(chart.image_loaded(pending.ticket, w, h).expect("load"));
    decode(&chart.backend().render_to_png_bytes().expect("render"));

    assert!(chart.backend_mut().register_image("broken", b"not an image").is_err());
}
