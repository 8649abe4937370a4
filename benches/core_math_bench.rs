use criterion::{Criterion, criterion_group, criterion_main};
use station_carousel::api::{CarouselConfig, CarouselController};
use station_carousel::core::{CardVisualProfile, StationCatalog, TrendPath, Viewport};
use station_carousel::interaction::ManualScheduler;
use std::hint::black_box;

fn bench_trend_path_six_samples(c: &mut Criterion) {
    let trend = [0.4, 0.5, 0.6, 0.55, 0.7, 0.75];

    c.bench_function("trend_path_six_samples", |b| {
        b.iter(|| {
            let path = TrendPath::build(black_box(&trend), black_box(220.0), black_box(40.0))
                .expect("valid trend");
            let _ = black_box(path.to_svg_path_data());
        })
    });
}

fn bench_card_visuals_sweep(c: &mut Criterion) {
    let profile = CardVisualProfile::default();
    let stride = 316.0;

    c.bench_function("card_visuals_sweep_8_slots", |b| {
        b.iter(|| {
            for step in 0..256 {
                let offset = f64::from(step) * 10.0;
                for slot in 0..8 {
                    let _ = black_box(profile.resolve(black_box(offset), slot, stride));
                }
            }
        })
    });
}

fn bench_carousel_frame(c: &mut Criterion) {
    let config = CarouselConfig::new(Viewport::new(400, 340));
    let mut controller =
        CarouselController::new(StationCatalog::builtin(), config, ManualScheduler::new())
            .expect("controller init");
    controller.mount().expect("mount");
    controller.on_scroll(450.0).expect("scroll");

    c.bench_function("carousel_frame_mid_scroll", |b| {
        b.iter(|| {
            let _ = controller
                .build_render_frame()
                .expect("frame should build");
        })
    });
}

criterion_group!(
    benches,
    bench_trend_path_six_samples,
    bench_card_visuals_sweep,
    bench_carousel_frame
);
criterion_main!(benches);
