use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tarot_fan::config::FanConfig;
use tarot_fan::layout::FanLayout;
use tarot_fan::reading::Reading;
use tarot_fan::tarot;
use tarot_fan::viewport::{Platform, Viewport};

fn bench_pose(c: &mut Criterion) {
    let fan = FanLayout::default();
    let mut g = c.benchmark_group("pose");
    for visible in [5usize, 13, 78] {
        g.bench_with_input(BenchmarkId::new("sweep", visible), &visible, |b, &n| {
            b.iter(|| {
                for i in 0..n {
                    black_box(fan.pose(black_box(i as f32 + 0.25), n, 1200.0));
                }
            })
        });
    }
    g.finish();
}

fn bench_visible_poses(c: &mut Criterion) {
    let cfg = FanConfig { reshuffle_delay_ms: 0, seed: Some(1), ..FanConfig::default() };
    let mut touch =
        Reading::new(tarot::full_deck(), Viewport::new(400.0, Platform::Touch), cfg.clone());
    touch.shuffle(Instant::now());
    let mut desktop =
        Reading::new(tarot::full_deck(), Viewport::new(1920.0, Platform::Desktop), cfg);
    desktop.shuffle(Instant::now());

    let mut g = c.benchmark_group("visible_poses");
    g.bench_function("touch_window", |b| b.iter(|| black_box(touch.visible_poses())));
    g.bench_function("desktop_full_deck", |b| b.iter(|| black_box(desktop.visible_poses())));
    g.finish();
}

criterion_group!(benches, bench_pose, bench_visible_poses);
criterion_main!(benches);
