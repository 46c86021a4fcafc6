//! Benchmarks for the animation driver frame path

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lipsync_anim::AnimationDriver;
use lipsync_core::PlaybackTime;
use lipsync_morph::MeshHandle;

fn rig() -> Vec<MeshHandle> {
    vec![
        MeshHandle::with_targets(["mouthOpen", "A", "I", "U", "E", "O"]),
        MeshHandle::with_targets(["mouthClose", "jawOpen"]),
    ]
}

fn bench_animate_text(c: &mut Criterion) {
    let meshes = rig();
    let mut driver = AnimationDriver::new();
    let mut now = PlaybackTime::ZERO;

    c.bench_function("driver_animate_text", |b| {
        b.iter(|| {
            now = now + Duration::from_millis(1);
            driver.animate_text(black_box("hello there"), None, now, &meshes)
        })
    });
}

fn bench_tick_idle(c: &mut Criterion) {
    let mut meshes = rig();
    let mut driver = AnimationDriver::new();
    let mut now = PlaybackTime::ZERO;

    c.bench_function("driver_tick_idle", |b| {
        b.iter(|| {
            now = now + Duration::from_millis(16);
            black_box(driver.tick(now, &mut meshes))
        })
    });
}

fn bench_tick_playing(c: &mut Criterion) {
    let mut meshes = rig();
    let mut driver = AnimationDriver::new();
    let sentence = "the quick brown fox jumps over the lazy dog";
    let mut now = PlaybackTime::ZERO;
    driver.animate_text(sentence, None, now, &meshes);

    c.bench_function("driver_tick_playing", |b| {
        b.iter(|| {
            now = now + Duration::from_millis(16);
            if !driver.is_animating() {
                driver.animate_text(sentence, None, now, &meshes);
            }
            black_box(driver.tick(now, &mut meshes))
        })
    });
}

criterion_group!(benches, bench_animate_text, bench_tick_idle, bench_tick_playing);
criterion_main!(benches);
