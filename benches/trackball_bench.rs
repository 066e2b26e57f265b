use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec2;
use mirage::animation::{EasingScheduler, SchedulerConfig};
use mirage::camera::Viewport;
use mirage::options::{AnimationOptions, CameraOptions};
use mirage::scene::{gallery, SceneGraphView};
use mirage::TrackballCamera;

fn drag_benchmark(c: &mut Criterion) {
    let mut camera =
        TrackballCamera::new(&CameraOptions::default(), &AnimationOptions::default());
    camera.update_viewport(Viewport::new(1280.0, 720.0));
    camera.set_anchor(Vec2::new(640.0, 360.0));

    let mut x = 640.0_f32;
    c.bench_function("trackball_drag_to", |b| {
        b.iter(|| {
            x = if x > 1200.0 { 0.0 } else { x + 3.0 };
            black_box(camera.drag_to(black_box(Vec2::new(x, 300.0))))
        });
    });
}

fn projection_benchmark(c: &mut Criterion) {
    let mut camera =
        TrackballCamera::new(&CameraOptions::default(), &AnimationOptions::default());
    camera.update_viewport(Viewport::new(1280.0, 720.0));
    c.bench_function("project_to_hemisphere", |b| {
        b.iter(|| {
            black_box(camera.project_to_hemisphere(black_box(Vec2::new(900.0, 120.0))))
        });
    });
}

fn scheduler_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("easing_scheduler_run");
    for steps in [30_u32, 120, 480] {
        let config = SchedulerConfig {
            steps,
            ..SchedulerConfig::default()
        };
        group.bench_function(format!("{steps}_steps"), |b| {
            b.iter(|| {
                let mut scheduler = EasingScheduler::new(config);
                scheduler.start();
                let mut sum = 0.0;
                while scheduler.advance(Duration::from_millis(4), |tick| sum += tick.t) {}
                black_box(sum)
            });
        });
    }
    group.finish();
}

fn validation_benchmark(c: &mut Criterion) {
    let scenes = gallery::all();
    c.bench_function("validate_gallery_nodes", |b| {
        b.iter(|| {
            scenes
                .iter()
                .flat_map(|scene| (0..scene.node_count()).filter_map(|i| scene.node(i)))
                .filter(|node| node.validate().is_empty())
                .count()
        });
    });
}

criterion_group!(
    benches,
    projection_benchmark,
    drag_benchmark,
    scheduler_benchmark,
    validation_benchmark
);
criterion_main!(benches);
