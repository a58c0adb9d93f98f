// Copyright 2026 the Tiller Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use tiller_channel::event::{Claim, DeviceId, InputEvent, MotionEvent};
use tiller_focus::core::InputCore;
use tiller_focus::shell::{HitCandidate, SeatSink, Shell};
use tiller_focus::target::{FocusTarget, SurfaceId, WindowId};
use tiller_pointer::outputs::{Output, OutputId, clamp_to_outputs};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
    fn point(&mut self, max_x: f64, max_y: f64) -> Point {
        Point::new(self.next_f64() * max_x, self.next_f64() * max_y)
    }
}

/// A row of `n` outputs, each 1920x1080, side by side.
fn output_row(n: usize) -> Vec<Output> {
    (0..n)
        .map(|i| Output::new(OutputId(i as u64), i as f64 * 1920.0, 0.0, 1920.0, 1080.0))
        .collect()
}

struct GridShell {
    outputs: Vec<Output>,
    windows: Vec<(SurfaceId, Rect, WindowId)>,
}

impl GridShell {
    /// `n`x`n` windows tiled over the first output.
    fn new(outputs: Vec<Output>, n: usize) -> Self {
        let cell_w = 1920.0 / n as f64;
        let cell_h = 1080.0 / n as f64;
        let mut windows = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let id = (y * n + x) as u64;
                let x0 = x as f64 * cell_w;
                let y0 = y as f64 * cell_h;
                windows.push((
                    SurfaceId(id),
                    Rect::new(x0, y0, x0 + cell_w, y0 + cell_h),
                    WindowId(id),
                ));
            }
        }
        Self { outputs, windows }
    }
}

impl Shell for GridShell {
    fn outputs(&self) -> &[Output] {
        &self.outputs
    }
    fn hit_test(&self, position: Point) -> Option<HitCandidate> {
        self.windows
            .iter()
            .find(|(_, rect, _)| rect.contains(position))
            .map(|(id, rect, window)| HitCandidate {
                target: FocusTarget::Surface {
                    id: *id,
                    offset: rect.origin(),
                },
                origin: rect.origin(),
                window: Some(*window),
            })
    }
    fn is_alive(&self, _target: &FocusTarget) -> bool {
        true
    }
    fn active_window(&self) -> Option<WindowId> {
        None
    }
}

#[derive(Default)]
struct NullSeat;

impl SeatSink for NullSeat {}

fn motion(to: Point, time_ms: u64) -> MotionEvent {
    MotionEvent {
        position: to,
        delta: Vec2::new(1.0, 0.0),
        unaccel_delta: Vec2::new(1.0, 0.0),
        time_ms,
        device: DeviceId(1),
    }
}

fn bench_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("clamp_to_outputs");
    for n in [1_usize, 3, 6] {
        let outputs = output_row(n);
        let mut rng = Rng::new(0x5eed);
        let candidates: Vec<Point> = (0..1024)
            .map(|_| rng.point(n as f64 * 3000.0, 2000.0))
            .collect();
        group.throughput(Throughput::Elements(candidates.len() as u64));
        group.bench_function(format!("outputs_{n}"), |b| {
            b.iter(|| {
                for &p in &candidates {
                    black_box(clamp_to_outputs(black_box(&outputs), p));
                }
            });
        });
    }
    group.finish();
}

fn bench_motion_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("motion_pipeline");
    for n in [2_usize, 8] {
        let shell = GridShell::new(output_row(2), n);
        let mut rng = Rng::new(0xfeed);
        let path: Vec<Point> = (0..1024).map(|_| rng.point(3840.0, 1080.0)).collect();
        group.throughput(Throughput::Elements(path.len() as u64));
        group.bench_function(format!("windows_{}", n * n), |b| {
            b.iter_batched(
                InputCore::new,
                |mut core| {
                    let mut seat = NullSeat;
                    for (i, &p) in path.iter().enumerate() {
                        core.process_motion(&shell, &mut seat, motion(p, i as u64));
                    }
                    core
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_channel_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_dispatch");
    for observers in [4_usize, 32] {
        group.bench_function(format!("observers_{observers}"), |b| {
            b.iter_batched(
                || {
                    let shell = GridShell::new(output_row(1), 1);
                    let mut core = InputCore::new();
                    for _ in 0..observers {
                        core.register_observer(|event, _ctx| {
                            black_box(event);
                        });
                    }
                    core.register_handler(|event, _ctx| {
                        if let InputEvent::Button(_) = event {
                            return Claim::Claimed;
                        }
                        Claim::Pass
                    });
                    (shell, core)
                },
                |(shell, mut core)| {
                    let mut seat = NullSeat;
                    for i in 0..256_u64 {
                        core.process_motion(
                            &shell,
                            &mut seat,
                            motion(Point::new((i % 1920) as f64, 10.0), i),
                        );
                    }
                    core
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_clamp,
    bench_motion_pipeline,
    bench_channel_dispatch
);
criterion_main!(benches);
