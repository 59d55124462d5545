//! Benchmark: cost of stack capture at increasing call depths, and of the
//! wrapping constructors relative to a plain error value.
//!
//! Run with: cargo bench --bench capture

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main, measurement::WallTime};
use std::hint::black_box;

use errstack::{StackPolicy, TracedError, errorf};

#[inline(never)]
fn fail_at_depth(depth: u32) -> Result<(), TracedError> {
    if depth == 0 {
        Err(errstack::new("bottom"))
    } else {
        fail_at_depth(depth - 1)
    }
}

fn bench_capture_depth(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("capture_depth");
    group.warm_up_time(std::time::Duration::from_millis(500));
    group.measurement_time(std::time::Duration::from_secs(1));
    group.sample_size(30);

    for depth in [1, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let _ = fail_at_depth(black_box(depth));
            })
        });
    }

    group.finish();
}

fn bench_constructors(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("constructors");
    group.warm_up_time(std::time::Duration::from_millis(500));
    group.measurement_time(std::time::Duration::from_secs(1));
    group.sample_size(30);

    group.bench_function("plain_io_error", |b| {
        b.iter(|| std::io::Error::other(black_box("boom")))
    });

    group.bench_function("new", |b| b.iter(|| errstack::new(black_box("boom"))));

    group.bench_function("wrap_overwrite", |b| {
        b.iter(|| errstack::with_stack(std::io::Error::other(black_box("boom"))))
    });

    // One capture instead of two: the outer node reuses the inner stack.
    group.bench_function("errorf_preserve", |b| {
        b.iter(|| {
            let inner = errstack::new(black_box("inner"));
            errorf!("outer: {}", inner; StackPolicy::Preserve)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_capture_depth, bench_constructors);
criterion_main!(benches);
