use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use murmuration_core::{FlockConfig, FlockWorld};
use std::time::Duration;

fn bench_flock_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_step");
    // Longer iteration windows give steadier numbers; allow env overrides.
    let samples: usize = std::env::var("MURMUR_BENCH_SAMPLES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(20);
    let warm: u64 = std::env::var("MURMUR_BENCH_WARMUP_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2);
    let measure: u64 = std::env::var("MURMUR_BENCH_MEASURE_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(8);
    group.sample_size(samples);
    group.warm_up_time(Duration::from_secs(warm));
    group.measurement_time(Duration::from_secs(measure));
    // Frames per bench iteration (override via MURMUR_BENCH_STEPS).
    let steps: usize = std::env::var("MURMUR_BENCH_STEPS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(16);
    let agents_list: Vec<usize> = std::env::var("MURMUR_BENCH_AGENTS")
        .ok()
        .map(|s| {
            s.split(',')
                .filter_map(|t| t.trim().parse::<usize>().ok())
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| vec![100_usize, 500, 2000]);

    for &agents in &agents_list {
        group.bench_function(format!("steps{}_agents{}", steps, agents), |b| {
            b.iter_batched(
                || {
                    let config = FlockConfig {
                        agent_count: agents,
                        group_count: 10,
                        rng_seed: Some(0xF10C_F10C),
                        ..FlockConfig::default()
                    };
                    FlockWorld::new(config).expect("world")
                },
                |mut world| {
                    for _ in 0..steps {
                        world.step(1.0 / 60.0);
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flock_steps);
criterion_main!(benches);
