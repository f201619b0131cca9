// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Network Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the per-step cost of the oscillator network.
//! One step is O(N²) in the coupling sum; the 60 Hz control loop leaves
//! a 16.7 ms budget per step.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cpg_physics::{GaitPreset, OscillatorNetwork, SharedNetwork, Trajectory};
use cpg_types::GaitConfig;

// ── OscillatorNetwork.step() ────────────────────────────────────────

fn bench_step_trot(c: &mut Criterion) {
    let mut net = OscillatorNetwork::new(GaitPreset::Trot.config()).unwrap();
    c.bench_function("network_step_trot_16", |b| {
        b.iter(|| {
            net.step();
            black_box(net.setpoints()[0])
        })
    });
}

fn bench_step_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_step_n");
    for n in [16usize, 64, 256] {
        let mut cfg = GaitConfig::decoupled("bench", n, 1.0 / 60.0);
        cfg.coupling_weights = vec![vec![0.5; n]; n];
        for (i, row) in cfg.coupling_weights.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        cfg.stance_amplitude = vec![0.2; n];
        cfg.swing_amplitude = vec![0.1; n];
        let mut net = OscillatorNetwork::new(cfg).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                net.step();
                black_box(net.setpoints()[0])
            })
        });
    }
    group.finish();
}

fn bench_shared_step(c: &mut Criterion) {
    let shared = SharedNetwork::from_config(GaitPreset::Trot.config()).unwrap();
    c.bench_function("shared_network_step_trot_16", |b| {
        b.iter(|| black_box(shared.step()))
    });
}

// ── Trajectory.record() ─────────────────────────────────────────────

fn bench_record_800(c: &mut Criterion) {
    c.bench_function("trajectory_record_800", |b| {
        b.iter(|| {
            let mut net = OscillatorNetwork::new(GaitPreset::Trot.config()).unwrap();
            black_box(Trajectory::record(&mut net, 800))
        })
    });
}

criterion_group!(step, bench_step_trot, bench_step_scaling, bench_shared_step);
criterion_group!(record, bench_record_800);
criterion_main!(step, record);
