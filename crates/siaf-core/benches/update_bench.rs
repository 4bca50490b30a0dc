use criterion::{criterion_group, criterion_main, BenchmarkId, BatchSize, Criterion, Throughput};
use siaf_core::{IafNeuron, IafParams, SliceRecorder, SpikeInput};

fn prepared_neuron(slice_len: usize, i_e: f64) -> IafNeuron {
    let mut neuron = IafNeuron::with_params(IafParams {
        i_e,
        ..IafParams::default()
    })
    .expect("bench neuron params");
    neuron.init_buffers(slice_len);
    neuron.calibrate(0.1).expect("bench calibration");
    // sparse synaptic fan-in across the slice
    for lag in (0..slice_len).step_by(5) {
        neuron.handle_spike(&SpikeInput::new(1.5, 1, lag));
    }
    neuron
}

fn bench_update_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("iaf_update_slice");

    for &slice_len in &[16usize, 64usize, 256usize] {
        group.throughput(Throughput::Elements(slice_len as u64));

        group.bench_with_input(BenchmarkId::new("quiet", slice_len), &slice_len, |b, &n| {
            b.iter_batched(
                || prepared_neuron(n, 0.0),
                |mut neuron| {
                    let mut host = SliceRecorder::new();
                    neuron.update(0, 0, n, &mut host);
                    host.spikes.len()
                },
                BatchSize::SmallInput,
            );
        });

        // constant drive keeps the threshold/reset branch hot
        group.bench_with_input(BenchmarkId::new("spiking", slice_len), &slice_len, |b, &n| {
            b.iter_batched(
                || prepared_neuron(n, 2000.0),
                |mut neuron| {
                    let mut host = SliceRecorder::new();
                    neuron.update(0, 0, n, &mut host);
                    host.spikes.len()
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update_slice);
criterion_main!(benches);
