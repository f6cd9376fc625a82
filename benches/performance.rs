// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for GridNotes
//!
//! Run with: cargo bench
//!
//! Every configuration change recomputes the whole keyboard, so layout
//! cost bounds how quickly settings respond.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gridnotes::config::{Configuration, DeviceClass};
use gridnotes::keyboard::{compute_row, Interface, Keyboard, KeysPerOctave, NonDiatonicKeyStyle};
use gridnotes::music::{AbsoluteNote, Note, Octave, Scale};

/// Benchmark a single row for each keys-per-octave mode
fn bench_compute_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_row");
    let octave = Octave::new(4).unwrap_or(Octave::MIN);

    for mode in [KeysPerOctave::Chromatic, KeysPerOctave::Diatonic] {
        group.bench_with_input(
            BenchmarkId::new("major", mode.display_name()),
            &mode,
            |b, &mode| {
                b.iter(|| {
                    compute_row(
                        black_box(Note::C),
                        black_box(octave),
                        black_box(Scale::Major),
                        mode,
                        NonDiatonicKeyStyle::Shaded,
                    )
                })
            },
        );
    }

    group.finish();
}

/// Benchmark full keyboard assembly per device and interface
fn bench_keyboard_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard_compute");

    for device in [DeviceClass::Phone, DeviceClass::Tablet] {
        for interface in Interface::ALL {
            let mut config = Configuration::for_device(device);
            config.interface = interface;
            let id = format!("{:?}/{}", device, interface.display_name());
            group.bench_with_input(BenchmarkId::from_parameter(id), &config, |b, config| {
                b.iter(|| Keyboard::compute(black_box(config)))
            });
        }
    }

    group.finish();
}

/// Benchmark sparse scale lookups across every scale
fn bench_sparse_notes(c: &mut Criterion) {
    let tonic = AbsoluteNote::new(Note::C, Octave::new(4).unwrap_or(Octave::MIN));

    c.bench_function("sparse_absolute_notes_all_scales", |b| {
        b.iter(|| {
            for scale in Scale::ALL {
                black_box(scale.sparse_absolute_notes(black_box(tonic)));
            }
        })
    });
}

/// Benchmark a configuration change through the player
fn bench_commit(c: &mut Criterion) {
    use gridnotes::audio::AudioError;
    use gridnotes::control::ControlAction;
    use gridnotes::music::MidiNote;
    use gridnotes::playback::Synthesizer;
    use gridnotes::ui::Player;

    struct NullSynth;

    impl Synthesizer for NullSynth {
        fn note_on(&mut self, _pitch: MidiNote, _velocity: u8) -> Result<(), AudioError> {
            Ok(())
        }

        fn note_off(&mut self, _pitch: MidiNote) -> Result<(), AudioError> {
            Ok(())
        }
    }

    let mut player = Player::new(
        Configuration::for_device(DeviceClass::Tablet),
        Box::new(NullSynth),
    );

    c.bench_function("scale_next_commit", |b| {
        b.iter(|| player.apply(black_box(ControlAction::ScaleNext)))
    });
}

criterion_group!(
    benches,
    bench_compute_row,
    bench_keyboard_compute,
    bench_sparse_notes,
    bench_commit,
);

criterion_main!(benches);
