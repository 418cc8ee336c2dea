//! End-to-end playback: session edits through the transport into a sink.

use saavy_theory::{
    dsp::Waveform,
    engine::{tone_engine, DEFAULT_QUEUE, DEFAULT_VOICES},
    sequencing::{Groove, Session},
    synth::{AudioSink, RecordingSink, ToneSpec},
    theory::{midi_to_freq, Mode, Scale},
    transport::{ManualClock, Transport},
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn default_session_plays_its_polyrhythm() {
    let clock = ManualClock::new();
    let mut sink = RecordingSink::new(clock.clone());
    let mut transport = Transport::new(clock.clone());
    let session = Session::new();

    transport.start(&session, &mut sink).unwrap();
    for _ in 0..100 {
        clock.advance(0.01);
        transport.poll(&session, &mut sink);
    }

    // Ticks 0..=8 are inside the lookahead window by t = 1s. The master gate
    // (2 of 4) closes ticks 2, 3, 6, 7; track 1 (degree 1, every 4) hits 0, 4, 8;
    // track 2 (degree 3, every 3 from 1) hits 1, 4.
    let c4 = midi_to_freq(60.0);
    let e4 = midi_to_freq(64.0);
    let tones = sink.tones();
    let got: Vec<(f64, f32)> = tones.iter().map(|t| (t.start(), t.frequency)).collect();
    assert_eq!(got.len(), 5, "{:?}", got);

    let spt = 0.125;
    let expected = [(0, c4), (1, e4), (4, c4), (4, e4), (8, c4)];
    for ((start, freq), (tick, want)) in got.iter().zip(expected) {
        assert!((start - (0.05 + tick as f64 * spt)).abs() < 1e-9);
        assert!(approx(*freq, want));
    }

    // Every tone lasts exactly one tick with the tick voicing.
    assert!(tones.iter().all(|t| (t.stop() - t.start() - spt).abs() < 1e-9));
    assert!(tones.iter().all(|t| t.waveform == Waveform::Sine));
}

#[test]
fn edits_while_playing_take_effect_on_next_pass() {
    let clock = ManualClock::new();
    let mut sink = RecordingSink::new(clock.clone());
    let mut transport = Transport::new(clock.clone());
    let mut session = Session::new();

    transport.start(&session, &mut sink).unwrap();
    sink.take_tones();

    // Move to A minor; the next emitted degree-1 note is A4.
    session.set_scale(Scale::new(9, Mode::Aeolian));
    for _ in 0..60 {
        clock.advance(0.01);
        transport.poll(&session, &mut sink);
    }
    let a4 = midi_to_freq(69.0);
    assert!(sink.tones().iter().any(|t| approx(t.frequency, a4)));
    assert!(sink.tones().iter().all(|t| !approx(t.frequency, midi_to_freq(60.0))));
}

#[test]
fn groove_plays_through_the_same_transport() {
    let clock = ManualClock::new();
    let mut sink = RecordingSink::new(clock.clone());
    let mut transport = Transport::new(clock.clone()).with_tone(ToneSpec::GROOVE);
    let scale = Scale::default();
    let mut groove = Groove::new();
    groove.regenerate(&scale, None);

    transport.start(&groove, &mut sink).unwrap();
    for _ in 0..200 {
        clock.advance(0.01);
        transport.poll(&groove, &mut sink);
    }

    let pitches: Vec<f32> = scale
        .midi_notes()
        .iter()
        .map(|&m| midi_to_freq(m as f32))
        .collect();
    assert!(!sink.tones().is_empty());
    for tone in sink.tones() {
        assert_eq!(tone.waveform, Waveform::Triangle);
        assert!(pitches.iter().any(|&p| approx(p, tone.frequency)));
    }
}

#[test]
fn engine_renders_scheduled_ticks_offline() {
    let sample_rate = 48_000.0;
    let block_size = 480; // 10ms
    let (mut handle, mut engine) = tone_engine(sample_rate, DEFAULT_VOICES, DEFAULT_QUEUE);
    let clock = ManualClock::new();
    let mut transport = Transport::new(clock.clone());
    let session = Session::new();

    transport.start(&session, &mut handle).unwrap();

    let mut rendered = Vec::new();
    let mut block = vec![0.0f32; block_size];
    for _ in 0..50 {
        clock.set(engine.clock().seconds());
        transport.poll(&session, &mut handle);
        engine.render_block(&mut block);
        rendered.extend_from_slice(&block);
    }

    // Nothing before the start delay, sound after it.
    let first_tick = (0.05 * sample_rate) as usize;
    assert!(rendered[..first_tick].iter().all(|&s| s == 0.0));
    assert!(rendered[first_tick..].iter().any(|s| s.abs() > 0.01));
    assert!(rendered.iter().all(|s| s.abs() <= 1.0));
    assert!((handle.current_time() - 0.5).abs() < 1e-9);

    // Stopping and silencing leaves the engine quiet.
    transport.stop();
    handle.silence().unwrap();
    engine.render_block(&mut block);
    assert_eq!(engine.active_voices(), 0);
    assert!(block.iter().all(|&s| s == 0.0));
}

#[test]
fn failed_output_keeps_transport_stopped() {
    let clock = ManualClock::new();
    let mut sink = RecordingSink::new(clock.clone()).failing();
    let mut transport = Transport::new(clock.clone());
    let session = Session::new();

    assert!(transport.toggle(&session, &mut sink).is_err());
    assert!(!transport.is_playing());

    sink.set_failing(false);
    assert_eq!(transport.toggle(&session, &mut sink), Ok(true));
    assert_eq!(sink.tones().len(), 1);
}
