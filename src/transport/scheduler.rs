use std::rc::Rc;

use log::{debug, info, trace, warn};

use super::clock::Clock;
use super::timer::{TimerId, TimerQueue};
use crate::config::TransportConfig;
use crate::sequencing::grid::PlaybackGrid;
use crate::synth::sink::{AudioSink, SinkError};
use crate::synth::tone::{emit_tone, ToneSpec};

/*
Look-Ahead Transport
====================

The host timer is imprecise (a UI loop, a sleeping thread), but tone
timestamps must be exact. So instead of firing each tick "now", the transport
wakes up every `poll_interval` and queues every tick that falls inside the
next `lookahead` seconds of OUTPUT time, stamping each with its exact start.

  output time ─────────────────────────────────────────────────→
               now          now + lookahead
                │◄──────────────►│
     ticks:   ──┼──●─────●─────●─┼───●─────●──
                   ▲     ▲     ▲      (picked up by a later pass)
                   queued this pass

Each pass:

    spt = (60 / bpm) / ticks_per_beat
    while next_event_time < sink_now + lookahead:
        emit grid[cursor] at next_event_time, each tone lasting spt
        mark cursor as "playing" after (next_event_time - sink_now)
        cursor = (cursor + 1) % grid.len()
        next_event_time += spt
    resubmit this pass after poll_interval

Because poll_interval < lookahead, consecutive passes always overlap and no
tick is ever skipped. Timestamps advance by exactly spt per tick.

Tempo and grid are read from the TickSource on every pass, so edits during
playback change the pace (or the pattern) from the next pass on, with no
restart and no jump of the cursor.

The display mark is deferred on the HOST clock by the tick's remaining
distance on the OUTPUT clock. The two clocks are separate; the mark is a
best-effort highlight, not a synchronization contract.

If next_event_time has fallen behind the output clock (an empty grid that
just filled, or a stalled host), the pass restarts the cadence at
sink_now + start_delay rather than queueing ticks in the past.

Stopping cancels the one pending pass and every not-yet-fired display mark.
Starting again always begins a fresh continuation chain.
*/

/// What the transport reads on every pass.
pub trait TickSource {
    /// Current tempo in beats per minute.
    fn bpm(&self) -> f64;

    /// Current playback grid. Replaced wholesale on every edit, never
    /// mutated, so holding the `Rc` for a pass can never see a partial
    /// rebuild.
    fn grid(&self) -> Rc<PlaybackGrid>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Running,
}

/// One tick the transport handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTick {
    /// Index into the grid
    pub tick: usize,
    /// Output-clock start time
    pub time: f64,
    /// How many tones were emitted for it
    pub tones: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Pass,
    Mark(usize),
}

pub struct Transport<C: Clock> {
    clock: C,
    config: TransportConfig,
    tone: ToneSpec,
    timers: TimerQueue<Task>,
    state: TransportState,
    cursor: usize,
    next_event_time: f64,
    pending_pass: Option<TimerId>,
    playing_tick: Option<usize>,
}

impl<C: Clock> Transport<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            config: TransportConfig::default(),
            tone: ToneSpec::TICK,
            timers: TimerQueue::new(),
            state: TransportState::Stopped,
            cursor: 0,
            next_event_time: 0.0,
            pending_pass: None,
            playing_tick: None,
        }
    }

    pub fn with_config(mut self, config: TransportConfig) -> Self {
        self.config = config;
        self
    }

    /// Tone used for every emitted tick.
    pub fn with_tone(mut self, tone: ToneSpec) -> Self {
        self.tone = tone;
        self
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Running
    }

    /// The tick currently marked as sounding, if any.
    pub fn playing_tick(&self) -> Option<usize> {
        self.playing_tick
    }

    /// Grid index the next queued tick will use.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Output-clock time of the next tick to queue.
    pub fn next_event_time(&self) -> f64 {
        self.next_event_time
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Host time of the next deferred continuation, if any.
    pub fn next_wakeup(&self) -> Option<f64> {
        self.timers.next_due()
    }

    /// Start playback and run the first pass immediately.
    ///
    /// If the sink cannot be resumed nothing changes and the error is
    /// returned; calling `start` again retries. Starting while already
    /// running does nothing.
    pub fn start(
        &mut self,
        source: &dyn TickSource,
        sink: &mut dyn AudioSink,
    ) -> Result<Vec<ScheduledTick>, SinkError> {
        if self.is_playing() {
            return Ok(Vec::new());
        }
        if let Err(err) = sink.resume() {
            warn!("transport start ignored: {}", err);
            return Err(err);
        }

        self.timers.clear();
        self.pending_pass = None;
        self.cursor = 0;
        self.next_event_time = sink.current_time() + self.config.start_delay;
        self.state = TransportState::Running;
        info!(
            "transport started at {:.1} BPM, first tick at {:.3}s",
            source.bpm(),
            self.next_event_time
        );

        Ok(self.pass(source, sink))
    }

    /// Stop playback, dropping the pending pass and any display marks.
    ///
    /// Returns whether the transport was running.
    pub fn stop(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        if let Some(id) = self.pending_pass.take() {
            self.timers.cancel(id);
        }
        self.timers.clear();
        self.state = TransportState::Stopped;
        self.cursor = 0;
        self.playing_tick = None;
        info!("transport stopped");
        true
    }

    /// Start if stopped, stop if running. Returns whether it is now playing.
    pub fn toggle(
        &mut self,
        source: &dyn TickSource,
        sink: &mut dyn AudioSink,
    ) -> Result<bool, SinkError> {
        if !self.stop() {
            self.start(source, sink)?;
        }
        Ok(self.is_playing())
    }

    /// Run every continuation that is due on the host clock.
    ///
    /// Returns the ticks queued by any scheduling passes that ran.
    pub fn poll(
        &mut self,
        source: &dyn TickSource,
        sink: &mut dyn AudioSink,
    ) -> Vec<ScheduledTick> {
        let now = self.clock.now();
        let mut queued = Vec::new();
        while let Some((id, task)) = self.timers.pop_due(now) {
            match task {
                Task::Mark(tick) => self.playing_tick = Some(tick),
                Task::Pass => {
                    if self.pending_pass == Some(id) {
                        self.pending_pass = None;
                        queued.extend(self.pass(source, sink));
                    }
                }
            }
        }
        queued
    }

    fn pass(&mut self, source: &dyn TickSource, sink: &mut dyn AudioSink) -> Vec<ScheduledTick> {
        let mut queued = Vec::new();
        if !self.is_playing() {
            return queued;
        }

        let grid = source.grid();
        let len = grid.len();
        let seconds_per_tick = self.config.seconds_per_tick(source.bpm());
        let sink_now = sink.current_time();

        if len > 0 {
            // Behind the output clock after idling on an empty grid or a
            // stalled host: restart the cadence instead of queueing past ticks.
            if self.next_event_time < sink_now {
                debug!(
                    "transport re-anchored from {:.3}s to {:.3}s",
                    self.next_event_time,
                    sink_now + self.config.start_delay
                );
                self.next_event_time = sink_now + self.config.start_delay;
            }
            while self.next_event_time < sink_now + self.config.lookahead {
                let tick = self.cursor % len;
                let time = self.next_event_time;

                let mut tones = 0;
                for &frequency in grid.tick(tick) {
                    match emit_tone(sink, &self.tone, frequency, time, seconds_per_tick) {
                        Ok(()) => tones += 1,
                        Err(err) => warn!("tick {} dropped a tone: {}", tick, err),
                    }
                }
                trace!("queued tick {} at {:.3}s ({} tones)", tick, time, tones);

                let delay = (time - sink_now).max(0.0);
                self.timers
                    .schedule(self.clock.now() + delay, Task::Mark(tick));

                queued.push(ScheduledTick { tick, time, tones });
                self.cursor = (tick + 1) % len;
                self.next_event_time += seconds_per_tick;
            }
        }

        let due = self.clock.now() + self.config.poll_interval;
        self.pending_pass = Some(self.timers.schedule(due, Task::Pass));
        queued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::sink::RecordingSink;
    use crate::transport::clock::ManualClock;
    use std::cell::{Cell, RefCell};

    struct FixedSource {
        bpm: Cell<f64>,
        grid: RefCell<Rc<PlaybackGrid>>,
    }

    impl FixedSource {
        fn new(bpm: f64, ticks: usize) -> Self {
            let grid = PlaybackGrid::from_ticks(vec![vec![440.0]; ticks]);
            Self {
                bpm: Cell::new(bpm),
                grid: RefCell::new(Rc::new(grid)),
            }
        }
    }

    impl TickSource for FixedSource {
        fn bpm(&self) -> f64 {
            self.bpm.get()
        }

        fn grid(&self) -> Rc<PlaybackGrid> {
            self.grid.borrow().clone()
        }
    }

    fn rig() -> (ManualClock, Transport<ManualClock>, RecordingSink) {
        let clock = ManualClock::new();
        let transport = Transport::new(clock.clone());
        let sink = RecordingSink::new(clock.clone());
        (clock, transport, sink)
    }

    fn run(
        clock: &ManualClock,
        transport: &mut Transport<ManualClock>,
        source: &FixedSource,
        sink: &mut RecordingSink,
        seconds: f64,
    ) -> Vec<ScheduledTick> {
        let mut queued = Vec::new();
        let steps = (seconds / 0.005).round() as usize;
        for _ in 0..steps {
            clock.advance(0.005);
            queued.extend(transport.poll(source, sink));
        }
        queued
    }

    #[test]
    fn first_tick_lands_after_start_delay() {
        let (clock, mut transport, mut sink) = rig();
        clock.set(10.0);
        let source = FixedSource::new(120.0, 4);

        let first = transport.start(&source, &mut sink).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].tick, 0);
        assert!((first[0].time - 10.05).abs() < 1e-9);
        assert_eq!(sink.tones().len(), 1);
        assert!((sink.tones()[0].stop() - 10.175).abs() < 1e-9);
    }

    #[test]
    fn ticks_cycle_in_order_with_exact_spacing() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 5);

        let mut queued = transport.start(&source, &mut sink).unwrap();
        queued.extend(run(&clock, &mut transport, &source, &mut sink, 3.0));

        assert!(queued.len() > 20);
        for (n, tick) in queued.iter().enumerate() {
            assert_eq!(tick.tick, n % 5, "tick {n} out of order");
            let expected = 0.05 + n as f64 * 0.125;
            assert!((tick.time - expected).abs() < 1e-9, "tick {n} at {}", tick.time);
        }
    }

    #[test]
    fn never_queues_past_the_lookahead() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(240.0, 8);
        transport.start(&source, &mut sink).unwrap();

        for _ in 0..200 {
            clock.advance(0.005);
            for tick in transport.poll(&source, &mut sink) {
                assert!(tick.time < clock.now() + 0.1);
            }
        }
    }

    #[test]
    fn display_mark_follows_output_time() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 4);
        transport.start(&source, &mut sink).unwrap();

        assert_eq!(transport.playing_tick(), None);
        clock.set(0.045);
        transport.poll(&source, &mut sink);
        assert_eq!(transport.playing_tick(), None);
        clock.set(0.05);
        transport.poll(&source, &mut sink);
        assert_eq!(transport.playing_tick(), Some(0));
    }

    #[test]
    fn stop_cancels_pending_work_and_clears_display() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 4);
        transport.start(&source, &mut sink).unwrap();
        run(&clock, &mut transport, &source, &mut sink, 0.5);
        assert!(transport.playing_tick().is_some());

        transport.stop();
        assert_eq!(transport.state(), TransportState::Stopped);
        assert_eq!(transport.playing_tick(), None);
        assert_eq!(transport.next_wakeup(), None);

        let emitted = sink.tones().len();
        let late = run(&clock, &mut transport, &source, &mut sink, 1.0);
        assert!(late.is_empty());
        assert_eq!(sink.tones().len(), emitted);
        assert_eq!(transport.playing_tick(), None);
    }

    #[test]
    fn restart_begins_a_fresh_sequence() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 4);
        transport.start(&source, &mut sink).unwrap();
        run(&clock, &mut transport, &source, &mut sink, 0.7);
        transport.stop();

        clock.advance(0.3);
        let restart_at = clock.now();
        let first = transport.start(&source, &mut sink).unwrap();
        assert_eq!(first[0].tick, 0);
        assert!((first[0].time - (restart_at + 0.05)).abs() < 1e-9);

        let more = run(&clock, &mut transport, &source, &mut sink, 0.5);
        for (n, tick) in first.iter().chain(more.iter()).enumerate() {
            assert_eq!(tick.tick, n % 4);
        }
    }

    #[test]
    fn failed_resume_leaves_transport_stopped() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 4);
        sink.set_failing(true);

        assert!(transport.start(&source, &mut sink).is_err());
        assert!(!transport.is_playing());
        assert!(run(&clock, &mut transport, &source, &mut sink, 0.5).is_empty());

        sink.set_failing(false);
        assert!(transport.toggle(&source, &mut sink).unwrap());
    }

    #[test]
    fn start_while_running_is_ignored() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 4);
        transport.start(&source, &mut sink).unwrap();
        run(&clock, &mut transport, &source, &mut sink, 0.3);
        let cursor = transport.cursor();
        assert!(transport.start(&source, &mut sink).unwrap().is_empty());
        assert_eq!(transport.cursor(), cursor);
    }

    #[test]
    fn tempo_change_applies_on_next_pass() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 16);
        let mut queued = transport.start(&source, &mut sink).unwrap();
        queued.extend(run(&clock, &mut transport, &source, &mut sink, 0.5));
        let before = queued.len();

        source.bpm.set(60.0);
        queued.extend(run(&clock, &mut transport, &source, &mut sink, 1.0));

        let gaps: Vec<f64> = queued.windows(2).map(|w| w[1].time - w[0].time).collect();
        assert!(gaps[..before - 1].iter().all(|g| (g - 0.125).abs() < 1e-9));
        assert!(gaps[before..].iter().all(|g| (g - 0.25).abs() < 1e-9));
        for (n, tick) in queued.iter().enumerate() {
            assert_eq!(tick.tick, n % 16, "no discontinuity across the tempo change");
        }
    }

    #[test]
    fn shrinking_grid_wraps_cursor() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 8);
        transport.start(&source, &mut sink).unwrap();
        run(&clock, &mut transport, &source, &mut sink, 0.6);
        assert!(transport.cursor() >= 4);

        *source.grid.borrow_mut() = Rc::new(PlaybackGrid::from_ticks(vec![vec![]; 3]));
        let queued = run(&clock, &mut transport, &source, &mut sink, 0.5);
        assert!(queued.iter().all(|t| t.tick < 3 && t.tones == 0));
    }

    #[test]
    fn empty_grid_idles_without_emitting() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 0);
        assert!(transport.start(&source, &mut sink).unwrap().is_empty());
        assert!(run(&clock, &mut transport, &source, &mut sink, 0.5).is_empty());
        assert!(transport.is_playing());
        assert!(sink.tones().is_empty());
    }

    #[test]
    fn stop_reports_whether_it_was_running() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 4);
        assert!(!transport.stop());

        transport.start(&source, &mut sink).unwrap();
        run(&clock, &mut transport, &source, &mut sink, 0.1);
        assert!(transport.stop());
        assert!(!transport.stop());
    }

    #[test]
    fn grid_appearing_after_idle_starts_from_now() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 0);
        transport.start(&source, &mut sink).unwrap();
        run(&clock, &mut transport, &source, &mut sink, 2.0);

        *source.grid.borrow_mut() = Rc::new(PlaybackGrid::from_ticks(vec![vec![440.0]; 4]));
        let queued = run(&clock, &mut transport, &source, &mut sink, 0.03);

        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].tick, 0);
        let now = clock.now();
        assert!(sink.tones().iter().all(|t| t.start() >= now - 0.03));
        assert!(queued.iter().all(|q| q.time > 2.0));
    }

    #[test]
    fn stalled_host_does_not_queue_past_ticks() {
        let (clock, mut transport, mut sink) = rig();
        let source = FixedSource::new(120.0, 8);
        transport.start(&source, &mut sink).unwrap();

        clock.advance(1.0);
        let queued = transport.poll(&source, &mut sink);
        assert_eq!(queued.len(), 1);
        assert!((queued[0].time - 1.05).abs() < 1e-9);
        assert_eq!(queued[0].tick, 1);
    }
}
