//! Real-time playback of a tick grid.
//!
//! The transport never sleeps or spins. It is driven by `poll`, which runs
//! whatever deferred continuations are due on its [`Clock`], and queues tones
//! ahead of time on an [`AudioSink`](crate::synth::AudioSink).

pub mod clock;
pub mod scheduler;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{ScheduledTick, TickSource, Transport, TransportState};
