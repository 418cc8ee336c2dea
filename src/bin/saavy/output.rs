//! Lazily opened cpal output
//!
//! Nothing touches the audio device until the first time something wants to
//! play. If opening fails, that play is a no-op and the next one tries again.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{info, warn};

use saavy_theory::{
    engine::{tone_engine, EngineHandle, DEFAULT_QUEUE, DEFAULT_VOICES},
    synth::{AudioSink, ScheduledTone, SinkError},
    MAX_BLOCK_SIZE,
};

struct LiveOutput {
    // Dropping the stream stops audio, so it lives as long as the handle.
    _stream: cpal::Stream,
    handle: EngineHandle,
    sample_rate: f32,
}

pub enum OutputStatus {
    Closed,
    Open { sample_rate: f32 },
    Failed(String),
}

pub struct AudioOutput {
    live: Option<LiveOutput>,
    status: OutputStatus,
}

impl AudioOutput {
    pub fn new() -> Self {
        Self {
            live: None,
            status: OutputStatus::Closed,
        }
    }

    pub fn status(&self) -> &OutputStatus {
        &self.status
    }

    /// Cut every queued and sounding tone.
    pub fn silence(&mut self) {
        if let Some(live) = self.live.as_mut() {
            if let Err(err) = live.handle.silence() {
                warn!("could not silence output: {}", err);
            }
        }
    }

    fn open() -> EyreResult<LiveOutput> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let (handle, mut engine) = tone_engine(sample_rate, DEFAULT_VOICES, DEFAULT_QUEUE);

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render];
                        engine.render_block(block);

                        // Copy to output (mono to all channels)
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                },
                |err| warn!("audio stream error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;
        info!(
            "audio output open: {} Hz, {} channels",
            sample_rate, channels
        );

        Ok(LiveOutput {
            _stream: stream,
            handle,
            sample_rate,
        })
    }
}

impl AudioSink for AudioOutput {
    fn current_time(&self) -> f64 {
        self.live
            .as_ref()
            .map(|live| live.handle.current_time())
            .unwrap_or(0.0)
    }

    fn resume(&mut self) -> Result<(), SinkError> {
        if self.live.is_some() {
            return Ok(());
        }
        match Self::open() {
            Ok(live) => {
                self.status = OutputStatus::Open {
                    sample_rate: live.sample_rate,
                };
                self.live = Some(live);
                Ok(())
            }
            Err(err) => {
                let reason = format!("{:#}", err);
                warn!("audio output unavailable: {}", reason);
                self.status = OutputStatus::Failed(reason.clone());
                Err(SinkError::Build(reason))
            }
        }
    }

    fn schedule(&mut self, tone: ScheduledTone) -> Result<(), SinkError> {
        match self.live.as_mut() {
            Some(live) => live.handle.schedule(tone),
            None => Err(SinkError::NoDevice),
        }
    }
}
