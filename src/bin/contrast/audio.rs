//! Audio output - plays the chime through the default device

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};

use contrast_timer::{
    cue::{self, CueTrigger},
    MAX_BLOCK_SIZE,
};

/// Running output stream. Dropping it stops audio.
pub struct CueOutput {
    _stream: cpal::Stream,
    sample_rate: u32,
    channels: usize,
}

impl CueOutput {
    /// Open the default output device and start rendering the chime voice.
    pub fn open() -> EyreResult<(Self, CueTrigger)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0;
        let channels = (config.channels() as usize).max(1);

        let (mut voice, trigger) = cue::channel(sample_rate as f32, cue::chime());
        let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    // Mono voice copied to every channel, one block at a time
                    for frames in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                        let block = &mut mono[..frames.len() / channels];
                        voice.render(block);
                        for (frame, &s) in frames.chunks_mut(channels).zip(block.iter()) {
                            frame.fill(s);
                        }
                    }
                },
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        Ok((
            Self {
                _stream: stream,
                sample_rate,
                channels,
            },
            trigger,
        ))
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}
