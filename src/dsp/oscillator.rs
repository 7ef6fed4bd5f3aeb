use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Triangle,
}

/// Phase accumulator producing one waveform.
///
/// Phase is kept in cycles (0.0..1.0) so it never loses precision however
/// long the oscillator runs.
pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self { waveform, phase: 0.0 }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    /// Restart the waveform at phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn value(&self) -> f32 {
        match self.waveform {
            OscillatorWaveform::Sine => (TAU * self.phase).sin(),
            // 0 -> 1 -> 0 -> -1 -> 0 over one cycle
            OscillatorWaveform::Triangle => {
                let p = self.phase;
                if p < 0.25 {
                    4.0 * p
                } else if p < 0.75 {
                    2.0 - 4.0 * p
                } else {
                    4.0 * p - 4.0
                }
            }
        }
    }

    pub fn render(&mut self, destination: &mut [f32], ctx: &RenderCtx) {
        let increment = ctx.frequency / ctx.sample_rate;
        for sample in destination.iter_mut() {
            *sample = self.value();
            self.phase += increment;
            self.phase -= self.phase.floor();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_matches_reference() {
        let sample_rate = 48_000.0;
        let ctx = RenderCtx::from_freq(sample_rate, 440.0, 1.0);
        let mut osc = OscillatorBlock::sine();

        let mut buffer = vec![0.0f32; 128];
        osc.render(&mut buffer, &ctx);

        let n = 12;
        let expected = (TAU * 440.0 * n as f32 / sample_rate).sin();
        assert!(
            (buffer[n] - expected).abs() < 1e-4,
            "expected {expected}, got {}",
            buffer[n]
        );
    }

    #[test]
    fn triangle_peaks_at_quarter_cycle() {
        // 4 samples per cycle
        let ctx = RenderCtx::from_freq(4.0, 1.0, 1.0);
        let mut osc = OscillatorBlock::triangle();

        let mut buffer = [0.0f32; 4];
        osc.render(&mut buffer, &ctx);

        let expected = [0.0, 1.0, 0.0, -1.0];
        for (got, want) in buffer.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "expected {want}, got {got}");
        }
    }

    #[test]
    fn output_stays_in_range() {
        let ctx = RenderCtx::from_freq(48_000.0, 1320.0, 1.0);
        for mut osc in [OscillatorBlock::sine(), OscillatorBlock::triangle()] {
            let mut buffer = vec![0.0f32; 4096];
            osc.render(&mut buffer, &ctx);
            assert!(buffer.iter().all(|s| s.abs() <= 1.0));
        }
    }
}
