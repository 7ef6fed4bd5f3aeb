use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/// Audio-rate oscillator node.
///
/// Follows `RenderCtx::frequency` scaled by a ratio, so inharmonic partials
/// track the strike pitch.
pub struct OscNode {
    osc: OscillatorBlock,
    ratio: f32,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            ratio: 1.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    /// Render at `ratio` times the context pitch (inharmonic partials).
    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let ctx = RenderCtx {
            frequency: (ctx.frequency * self.ratio).clamp(20.0, 20_000.0),
            ..*ctx
        };
        self.osc.render(out, &ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        // Same attack transient on every strike
        self.osc.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn ratio_scales_context_pitch() {
        let sample_rate = 48_000.0;
        let ctx = RenderCtx::from_freq(sample_rate, 440.0, 1.0);
        let mut node = OscNode::sine().with_ratio(2.0);

        let mut buffer = vec![0.0f32; 64];
        node.render_block(&mut buffer, &ctx);

        let n = 10;
        let expected = (TAU * 880.0 * n as f32 / sample_rate).sin();
        assert!((buffer[n] - expected).abs() < 1e-4);
    }

    #[test]
    fn note_on_restarts_the_waveform() {
        let ctx = RenderCtx::from_freq(48_000.0, 660.0, 1.0);
        let mut node = OscNode::triangle();
        let mut first = vec![0.0f32; 32];
        let mut second = vec![0.0f32; 32];

        node.render_block(&mut first, &ctx);
        node.note_on(&ctx);
        node.render_block(&mut second, &ctx);

        assert_eq!(first, second);
    }
}
