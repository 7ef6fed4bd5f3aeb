use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a modulator (amplitude control).
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        // RT-safe: slice the preallocated buffer instead of allocating
        let gains = &mut self.temp_buffer[..out.len()];
        gains.fill(0.0);
        self.modulator.render_block(gains, ctx);

        for (o, g) in out.iter_mut().zip(gains.iter()) {
            *o *= *g;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    /// Silent once the modulator (the envelope) has run out.
    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}
