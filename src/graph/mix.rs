use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parallel Signal Mixing
======================

Linear crossfade of two sources:

    out = A * (1 - balance) + B * balance

balance = 0.0 is all A, 1.0 is all B. Both sources receive every strike.
Used to layer the partials of the chime.
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    balance: f32,
    temp_buffer: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B, balance: f32) -> Self {
        Self {
            source_a,
            source_b,
            balance: balance.clamp(0.0, 1.0),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn balance(&self) -> f32 {
        self.balance
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Mix<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source_a.render_block(out, ctx);

        let other = &mut self.temp_buffer[..out.len()];
        other.fill(0.0);
        self.source_b.render_block(other, ctx);

        let weight_a = 1.0 - self.balance;
        let weight_b = self.balance;
        for (o, b) in out.iter_mut().zip(other.iter()) {
            *o = *o * weight_a + *b * weight_b;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source_a.note_on(ctx);
        self.source_b.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.source_a.is_active() || self.source_b.is_active()
    }
}
