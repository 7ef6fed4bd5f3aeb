use crate::{
    dsp::envelope::Envelope,
    graph::node::{GraphNode, RenderCtx},
};

/// Envelope as a control signal, scaled by strike velocity.
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    pub fn strike(attack: f32, decay: f32) -> Self {
        Self {
            env: Envelope::strike(attack, decay),
        }
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
        if ctx.velocity < 1.0 {
            for sample in out.iter_mut() {
                *sample *= ctx.velocity;
            }
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
