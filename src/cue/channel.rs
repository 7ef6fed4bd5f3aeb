use rtrb::{Consumer, Producer, RingBuffer};

use super::{CueError, CuePlayer, CHIME_FREQUENCY};
use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

const CUE_QUEUE_SIZE: usize = 16;
const CUE_VELOCITY: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueMessage {
    Strike,
}

/// Audio-thread half: owns the voice and renders it.
pub struct CueVoice {
    node: Box<dyn GraphNode>,
    rx: Consumer<CueMessage>,
    ctx: RenderCtx,
}

/// UI-thread half: requests a strike.
pub struct CueTrigger {
    tx: Producer<CueMessage>,
}

/// Split a cue voice into its audio-thread and UI-thread halves.
pub fn channel<N: GraphNode + 'static>(sample_rate: f32, node: N) -> (CueVoice, CueTrigger) {
    let (tx, rx) = RingBuffer::<CueMessage>::new(CUE_QUEUE_SIZE);
    let voice = CueVoice {
        node: Box::new(node),
        rx,
        ctx: RenderCtx::from_freq(sample_rate, CHIME_FREQUENCY, CUE_VELOCITY),
    };
    (voice, CueTrigger { tx })
}

impl CueVoice {
    /// Render mono output. Allocation-free.
    pub fn render(&mut self, out: &mut [f32]) {
        while let Ok(msg) = self.rx.pop() {
            match msg {
                CueMessage::Strike => self.node.note_on(&self.ctx),
            }
        }

        if !self.node.is_active() {
            out.fill(0.0);
            return;
        }

        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.node.render_block(block, &self.ctx);
        }
    }

    pub fn is_ringing(&self) -> bool {
        self.node.is_active()
    }
}

impl CuePlayer for CueTrigger {
    fn play_cue(&mut self) -> Result<(), CueError> {
        self.tx
            .push(CueMessage::Strike)
            .map_err(|_| CueError::QueueFull)
    }
}
