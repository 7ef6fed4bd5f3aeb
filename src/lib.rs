pub mod cue; // Audible phase cues
pub mod dsp;
pub mod engine; // Host timer queue
pub mod graph; // Composable audio graph nodes
pub mod runtime; // Session wiring
pub mod sequencing; // Interval plan and sequencer state machine

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
