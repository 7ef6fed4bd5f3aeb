//! Composable building blocks for the cue voice.
//!
//! Graph nodes wrap the low-level DSP primitives with strike events and
//! block-based rendering. The `extensions` module adds fluent helpers so a
//! voice can be written as one chained expression.

/// Multiply two signals together (amplitude control).
pub mod amplify;
/// Strike envelope node.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.mix()`).
pub mod extensions;
/// Linear mixing of parallel partials.
pub mod mix;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
