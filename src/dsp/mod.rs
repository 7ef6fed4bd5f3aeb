//! Low-level DSP primitives used by the cue graph nodes.
//!
//! These components are allocation-free and realtime-safe, so they can be
//! owned by the audio callback directly.

/// Percussive strike envelope.
pub mod envelope;
/// Phase-accumulating oscillator waveforms.
pub mod oscillator;

pub use envelope::EnvelopeState;
