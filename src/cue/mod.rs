//! Audible cue played when a phase starts and when the sequence ends.
//!
//! The session only sees [`CuePlayer`]. With the `rtrb` feature the real
//! player is a [`CueTrigger`] that pokes a [`CueVoice`] living in the audio
//! callback through a wait-free ring buffer.
//!
//! # Example
//!
//! ```ignore
//! use contrast_timer::cue;
//!
//! let (voice, trigger) = cue::channel(48_000.0, cue::chime());
//! // move `voice` into the audio callback, hand `trigger` to the session
//! ```

#[cfg(feature = "rtrb")]
mod channel;

#[cfg(feature = "rtrb")]
pub use channel::{channel, CueMessage, CueTrigger, CueVoice};

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, node::GraphNode, oscillator::OscNode,
};

/// Pitch the chime is struck at.
pub const CHIME_FREQUENCY: f32 = 880.0;

/// Something that can sound the cue.
pub trait CuePlayer {
    fn play_cue(&mut self) -> Result<(), CueError>;
}

impl CuePlayer for Box<dyn CuePlayer> {
    fn play_cue(&mut self) -> Result<(), CueError> {
        (**self).play_cue()
    }
}

/// Stand-in used when no audio output could be opened.
///
/// Every cue fails with the reason the device was unavailable, so the
/// session logs it where a sound would have played.
pub struct MutedCue {
    reason: String,
}

impl MutedCue {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl CuePlayer for MutedCue {
    fn play_cue(&mut self) -> Result<(), CueError> {
        Err(CueError::Unavailable(self.reason.clone()))
    }
}

/// Errors that can occur when playing a cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueError {
    /// No audio output is available
    Unavailable(String),
    /// The audio thread has not drained earlier cues yet
    QueueFull,
}

impl std::fmt::Display for CueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueError::Unavailable(reason) => write!(f, "Cue unavailable: {}", reason),
            CueError::QueueFull => write!(f, "Cue queue is full"),
        }
    }
}

impl std::error::Error for CueError {}

/// The bundled cue: a struck bell.
///
/// 1. Sine fundamental
/// 2. Triangle partial at an inharmonic ratio for the metallic shimmer
/// 3. Near-instant attack, ~1.2s ring
pub fn chime() -> impl GraphNode {
    OscNode::sine()
        .mix(OscNode::triangle().with_ratio(2.76), 0.25)
        .amplify(EnvNode::strike(0.004, 1.2))
}
