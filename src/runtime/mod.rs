//! Session wiring between the sequencer and its collaborators.
//!
//! # Example
//!
//! ```ignore
//! use contrast_timer::{cue::MutedCue, runtime::{Session, SessionConfig}};
//!
//! let mut session = Session::new(SessionConfig::default(), my_display, MutedCue::new("no audio"));
//! session.toggle_start(Instant::now());
//! loop {
//!     if session.poll(Instant::now()) == SessionSignal::Teardown {
//!         break;
//!     }
//!     // sleep until session.next_deadline()
//! }
//! ```

mod config;
mod session;

pub use config::{SessionConfig, DEFAULT_PROGRESS_INTERVAL, DEFAULT_TEARDOWN_DELAY};
pub use session::{DisplaySurface, Session, SessionSignal};
