pub mod plan;
pub mod sequencer;

pub use plan::{IntervalPlan, Phase, PhaseLabel, PlanError};
pub use sequencer::{IntervalSequencer, SequencerEvent, SequencerStatus, TriggerScheduler};
