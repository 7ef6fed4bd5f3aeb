pub mod scheduler;

use std::time::{Duration, Instant};

use self::scheduler::{TimerHandle, TimerQueue};
use crate::sequencing::TriggerScheduler;

/// Work the host loop runs when a timer matures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostTask {
    /// The sequencer's current phase has run its course
    PhaseElapsed,
    /// Refresh the progress indicator
    ProgressTick,
    /// Close the window after a finished sequence
    Teardown,
}

impl TriggerScheduler for TimerQueue<HostTask> {
    type Handle = TimerHandle;

    fn schedule_trigger(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        self.schedule_after(now, delay, HostTask::PhaseElapsed)
    }

    fn cancel_trigger(&mut self, handle: TimerHandle) {
        self.cancel(handle);
    }
}
