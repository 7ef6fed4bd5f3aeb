use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequencing::IntervalPlan;

/// How long the window lingers after a finished sequence.
pub const DEFAULT_TEARDOWN_DELAY: Duration = Duration::from_secs(5);
/// Progress indicator refresh period.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Session settings.
///
/// ```ignore
/// let config = SessionConfig::default()
///     .close_after_finish(false)
///     .progress_interval(Duration::from_millis(250));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub plan: IntervalPlan,
    /// Initial state of the completion policy flag
    pub close_after_finish: bool,
    pub teardown_delay: Duration,
    pub progress_interval: Duration,
}

impl SessionConfig {
    pub fn with_plan(mut self, plan: IntervalPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn close_after_finish(mut self, close: bool) -> Self {
        self.close_after_finish = close;
        self
    }

    pub fn teardown_delay(mut self, delay: Duration) -> Self {
        self.teardown_delay = delay;
        self
    }

    /// Clamped to at least one millisecond.
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval.max(Duration::from_millis(1));
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            plan: IntervalPlan::contrast_shower(),
            close_after_finish: true,
            teardown_delay: DEFAULT_TEARDOWN_DELAY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
