use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of phases in the contrast shower routine.
pub const CONTRAST_PHASES: usize = 8;

const HOT_SECS: u64 = 180;
const COLD_SECS: u64 = 60;

/// Temperature of a phase. Even plan entries are hot, odd entries cold.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseLabel {
    Hot,
    Cold,
}

impl PhaseLabel {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            PhaseLabel::Hot
        } else {
            PhaseLabel::Cold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseLabel::Hot => "HOT",
            PhaseLabel::Cold => "COLD",
        }
    }
}

impl std::fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an [`IntervalPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub index: usize,
    pub duration: Duration,
    pub label: PhaseLabel,
}

/// Ordered, non-empty list of strictly positive phase durations.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Duration>", into = "Vec<Duration>")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalPlan {
    durations: Vec<Duration>,
}

impl IntervalPlan {
    /// Build a plan, rejecting empty lists and zero-length phases.
    pub fn new(durations: Vec<Duration>) -> Result<Self, PlanError> {
        if durations.is_empty() {
            return Err(PlanError::Empty);
        }
        if let Some(index) = durations.iter().position(|d| d.is_zero()) {
            return Err(PlanError::ZeroDuration { index });
        }
        Ok(Self { durations })
    }

    /// Convenience constructor from whole seconds.
    pub fn from_secs(secs: &[u64]) -> Result<Self, PlanError> {
        Self::new(secs.iter().copied().map(Duration::from_secs).collect())
    }

    /// The hardcoded routine: four rounds of 3 min hot, 1 min cold.
    pub fn contrast_shower() -> Self {
        let durations = (0..CONTRAST_PHASES)
            .map(|i| match PhaseLabel::for_index(i) {
                PhaseLabel::Hot => Duration::from_secs(HOT_SECS),
                PhaseLabel::Cold => Duration::from_secs(COLD_SECS),
            })
            .collect();
        Self { durations }
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Whether the plan has no phases. False for any plan built through `new`.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn duration(&self, index: usize) -> Option<Duration> {
        self.durations.get(index).copied()
    }

    pub fn phase(&self, index: usize) -> Option<Phase> {
        self.duration(index).map(|duration| Phase {
            index,
            duration,
            label: PhaseLabel::for_index(index),
        })
    }

    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        (0..self.len()).filter_map(|i| self.phase(i))
    }

    /// Sum of all phase durations (running time of a full sequence),
    /// saturating at `Duration::MAX`.
    pub fn total_duration(&self) -> Duration {
        self.durations
            .iter()
            .fold(Duration::ZERO, |total, d| total.saturating_add(*d))
    }
}

impl Default for IntervalPlan {
    fn default() -> Self {
        Self::contrast_shower()
    }
}

impl TryFrom<Vec<Duration>> for IntervalPlan {
    type Error = PlanError;

    fn try_from(durations: Vec<Duration>) -> Result<Self, Self::Error> {
        Self::new(durations)
    }
}

impl From<IntervalPlan> for Vec<Duration> {
    fn from(plan: IntervalPlan) -> Self {
        plan.durations
    }
}

/// Errors that can occur when building a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A plan needs at least one phase
    Empty,
    /// Phase at `index` has zero length
    ZeroDuration { index: usize },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::Empty => write!(f, "Interval plan has no phases"),
            PlanError::ZeroDuration { index } => {
                write!(f, "Phase {} of the interval plan has zero duration", index + 1)
            }
        }
    }
}

impl std::error::Error for PlanError {}
