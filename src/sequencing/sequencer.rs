//! Interval sequencer - walks an [`IntervalPlan`] phase by phase
//!
//! The sequencer owns no timers. Whenever a phase needs to end in the future
//! it asks a [`TriggerScheduler`] for a handle and keeps exactly one of them.
//! The host calls [`IntervalSequencer::on_phase_elapsed`] when that trigger
//! matures. Pausing or stopping cancels the handle before returning, so the
//! host never has to filter stale triggers.
//!
//! ```text
//!            start                 pause
//!   Idle ─────────────→ Running ─────────→ Paused
//!    ↑                  │  ↑  ←─────────────┘ │
//!    │  last phase      │  │      resume      │
//!    ├──────────────────┘  └─ phase elapsed   │
//!    │                                         │
//!    └──────────────── stop ───────────────────┘
//! ```

use std::time::{Duration, Instant};

use super::plan::{IntervalPlan, Phase, PhaseLabel};

/// Host-side timer facility the sequencer schedules its triggers on.
pub trait TriggerScheduler {
    type Handle;

    /// Register a trigger that matures `delay` after `now`.
    fn schedule_trigger(&mut self, now: Instant, delay: Duration) -> Self::Handle;

    /// Cancel a trigger. Must take effect before the host's next poll.
    fn cancel_trigger(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerStatus {
    Idle,
    Running,
    Paused,
}

/// Events for display and sound side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// A phase began counting
    PhaseEntered { index: usize, label: PhaseLabel },
    /// The last phase elapsed; the sequencer is Idle again
    Finished,
}

pub struct IntervalSequencer<H> {
    plan: IntervalPlan,
    phase_index: usize,
    status: SequencerStatus,
    /// Moment the current phase began counting, shifted on resume
    phase_start: Option<Instant>,
    /// Snapshot taken at pause, consumed at resume
    remaining_in_phase: Duration,
    /// The one outstanding trigger
    pending: Option<H>,
}

impl<H> IntervalSequencer<H> {
    pub fn new(plan: IntervalPlan) -> Self {
        Self {
            plan,
            phase_index: 0,
            status: SequencerStatus::Idle,
            phase_start: None,
            remaining_in_phase: Duration::ZERO,
            pending: None,
        }
    }

    pub fn plan(&self) -> &IntervalPlan {
        &self.plan
    }

    pub fn status(&self) -> SequencerStatus {
        self.status
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// The phase being counted, `None` while Idle.
    pub fn current_phase(&self) -> Option<Phase> {
        match self.status {
            SequencerStatus::Idle => None,
            _ => self.plan.phase(self.phase_index),
        }
    }

    pub fn has_pending_trigger(&self) -> bool {
        self.pending.is_some()
    }

    fn current_duration(&self) -> Duration {
        self.plan.duration(self.phase_index).unwrap_or_default()
    }

    fn elapsed(&self, now: Instant) -> Duration {
        self.phase_start
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }

    /// Begin the sequence at phase 0. No-op unless Idle.
    pub fn start<S>(&mut self, now: Instant, scheduler: &mut S) -> Option<SequencerEvent>
    where
        S: TriggerScheduler<Handle = H>,
    {
        if self.status != SequencerStatus::Idle {
            return None;
        }

        self.phase_index = 0;
        self.status = SequencerStatus::Running;
        log::debug!("sequence started ({} phases)", self.plan.len());
        Some(self.enter_phase(now, scheduler))
    }

    /// Abandon the sequence and return to Idle. Idempotent.
    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: TriggerScheduler<Handle = H>,
    {
        self.disarm(scheduler);
        if self.status != SequencerStatus::Idle {
            log::debug!("sequence stopped at phase {}", self.phase_index + 1);
        }
        self.reset();
    }

    /// Freeze the current phase. No-op unless Running.
    pub fn pause<S>(&mut self, now: Instant, scheduler: &mut S)
    where
        S: TriggerScheduler<Handle = H>,
    {
        if self.status != SequencerStatus::Running {
            return;
        }

        self.disarm(scheduler);
        self.remaining_in_phase = self.current_duration().saturating_sub(self.elapsed(now));
        self.status = SequencerStatus::Paused;
        log::debug!(
            "paused phase {} with {:.1}s remaining",
            self.phase_index + 1,
            self.remaining_in_phase.as_secs_f64()
        );
    }

    /// Continue a paused phase where it left off. No-op unless Paused.
    pub fn resume<S>(&mut self, now: Instant, scheduler: &mut S)
    where
        S: TriggerScheduler<Handle = H>,
    {
        if self.status != SequencerStatus::Paused {
            return;
        }

        // Shift the phase start so elapsed time excludes the pause
        let already_elapsed = self.current_duration().saturating_sub(self.remaining_in_phase);
        self.phase_start = Some(now.checked_sub(already_elapsed).unwrap_or(now));
        self.status = SequencerStatus::Running;
        self.arm(now, self.remaining_in_phase, scheduler);
        log::debug!("resumed phase {}", self.phase_index + 1);
    }

    /// Called by the host when the pending trigger matures.
    ///
    /// Ignored unless Running.
    pub fn on_phase_elapsed<S>(&mut self, now: Instant, scheduler: &mut S) -> Option<SequencerEvent>
    where
        S: TriggerScheduler<Handle = H>,
    {
        if self.status != SequencerStatus::Running {
            return None;
        }

        // The trigger that brought us here has fired
        self.pending = None;
        self.phase_index += 1;

        if self.phase_index >= self.plan.len() {
            log::debug!("sequence finished");
            self.reset();
            return Some(SequencerEvent::Finished);
        }

        Some(self.enter_phase(now, scheduler))
    }

    /// Fraction of the current phase that has elapsed (0.0 - 1.0).
    pub fn progress_fraction(&self, now: Instant) -> f64 {
        let duration = self.current_duration().as_secs_f64();
        if duration <= 0.0 {
            return 0.0;
        }

        match self.status {
            SequencerStatus::Idle => 0.0,
            SequencerStatus::Running => (self.elapsed(now).as_secs_f64() / duration).clamp(0.0, 1.0),
            SequencerStatus::Paused => {
                (1.0 - self.remaining_in_phase.as_secs_f64() / duration).clamp(0.0, 1.0)
            }
        }
    }

    /// Time left in the current phase.
    pub fn remaining_in_phase(&self, now: Instant) -> Duration {
        match self.status {
            SequencerStatus::Idle => Duration::ZERO,
            SequencerStatus::Running => self.current_duration().saturating_sub(self.elapsed(now)),
            SequencerStatus::Paused => self.remaining_in_phase,
        }
    }

    fn enter_phase<S>(&mut self, now: Instant, scheduler: &mut S) -> SequencerEvent
    where
        S: TriggerScheduler<Handle = H>,
    {
        let duration = self.current_duration();
        self.phase_start = Some(now);
        self.remaining_in_phase = duration;
        self.arm(now, duration, scheduler);

        let label = PhaseLabel::for_index(self.phase_index);
        log::debug!("entered phase {} ({label})", self.phase_index + 1);
        SequencerEvent::PhaseEntered {
            index: self.phase_index,
            label,
        }
    }

    fn arm<S>(&mut self, now: Instant, delay: Duration, scheduler: &mut S)
    where
        S: TriggerScheduler<Handle = H>,
    {
        self.disarm(scheduler);
        self.pending = Some(scheduler.schedule_trigger(now, delay));
    }

    fn disarm<S>(&mut self, scheduler: &mut S)
    where
        S: TriggerScheduler<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_trigger(handle);
        }
    }

    fn reset(&mut self) {
        self.phase_index = 0;
        self.status = SequencerStatus::Idle;
        self.phase_start = None;
        self.remaining_in_phase = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every trigger so tests can fire them by hand.
    #[derive(Default)]
    struct RecordingScheduler {
        next_id: u32,
        live: Vec<(u32, Instant)>,
        cancelled: Vec<u32>,
    }

    impl RecordingScheduler {
        fn only_deadline(&self) -> Instant {
            assert_eq!(self.live.len(), 1, "expected exactly one live trigger");
            self.live[0].1
        }
    }

    impl TriggerScheduler for RecordingScheduler {
        type Handle = u32;

        fn schedule_trigger(&mut self, now: Instant, delay: Duration) -> u32 {
            let id = self.next_id;
            self.next_id += 1;
            self.live.push((id, now + delay));
            id
        }

        fn cancel_trigger(&mut self, handle: u32) {
            self.live.retain(|(id, _)| *id != handle);
            self.cancelled.push(handle);
        }
    }

    /// Fire the live trigger, as the host would when its deadline passes.
    fn fire(
        seq: &mut IntervalSequencer<u32>,
        sched: &mut RecordingScheduler,
    ) -> (Instant, Option<SequencerEvent>) {
        let deadline = sched.only_deadline();
        sched.live.clear();
        (deadline, seq.on_phase_elapsed(deadline, sched))
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn start_enters_first_hot_phase() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();

        let event = seq.start(t0, &mut sched);

        assert_eq!(
            event,
            Some(SequencerEvent::PhaseEntered {
                index: 0,
                label: PhaseLabel::Hot
            })
        );
        assert_eq!(seq.status(), SequencerStatus::Running);
        assert_eq!(sched.only_deadline(), t0 + secs(180));
    }

    #[test]
    fn full_run_emits_eight_alternating_phases_then_finished() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();

        let mut events = vec![seq.start(t0, &mut sched).unwrap()];
        while seq.status() == SequencerStatus::Running {
            let (_, event) = fire(&mut seq, &mut sched);
            events.push(event.unwrap());
        }

        assert_eq!(events.len(), 9);
        for (i, event) in events[..8].iter().enumerate() {
            let expected = if i % 2 == 0 { PhaseLabel::Hot } else { PhaseLabel::Cold };
            assert_eq!(
                *event,
                SequencerEvent::PhaseEntered {
                    index: i,
                    label: expected
                }
            );
        }
        assert_eq!(events[8], SequencerEvent::Finished);
        assert_eq!(seq.status(), SequencerStatus::Idle);
        assert_eq!(seq.phase_index(), 0);
        assert!(sched.live.is_empty());
    }

    #[test]
    fn full_run_takes_total_plan_duration() {
        let mut sched = RecordingScheduler::default();
        let plan = IntervalPlan::contrast_shower();
        let total = plan.total_duration();
        let mut seq = IntervalSequencer::new(plan);
        let t0 = Instant::now();

        seq.start(t0, &mut sched);
        let mut last = t0;
        while seq.status() == SequencerStatus::Running {
            last = fire(&mut seq, &mut sched).0;
        }

        assert_eq!(last - t0, total);
    }

    #[test]
    fn progress_is_monotonic_and_resets_on_next_phase() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();
        seq.start(t0, &mut sched);

        let mut previous = seq.progress_fraction(t0);
        assert_eq!(previous, 0.0);
        for s in (0..=200).step_by(10) {
            let p = seq.progress_fraction(t0 + secs(s));
            assert!(p >= previous, "progress went backwards at {s}s");
            assert!(p <= 1.0);
            previous = p;
        }
        assert_eq!(seq.progress_fraction(t0 + secs(180)), 1.0);
        assert!((seq.progress_fraction(t0 + secs(90)) - 0.5).abs() < 1e-9);

        let (deadline, _) = fire(&mut seq, &mut sched);
        assert_eq!(seq.progress_fraction(deadline), 0.0);
        assert_eq!(seq.phase_index(), 1);
    }

    #[test]
    fn pause_then_immediate_resume_is_seamless() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();
        seq.start(t0, &mut sched);

        let t = t0 + secs(45);
        let before = seq.progress_fraction(t);
        let remaining_before = seq.remaining_in_phase(t);

        seq.pause(t, &mut sched);
        assert_eq!(seq.remaining_in_phase(t), remaining_before);
        assert!(sched.live.is_empty());

        seq.resume(t, &mut sched);
        assert_eq!(seq.remaining_in_phase(t), remaining_before);
        assert!((seq.progress_fraction(t) - before).abs() < 1e-9);
        assert_eq!(sched.only_deadline(), t0 + secs(180));
    }

    #[test]
    fn paused_time_is_excluded_from_phase() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::from_secs(&[60, 60]).unwrap());
        let t0 = Instant::now();
        seq.start(t0, &mut sched);

        seq.pause(t0 + secs(30), &mut sched);
        assert_eq!(seq.remaining_in_phase(t0 + secs(90)), secs(30));
        assert!((seq.progress_fraction(t0 + secs(90)) - 0.5).abs() < 1e-9);

        seq.resume(t0 + secs(100), &mut sched);
        assert!((seq.progress_fraction(t0 + secs(100)) - 0.5).abs() < 1e-9);

        // 30s before the pause + 30s after the resume
        assert_eq!(sched.only_deadline(), t0 + secs(130));
        let (_, event) = fire(&mut seq, &mut sched);
        assert_eq!(
            event,
            Some(SequencerEvent::PhaseEntered {
                index: 1,
                label: PhaseLabel::Cold
            })
        );
    }

    #[test]
    fn pause_after_deadline_clamps_remaining_to_zero() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::from_secs(&[10]).unwrap());
        let t0 = Instant::now();
        seq.start(t0, &mut sched);

        seq.pause(t0 + secs(15), &mut sched);
        assert_eq!(seq.remaining_in_phase(t0 + secs(15)), Duration::ZERO);
        assert_eq!(seq.progress_fraction(t0 + secs(15)), 1.0);
    }

    #[test]
    fn stop_cancels_trigger_and_ignores_stale_elapse() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();
        seq.start(t0, &mut sched);
        fire(&mut seq, &mut sched);

        seq.stop(&mut sched);
        assert_eq!(seq.status(), SequencerStatus::Idle);
        assert_eq!(seq.phase_index(), 0);
        assert!(sched.live.is_empty());
        assert_eq!(sched.cancelled, vec![1]);
        assert!(!seq.has_pending_trigger());

        assert_eq!(seq.on_phase_elapsed(t0 + secs(240), &mut sched), None);
        assert_eq!(seq.status(), SequencerStatus::Idle);
        assert_eq!(seq.phase_index(), 0);
    }

    #[test]
    fn stop_from_paused_returns_to_idle() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();
        seq.start(t0, &mut sched);
        seq.pause(t0 + secs(5), &mut sched);

        seq.stop(&mut sched);
        assert_eq!(seq.status(), SequencerStatus::Idle);
        assert_eq!(seq.progress_fraction(t0 + secs(6)), 0.0);
        assert!(seq.current_phase().is_none());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut sched = RecordingScheduler::default();
        let mut seq: IntervalSequencer<u32> = IntervalSequencer::new(IntervalPlan::contrast_shower());
        seq.stop(&mut sched);
        seq.stop(&mut sched);
        assert_eq!(seq.status(), SequencerStatus::Idle);
        assert!(sched.cancelled.is_empty());
    }

    #[test]
    fn invalid_state_calls_are_no_ops() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();

        seq.pause(t0, &mut sched);
        assert_eq!(seq.status(), SequencerStatus::Idle);
        seq.resume(t0, &mut sched);
        assert_eq!(seq.status(), SequencerStatus::Idle);
        assert!(sched.live.is_empty());

        seq.start(t0, &mut sched);
        seq.resume(t0 + secs(1), &mut sched);
        assert_eq!(seq.status(), SequencerStatus::Running);
        assert_eq!(seq.phase_index(), 0);
        assert_eq!(seq.start(t0 + secs(2), &mut sched), None);
        assert_eq!(sched.only_deadline(), t0 + secs(180));
    }

    #[test]
    fn double_pause_and_double_resume_are_no_ops() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();
        seq.start(t0, &mut sched);

        seq.pause(t0 + secs(20), &mut sched);
        seq.pause(t0 + secs(50), &mut sched);
        assert_eq!(seq.remaining_in_phase(t0 + secs(50)), secs(160));

        seq.resume(t0 + secs(60), &mut sched);
        seq.resume(t0 + secs(70), &mut sched);
        assert_eq!(sched.only_deadline(), t0 + secs(220));
    }

    #[test]
    fn elapse_while_paused_is_ignored() {
        let mut sched = RecordingScheduler::default();
        let mut seq = IntervalSequencer::new(IntervalPlan::contrast_shower());
        let t0 = Instant::now();
        seq.start(t0, &mut sched);
        seq.pause(t0 + secs(10), &mut sched);

        assert_eq!(seq.on_phase_elapsed(t0 + secs(180), &mut sched), None);
        assert_eq!(seq.status(), SequencerStatus::Paused);
        assert_eq!(seq.phase_index(), 0);
    }
}
