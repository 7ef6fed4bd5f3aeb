//! Session - one window's worth of timer state
//!
//! A `Session` is created when the window opens and dropped when it closes.
//! It owns the sequencer and the host timer queue, and turns sequencer
//! events into display updates, cues and the optional teardown.
//!
//! The host loop drives it with two calls: user actions (`toggle_start`,
//! `toggle_pause`, ...) and `poll(now)`, which runs every timer that has
//! come due. `next_deadline()` tells the host how long it may sleep.

use std::time::Instant;

use super::config::SessionConfig;
use crate::{
    cue::CuePlayer,
    engine::{
        scheduler::{Expired, TimerHandle, TimerQueue},
        HostTask,
    },
    sequencing::{IntervalSequencer, Phase, SequencerEvent, SequencerStatus},
};

/// Where phase labels and progress are shown.
pub trait DisplaySurface {
    /// A phase began; `total` is the number of phases in the plan
    fn show_phase(&mut self, phase: Phase, total: usize);
    /// Fraction of the current phase elapsed (0.0 - 1.0)
    fn set_progress(&mut self, fraction: f64);
    /// Sequence stopped or finished
    fn clear(&mut self);
}

/// What the host should do after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    Continue,
    /// Close the window
    Teardown,
}

pub struct Session<D, C> {
    config: SessionConfig,
    sequencer: IntervalSequencer<TimerHandle>,
    timers: TimerQueue<HostTask>,
    display: D,
    cue: C,
    /// Completion policy, read once when the sequence finishes
    close_after_finish: bool,
    progress_tick: Option<TimerHandle>,
    teardown: Option<TimerHandle>,
}

impl<D: DisplaySurface, C: CuePlayer> Session<D, C> {
    pub fn new(config: SessionConfig, display: D, cue: C) -> Self {
        let sequencer = IntervalSequencer::new(config.plan.clone());
        let close_after_finish = config.close_after_finish;

        Self {
            config,
            sequencer,
            timers: TimerQueue::new(),
            display,
            cue,
            close_after_finish,
            progress_tick: None,
            teardown: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sequencer(&self) -> &IntervalSequencer<TimerHandle> {
        &self.sequencer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn status(&self) -> SequencerStatus {
        self.sequencer.status()
    }

    pub fn phase_index(&self) -> usize {
        self.sequencer.phase_index()
    }

    pub fn progress(&self, now: Instant) -> f64 {
        self.sequencer.progress_fraction(now)
    }

    pub fn close_after_finish(&self) -> bool {
        self.close_after_finish
    }

    pub fn set_close_after_finish(&mut self, close: bool) {
        self.close_after_finish = close;
    }

    pub fn teardown_pending(&self) -> bool {
        self.teardown.is_some()
    }

    /// Earliest moment `poll` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Start/stop button: start when Idle, stop otherwise.
    pub fn toggle_start(&mut self, now: Instant) {
        match self.status() {
            SequencerStatus::Idle => self.start(now),
            SequencerStatus::Running | SequencerStatus::Paused => self.stop(),
        }
    }

    /// Pause/resume button. Does nothing while Idle.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.status() {
            SequencerStatus::Running => self.pause(now),
            SequencerStatus::Paused => self.resume(now),
            SequencerStatus::Idle => {}
        }
    }

    pub fn start(&mut self, now: Instant) {
        let Some(event) = self.sequencer.start(now, &mut self.timers) else {
            return;
        };

        // A new run keeps the window open
        if let Some(handle) = self.teardown.take() {
            self.timers.cancel(handle);
            log::debug!("pending teardown cancelled by restart");
        }
        self.display.clear();
        self.apply(event, now);
    }

    pub fn stop(&mut self) {
        if self.status() == SequencerStatus::Idle {
            return;
        }

        self.sequencer.stop(&mut self.timers);
        self.cancel_progress_tick();
        self.display.clear();
    }

    pub fn pause(&mut self, now: Instant) {
        if self.status() != SequencerStatus::Running {
            return;
        }

        self.sequencer.pause(now, &mut self.timers);
        self.cancel_progress_tick();
        self.display.set_progress(self.sequencer.progress_fraction(now));
    }

    pub fn resume(&mut self, now: Instant) {
        if self.status() != SequencerStatus::Paused {
            return;
        }

        self.sequencer.resume(now, &mut self.timers);
        self.display.set_progress(self.sequencer.progress_fraction(now));
        self.arm_progress_tick(now);
    }

    /// Run every host task due at `now`, in deadline order.
    pub fn poll(&mut self, now: Instant) -> SessionSignal {
        let mut signal = SessionSignal::Continue;

        while let Some(Expired {
            handle,
            deadline,
            task,
        }) = self.timers.pop_due(now)
        {
            match task {
                HostTask::PhaseElapsed => {
                    // Phases chain from their deadline so a late poll does not drift
                    if let Some(event) = self.sequencer.on_phase_elapsed(deadline, &mut self.timers) {
                        self.apply(event, deadline);
                    }
                }
                HostTask::ProgressTick => {
                    if self.progress_tick == Some(handle) {
                        self.progress_tick = None;
                        self.refresh_progress(now);
                    }
                }
                HostTask::Teardown => {
                    self.teardown = None;
                    log::info!("closing after finished sequence");
                    signal = SessionSignal::Teardown;
                }
            }
        }

        signal
    }

    /// Stop everything and drop outstanding timers. Called when the window
    /// closes.
    pub fn end(&mut self) {
        self.stop();
        self.timers.clear();
        self.progress_tick = None;
        self.teardown = None;
    }

    fn apply(&mut self, event: SequencerEvent, at: Instant) {
        match event {
            SequencerEvent::PhaseEntered { index, .. } => {
                if let Some(phase) = self.sequencer.plan().phase(index) {
                    self.display.show_phase(phase, self.sequencer.plan().len());
                }
                self.display.set_progress(0.0);
                self.play_cue();
                self.arm_progress_tick(at);
            }
            SequencerEvent::Finished => {
                self.cancel_progress_tick();
                self.display.clear();
                self.play_cue();
                log::info!("sequence finished");

                if self.close_after_finish {
                    let handle =
                        self.timers
                            .schedule_after(at, self.config.teardown_delay, HostTask::Teardown);
                    self.teardown = Some(handle);
                }
            }
        }
    }

    fn refresh_progress(&mut self, now: Instant) {
        if self.status() != SequencerStatus::Running {
            return;
        }
        self.display.set_progress(self.sequencer.progress_fraction(now));
        self.arm_progress_tick(now);
    }

    fn arm_progress_tick(&mut self, now: Instant) {
        self.cancel_progress_tick();
        let handle = self
            .timers
            .schedule_after(now, self.config.progress_interval, HostTask::ProgressTick);
        self.progress_tick = Some(handle);
    }

    fn cancel_progress_tick(&mut self) {
        if let Some(handle) = self.progress_tick.take() {
            self.timers.cancel(handle);
        }
    }

    fn play_cue(&mut self) {
        // Cue failures never interrupt the sequence
        if let Err(err) = self.cue.play_cue() {
            log::warn!("failed to play cue: {err}");
        }
    }
}
