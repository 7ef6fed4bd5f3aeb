//! Display state the session writes and the renderer reads

use contrast_timer::{runtime::DisplaySurface, sequencing::Phase};

/// What the phase label and progress gauge currently show.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    /// Active phase and plan length, `None` when cleared
    phase: Option<(Phase, usize)>,
    /// Gauge fill (0.0-1.0)
    progress: f64,
}

impl PanelState {
    pub fn phase(&self) -> Option<Phase> {
        self.phase.map(|(phase, _)| phase)
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Label text, e.g. "3/8 HOT". Empty when cleared.
    pub fn label(&self) -> String {
        match self.phase {
            Some((phase, total)) => format!("{}/{} {}", phase.index + 1, total, phase.label),
            None => String::new(),
        }
    }
}

impl DisplaySurface for PanelState {
    fn show_phase(&mut self, phase: Phase, total: usize) {
        self.phase = Some((phase, total));
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress = fraction.clamp(0.0, 1.0);
    }

    fn clear(&mut self) {
        self.phase = None;
        self.progress = 0.0;
    }
}
