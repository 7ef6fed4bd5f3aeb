//! ContrastApp - application builder and runner

use color_eyre::eyre::Result as EyreResult;

use contrast_timer::{
    cue::{CuePlayer, MutedCue},
    runtime::{Session, SessionConfig},
    sequencing::IntervalPlan,
};

use super::audio::CueOutput;
use super::ui::{PanelState, TimerUi};

/// Main application builder
pub struct ContrastApp {
    config: SessionConfig,
}

impl ContrastApp {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default().with_plan(IntervalPlan::contrast_shower()),
        }
    }

    /// Close the window shortly after the last phase
    pub fn close_after_finish(mut self, close: bool) -> Self {
        self.config = self.config.close_after_finish(close);
        self
    }

    /// Run the application (takes over the terminal until quit or teardown)
    pub fn run(self) -> EyreResult<()> {
        // The stream must outlive the UI loop or the cue goes silent
        let (_stream, cue): (Option<CueOutput>, Box<dyn CuePlayer>) = match CueOutput::open() {
            Ok((output, trigger)) => {
                log::info!(
                    "audio output: {} Hz, {} channels",
                    output.sample_rate(),
                    output.channels()
                );
                (Some(output), Box::new(trigger) as Box<dyn CuePlayer>)
            }
            Err(err) => {
                log::warn!("audio output unavailable, cues are muted: {err:#}");
                (None, Box::new(MutedCue::new(err.to_string())) as Box<dyn CuePlayer>)
            }
        };

        log::info!(
            "session: {} phases, {:.0} min total",
            self.config.plan.len(),
            self.config.plan.total_duration().as_secs_f64() / 60.0
        );
        let session = Session::new(self.config, PanelState::default(), cue);

        let mut terminal = ratatui::init();
        let result = TimerUi::new(session).run(&mut terminal);
        ratatui::restore();
        result
    }
}

impl Default for ContrastApp {
    fn default() -> Self {
        Self::new()
    }
}
