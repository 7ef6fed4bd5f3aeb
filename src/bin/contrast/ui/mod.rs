//! TUI module for contrast
//!
//! One small panel: controls, progress gauge, phase label.

mod controls;
mod progress;
pub mod state;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    DefaultTerminal, Frame,
};

use contrast_timer::{
    cue::CuePlayer,
    runtime::{Session, SessionSignal},
};

pub use state::PanelState;

use controls::render_controls;
use progress::{render_phase, render_progress};

/// Longest the loop sleeps between redraws
const FRAME: Duration = Duration::from_millis(33);

mod palette {
    use ratatui::style::Color;

    pub const BACKGROUND: Color = Color::Rgb(0x4d, 0x26, 0x73);
    pub const BUTTON: Color = Color::Rgb(0x5e, 0x2f, 0x8c);
    pub const ACCENT: Color = Color::Rgb(0x6b, 0x35, 0xa1);
    pub const PROGRESS: Color = Color::Rgb(0x7b, 0x4a, 0x9e);
}

/// UI application state
pub struct TimerUi {
    session: Session<PanelState, Box<dyn CuePlayer>>,
    should_quit: bool,
}

impl TimerUi {
    pub fn new(session: Session<PanelState, Box<dyn CuePlayer>>) -> Self {
        Self {
            session,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let now = Instant::now();
            if self.session.poll(now) == SessionSignal::Teardown {
                break;
            }

            terminal.draw(|frame| self.render(frame, now))?;

            // Wake for the next timer or the next frame, whichever comes first
            let timeout = self
                .session
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or(FRAME)
                .min(FRAME);

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.session.end();
        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        let now = Instant::now();
        match key {
            KeyCode::Char(' ') | KeyCode::Enter => self.session.toggle_start(now),
            KeyCode::Char('p') | KeyCode::Char('P') => self.session.toggle_pause(now),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                let close = !self.session.close_after_finish();
                self.session.set_close_after_finish(close);
                log::debug!("close after finish: {close}");
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame, now: Instant) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(palette::BACKGROUND)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Controls
                Constraint::Length(3), // Progress gauge
                Constraint::Length(3), // Phase label
                Constraint::Min(0),
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_controls(
            frame,
            chunks[0],
            self.session.status(),
            self.session.close_after_finish(),
        );

        let panel = self.session.display();
        render_progress(frame, chunks[1], panel);

        let remaining = self.session.sequencer().remaining_in_phase(now);
        render_phase(frame, chunks[2], panel, remaining);

        let help = Paragraph::new(" [Space] Start/Stop  [P] Pause  [C] Close after finish  [Q] Quit")
            .style(Style::default().fg(Color::Gray).bg(palette::BACKGROUND));
        frame.render_widget(help, chunks[4]);
    }
}
