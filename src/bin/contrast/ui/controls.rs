//! Control row - start/stop, pause/resume and the close-after-finish box

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use contrast_timer::sequencing::SequencerStatus;

use super::palette;

const SYMBOL_START: &str = "▶";
const SYMBOL_STOP: &str = "⏹";
const SYMBOL_PAUSE: &str = "⏸";
const SYMBOL_RESUME: &str = "▷";

pub fn render_controls(
    frame: &mut Frame,
    area: Rect,
    status: SequencerStatus,
    close_after_finish: bool,
) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let start = match status {
        SequencerStatus::Idle => format!("{SYMBOL_START} Start"),
        _ => format!("{SYMBOL_STOP} Stop"),
    };
    let pause = match status {
        SequencerStatus::Paused => format!("{SYMBOL_RESUME} Resume"),
        _ => format!("{SYMBOL_PAUSE} Pause"),
    };
    let checkbox = if close_after_finish { "[x] Close" } else { "[ ] Close" };

    // Pause does nothing while idle, so draw it dimmed
    let pause_enabled = status != SequencerStatus::Idle;

    frame.render_widget(button(&start, true), cells[0]);
    frame.render_widget(button(&pause, pause_enabled), cells[1]);
    frame.render_widget(button(checkbox, true), cells[2]);
}

fn button(text: &str, enabled: bool) -> Paragraph<'_> {
    let fg = if enabled { Color::White } else { Color::DarkGray };
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(fg)
                .bg(palette::BUTTON)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette::ACCENT)),
        )
}
