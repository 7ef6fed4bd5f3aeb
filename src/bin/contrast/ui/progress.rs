//! Progress gauge and phase label

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use contrast_timer::sequencing::PhaseLabel;

use super::{palette, PanelState};

pub fn render_progress(frame: &mut Frame, area: Rect, panel: &PanelState) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette::ACCENT)),
        )
        .gauge_style(Style::default().fg(palette::PROGRESS).bg(palette::BUTTON))
        .ratio(panel.progress())
        .label(format!("{:.0}%", panel.progress() * 100.0));
    frame.render_widget(gauge, area);
}

/// Phase label plus time left, blank when no sequence runs.
pub fn render_phase(frame: &mut Frame, area: Rect, panel: &PanelState, remaining: Duration) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::ACCENT))
        .style(Style::default().bg(palette::BUTTON));

    let line = match panel.phase() {
        Some(phase) => {
            let color = match phase.label {
                PhaseLabel::Hot => Color::LightRed,
                PhaseLabel::Cold => Color::LightCyan,
            };
            let secs = remaining.as_secs();
            Line::from(vec![
                Span::styled(
                    panel.label(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {:02}:{:02}", secs / 60, secs % 60),
                    Style::default().fg(Color::White),
                ),
            ])
        }
        None => Line::default(),
    };

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
