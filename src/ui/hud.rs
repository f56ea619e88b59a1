use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::{GameState, RunStatus};

/// Separator shown between HUD fields.
const SEPARATOR: &str = " │ ";

/// Draws the score label, the Start/Pause button and both selectors.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState) {
    frame.render_widget(
        Paragraph::new(status_line(state)).alignment(Alignment::Center),
        area,
    );
}

/// Draws the key hints below the play area.
pub fn render_key_hints(frame: &mut Frame<'_>, area: Rect, state: &GameState) {
    let hint = if state.selectors_enabled() {
        "[Space] Start  [M] Mode  [1-3]/[Tab] Difficulty  [Q] Quit"
    } else {
        "[Arrows]/[WASD] Steer  [Space] Pause  [Q] Quit"
    };

    frame.render_widget(
        Paragraph::new(Line::from(hint))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Label of the Start/Pause button for the current status.
#[must_use]
pub fn run_button_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Paused => "Start",
        RunStatus::Running => "Pause",
    }
}

fn status_line(state: &GameState) -> Line<'static> {
    let enabled = state.selectors_enabled();

    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(
            state.score.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(SEPARATOR),
        Span::styled(
            format!("[{}]", run_button_label(state.status())),
            Style::default().fg(Color::Green),
        ),
        Span::raw(SEPARATOR),
        selector_span("Mode", state.mode().label(), enabled),
        Span::raw(SEPARATOR),
        selector_span("Difficulty", state.difficulty().label(), enabled),
    ])
}

fn selector_span(name: &str, value: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };

    Span::styled(format!("{name}: {value}"), style)
}
