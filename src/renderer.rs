use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::app::App;
use crate::canvas::TerminalCanvas;
use crate::ui::hud::{render_hud, render_key_hints};
use crate::ui::menu::render_game_over_notice;

/// Renders the full frame from immutable app state.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let state = app.state();
    let (columns, rows) = TerminalCanvas::terminal_size(state.bounds());

    let [hud_area, play_row, hints_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(rows.saturating_add(2)),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [play_area] = Layout::horizontal([Constraint::Length(columns.saturating_add(2))])
        .flex(Flex::Center)
        .areas(play_row);

    render_hud(frame, hud_area, state);

    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    let mut canvas = TerminalCanvas::new(state.bounds());
    state.render(&mut canvas);
    canvas.flush(frame.buffer_mut(), inner);

    render_key_hints(frame, hints_area, state);

    if let Some(summary) = app.notice() {
        render_game_over_notice(frame, play_area, summary);
    }
}
