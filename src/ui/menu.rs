use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::{GameOver, GameOverReason};

/// Draws the modal Game Over notice as a centered popup.
pub fn render_game_over_notice(frame: &mut Frame<'_>, area: Rect, summary: &GameOver) {
    let popup = centered_popup(area, 60, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Game Over").style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {}", summary.score)),
        Line::from(format!("Length: {}", summary.length)),
        Line::from(match summary.reason {
            GameOverReason::OutOfBounds => "Cause: left the field",
            GameOverReason::SelfCollision => "Cause: hit yourself",
        }),
        Line::from(""),
        Line::from("[Enter] OK"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" snake ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::centered_popup;

    #[test]
    fn popup_is_centered_inside_area() {
        let area = Rect::new(0, 0, 100, 40);

        let popup = centered_popup(area, 60, 50);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }
}
