use std::time::{Duration, Instant};

use tracing::debug;

use crate::game::{GameOver, GameState, RunStatus, TickOutcome};
use crate::input::GameInput;
use crate::timer::TickTimer;

/// Glue between the game core and its collaborators: timer, input and the
/// Game Over notice.
#[derive(Debug, Clone)]
pub struct App {
    state: GameState,
    timer: TickTimer,
    notice: Option<GameOver>,
    needs_redraw: bool,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        let timer = TickTimer::new(state.tick_interval());
        Self {
            state,
            timer,
            notice: None,
            needs_redraw: true,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Pending Game Over notice. While set, input is modal.
    #[must_use]
    pub fn notice(&self) -> Option<&GameOver> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns and clears the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::Quit => {
                self.should_quit = true;
                return;
            }
            GameInput::Resize => {
                self.needs_redraw = true;
                return;
            }
            _ => {}
        }

        if self.notice.is_some() {
            if matches!(input, GameInput::Acknowledge | GameInput::ToggleRun) {
                self.notice = None;
                self.needs_redraw = true;
            }
            return;
        }

        match input {
            GameInput::Direction(direction) => self.state.set_direction(direction),
            GameInput::ToggleRun | GameInput::Acknowledge => {
                self.state.toggle_running();
                self.sync_timer(now);
                self.needs_redraw = true;
            }
            GameInput::CycleMode => {
                let next = self.state.mode().next();
                self.needs_redraw |= self.state.set_mode(next);
            }
            GameInput::CycleDifficulty => {
                let next = self.state.difficulty().next();
                self.needs_redraw |= self.state.set_difficulty(next);
            }
            GameInput::SetDifficulty(difficulty) => {
                self.needs_redraw |= self.state.set_difficulty(difficulty);
            }
            GameInput::Quit | GameInput::Resize => {}
        }
    }

    /// Fires the timer when due and runs one tick.
    pub fn on_frame(&mut self, now: Instant) {
        if !self.timer.fire_due(now) {
            return;
        }

        match self.state.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Advanced => {
                let interval = self.state.tick_interval();
                if interval != self.timer.interval() {
                    self.timer.restart_with(interval, now);
                }
                self.needs_redraw = true;
            }
            TickOutcome::GameOver(summary) => {
                self.timer.stop();
                self.notice = Some(summary);
                self.needs_redraw = true;
            }
        }
    }

    /// How long the event loop may wait for input before the next tick.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    fn sync_timer(&mut self, now: Instant) {
        match self.state.status() {
            RunStatus::Running => {
                self.timer.set_interval(self.state.tick_interval());
                self.timer.start(now);
            }
            RunStatus::Paused => self.timer.stop(),
        }
        debug!(status = ?self.state.status(), interval = ?self.timer.interval(), "timer synced");
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::{Difficulty, FoodPolicy, GridSize, Mode};
    use crate::game::{GameOverReason, GameState, RunStatus};
    use crate::input::{Direction, GameInput};
    use crate::snake::{Cell, Snake};

    use super::App;

    const GRID: GridSize = GridSize {
        width: 60,
        height: 40,
    };
    const EASY: Duration = Duration::from_millis(200);
    const HARD: Duration = Duration::from_millis(50);

    fn app(mode: Mode) -> App {
        let mut state =
            GameState::new_with_seed(GRID, mode, Difficulty::Easy, FoodPolicy::Anywhere, 21);
        state.food = Cell::new(59, 39);
        App::new(state)
    }

    #[test]
    fn start_runs_timer_and_pause_stops_it() {
        let mut app = app(Mode::Classic);
        let now = Instant::now();

        app.handle_input(GameInput::ToggleRun, now);
        assert_eq!(app.state().status(), RunStatus::Running);
        assert!(app.timer().is_running());

        app.handle_input(GameInput::ToggleRun, now);
        assert_eq!(app.state().status(), RunStatus::Paused);
        assert!(!app.timer().is_running());
    }

    #[test]
    fn frame_ticks_only_when_interval_elapsed() {
        let mut app = app(Mode::Classic);
        let start = Instant::now();
        app.handle_input(GameInput::ToggleRun, start);
        let _ = app.take_redraw();

        app.on_frame(start + EASY / 2);
        assert_eq!(app.state().snake.head(), Cell::new(10, 10));
        assert!(!app.take_redraw());

        app.on_frame(start + EASY);
        assert_eq!(app.state().snake.head(), Cell::new(11, 10));
        assert!(app.take_redraw());
    }

    #[test]
    fn game_over_raises_modal_notice() {
        let mut state = GameState::new_with_seed(
            GRID,
            Mode::Classic,
            Difficulty::Easy,
            FoodPolicy::Anywhere,
            5,
        );
        state.snake = Snake::new(Cell::new(0, 0));
        state.food = Cell::new(30, 30);
        let mut app = App::new(state);
        let start = Instant::now();

        app.handle_input(GameInput::ToggleRun, start);
        app.handle_input(GameInput::Direction(Direction::Up), start);
        app.on_frame(start + EASY);
        app.on_frame(start + EASY * 2);

        let notice = app.notice().copied().expect("game over notice expected");
        assert_eq!(notice.reason, GameOverReason::OutOfBounds);
        assert!(!app.timer().is_running());
        assert_eq!(app.state().status(), RunStatus::Paused);

        // Modal: other input is swallowed until acknowledged.
        app.handle_input(GameInput::CycleMode, start);
        assert_eq!(app.state().mode(), Mode::Classic);

        app.handle_input(GameInput::Acknowledge, start);
        assert!(app.notice().is_none());
        assert_eq!(app.state().status(), RunStatus::Paused);
    }

    #[test]
    fn selectors_apply_only_while_paused() {
        let mut app = app(Mode::Classic);
        let now = Instant::now();

        app.handle_input(GameInput::SetDifficulty(Difficulty::Hard), now);
        app.handle_input(GameInput::CycleMode, now);
        assert_eq!(app.state().difficulty(), Difficulty::Hard);
        assert_eq!(app.state().mode(), Mode::Modern);

        app.handle_input(GameInput::ToggleRun, now);
        app.handle_input(GameInput::CycleDifficulty, now);
        app.handle_input(GameInput::CycleMode, now);
        assert_eq!(app.state().difficulty(), Difficulty::Hard);
        assert_eq!(app.state().mode(), Mode::Modern);
    }

    #[test]
    fn new_difficulty_takes_effect_after_first_tick() {
        let mut app = app(Mode::Modern);
        let start = Instant::now();

        app.handle_input(GameInput::SetDifficulty(Difficulty::Hard), start);
        app.handle_input(GameInput::ToggleRun, start);
        assert_eq!(app.timer().interval(), EASY);

        let first = start + EASY;
        app.on_frame(first);
        assert_eq!(app.state().snake.head(), Cell::new(11, 10));
        assert_eq!(app.time_until_tick(first), Some(HARD));

        app.on_frame(first + HARD);
        assert_eq!(app.state().snake.head(), Cell::new(12, 10));
    }

    #[test]
    fn unchanged_difficulty_keeps_steady_schedule() {
        let mut app = app(Mode::Modern);
        let start = Instant::now();
        app.handle_input(GameInput::ToggleRun, start);

        app.on_frame(start + EASY);
        assert_eq!(app.time_until_tick(start + EASY), Some(EASY));

        app.on_frame(start + EASY + HARD);
        assert_eq!(app.state().snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn quit_is_honoured_even_during_notice() {
        let mut app = app(Mode::Classic);

        app.handle_input(GameInput::Quit, Instant::now());

        assert!(app.should_quit());
    }
}
