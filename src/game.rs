use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::style::Color;
use tracing::{debug, info, trace};

use crate::canvas::{Canvas, FillRect};
use crate::config::{
    CELL_SIZE_PX, Difficulty, FOOD_COLOR, FoodPolicy, GridSize, Mode, SNAKE_COLOR, SPAWN_CELL,
};
use crate::food;
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Cell, Snake};

/// Whether the simulation is advancing.
///
/// A game over never stays visible as a status: the state resets and
/// returns to `Paused` within the same tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunStatus {
    Paused,
    Running,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    SelfCollision,
    OutOfBounds,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOver {
    pub score: u32,
    pub length: usize,
    pub reason: GameOverReason,
}

/// Result of one [`GameState::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Paused; nothing changed.
    Idle,
    /// The snake moved; a redraw is due.
    Advanced,
    /// The run ended and the state is already reset and paused.
    GameOver(GameOver),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    status: RunStatus,
    mode: Mode,
    difficulty: Difficulty,
    food_policy: FoodPolicy,
    tick_interval: Duration,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a paused state seeded from the OS.
    #[must_use]
    pub fn new(
        bounds: GridSize,
        mode: Mode,
        difficulty: Difficulty,
        food_policy: FoodPolicy,
    ) -> Self {
        Self::with_rng(
            bounds,
            mode,
            difficulty,
            food_policy,
            StdRng::from_entropy(),
        )
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(
        bounds: GridSize,
        mode: Mode,
        difficulty: Difficulty,
        food_policy: FoodPolicy,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            bounds,
            mode,
            difficulty,
            food_policy,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        bounds: GridSize,
        mode: Mode,
        difficulty: Difficulty,
        food_policy: FoodPolicy,
        mut rng: StdRng,
    ) -> Self {
        let snake = Snake::new(spawn_cell(bounds));
        let food = food::place(&mut rng, bounds, &snake, food_policy);

        Self {
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            status: RunStatus::Paused,
            mode,
            difficulty,
            food_policy,
            tick_interval: difficulty.tick_interval(),
            bounds,
            rng,
        }
    }

    /// Puts a fresh snake on the spawn cell and re-places food.
    ///
    /// Mode, difficulty and run status are left alone.
    pub fn reset(&mut self) {
        self.snake = Snake::new(spawn_cell(self.bounds));
        self.direction = Direction::Right;
        self.score = 0;
        self.food = food::place(&mut self.rng, self.bounds, &self.snake, self.food_policy);
        self.tick_interval = self.difficulty.tick_interval();
        debug!(food = ?self.food, "new game");
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != RunStatus::Running {
            return TickOutcome::Idle;
        }

        self.tick_interval = self.difficulty.tick_interval();

        // Pre-move positions: a collision made last tick is caught here.
        if self.snake.head_overlaps_body() {
            return TickOutcome::GameOver(self.end_game(GameOverReason::SelfCollision));
        }

        if self.snake.head() == self.food {
            self.score += 1;
            self.snake.grow();
            self.food = food::place(&mut self.rng, self.bounds, &self.snake, self.food_policy);
            trace!(score = self.score, food = ?self.food, "food eaten");
        }

        let head = self.snake.head();
        match self.mode {
            Mode::Classic if !head.is_within_bounds(self.bounds) => {
                return TickOutcome::GameOver(self.end_game(GameOverReason::OutOfBounds));
            }
            Mode::Classic => {}
            Mode::Modern => self.snake.set_head(head.wrapped_once(self.bounds)),
        }

        self.snake.advance(self.direction);
        trace!(head = ?self.snake.head(), len = self.snake.len(), "tick");

        TickOutcome::Advanced
    }

    /// Changes heading for the next tick. Reversals and paused input are ignored.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.status != RunStatus::Running {
            return;
        }

        if direction_change_is_valid(self.direction, requested) {
            self.direction = requested;
        }
    }

    /// Draws every snake segment then the food as cell-sized squares.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for segment in self.snake.segments() {
            canvas.fill_rect(cell_rect(*segment, SNAKE_COLOR));
        }

        canvas.fill_rect(cell_rect(self.food, FOOD_COLOR));
    }

    pub fn start(&mut self) {
        if self.status == RunStatus::Paused {
            self.status = RunStatus::Running;
            debug!(mode = ?self.mode, difficulty = ?self.difficulty, "running");
        }
    }

    pub fn pause(&mut self) {
        if self.status == RunStatus::Running {
            self.status = RunStatus::Paused;
            debug!(score = self.score, "paused");
        }
    }

    /// Start/Pause button behavior.
    pub fn toggle_running(&mut self) {
        match self.status {
            RunStatus::Paused => self.start(),
            RunStatus::Running => self.pause(),
        }
    }

    /// Selects a boundary mode. Only accepted while paused.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if !self.selectors_enabled() {
            return false;
        }

        self.mode = mode;
        true
    }

    /// Selects a speed tier. Only accepted while paused; the next tick
    /// picks up the new interval.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if !self.selectors_enabled() {
            return false;
        }

        self.difficulty = difficulty;
        true
    }

    /// Mode and difficulty may only change while paused.
    #[must_use]
    pub fn selectors_enabled(&self) -> bool {
        self.status == RunStatus::Paused
    }

    #[must_use]
    pub fn status(&self) -> RunStatus {
        self.status
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Interval the timer should run at, as of the last tick or reset.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    fn end_game(&mut self, reason: GameOverReason) -> GameOver {
        let summary = GameOver {
            score: self.score,
            length: self.snake.len(),
            reason,
        };
        info!(score = summary.score, length = summary.length, ?reason, "game over");

        self.status = RunStatus::Paused;
        self.reset();
        summary
    }
}

/// Spawn cell, pulled inside grids too small to contain it.
#[must_use]
pub fn spawn_cell(bounds: GridSize) -> Cell {
    Cell {
        x: SPAWN_CELL.0.min(i32::from(bounds.width) - 1),
        y: SPAWN_CELL.1.min(i32::from(bounds.height) - 1),
    }
}

fn cell_rect(cell: Cell, color: Color) -> FillRect {
    let size = i32::from(CELL_SIZE_PX);
    FillRect {
        x: cell.x * size,
        y: cell.y * size,
        width: CELL_SIZE_PX,
        height: CELL_SIZE_PX,
        color,
    }
}
