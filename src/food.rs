use rand::Rng;

use crate::config::{FoodPolicy, GridSize};
use crate::snake::{Cell, Snake};

/// Picks the next food cell according to `policy`.
///
/// `AvoidSnake` falls back to the whole grid when the snake covers every cell.
#[must_use]
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    policy: FoodPolicy,
) -> Cell {
    match policy {
        FoodPolicy::Anywhere => spawn_anywhere(rng, bounds),
        FoodPolicy::AvoidSnake => {
            spawn_free(rng, bounds, snake).unwrap_or_else(|| spawn_anywhere(rng, bounds))
        }
    }
}

/// Uniform over the whole grid, ignoring the snake.
#[must_use]
pub fn spawn_anywhere<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Cell {
    Cell {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}

/// Uniform over the cells the snake does not occupy, `None` when none are free.
#[must_use]
pub fn spawn_free<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let cell = Cell { x, y };
            if !snake.occupies(cell) {
                candidates.push(cell);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
