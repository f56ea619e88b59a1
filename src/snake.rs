use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates may sit one step outside the grid between ticks: the head is
/// moved after boundary handling, so the next tick sees the overshoot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Moves an out-of-range coordinate to the opposite edge.
    ///
    /// Only the first offending edge is corrected, checked in the order
    /// left, right, top, bottom.
    #[must_use]
    pub fn wrapped_once(self, bounds: GridSize) -> Self {
        let width = i32::from(bounds.width);
        let height = i32::from(bounds.height);

        if self.x < 0 {
            Self::new(width - 1, self.y)
        } else if self.x >= width {
            Self::new(0, self.y)
        } else if self.y < 0 {
            Self::new(self.x, height - 1)
        } else if self.y >= height {
            Self::new(self.x, 0)
        } else {
            self
        }
    }
}

/// Snake body, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Cell) -> Self {
        Self { body: vec![start] }
    }

    /// Creates a snake from explicit body segments (first is head).
    ///
    /// An empty list yields a single segment at the origin.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        if segments.is_empty() {
            return Self::new(Cell::new(0, 0));
        }

        Self { body: segments }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Replaces the head position without touching the followers.
    pub fn set_head(&mut self, cell: Cell) {
        self.body[0] = cell;
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any non-head segment sits on the head's cell.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Appends one segment on top of the current tail.
    ///
    /// The next [`Snake::advance`] gives it the tail's previous cell.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Moves every follower onto its predecessor's cell, then steps the head.
    pub fn advance(&mut self, direction: Direction) {
        for index in (1..self.body.len()).rev() {
            self.body[index] = self.body[index - 1];
        }

        let head = self.head().stepped(direction);
        self.set_head(head);
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments, which construction rules out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Cell, Snake};

    const GRID: GridSize = GridSize {
        width: 10,
        height: 8,
    };

    #[test]
    fn wrapping_moves_offending_axis_to_opposite_edge() {
        assert_eq!(Cell::new(-1, 3).wrapped_once(GRID), Cell::new(9, 3));
        assert_eq!(Cell::new(10, 3).wrapped_once(GRID), Cell::new(0, 3));
        assert_eq!(Cell::new(4, -1).wrapped_once(GRID), Cell::new(4, 7));
        assert_eq!(Cell::new(4, 8).wrapped_once(GRID), Cell::new(4, 0));
        assert_eq!(Cell::new(4, 4).wrapped_once(GRID), Cell::new(4, 4));
    }

    #[test]
    fn wrapping_fixes_only_the_first_offending_edge() {
        assert_eq!(Cell::new(-1, -1).wrapped_once(GRID), Cell::new(9, -1));
        assert_eq!(Cell::new(10, 8).wrapped_once(GRID), Cell::new(0, 8));
    }

    #[test]
    fn snake_moves_one_cell_per_step() {
        let mut snake = Snake::new(Cell::new(5, 5));

        snake.advance(Direction::Right);

        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn followers_take_predecessor_cells() {
        let mut snake =
            Snake::from_segments(vec![Cell::new(3, 3), Cell::new(2, 3), Cell::new(1, 3)]);

        snake.advance(Direction::Down);

        let cells: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(cells, vec![Cell::new(3, 4), Cell::new(3, 3), Cell::new(2, 3)]);
    }

    #[test]
    fn grown_segment_duplicates_tail_until_next_step() {
        let mut snake = Snake::from_segments(vec![Cell::new(3, 3), Cell::new(2, 3)]);

        snake.grow();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(2, 3));

        snake.advance(Direction::Right);
        let cells: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(cells, vec![Cell::new(4, 3), Cell::new(3, 3), Cell::new(2, 3)]);
    }

    #[test]
    fn empty_segment_list_still_has_a_head() {
        let snake = Snake::from_segments(Vec::new());

        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }

    #[test]
    fn head_overlap_ignores_the_head_itself() {
        let straight = Snake::from_segments(vec![Cell::new(2, 2), Cell::new(1, 2)]);
        let looped = Snake::from_segments(vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 2)]);

        assert!(!straight.head_overlaps_body());
        assert!(looped.head_overlaps_body());
    }
}
