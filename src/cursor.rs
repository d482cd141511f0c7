//! The program counter: position, direction of travel and string mode.

use std::fmt;

use rand::Rng;
use rand::distributions::{Distribution, Standard};

use crate::Value;

/// A location on the grid, `x` is the column and `y` the row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: Value,
    pub y: Value,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: Value, y: Value) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one cell along `direction`.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction of travel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    #[default]
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Column and row offset of a single step.
    pub fn delta(self) -> (Value, Value) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

/// Position, direction and string mode of the running program.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub position: Position,
    pub direction: Direction,
    pub string_mode: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move one cell along the current direction. No wraparound.
    pub fn advance(&mut self) {
        self.position = self.position.step(self.direction);
    }

    pub fn toggle_string_mode(&mut self) {
        self.string_mode = !self.string_mode;
    }

    /// Back to the origin, heading east, string mode off.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
