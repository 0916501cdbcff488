use serde::{Deserialize, Serialize};

use crate::coords::AxialCoord;
use crate::error::GameError;

/// Squared pointer travel below which a gesture is not a swipe.
pub const GESTURE_THRESHOLD_SQ: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    UpRight,
    DownRight,
    Down,
    DownLeft,
    UpLeft,
}

/// The vertical arrow that triggers a keyboard move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalArrow {
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::UpRight,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    pub const fn vector(self) -> AxialCoord {
        match self {
            Direction::Up => AxialCoord::new(0, -1),
            Direction::UpRight => AxialCoord::new(1, -1),
            Direction::DownRight => AxialCoord::new(1, 0),
            Direction::Down => AxialCoord::new(0, 1),
            Direction::DownLeft => AxialCoord::new(-1, 1),
            Direction::UpLeft => AxialCoord::new(-1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownRight => Direction::UpLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::UpLeft => Direction::DownRight,
        }
    }

    /// Resolves a pointer delta (screen space, y grows downward) to the hex
    /// direction whose 60 degree sector contains it. Returns `None` for
    /// deltas shorter than the threshold and for a zero or non-finite delta,
    /// whatever the threshold.
    pub fn from_gesture(dx: f64, dy: f64, threshold_sq: f64) -> Option<Self> {
        let len_sq = dx * dx + dy * dy;
        if !len_sq.is_finite() || len_sq == 0.0 || !(len_sq >= threshold_sq) {
            return None;
        }
        let theta = (-dy).atan2(dx).to_degrees();

        // Sector edges overlap; the first matching branch wins.
        if (0.0..=60.0).contains(&theta) {
            Some(Direction::UpRight)
        } else if (60.0..=120.0).contains(&theta) {
            Some(Direction::Up)
        } else if (120.0..=180.0).contains(&theta) {
            Some(Direction::UpLeft)
        } else if (-60.0..=0.0).contains(&theta) {
            Some(Direction::DownRight)
        } else if (-120.0..=-60.0).contains(&theta) {
            Some(Direction::Down)
        } else if (-180.0..=-120.0).contains(&theta) {
            Some(Direction::DownLeft)
        } else {
            None
        }
    }

    /// Keyboard mapping: a vertical arrow, optionally with a horizontal arrow
    /// held, picks one of three directions. Left takes precedence.
    pub fn from_arrow_keys(arrow: VerticalArrow, left_held: bool, right_held: bool) -> Self {
        match (arrow, left_held, right_held) {
            (VerticalArrow::Up, true, _) => Direction::UpLeft,
            (VerticalArrow::Up, false, true) => Direction::UpRight,
            (VerticalArrow::Up, false, false) => Direction::Up,
            (VerticalArrow::Down, true, _) => Direction::DownLeft,
            (VerticalArrow::Down, false, true) => Direction::DownRight,
            (VerticalArrow::Down, false, false) => Direction::Down,
        }
    }
}

impl From<Direction> for AxialCoord {
    fn from(d: Direction) -> Self {
        d.vector()
    }
}

impl TryFrom<AxialCoord> for Direction {
    type Error = GameError;

    fn try_from(v: AxialCoord) -> Result<Self, Self::Error> {
        Direction::ALL
            .into_iter()
            .find(|d| d.vector() == v)
            .ok_or(GameError::InvalidDirection(v))
    }
}
