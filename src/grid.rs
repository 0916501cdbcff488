use crate::coords::AxialCoord;
use crate::error::GameError;

/// The fixed hexagonal board: every legal position for a given radius,
/// computed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    radius: i32,
    positions: Vec<AxialCoord>,
}

impl Grid {
    pub const DEFAULT_RADIUS: i32 = 3;
    pub const MAX_RADIUS: i32 = 64;

    pub fn new(radius: i32) -> Result<Self, GameError> {
        if !(1..=Self::MAX_RADIUS).contains(&radius) {
            return Err(GameError::InvalidRadius(radius));
        }
        Ok(Self {
            radius,
            positions: hexagon(radius),
        })
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Number of cells, `3R² - 3R + 1`.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Largest tile value this board can ever hold. Every tile beyond the
    /// first 2 needs one more occupied cell to build, so `N` cells top out at
    /// `2^(N+1)`; capped at the largest power of two in a `u64`.
    pub fn max_value(&self) -> u64 {
        let exp = (self.len() + 1).min(63) as u32;
        1u64 << exp
    }

    pub fn positions(&self) -> &[AxialCoord] {
        &self.positions
    }

    pub fn contains(&self, c: AxialCoord) -> bool {
        c.is_in_grid(self.radius)
    }

    /// Width of the square `(q, r)` bounding box.
    fn side(&self) -> usize {
        (2 * self.radius - 1) as usize
    }

    /// Size of the dense key space addressed by [`Grid::slot`].
    pub fn slot_count(&self) -> usize {
        self.side() * self.side()
    }

    /// Packs an in-grid coordinate into a dense integer key, or `None` when
    /// the coordinate is off the board.
    pub fn slot(&self, c: AxialCoord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        let span = self.radius - 1;
        let col = (c.q + span) as usize;
        let row = (c.r + span) as usize;
        Some(col * self.side() + row)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            positions: hexagon(Self::DEFAULT_RADIUS),
        }
    }
}

fn hexagon(radius: i32) -> Vec<AxialCoord> {
    let span = radius - 1;
    (-span..=span)
        .flat_map(|q| (-span..=span).map(move |r| AxialCoord::new(q, r)))
        .filter(|c| c.is_in_grid(radius))
        .collect()
}
