use serde::{Deserialize, Serialize};

use crate::coords::AxialCoord;

pub const SPAWN_VALUE: u64 = 2;

/// A live tile. `id` follows the tile through slides and merges so a renderer
/// can keep its identity between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
	pub id: u64,
	pub axial: AxialCoord,
	pub value: u64,
}

impl Cell {
	pub fn spawn(id: u64, axial: AxialCoord) -> Self {
		Self { id, axial, value: SPAWN_VALUE }
	}

	pub fn can_merge_with(&self, other: &Cell) -> bool {
		self.value == other.value
	}

	pub fn is_valid_value(value: u64) -> bool {
		value >= SPAWN_VALUE && value.is_power_of_two()
	}
}
