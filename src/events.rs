use serde::{Deserialize, Serialize};

use crate::coords::AxialCoord;

/// What happened to individual tiles during one committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MoveEvent {
	/// Tile `id` travelled from `from` to `to`, including travel that ended in a merge.
	Moved { id: u64, from: AxialCoord, to: AxialCoord },
	/// Tile `id` absorbed tile `absorbed` at `at` and now holds `value`.
	Merged { id: u64, absorbed: u64, at: AxialCoord, value: u64 },
	Spawned { id: u64, at: AxialCoord },
}

impl MoveEvent {
	pub fn description(&self) -> String {
		match self {
			MoveEvent::Moved { id, from, to } => format!("Tile #{} moved {} -> {}", id, from, to),
			MoveEvent::Merged { id, absorbed, at, value } => {
				format!("Tile #{} absorbed #{} at {} -> {}", id, absorbed, at, value)
			}
			MoveEvent::Spawned { id, at } => format!("Tile #{} spawned at {}", id, at),
		}
	}
}
