use thiserror::Error;

use crate::coords::AxialCoord;

#[derive(Debug, Error)]
pub enum GameError {
	#[error("Not a unit hex direction: {0}")]
	InvalidDirection(AxialCoord),
	#[error("Grid radius must be between 1 and 64, got {0}")]
	InvalidRadius(i32),
	#[error("Gesture threshold must be finite and non-negative, got {0}")]
	InvalidThreshold(f64),
	#[error("Cell position {0} is outside the grid")]
	OutOfGrid(AxialCoord),
	#[error("Two cells occupy {0}")]
	Overlap(AxialCoord),
	#[error("Cell id {0} is used more than once")]
	DuplicateId(u64),
	#[error("Cell value {0} is not a power of two >= 2")]
	InvalidValue(u64),
	#[error("Config error: {0}")]
	Config(#[from] serde_json::Error),
}
