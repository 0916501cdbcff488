use serde::{Deserialize, Serialize};

use crate::direction::GESTURE_THRESHOLD_SQ;
use crate::error::GameError;
use crate::grid::Grid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub radius: i32,
    pub gesture_threshold_sq: f64,
    /// Fixed seed for spawn positions; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            radius: Grid::DEFAULT_RADIUS,
            gesture_threshold_sq: GESTURE_THRESHOLD_SQ,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=Grid::MAX_RADIUS).contains(&self.radius) {
            return Err(GameError::InvalidRadius(self.radius));
        }
        if !self.gesture_threshold_sq.is_finite() || self.gesture_threshold_sq < 0.0 {
            return Err(GameError::InvalidThreshold(self.gesture_threshold_sq));
        }
        Ok(())
    }

    pub fn grid(&self) -> Result<Grid, GameError> {
        Grid::new(self.radius)
    }
}
