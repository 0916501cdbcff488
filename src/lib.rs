pub mod config;
pub mod coords;
pub mod direction;
pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod hud;
pub mod state;
pub mod tile;

// Re-exports for convenience in tests and integration users.
pub use config::GameConfig;
pub use coords::{AxialCoord, axial_to_pixel, pixel_to_axial, pixel_to_axial_rounded, unit_corners};
pub use direction::{Direction, GESTURE_THRESHOLD_SQ, VerticalArrow};
pub use engine::{Engine, Notification, ObserverId};
pub use error::GameError;
pub use events::MoveEvent;
pub use grid::Grid;
pub use hud::{format_board, format_hud};
pub use state::{GameState, MoveReport};
pub use tile::{Cell, SPAWN_VALUE};
