use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::coords::AxialCoord;
use crate::direction::Direction;
use crate::error::GameError;
use crate::grid::Grid;
use crate::state::{GameState, MoveReport};

/// What an observer is told after the state changes.
#[derive(Debug, Clone, Copy)]
pub enum Notification<'a> {
	Swiped(&'a MoveReport),
	Restarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&GameState, Notification<'_>) + Send>;

/// Owns one game: the board, its state, the spawn RNG and any observers.
/// Every mutation goes through `&mut self`, so a host sharing an engine
/// between threads wraps it in a single `Mutex`.
pub struct Engine {
	grid: Grid,
	state: GameState,
	rng: StdRng,
	gesture_threshold_sq: f64,
	observers: Vec<(ObserverId, Observer)>,
	next_observer: u64,
}

impl Engine {
	pub fn new(config: &GameConfig) -> Result<Self, GameError> {
		config.validate()?;
		let grid = config.grid()?;
		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		let mut engine = Self::with_rng(grid, rng);
		engine.gesture_threshold_sq = config.gesture_threshold_sq;
		Ok(engine)
	}

	pub fn with_rng(grid: Grid, mut rng: StdRng) -> Self {
		let state = GameState::new_game(&grid, &mut rng);
		Self {
			grid,
			state,
			rng,
			gesture_threshold_sq: GameConfig::default().gesture_threshold_sq,
			observers: Vec::new(),
			next_observer: 0,
		}
	}

	/// Replaces the current state, e.g. to resume from a snapshot or set up a
	/// specific layout. The state must fit this engine's grid.
	pub fn load(&mut self, state: GameState) -> Result<(), GameError> {
		state.validate(&self.grid)?;
		self.state = state;
		Ok(())
	}

	pub fn grid(&self) -> &Grid {
		&self.grid
	}

	pub fn state(&self) -> &GameState {
		&self.state
	}

	pub fn swipe(&mut self, direction: Direction) -> MoveReport {
		let (next, report) = self.state.swipe(&self.grid, direction, &mut self.rng);
		if !report.changed() {
			trace!(?direction, "swipe changed nothing");
			return report;
		}
		self.state = next;
		debug!(
			?direction,
			moves = report.moves,
			merges = report.merges,
			score = self.state.score(),
			tiles = self.state.cells().len(),
			"swipe committed"
		);
		if let Some(cell) = report.spawned() {
			trace!(id = cell.id, at = %cell.axial, "spawned tile");
		}
		self.notify(Notification::Swiped(&report));
		report
	}

	/// Swipe along a raw axial vector. Anything other than one of the six
	/// unit directions is rejected.
	pub fn swipe_vector(&mut self, v: AxialCoord) -> Result<MoveReport, GameError> {
		let direction = Direction::try_from(v)?;
		Ok(self.swipe(direction))
	}

	/// Swipe from a pointer delta; short gestures are ignored.
	pub fn swipe_gesture(&mut self, dx: f64, dy: f64) -> Option<MoveReport> {
		let direction = Direction::from_gesture(dx, dy, self.gesture_threshold_sq)?;
		Some(self.swipe(direction))
	}

	pub fn restart(&mut self) {
		self.state = GameState::restart(&self.grid, &mut self.rng);
		info!(at = ?self.state.cells().first().map(|c| c.axial), "game restarted");
		self.notify(Notification::Restarted);
	}

	pub fn has_legal_move(&self) -> bool {
		self.state.has_legal_move(&self.grid)
	}

	pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
	where
		F: FnMut(&GameState, Notification<'_>) + Send + 'static,
	{
		let id = ObserverId(self.next_observer);
		self.next_observer += 1;
		self.observers.push((id, Box::new(observer)));
		id
	}

	pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
		let before = self.observers.len();
		self.observers.retain(|(oid, _)| *oid != id);
		self.observers.len() != before
	}

	fn notify(&mut self, notification: Notification<'_>) {
		for (_, observer) in &mut self.observers {
			observer(&self.state, notification);
		}
	}
}

impl fmt::Debug for Engine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Engine")
			.field("grid", &self.grid)
			.field("state", &self.state)
			.field("observers", &self.observers.len())
			.finish_non_exhaustive()
	}
}
