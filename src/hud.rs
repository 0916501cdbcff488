use crate::coords::AxialCoord;
use crate::grid::Grid;
use crate::state::GameState;

const CELL_WIDTH: usize = 6;

pub fn format_hud(state: &GameState) -> String {
	format!(
		"Score: {} | Best: {} | Tiles: {}",
		state.score(),
		state.best_value(),
		state.cells().len()
	)
}

/// Text rendering of the board, one line per `r` row. Rows are indented by
/// half a cell per step away from the middle row so the hexagon reads
/// correctly in a terminal. Empty positions show as `.`.
pub fn format_board(grid: &Grid, state: &GameState) -> Vec<String> {
	let span = grid.radius() - 1;
	let mut out = Vec::new();
	for r in -span..=span {
		let indent = " ".repeat(r.unsigned_abs() as usize * CELL_WIDTH / 2);
		let mut line = indent;
		for q in -span..=span {
			let c = AxialCoord::new(q, r);
			if !grid.contains(c) {
				continue;
			}
			let label = state
				.cell_at(c)
				.map(|cell| cell.value.to_string())
				.unwrap_or_else(|| ".".to_string());
			line.push_str(&format!("{:^width$}", label, width = CELL_WIDTH));
		}
		out.push(line.trim_end().to_string());
	}
	out
}
