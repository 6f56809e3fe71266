use serde::{Deserialize, Serialize};

use crate::coords::{Direction, GridPos};
use crate::grid::Grid;
use crate::tile::TileContent;

/// Player intents accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
	MoveLeft,
	MoveRight,
	MoveUp,
	MoveDown,
}

impl Command {
	pub fn direction(self) -> Direction {
		match self {
			Command::MoveLeft => Direction::Left,
			Command::MoveRight => Direction::Right,
			Command::MoveUp => Direction::Up,
			Command::MoveDown => Direction::Down,
		}
	}
}

/// What caused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCause {
	Player,
	Gravity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
	pub pos: GridPos,
	/// Set by an upward move; gravity is held off while it lasts.
	pub ascending: bool,
}

impl Drill {
	pub fn new(pos: GridPos) -> Self {
		Self { pos, ascending: false }
	}

	pub fn target(&self, dir: Direction) -> GridPos {
		self.pos.step(dir)
	}

	/// Climbing needs open space overhead: the top row and diggable ceilings refuse it.
	pub fn ascent_blocked(&self, grid: &Grid) -> bool {
		if self.pos.row <= 0 {
			return true;
		}
		grid.get(self.pos.above()).is_some_and(|c| c.is_diggable())
	}

	/// Gravity only pulls into already-open cells.
	pub fn should_fall(&self, grid: &Grid) -> bool {
		!self.ascending && grid.get(self.pos.below()) == Some(TileContent::Empty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tile::Mineral;

	#[test]
	fn drill_init() {
		let d = Drill::new(GridPos::new(0, 1));
		assert_eq!(d.pos, GridPos::new(0, 1));
		assert!(!d.ascending);
		assert_eq!(d.target(Direction::Down), GridPos::new(0, 2));
	}

	#[test]
	fn commands_map_to_directions() {
		assert_eq!(Command::MoveLeft.direction(), Direction::Left);
		assert_eq!(Command::MoveRight.direction(), Direction::Right);
		assert_eq!(Command::MoveUp.direction(), Direction::Up);
		assert_eq!(Command::MoveDown.direction(), Direction::Down);
	}

	#[test]
	fn cannot_climb_through_solid_ceiling() {
		let mut g = Grid::new(5, TileContent::Empty);
		let d = Drill::new(GridPos::new(2, 3));
		assert!(!d.ascent_blocked(&g));
		g.set_content(GridPos::new(2, 2), TileContent::Soil);
		assert!(d.ascent_blocked(&g));
		g.set_content(GridPos::new(2, 2), TileContent::Valuable(Mineral::Emerald));
		assert!(d.ascent_blocked(&g));
		g.set_content(GridPos::new(2, 2), TileContent::Obstacle);
		assert!(!d.ascent_blocked(&g), "obstacles are left to the passability check");
	}

	#[test]
	fn top_row_blocks_ascent() {
		let g = Grid::new(5, TileContent::Empty);
		assert!(Drill::new(GridPos::new(1, 0)).ascent_blocked(&g));
	}

	#[test]
	fn falls_only_into_empty_cells() {
		let mut g = Grid::new(4, TileContent::Empty);
		let mut d = Drill::new(GridPos::new(1, 1));
		assert!(d.should_fall(&g));
		d.ascending = true;
		assert!(!d.should_fall(&g));
		d.ascending = false;
		g.set_content(GridPos::new(1, 2), TileContent::Soil);
		assert!(!d.should_fall(&g));
		let bottom = Drill::new(GridPos::new(1, 3));
		assert!(!bottom.should_fall(&g));
	}
}
