use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mineral {
	Goldium,
	Ruby,
	Emerald,
}

impl Mineral {
	pub fn reward(self) -> MineralReward {
		match self {
			Mineral::Goldium => MineralReward { money: 250.0, storage: 20 },
			Mineral::Ruby => MineralReward { money: 20_000.0, storage: 80 },
			Mineral::Emerald => MineralReward { money: 50_000.0, storage: 60 },
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MineralReward {
	pub money: f64,
	pub storage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileContent {
	Empty,
	Soil,
	Obstacle,
	Valuable(Mineral),
	Lava,
}

impl TileContent {
	/// Soil and minerals can be dug through but not climbed through.
	pub fn is_diggable(self) -> bool {
		matches!(self, TileContent::Soil | TileContent::Valuable(_))
	}

	pub fn reward(self) -> Option<MineralReward> {
		match self {
			TileContent::Valuable(m) => Some(m.reward()),
			_ => None,
		}
	}

	/// Tag the presentation layer uses to pick a sprite.
	pub fn asset_tag(self) -> &'static str {
		match self {
			TileContent::Empty => "empty",
			TileContent::Soil => "soil",
			TileContent::Obstacle => "obstacle",
			TileContent::Valuable(Mineral::Goldium) => "valuable_goldium",
			TileContent::Valuable(Mineral::Ruby) => "valuable_ruby",
			TileContent::Valuable(Mineral::Emerald) => "valuable_emerald",
			TileContent::Lava => "lava",
		}
	}

	/// Maps a roll in `[0, 100)` onto the content of a non-boundary cell below the crust.
	pub fn from_roll(roll: u32) -> Self {
		if (93..96).contains(&roll) {
			TileContent::Obstacle
		} else if roll < 70 {
			TileContent::Soil
		} else if roll < 78 {
			TileContent::Valuable(Mineral::Goldium)
		} else if roll < 86 {
			TileContent::Valuable(Mineral::Ruby)
		} else if roll < 90 {
			TileContent::Valuable(Mineral::Emerald)
		} else {
			TileContent::Lava
		}
	}
}
