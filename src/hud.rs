use crate::economy::Economy;
use crate::session::EndReason;

pub const WINDOW_TITLE: &str = "HU-Load";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudLines {
	pub fuel: String,
	pub storage: String,
	pub money: String,
}

pub fn format_hud(economy: &Economy) -> HudLines {
	HudLines {
		fuel: format!("Fuel: {:.2}", economy.fuel),
		storage: format!("Storage: {}/{}", economy.storage, economy.capacity),
		money: format!("Money: ${:.2}", economy.money),
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverTheme {
	Exhausted,
	Lava,
	Unknown,
}

impl GameOverTheme {
	pub fn rgb(self) -> [u8; 3] {
		match self {
			GameOverTheme::Exhausted => [0x0b, 0x50, 0x0b],
			GameOverTheme::Lava => [0x7e, 0x09, 0x09],
			GameOverTheme::Unknown => [0x33, 0x33, 0x33],
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverScreen {
	pub message: String,
	pub theme: GameOverTheme,
}

pub fn game_over_screen(reason: EndReason, money: f64) -> GameOverScreen {
	match reason {
		EndReason::OutOfFuel | EndReason::StorageFull => GameOverScreen {
			message: format!("GAME OVER\nCollected Money: {:.2}", money),
			theme: GameOverTheme::Exhausted,
		},
		EndReason::Lava => GameOverScreen {
			message: "GAME OVER".to_string(),
			theme: GameOverTheme::Lava,
		},
	}
}

/// Same as [`game_over_screen`] for a raw reason code; unrecognised codes get the fallback screen.
pub fn game_over_screen_for_code(code: &str, money: f64) -> GameOverScreen {
	match code.parse::<EndReason>() {
		Ok(reason) => game_over_screen(reason, money),
		Err(_) => GameOverScreen {
			message: "GAME OVER - Unknown Reason".to_string(),
			theme: GameOverTheme::Unknown,
		},
	}
}
