pub mod config;
pub mod coords;
pub mod drill;
pub mod economy;
pub mod engine;
pub mod grid;
pub mod hud;
pub mod scheduler;
pub mod session;
pub mod tile;

// Re-exports for convenience in tests and integration users.
pub use config::{ConfigError, SimConfig};
pub use coords::{Direction, GridPos};
pub use drill::{Command, Drill, MoveCause};
pub use economy::Economy;
pub use engine::{Engine, MAX_PENDING_EVENTS, SimEvent, Snapshot};
pub use grid::{Grid, GridError, Passability};
pub use hud::{GameOverScreen, GameOverTheme, format_hud, game_over_screen, game_over_screen_for_code};
pub use scheduler::{Scheduler, TimerKind};
pub use session::{EndReason, Session};
pub use tile::{Mineral, TileContent};
