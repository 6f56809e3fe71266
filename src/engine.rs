use std::collections::VecDeque;
use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, SimConfig};
use crate::coords::{Direction, GridPos};
use crate::drill::{Command, Drill, MoveCause};
use crate::economy::{Economy, FuelTick};
use crate::grid::{Grid, Passability};
use crate::scheduler::{Scheduler, TimerKind};
use crate::session::{EndReason, Session};
use crate::tile::TileContent;

/// Notifications for the presentation layer, drained once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
	Moved {
		direction: Direction,
		from: GridPos,
		to: GridPos,
		cause: MoveCause,
	},
	TileExcavated {
		pos: GridPos,
		previous: TileContent,
	},
	EconomyChanged(Economy),
	SessionEnded {
		reason: EndReason,
		money: f64,
	},
}

/// Undrained events beyond this are dropped oldest-first.
pub const MAX_PENDING_EVENTS: usize = 4096;

/// Read-only copy of the whole simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	pub elapsed_ms: u64,
	pub grid: Grid,
	pub drill: Drill,
	pub economy: Economy,
	pub session: Session,
}

#[derive(Debug)]
pub struct Engine {
	grid: Grid,
	drill: Drill,
	economy: Economy,
	session: Session,
	scheduler: Scheduler,
	ascend_lock: Duration,
	events: VecDeque<SimEvent>,
	dropped_events: usize,
}

impl Engine {
	/// Starts a run on a prepared grid. The grid may be any size; timer periods,
	/// capacity and the start cell are still checked.
	pub fn new(grid: Grid, config: &SimConfig) -> Result<Self, ConfigError> {
		config.validate_values()?;
		config.check_start(grid.size())?;
		let mut scheduler = Scheduler::new();
		scheduler.every(TimerKind::FuelDecay, config.fuel_decay_period());
		scheduler.every(TimerKind::Gravity, config.gravity_period());
		info!(
			size = grid.size(),
			start = ?config.start(),
			fuel = config.initial_fuel,
			capacity = config.storage_capacity,
			"session started"
		);
		Ok(Self {
			grid,
			drill: Drill::new(config.start()),
			economy: Economy::new(config.initial_fuel, config.storage_capacity),
			session: Session::Running,
			scheduler,
			ascend_lock: config.ascend_lock(),
			events: VecDeque::new(),
			dropped_events: 0,
		})
	}

	pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let grid = match config.seed {
			Some(seed) => Grid::from_seed(config.grid_size, seed),
			None => Grid::generate(config.grid_size, &mut StdRng::from_entropy()),
		};
		Self::new(grid, config)
	}

	pub fn grid(&self) -> &Grid {
		&self.grid
	}
	pub fn drill(&self) -> &Drill {
		&self.drill
	}
	pub fn economy(&self) -> &Economy {
		&self.economy
	}
	pub fn session(&self) -> Session {
		self.session
	}
	pub fn is_running(&self) -> bool {
		self.session.is_running()
	}
	pub fn elapsed(&self) -> Duration {
		self.scheduler.now()
	}
	pub fn scheduler(&self) -> &Scheduler {
		&self.scheduler
	}

	/// Takes everything emitted since the last call. Hosts are expected to drain
	/// once per frame; past [`MAX_PENDING_EVENTS`] the oldest entries are lost.
	pub fn drain_events(&mut self) -> Vec<SimEvent> {
		self.dropped_events = 0;
		self.events.drain(..).collect()
	}

	fn emit(&mut self, event: SimEvent) {
		if self.events.len() >= MAX_PENDING_EVENTS {
			self.events.pop_front();
			if self.dropped_events == 0 {
				warn!(cap = MAX_PENDING_EVENTS, "events not drained, dropping the oldest");
			}
			self.dropped_events += 1;
		}
		self.events.push_back(event);
	}

	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			elapsed_ms: self.scheduler.now().as_millis() as u64,
			grid: self.grid.clone(),
			drill: self.drill,
			economy: self.economy,
			session: self.session,
		}
	}

	// ---------- Input ----------

	pub fn apply(&mut self, cmd: Command) -> bool {
		self.try_move(cmd.direction(), MoveCause::Player)
	}

	pub fn move_left(&mut self) -> bool {
		self.apply(Command::MoveLeft)
	}

	pub fn move_right(&mut self) -> bool {
		self.apply(Command::MoveRight)
	}

	pub fn move_up(&mut self) -> bool {
		self.apply(Command::MoveUp)
	}

	pub fn move_down(&mut self) -> bool {
		self.apply(Command::MoveDown)
	}

	/// Whether the drill may enter `pos`. Probing a lava cell ends the session,
	/// even though the move itself is refused.
	pub fn check_passable(&mut self, pos: GridPos) -> bool {
		match self.grid.passability(pos) {
			Passability::Open => true,
			Passability::Blocked => false,
			Passability::Lethal => {
				self.end_session(EndReason::Lava);
				false
			}
		}
	}

	// Every move, player or gravity, goes through here:
	// - refuse when the session is over, the tank is dry or the hold is full
	// - climbing needs an open ceiling
	// - the destination must pass `check_passable`
	// Checks come first so a refused move leaves no trace.
	fn try_move(&mut self, dir: Direction, cause: MoveCause) -> bool {
		if !self.session.is_running() {
			return false;
		}
		let from = self.drill.pos;
		let to = self.drill.target(dir);
		if !self.economy.can_move() {
			debug!(?dir, ?cause, fuel = self.economy.fuel, storage = self.economy.storage, "move refused: out of fuel or hold full");
			return false;
		}
		if dir == Direction::Up && self.drill.ascent_blocked(&self.grid) {
			debug!(?from, "move refused: cannot climb through the ceiling");
			return false;
		}
		if !self.check_passable(to) {
			debug!(?dir, ?to, "move refused: destination impassable");
			return false;
		}
		self.commit_move(dir, from, to, cause);
		true
	}

	fn commit_move(&mut self, dir: Direction, from: GridPos, to: GridPos, cause: MoveCause) {
		self.drill.pos = to;
		self.economy.consume_move();
		let dug = self.grid.excavate(to).unwrap_or(TileContent::Empty);
		self.emit(SimEvent::Moved { direction: dir, from, to, cause });
		if dug != TileContent::Empty {
			self.emit(SimEvent::TileExcavated { pos: to, previous: dug });
		}
		let credit = self.economy.credit(dug);
		self.emit(SimEvent::EconomyChanged(self.economy));
		trace!(?dir, ?to, ?cause, dug = dug.asset_tag(), "drill moved");

		if dir == Direction::Up {
			self.drill.ascending = true;
			self.scheduler.once(TimerKind::AscendRelease, self.ascend_lock);
		}
		if credit.storage_full {
			self.end_session(EndReason::StorageFull);
		}
	}

	// ---------- Timers ----------

	/// Moves the clock forward by `dt`, firing every timer that falls due on the way.
	/// Once the session is over the clock just jumps: every handler would be a no-op.
	pub fn advance(&mut self, dt: Duration) {
		let until = self.scheduler.now().saturating_add(dt);
		while self.session.is_running() {
			let Some(kind) = self.scheduler.pop_due(until) else {
				break;
			};
			self.on_timer(kind);
		}
		self.scheduler.settle(until);
	}

	fn on_timer(&mut self, kind: TimerKind) {
		match kind {
			TimerKind::FuelDecay => self.fuel_tick(),
			TimerKind::Gravity => {
				self.gravity_tick();
			}
			TimerKind::AscendRelease => self.release_ascend_lock(),
		}
	}

	pub fn fuel_tick(&mut self) {
		if !self.session.is_running() {
			return;
		}
		match self.economy.tick_fuel() {
			FuelTick::Burned => self.emit(SimEvent::EconomyChanged(self.economy)),
			FuelTick::Exhausted => self.end_session(EndReason::OutOfFuel),
		}
	}

	/// Drops the drill one cell if it is not ascending and the cell below is open.
	pub fn gravity_tick(&mut self) -> bool {
		if !self.session.is_running() || !self.drill.should_fall(&self.grid) {
			return false;
		}
		self.try_move(Direction::Down, MoveCause::Gravity)
	}

	fn release_ascend_lock(&mut self) {
		if self.session.is_running() {
			self.drill.ascending = false;
		}
	}

	fn end_session(&mut self, reason: EndReason) {
		if !self.session.end(reason) {
			return;
		}
		self.scheduler.cancel(TimerKind::FuelDecay);
		info!(
			%reason,
			money = self.economy.money,
			fuel = self.economy.fuel,
			storage = self.economy.storage,
			elapsed_ms = self.scheduler.now().as_millis() as u64,
			"session ended"
		);
		self.emit(SimEvent::SessionEnded { reason, money: self.economy.money });
	}
}
