use serde::{Deserialize, Serialize};

use crate::tile::{MineralReward, TileContent};

/// Fuel, cargo hold and earnings of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub fuel: f64,
    pub money: f64,
    pub storage: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelTick {
    Burned,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Credit {
    pub reward: Option<MineralReward>,
    pub storage_full: bool,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new(100.0, 300)
    }
}

impl Economy {
    pub fn new(fuel: f64, capacity: u32) -> Self {
        Self {
            fuel,
            money: 0.0,
            storage: 0,
            capacity,
        }
    }

    pub fn has_fuel(&self) -> bool {
        self.fuel > 0.0
    }

    pub fn is_storage_full(&self) -> bool {
        self.storage >= self.capacity
    }

    /// Movement is possible only with fuel left and room in the hold.
    pub fn can_move(&self) -> bool {
        self.has_fuel() && !self.is_storage_full()
    }

    /// Periodic burn. An empty tank is reported instead of burned.
    pub fn tick_fuel(&mut self) -> FuelTick {
        if self.has_fuel() {
            self.burn();
            FuelTick::Burned
        } else {
            FuelTick::Exhausted
        }
    }

    pub fn consume_move(&mut self) {
        self.burn();
    }

    fn burn(&mut self) {
        self.fuel = (self.fuel - 1.0).max(0.0);
    }

    /// Credits whatever the drill dug out of the cell it arrived on.
    pub fn credit(&mut self, dug: TileContent) -> Credit {
        let reward = dug.reward();
        if let Some(r) = reward {
            self.money += r.money;
            self.storage = self.storage.saturating_add(r.storage);
        }
        Credit {
            reward,
            storage_full: self.is_storage_full(),
        }
    }
}
