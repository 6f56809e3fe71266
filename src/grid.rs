use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::GridPos;
use crate::tile::TileContent;

/// Rows above this one are open sky.
pub const CRUST_ROW: i32 = 2;

/// Smallest side that still fits sky, crust and the bottom boundary.
pub const MIN_GRID_SIZE: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell (row {row}, col {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: i32, col: i32, size: i32 },
}

/// Outcome of probing a cell as a move destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passability {
    Open,
    Blocked,
    Lethal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
    tiles: Vec<TileContent>,
}

impl Grid {
    pub fn new(size: i32, fill: TileContent) -> Self {
        let side = size.max(0) as usize;
        Self {
            size,
            tiles: vec![fill; side * side],
        }
    }

    pub fn from_seed(size: i32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(size, &mut rng)
    }

    /// Sky on rows 0-1, a soil crust on row 2, and below it a walled pit
    /// whose interior is drawn from [`TileContent::from_roll`].
    pub fn generate<R: Rng + ?Sized>(size: i32, rng: &mut R) -> Self {
        let mut grid = Self::new(size, TileContent::Empty);
        for row in 0..size {
            for col in 0..size {
                let content = if row < CRUST_ROW {
                    TileContent::Empty
                } else if row == CRUST_ROW {
                    TileContent::Soil
                } else if grid.is_boundary(GridPos::new(col, row)) {
                    TileContent::Obstacle
                } else {
                    TileContent::from_roll(rng.gen_range(0..100))
                };
                grid.set_content(GridPos::new(col, row), content);
            }
        }
        grid
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        self.index(pos).is_some()
    }

    /// Walls of the pit: side columns and the bottom row, from the first row under the crust.
    pub fn is_boundary(&self, pos: GridPos) -> bool {
        pos.row > CRUST_ROW
            && (pos.col == 0 || pos.col == self.size - 1 || pos.row == self.size - 1)
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if pos.col < 0 || pos.row < 0 || pos.col >= self.size || pos.row >= self.size {
            return None;
        }
        Some((pos.row * self.size + pos.col) as usize)
    }

    pub fn get(&self, pos: GridPos) -> Option<TileContent> {
        self.index(pos).map(|i| self.tiles[i])
    }

    pub fn content_at(&self, row: i32, col: i32) -> Result<TileContent, GridError> {
        self.get(GridPos::new(col, row)).ok_or(GridError::OutOfBounds {
            row,
            col,
            size: self.size,
        })
    }

    /// Overwrites a cell. Used to lay out scenarios; play only ever excavates.
    pub fn set_content(&mut self, pos: GridPos, content: TileContent) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = content;
        }
    }

    /// Empties the cell and hands back what was there. Out-of-bounds cells yield `None`.
    pub fn excavate(&mut self, pos: GridPos) -> Option<TileContent> {
        let i = self.index(pos)?;
        let previous = self.tiles[i];
        self.tiles[i] = TileContent::Empty;
        Some(previous)
    }

    pub fn passability(&self, pos: GridPos) -> Passability {
        match self.get(pos) {
            None | Some(TileContent::Obstacle) => Passability::Blocked,
            Some(TileContent::Lava) => Passability::Lethal,
            Some(_) => Passability::Open,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileContent]> {
        self.tiles.chunks(self.size.max(1) as usize)
    }

    pub fn count(&self, content: TileContent) -> usize {
        self.tiles.iter().filter(|t| **t == content).count()
    }
}
