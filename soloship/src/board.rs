// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Types that make up the game board.

use crate::ships::ShipId;

pub(crate) use self::grid::Grid;
pub use self::{
    coordinate::{Cell, Direction},
    dimensions::{BoardSize, MAX_BOARD_SIZE, MIN_BOARD_SIZE},
    errors::{CannotPlaceReason, PlaceError},
    setup::{FleetSetup, FreeSpace, PlacedFleet},
};

mod coordinate;
mod dimensions;
mod errors;
mod grid;
pub mod setup;

/// Authoritative record of which ship, if any, owns each cell of the board.
///
/// Built during placement by [`FleetSetup`] and read-only afterwards. No cell ever has
/// more than one owner.
#[derive(Debug, Clone)]
pub struct Occupancy {
    /// Owner of each cell.
    grid: Grid<Option<ShipId>>,

    /// Number of cells with an owner.
    occupied: usize,
}

impl Occupancy {
    pub(crate) fn new(size: BoardSize) -> Self {
        Self {
            grid: Grid::new(size),
            occupied: 0,
        }
    }

    /// Get the [`BoardSize`] this map covers.
    pub fn size(&self) -> BoardSize {
        self.grid.size()
    }

    /// The ship occupying `cell`. Returns `None` for empty or off-board cells.
    pub fn owner(&self, cell: &Cell) -> Option<ShipId> {
        self.grid.get(cell).copied().flatten()
    }

    /// Whether any ship occupies `cell`.
    pub fn is_occupied(&self, cell: &Cell) -> bool {
        self.owner(cell).is_some()
    }

    /// Total number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Iterate every occupied cell with its owner, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, ShipId)> + '_ {
        self.grid
            .iter()
            .filter_map(|(cell, owner)| owner.map(|id| (cell, id)))
    }

    /// Mark `cell` as owned by `id`. Callers must have checked that the cell is on the
    /// board and free.
    pub(crate) fn claim(&mut self, cell: Cell, id: ShipId) {
        let owner = &mut self.grid[cell];
        debug_assert!(owner.is_none(), "{} claimed twice", cell);
        *owner = Some(id);
        self.occupied += 1;
    }
}
