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
//! Ships and the fleet they make up.
use std::fmt;

use crate::board::{Cell, Direction};

/// Identity of a ship within a fleet. Ids are numbered from 1 in placement order; the
/// number doubles as the marker a renderer shows on a hit cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ShipId(u32);

impl ShipId {
    /// Construct the id of the `number`th ship. Panics if `number` is 0.
    pub fn new(number: u32) -> Self {
        assert!(number > 0, "ship ids start at 1");
        ShipId(number)
    }

    /// The 1-based number of this ship.
    pub fn number(self) -> u32 {
        self.0
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        ShipId(idx as u32 + 1)
    }

    /// Position of this ship in its fleet.
    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A straight segment of cells owned by one ship. Geometry is fixed once placed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    id: ShipId,

    /// Anchor first, then the cells in the order they were walked.
    cells: Vec<Cell>,
}

impl Ship {
    pub(crate) fn new(id: ShipId, cells: Vec<Cell>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { id, cells }
    }

    /// Get the ID of the ship.
    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Get the cells of this ship, anchor first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells this ship occupies.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The cell placement started from.
    pub fn anchor(&self) -> Cell {
        // Ships are never constructed without cells.
        self.cells[0]
    }

    /// Whether the ship covers `cell`.
    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Direction the ship extends from its anchor. Single-cell ships have none.
    pub fn direction(&self) -> Option<Direction> {
        let (first, second) = match self.cells.as_slice() {
            [first, second, ..] => (first, second),
            _ => return None,
        };
        Some(if second.row < first.row {
            Direction::North
        } else if second.row > first.row {
            Direction::South
        } else if second.col > first.col {
            Direction::East
        } else {
            Direction::West
        })
    }
}

/// All ships of a game, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub(crate) fn new(ships: Vec<Ship>) -> Self {
        Self { ships }
    }

    /// Number of ships.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Whether the fleet has no ships.
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Get the ship with the specified ID if it exists.
    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index()).filter(|ship| ship.id == id)
    }

    /// Get an iterator over all ships in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Sum of all ship sizes.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(Ship::size).sum()
    }
}
