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
//! Implements the placement phase of the board.
use std::iter;

use log::debug;

use crate::{
    board::{BoardSize, CannotPlaceReason, Cell, Direction, Occupancy, PlaceError},
    ships::{Fleet, Ship, ShipId},
};

/// Length of the unoccupied run beyond an anchor in each cardinal direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct FreeSpace {
    pub north: usize,
    pub east: usize,
    pub south: usize,
    pub west: usize,
}

impl FreeSpace {
    /// Free cells beyond the anchor in `dir`.
    pub fn get(&self, dir: Direction) -> usize {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// The direction with the longest free run and that run's length. The first maximum
    /// in [`Direction::ALL`] order wins, so ties favor north, then east, south, west.
    pub fn best(&self) -> (Direction, usize) {
        let mut best = (Direction::North, self.north);
        for &dir in &Direction::ALL[1..] {
            let len = self.get(dir);
            if len > best.1 {
                best = (dir, len);
            }
        }
        best
    }
}

/// Placement phase for a fleet. Ships are added one at a time and every ship placed so
/// far is an obstacle for the next.
#[derive(Debug, Clone)]
pub struct FleetSetup {
    /// Owner of every cell claimed so far.
    occupancy: Occupancy,

    /// Ships in placement order. A ship's id is its 1-based position here.
    ships: Vec<Ship>,
}

impl FleetSetup {
    /// Begin placement on an empty board of the given size.
    pub fn new(size: BoardSize) -> Self {
        Self {
            occupancy: Occupancy::new(size),
            ships: Vec::new(),
        }
    }

    /// Get the [`BoardSize`] of this setup.
    pub fn size(&self) -> BoardSize {
        self.occupancy.size()
    }

    /// The occupancy map as built so far.
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Ships placed so far, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// The id the next placed ship will receive.
    pub fn next_id(&self) -> ShipId {
        ShipId::from_index(self.ships.len())
    }

    /// Count the consecutive unoccupied cells beyond `anchor` in each direction, stopping
    /// at the first occupied cell or the edge of the board. The anchor itself is not
    /// inspected.
    pub fn free_space(&self, anchor: Cell) -> FreeSpace {
        let run = |dir: Direction| {
            self.size()
                .ray(anchor, dir)
                .take_while(|cell| !self.occupancy.is_occupied(cell))
                .count()
        };
        FreeSpace {
            north: run(Direction::North),
            east: run(Direction::East),
            south: run(Direction::South),
            west: run(Direction::West),
        }
    }

    /// Check whether a ship could be placed at `anchor`, extending `len` cells beyond it
    /// in `dir`, without placing it.
    pub fn check_placement(
        &self,
        anchor: Cell,
        dir: Direction,
        len: usize,
    ) -> Result<(), CannotPlaceReason> {
        if !self.size().contains(&anchor) {
            Err(CannotPlaceReason::OutOfBounds)
        } else if self.occupancy.is_occupied(&anchor) {
            Err(CannotPlaceReason::AlreadyOccupied)
        } else if self.free_space(anchor).get(dir) < len {
            Err(CannotPlaceReason::InsufficientSpace)
        } else {
            Ok(())
        }
    }

    /// Place the next ship at `anchor`, extending `len` cells beyond it in `dir`. A
    /// `len` of 0 places a single-cell ship. On error nothing is placed.
    pub fn place_ship(
        &mut self,
        anchor: Cell,
        dir: Direction,
        len: usize,
    ) -> Result<ShipId, PlaceError> {
        self.check_placement(anchor, dir, len)
            .map_err(|reason| PlaceError::new(reason, anchor))?;

        let id = self.next_id();
        let cells: Vec<Cell> = iter::once(anchor)
            .chain(self.size().ray(anchor, dir).take(len))
            .collect();
        // Already ensured that every cell is on the board and unoccupied.
        for &cell in &cells {
            self.occupancy.claim(cell, id);
        }
        debug!(
            "placed ship {} at {} extending {} cell(s) {:?}",
            id, anchor, len, dir
        );
        self.ships.push(Ship::new(id, cells));
        Ok(id)
    }

    /// End placement, handing over the fleet together with its occupancy map.
    pub fn finish(self) -> PlacedFleet {
        PlacedFleet {
            fleet: Fleet::new(self.ships),
            occupancy: self.occupancy,
        }
    }
}

/// A finished fleet and the occupancy map it was placed on.
///
/// Only [`FleetSetup::finish`] produces one, so every occupied cell belongs to a ship of
/// this fleet and every ship's cells are owned by that ship.
#[derive(Debug, Clone)]
pub struct PlacedFleet {
    fleet: Fleet,
    occupancy: Occupancy,
}

impl PlacedFleet {
    /// Get the [`BoardSize`] the fleet was placed on.
    pub fn size(&self) -> BoardSize {
        self.occupancy.size()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Split into the fleet and its occupancy map.
    pub fn into_parts(self) -> (Fleet, Occupancy) {
        (self.fleet, self.occupancy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> FleetSetup {
        FleetSetup::new(BoardSize::new(5))
    }

    #[test]
    fn free_space_on_empty_board() {
        let setup = setup();
        let space = setup.free_space(Cell::new(1, 3));
        assert_eq!(
            space,
            FreeSpace {
                north: 1,
                east: 1,
                south: 3,
                west: 3,
            }
        );
    }

    #[test]
    fn free_space_stops_at_ships() {
        let mut setup = setup();
        setup.place_ship(Cell::new(0, 2), Direction::South, 4).unwrap();
        let space = setup.free_space(Cell::new(2, 0));
        assert_eq!(space.east, 1);
        assert_eq!(space.west, 0);
        assert_eq!(space.north, 2);
        assert_eq!(space.south, 2);
        assert_eq!(setup.free_space(Cell::new(2, 3)).west, 0);
    }

    #[test]
    fn best_breaks_ties_north_east_south_west() {
        let all = FreeSpace {
            north: 2,
            east: 2,
            south: 2,
            west: 2,
        };
        assert_eq!(all.best(), (Direction::North, 2));
        let east_south = FreeSpace {
            north: 0,
            east: 3,
            south: 3,
            west: 1,
        };
        assert_eq!(east_south.best(), (Direction::East, 3));
        let south_west = FreeSpace {
            north: 1,
            east: 0,
            south: 2,
            west: 2,
        };
        assert_eq!(south_west.best(), (Direction::South, 2));
        let west = FreeSpace {
            west: 1,
            ..FreeSpace::default()
        };
        assert_eq!(west.best(), (Direction::West, 1));
        assert_eq!(FreeSpace::default().best(), (Direction::North, 0));
    }

    #[test]
    fn center_of_empty_board_prefers_north() {
        let setup = setup();
        assert_eq!(setup.free_space(Cell::new(2, 2)).best(), (Direction::North, 2));
    }

    #[test]
    fn zero_length_ship_occupies_only_anchor() {
        let mut setup = setup();
        let id = setup.place_ship(Cell::new(3, 3), Direction::North, 0).unwrap();
        assert_eq!(id, ShipId::new(1));
        assert_eq!(setup.occupancy().occupied_count(), 1);
        assert_eq!(setup.occupancy().owner(&Cell::new(3, 3)), Some(id));
        assert_eq!(setup.ships()[0].cells(), &[Cell::new(3, 3)]);
    }

    #[test]
    fn cells_are_walked_from_anchor() {
        let mut setup = setup();
        setup.place_ship(Cell::new(4, 3), Direction::West, 3).unwrap();
        assert_eq!(
            setup.ships()[0].cells(),
            &[
                Cell::new(4, 3),
                Cell::new(4, 2),
                Cell::new(4, 1),
                Cell::new(4, 0)
            ]
        );
    }

    #[test]
    fn rejected_placements_leave_setup_unchanged() {
        let mut setup = setup();
        setup.place_ship(Cell::new(0, 0), Direction::East, 2).unwrap();

        let err = setup
            .place_ship(Cell::new(0, 1), Direction::South, 1)
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::AlreadyOccupied);
        assert_eq!(err.anchor(), Cell::new(0, 1));

        let err = setup
            .place_ship(Cell::new(0, 4), Direction::West, 2)
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::InsufficientSpace);

        let err = setup
            .place_ship(Cell::new(5, 0), Direction::North, 0)
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);

        assert_eq!(setup.ships().len(), 1);
        assert_eq!(setup.occupancy().occupied_count(), 3);
        assert_eq!(setup.next_id(), ShipId::new(2));
    }

    #[test]
    fn finish_hands_over_fleet_in_order() {
        let mut setup = setup();
        setup.place_ship(Cell::new(0, 0), Direction::East, 1).unwrap();
        setup.place_ship(Cell::new(4, 4), Direction::North, 2).unwrap();
        let (fleet, occupancy) = setup.finish().into_parts();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.total_cells(), 5);
        assert_eq!(occupancy.occupied_count(), 5);
        let ids: Vec<_> = fleet.iter().map(Ship::id).collect();
        assert_eq!(ids, vec![ShipId::new(1), ShipId::new(2)]);
    }
}
