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
//! Procedural placement of the opponent's fleet.
//!
//! Each ship gets a random free anchor, then grows a random length into the direction
//! with the most free space from that anchor. Ships are placed strictly in order, so
//! every ship sees all earlier ships as obstacles. Ships may end up touching each other
//! orthogonally or diagonally; only overlap is ruled out.

use log::{debug, trace};
use rand::{distributions::Uniform, Rng};
use thiserror::Error;

use crate::{
    board::{BoardSize, Cell, FleetSetup, PlaceError, PlacedFleet},
    config::{ConfigError, GameConfig},
    ships::ShipId,
};

/// Fleet generation failed. No partial fleet is ever returned.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The configuration was rejected before placement began.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every anchor tried for a ship was already occupied.
    #[error("no free anchor found for ship {ship} after {attempts} attempts")]
    Exhausted { ship: ShipId, attempts: usize },

    /// A chosen placement was refused by the setup board.
    #[error(transparent)]
    Place(#[from] PlaceError),
}

/// Places a configured number of ships at random on an empty board.
#[derive(Debug, Copy, Clone)]
pub struct FleetPlacer {
    size: BoardSize,
    ship_count: usize,
    max_anchor_attempts: usize,
}

impl FleetPlacer {
    /// Validate `config` and build a placer for it.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let size = config.validate()?;
        Ok(Self {
            size,
            ship_count: config.ship_count(),
            max_anchor_attempts: config.max_anchor_attempts(),
        })
    }

    /// Get the [`BoardSize`] ships are placed on.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Generate a complete fleet and the occupancy map describing it.
    pub fn place_fleet<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<PlacedFleet, PlacementError> {
        let mut setup = FleetSetup::new(self.size);
        for _ in 0..self.ship_count {
            self.place_ship(rng, &mut setup)?;
        }
        let placed = setup.finish();
        debug!(
            "placed {} ships covering {} of {} cells",
            placed.fleet().len(),
            placed.occupancy().occupied_count(),
            self.size.total_cells()
        );
        Ok(placed)
    }

    /// Place the next ship on `setup` using the random anchor and length rules.
    pub fn place_ship<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        setup: &mut FleetSetup,
    ) -> Result<ShipId, PlacementError> {
        let anchor = self.choose_anchor(rng, setup)?;
        let (dir, max_len) = setup.free_space(anchor).best();
        let len = rng.gen_range(0, max_len + 1);
        Ok(setup.place_ship(anchor, dir, len)?)
    }

    /// Sample uniformly random cells until one is unoccupied, giving up after the
    /// configured number of attempts.
    fn choose_anchor<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        setup: &FleetSetup,
    ) -> Result<Cell, PlacementError> {
        let range = Uniform::new(0, self.size.get());
        for attempt in 1..=self.max_anchor_attempts {
            let cell = Cell::new(rng.sample(&range), rng.sample(&range));
            if !setup.occupancy().is_occupied(&cell) {
                return Ok(cell);
            }
            trace!("anchor {} occupied, attempt {}", cell, attempt);
        }
        Err(PlacementError::Exhausted {
            ship: setup.next_id(),
            attempts: self.max_anchor_attempts,
        })
    }
}
