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
//! Single-player Battleship against a randomly placed fleet.
//!
//! [`placer`] generates the opponent's fleet on a square board: one ship per row by
//! default, each a straight segment grown from a random anchor into the direction with
//! the most room. [`game`] tracks the player's guesses against that fleet, reporting
//! hits, sunk ships and the win, and [`game::TurnBudget`] drives the loss by turn
//! exhaustion.
//!
//! The crate performs no I/O. Rendering, input parsing and the turn loop belong to the
//! caller.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use soloship::{FleetPlacer, GameConfig, GameState, HitOutcome};
//!
//! let placer = FleetPlacer::new(&GameConfig::new(5)).unwrap();
//! let placed = placer.place_fleet(&mut StdRng::seed_from_u64(1)).unwrap();
//! let target = placed.fleet().iter().next().unwrap().anchor();
//!
//! let mut game = GameState::new(placed);
//! assert!(game.record_guess(target).unwrap().ship().is_some());
//! assert_eq!(game.record_guess(target), Ok(HitOutcome::Repeat));
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod placer;
pub mod ships;

pub use crate::{
    board::{BoardSize, Cell, Direction, FleetSetup, Occupancy, PlacedFleet},
    config::{ConfigError, GameConfig},
    game::{GameState, GameStatus, GuessError, HitOutcome, Mark, TurnBudget},
    placer::{FleetPlacer, PlacementError},
    ships::{Fleet, Ship, ShipId},
};
