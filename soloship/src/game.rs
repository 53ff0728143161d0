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
//! Hit detection and the win state machine for a single game.
//!
//! A [`GameState`] is built once the fleet is placed. The fleet geometry is read-only
//! from then on; only hit counters, sunk flags, the set of guessed cells and the markers
//! shown to the player change, and they change monotonically.

use std::collections::HashSet;

use log::{info, trace};

use crate::{
    board::{BoardSize, Cell, Grid, Occupancy, PlacedFleet},
    ships::{Fleet, Ship, ShipId},
};

pub use self::{errors::GuessError, turns::TurnBudget};

mod errors;
mod turns;

/// Result of a single guess.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HitOutcome {
    /// The cell was guessed before. Nothing changed.
    Repeat,
    /// Nothing was hit.
    Miss,
    /// The given ship was hit but it was not sunk.
    Hit(ShipId),
    /// The given ship was hit and this guess sank it, but other ships remain.
    HitAndSunk(ShipId),
    /// The given ship was hit and sunk, and it was the last ship afloat.
    HitAndGameWon(ShipId),
}

impl HitOutcome {
    /// Get the id of the ship that was hit.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            HitOutcome::Repeat | HitOutcome::Miss => None,
            HitOutcome::Hit(id) | HitOutcome::HitAndSunk(id) | HitOutcome::HitAndGameWon(id) => {
                Some(id)
            }
        }
    }

    /// Whether the guess sank a ship.
    pub fn sunk(&self) -> bool {
        matches!(
            self,
            HitOutcome::HitAndSunk(_) | HitOutcome::HitAndGameWon(_)
        )
    }
}

/// Where the game stands.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameStatus {
    /// Guesses are being accepted.
    InProgress,
    /// Every ship has been sunk.
    Won,
    /// The turn budget ran out first.
    LostByTurnExhaustion,
}

impl GameStatus {
    /// Whether the game has reached a terminal state.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// What the player has learned about a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mark {
    /// Not guessed yet.
    Unknown,
    /// Guessed, and empty.
    Miss,
    /// Guessed, and part of the given ship.
    Hit(ShipId),
}

impl Default for Mark {
    fn default() -> Self {
        Mark::Unknown
    }
}

/// What is known and hidden at one cell of the board, for rendering.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CellRef {
    /// What the player has seen here.
    mark: Mark,

    /// The ship that occupies this cell if any, revealed or not.
    owner: Option<ShipId>,
}

impl CellRef {
    /// The marker the player sees.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The ship occupying this cell, whether or not it has been hit.
    pub fn owner(&self) -> Option<ShipId> {
        self.owner
    }
}

/// State of one game: the fleet, its damage and the player's guesses.
#[derive(Debug, Clone)]
pub struct GameState {
    fleet: Fleet,
    occupancy: Occupancy,

    /// Hits taken by each ship, indexed by fleet position.
    hits: Vec<usize>,

    /// Whether each ship has been reported sunk, indexed by fleet position.
    sunk: Vec<bool>,

    /// Every cell guessed so far.
    guessed: HashSet<Cell>,

    /// Markers shown to the player.
    marks: Grid<Mark>,

    status: GameStatus,
}

impl GameState {
    /// Start a game against a placed fleet.
    pub fn new(placed: PlacedFleet) -> Self {
        let (fleet, occupancy) = placed.into_parts();
        let ships = fleet.len();
        // An empty fleet has nothing left to sink.
        let status = if fleet.is_empty() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        };
        info!(
            "starting game on {0}x{0} board with {1} ships",
            occupancy.size().get(),
            ships
        );
        Self {
            marks: Grid::new(occupancy.size()),
            fleet,
            occupancy,
            hits: vec![0; ships],
            sunk: vec![false; ships],
            guessed: HashSet::new(),
            status,
        }
    }

    /// Get the [`BoardSize`] of the board being played.
    pub fn size(&self) -> BoardSize {
        self.occupancy.size()
    }

    /// The opponent's fleet.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// The occupancy map of the opponent's fleet.
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Get the status of the game.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once every ship has been sunk.
    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// Hits the given ship has taken. Returns 0 for unknown ids.
    pub fn hits(&self, id: ShipId) -> usize {
        self.position(id).map_or(0, |idx| self.hits[idx])
    }

    /// Whether the given ship has been sunk.
    pub fn is_sunk(&self, id: ShipId) -> bool {
        self.position(id).map_or(false, |idx| self.sunk[idx])
    }

    /// Number of ships sunk so far.
    pub fn sunk_count(&self) -> usize {
        self.sunk.iter().filter(|&&sunk| sunk).count()
    }

    /// Number of ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.fleet.len() - self.sunk_count()
    }

    /// Whether `cell` has been guessed.
    pub fn guessed(&self, cell: &Cell) -> bool {
        self.guessed.contains(cell)
    }

    /// Number of distinct cells guessed.
    pub fn guess_count(&self) -> usize {
        self.guessed.len()
    }

    /// The marker the player sees at `cell`. Off-board cells read as unknown.
    pub fn mark(&self, cell: &Cell) -> Mark {
        self.marks.get(cell).copied().unwrap_or_default()
    }

    /// Get an iterator over the board. The iterator's item is another iterator that
    /// iterates over a single row.
    pub fn iter_rows<'a>(
        &'a self,
    ) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = CellRef>> {
        self.size().iter_rows().map(move |row| {
            row.map(move |cell| CellRef {
                mark: self.marks[cell],
                owner: self.occupancy.owner(&cell),
            })
        })
    }

    /// Process a guess at `cell`.
    ///
    /// Repeated cells yield [`HitOutcome::Repeat`] and change nothing. Fails only for
    /// cells off the board or once the game is over.
    pub fn record_guess(&mut self, cell: Cell) -> Result<HitOutcome, GuessError> {
        if self.status.is_over() {
            return Err(GuessError::GameOver(self.status));
        }
        if !self.size().contains(&cell) {
            return Err(GuessError::OutOfBounds(cell));
        }
        if !self.guessed.insert(cell) {
            trace!("{} already guessed", cell);
            return Ok(HitOutcome::Repeat);
        }

        let hit = self
            .occupancy
            .owner(&cell)
            .and_then(|id| self.position(id).map(|idx| (id, idx)));
        let (id, idx) = match hit {
            None => {
                self.marks[cell] = Mark::Miss;
                trace!("{} missed", cell);
                return Ok(HitOutcome::Miss);
            }
            Some(hit) => hit,
        };
        self.marks[cell] = Mark::Hit(id);
        self.hits[idx] += 1;
        trace!("{} hit ship {} ({} hits)", cell, id, self.hits[idx]);

        let size = self.fleet.get(id).map_or(0, Ship::size);
        let newly_sunk = self.hits[idx] == size && !self.sunk[idx];
        if newly_sunk {
            self.sunk[idx] = true;
            info!("ship {} sunk", id);
        }

        if self.all_ships_destroyed() {
            self.status = GameStatus::Won;
            info!("all ships sunk after {} guesses", self.guessed.len());
            Ok(HitOutcome::HitAndGameWon(id))
        } else if newly_sunk {
            Ok(HitOutcome::HitAndSunk(id))
        } else {
            Ok(HitOutcome::Hit(id))
        }
    }

    /// End the game as lost because the turn budget ran out. Has no effect once the game
    /// is already over.
    pub fn exhaust_turns(&mut self) {
        if self.status == GameStatus::InProgress {
            info!(
                "out of turns with {} of {} ships afloat",
                self.ships_remaining(),
                self.fleet.len()
            );
            self.status = GameStatus::LostByTurnExhaustion;
        }
    }

    /// Fleet position of `id`, if it belongs to this fleet.
    fn position(&self, id: ShipId) -> Option<usize> {
        self.fleet.get(id).map(|ship| ship.id().index())
    }

    fn all_ships_destroyed(&self) -> bool {
        self.fleet
            .iter()
            .zip(&self.hits)
            .all(|(ship, &hits)| hits == ship.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, FleetSetup};

    /// Ship 1 covers A1-C1, ship 2 is the single cell E5.
    fn game() -> GameState {
        let mut setup = FleetSetup::new(BoardSize::new(5));
        setup.place_ship(Cell::new(0, 0), Direction::East, 2).unwrap();
        setup.place_ship(Cell::new(4, 4), Direction::North, 0).unwrap();
        GameState::new(setup.finish())
    }

    #[test]
    fn miss_marks_cell_and_changes_no_counters() {
        let mut game = game();
        assert_eq!(game.record_guess(Cell::new(2, 2)), Ok(HitOutcome::Miss));
        assert_eq!(game.mark(&Cell::new(2, 2)), Mark::Miss);
        assert_eq!(game.hits(ShipId::new(1)), 0);
        assert_eq!(game.hits(ShipId::new(2)), 0);
        assert_eq!(game.sunk_count(), 0);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn repeat_is_a_no_op() {
        let mut game = game();
        let ship = ShipId::new(1);
        assert_eq!(game.record_guess(Cell::new(0, 1)), Ok(HitOutcome::Hit(ship)));
        assert_eq!(game.record_guess(Cell::new(0, 1)), Ok(HitOutcome::Repeat));
        assert_eq!(game.hits(ship), 1);
        assert_eq!(game.guess_count(), 1);
    }

    #[test]
    fn hit_marker_carries_ship_id() {
        let mut game = game();
        game.record_guess(Cell::new(0, 2)).unwrap();
        assert_eq!(game.mark(&Cell::new(0, 2)), Mark::Hit(ShipId::new(1)));
        assert_eq!(game.mark(&Cell::new(0, 0)), Mark::Unknown);
    }

    #[test]
    fn single_cell_ship_sinks_on_first_hit() {
        let mut game = game();
        let ship = ShipId::new(2);
        assert_eq!(
            game.record_guess(Cell::new(4, 4)),
            Ok(HitOutcome::HitAndSunk(ship))
        );
        assert!(game.is_sunk(ship));
        assert_eq!(game.ships_remaining(), 1);
    }

    #[test]
    fn last_ship_wins_the_game() {
        let mut game = game();
        let first = ShipId::new(1);
        game.record_guess(Cell::new(4, 4)).unwrap();
        assert_eq!(game.record_guess(Cell::new(0, 0)), Ok(HitOutcome::Hit(first)));
        assert_eq!(game.record_guess(Cell::new(0, 1)), Ok(HitOutcome::Hit(first)));
        assert_eq!(
            game.record_guess(Cell::new(0, 2)),
            Ok(HitOutcome::HitAndGameWon(first))
        );
        assert!(game.is_won());
        assert!(game.is_sunk(first));
        assert_eq!(game.sunk_count(), 2);
    }

    #[test]
    fn no_guesses_after_the_game_ends() {
        let mut game = game();
        for &cell in &[(0, 0), (0, 1), (0, 2), (4, 4)] {
            game.record_guess(cell.into()).unwrap();
        }
        assert_eq!(
            game.record_guess(Cell::new(1, 1)),
            Err(GuessError::GameOver(GameStatus::Won))
        );
        game.exhaust_turns();
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn exhausted_game_is_lost_for_good() {
        let mut game = game();
        game.exhaust_turns();
        assert_eq!(game.status(), GameStatus::LostByTurnExhaustion);
        assert_eq!(
            game.record_guess(Cell::new(4, 4)),
            Err(GuessError::GameOver(GameStatus::LostByTurnExhaustion))
        );
        assert!(!game.is_won());
    }

    #[test]
    fn every_occupied_cell_hits_the_ship_that_owns_it() {
        let mut setup = FleetSetup::new(BoardSize::new(5));
        setup.place_ship(Cell::new(1, 1), Direction::East, 2).unwrap();
        setup.place_ship(Cell::new(3, 3), Direction::South, 1).unwrap();
        let mut game = GameState::new(setup.finish());

        let owned: Vec<_> = game.occupancy().iter().collect();
        assert_eq!(owned.len(), game.fleet().total_cells());
        for (cell, id) in owned {
            assert!(game.fleet().get(id).map_or(false, |ship| ship.contains(&cell)));
            let outcome = game.record_guess(cell).unwrap();
            assert_eq!(outcome.ship(), Some(id));
        }
        assert!(game.is_won());
    }

    #[test]
    fn off_board_guess_is_rejected() {
        let mut game = game();
        let cell = Cell::new(5, 0);
        assert_eq!(game.record_guess(cell), Err(GuessError::OutOfBounds(cell)));
        assert!(!game.guessed(&cell));
    }

    #[test]
    fn rows_expose_marks_and_owners() {
        let mut game = game();
        game.record_guess(Cell::new(0, 0)).unwrap();
        game.record_guess(Cell::new(1, 0)).unwrap();
        let rows: Vec<Vec<CellRef>> = game.iter_rows().map(|row| row.collect()).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0][0].mark(), Mark::Hit(ShipId::new(1)));
        assert_eq!(rows[1][0].mark(), Mark::Miss);
        assert_eq!(rows[0][2].mark(), Mark::Unknown);
        assert_eq!(rows[0][2].owner(), Some(ShipId::new(1)));
        assert_eq!(rows[4][4].owner(), Some(ShipId::new(2)));
        assert_eq!(rows[3][3].owner(), None);
    }
}
