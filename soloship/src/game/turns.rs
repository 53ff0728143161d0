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
use log::debug;

use crate::{
    board::Cell,
    game::{GameState, GuessError, HitOutcome},
};

/// Countdown of guesses left before the game is lost.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TurnBudget {
    remaining: usize,
}

impl TurnBudget {
    /// A budget of exactly `turns` guesses.
    pub fn new(turns: usize) -> Self {
        Self { remaining: turns }
    }

    /// The standard budget for a game: one turn per occupied cell plus one per row.
    pub fn for_game(game: &GameState) -> Self {
        Self::new(game.occupancy().occupied_count() + game.size().get())
    }

    /// Turns left.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Whether no turns are left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Use up one turn. Returns the number left.
    pub fn spend(&mut self) -> usize {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Play one turn of `game`. Repeated cells cost nothing; any other guess spends a
    /// turn, and spending the last one without winning loses the game.
    pub fn play(&mut self, game: &mut GameState, cell: Cell) -> Result<HitOutcome, GuessError> {
        if self.is_exhausted() {
            game.exhaust_turns();
        }
        let outcome = game.record_guess(cell)?;
        if outcome != HitOutcome::Repeat {
            let left = self.spend();
            debug!("{} turn(s) left", left);
            if left == 0 {
                game.exhaust_turns();
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::{BoardSize, Direction, FleetSetup},
        game::GameStatus,
        ships::ShipId,
    };

    fn game() -> GameState {
        let mut setup = FleetSetup::new(BoardSize::new(5));
        setup.place_ship(Cell::new(2, 2), Direction::South, 1).unwrap();
        GameState::new(setup.finish())
    }

    #[test]
    fn default_budget_is_occupied_cells_plus_board_size() {
        assert_eq!(TurnBudget::for_game(&game()).remaining(), 2 + 5);
    }

    #[test]
    fn repeats_are_free() {
        let mut game = game();
        let mut turns = TurnBudget::new(3);
        turns.play(&mut game, Cell::new(0, 0)).unwrap();
        assert_eq!(
            turns.play(&mut game, Cell::new(0, 0)),
            Ok(HitOutcome::Repeat)
        );
        assert_eq!(turns.remaining(), 2);
    }

    #[test]
    fn spending_the_last_turn_loses() {
        let mut game = game();
        let mut turns = TurnBudget::new(2);
        turns.play(&mut game, Cell::new(0, 0)).unwrap();
        turns.play(&mut game, Cell::new(2, 2)).unwrap();
        assert!(turns.is_exhausted());
        assert_eq!(game.status(), GameStatus::LostByTurnExhaustion);
        assert_eq!(
            turns.play(&mut game, Cell::new(3, 2)),
            Err(GuessError::GameOver(GameStatus::LostByTurnExhaustion))
        );
    }

    #[test]
    fn winning_on_the_last_turn_wins() {
        let mut game = game();
        let mut turns = TurnBudget::new(2);
        turns.play(&mut game, Cell::new(2, 2)).unwrap();
        assert_eq!(
            turns.play(&mut game, Cell::new(3, 2)),
            Ok(HitOutcome::HitAndGameWon(ShipId::new(1)))
        );
        assert!(turns.is_exhausted());
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn empty_budget_loses_immediately() {
        let mut game = game();
        let mut turns = TurnBudget::new(0);
        assert!(turns.play(&mut game, Cell::new(2, 2)).is_err());
        assert_eq!(game.status(), GameStatus::LostByTurnExhaustion);
    }
}
