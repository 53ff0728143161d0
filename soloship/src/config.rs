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
//! Game configuration and its validation.

use thiserror::Error;

use crate::board::{BoardSize, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// How many random anchors are tried for a single ship before placement gives up.
pub const DEFAULT_MAX_ANCHOR_ATTEMPTS: usize = 10_000;

/// Configuration rejected before any board state is created.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// The board dimension is outside the supported range.
    #[error(
        "board size must be between {} and {}, got {0}",
        MIN_BOARD_SIZE,
        MAX_BOARD_SIZE
    )]
    BoardSize(usize),

    /// The fleet is empty or could never fit on the board.
    #[error("ship count must be between 1 and {max}, got {count}")]
    ShipCount { count: usize, max: usize },

    /// Placement must be allowed at least one anchor attempt per ship.
    #[error("anchor attempt limit must be at least 1")]
    NoAnchorAttempts,
}

/// Settings for a single game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GameConfig {
    board_size: usize,
    ship_count: usize,
    max_anchor_attempts: usize,
}

impl GameConfig {
    /// Configuration for a `board_size`x`board_size` board with one ship per row.
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ship_count: board_size,
            max_anchor_attempts: DEFAULT_MAX_ANCHOR_ATTEMPTS,
        }
    }

    /// Override the number of ships to place.
    pub fn with_ship_count(mut self, ship_count: usize) -> Self {
        self.ship_count = ship_count;
        self
    }

    /// Override the per-ship anchor attempt limit.
    pub fn with_max_anchor_attempts(mut self, attempts: usize) -> Self {
        self.max_anchor_attempts = attempts;
        self
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn ship_count(&self) -> usize {
        self.ship_count
    }

    pub fn max_anchor_attempts(&self) -> usize {
        self.max_anchor_attempts
    }

    /// Check every setting, returning the validated board size.
    pub fn validate(&self) -> Result<BoardSize, ConfigError> {
        let size = BoardSize::try_new(self.board_size)?;
        let max = size.total_cells();
        if self.ship_count == 0 || self.ship_count > max {
            return Err(ConfigError::ShipCount {
                count: self.ship_count,
                max,
            });
        }
        if self.max_anchor_attempts == 0 {
            return Err(ConfigError::NoAnchorAttempts);
        }
        Ok(size)
    }
}
