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
//! Errors used by [`FleetSetup`][crate::board::FleetSetup].

use thiserror::Error;

use crate::board::Cell;

/// Reason why a ship could not be placed at a given anchor.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The anchor is not on the board.
    #[error("the anchor is outside the board")]
    OutOfBounds,
    /// The anchor is already owned by another ship.
    #[error("the anchor was already occupied")]
    AlreadyOccupied,
    /// The requested length runs into another ship or off the board.
    #[error("insufficient free space in the requested direction")]
    InsufficientSpace,
}

/// Error caused when attempting to place a ship in an invalid position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not place ship at {anchor}: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    anchor: Cell,
}

impl PlaceError {
    /// Construct a placement error from a reason and the attempted anchor.
    pub(super) fn new(reason: CannotPlaceReason, anchor: Cell) -> Self {
        Self { reason, anchor }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get the anchor where placement was attempted.
    pub fn anchor(&self) -> Cell {
        self.anchor
    }
}
