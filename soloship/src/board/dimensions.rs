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
use std::iter;

use crate::{
    board::{Cell, Direction},
    config::ConfigError,
};

/// Smallest supported board dimension.
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest supported board dimension. Columns are labelled `A` through `Z`.
pub const MAX_BOARD_SIZE: usize = 26;

/// Dimension of a square board. Always within [`MIN_BOARD_SIZE`]`..=`[`MAX_BOARD_SIZE`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BoardSize(usize);

impl BoardSize {
    /// Create a [`BoardSize`] for an `size`x`size` board.
    /// Panics if `size` is outside the supported range.
    pub fn new(size: usize) -> Self {
        match Self::try_new(size) {
            Ok(size) => size,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create a [`BoardSize`] for an `size`x`size` board, rejecting sizes outside the
    /// supported range.
    pub fn try_new(size: usize) -> Result<Self, ConfigError> {
        if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            Ok(BoardSize(size))
        } else {
            Err(ConfigError::BoardSize(size))
        }
    }

    /// Number of rows (and columns).
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of cells on the board.
    pub fn total_cells(self) -> usize {
        self.0 * self.0
    }

    /// Whether the cell lies on the board.
    #[inline]
    pub fn contains(self, cell: &Cell) -> bool {
        cell.row < self.0 && cell.col < self.0
    }

    /// Convert a cell to a row-major index. Returns `None` if the cell is off the board.
    pub fn try_linearize(self, cell: &Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row * self.0 + cell.col)
        } else {
            None
        }
    }

    /// Convert a row-major index back into a [`Cell`].
    pub fn un_linearize(self, idx: usize) -> Cell {
        Cell::new(idx / self.0, idx % self.0)
    }

    /// The neighbor of `cell` in `dir`, or `None` past the edge of the board.
    pub fn step(self, cell: Cell, dir: Direction) -> Option<Cell> {
        let next = match dir {
            Direction::North => Cell::new(cell.row.checked_sub(1)?, cell.col),
            Direction::South => Cell::new(cell.row + 1, cell.col),
            Direction::West => Cell::new(cell.row, cell.col.checked_sub(1)?),
            Direction::East => Cell::new(cell.row, cell.col + 1),
        };
        if self.contains(&next) {
            Some(next)
        } else {
            None
        }
    }

    /// Iterate the cells strictly beyond `cell` in `dir`, nearest first, up to the edge.
    pub fn ray(self, cell: Cell, dir: Direction) -> impl Iterator<Item = Cell> {
        iter::successors(self.step(cell, dir), move |&prev| self.step(prev, dir))
    }

    /// Get an iterator over rows of the board. Each row is an iterator over the cells of
    /// that row.
    pub fn iter_rows(self) -> impl Iterator<Item = impl Iterator<Item = Cell>> {
        let size = self.0;
        (0..size).map(move |row| (0..size).map(move |col| Cell::new(row, col)))
    }
}
