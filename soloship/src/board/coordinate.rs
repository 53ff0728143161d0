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
use std::fmt;

/// The coordinates of a cell on the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Vertical position of the cell, counted from the top edge.
    pub row: usize,
    /// Horizontal position of the cell, counted from the left edge.
    pub col: usize,
}

impl Cell {
    /// Construct a [`Cell`] from the given `row` and `col`.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    /// Construct a [`Cell`] from the given `(row, col)` pair.
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    /// Convert the [`Cell`] into a `(row, col)` pair.
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    /// Formats the cell the way the player types it: column letter, then the 1-based row.
    /// Columns past `Z` fall back to the raw pair.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.col < 26 {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Cardinal direction a ship extends in from its anchor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Decreasing row.
    North,
    /// Increasing column.
    East,
    /// Increasing row.
    South,
    /// Decreasing column.
    West,
}

impl Direction {
    /// Every direction, in the priority order used to break ties between equally long
    /// runs of free space.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}
