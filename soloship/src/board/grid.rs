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
//! Row-major cell storage shared by the occupancy map and the guess markers.

use std::{
    borrow::Borrow,
    ops::{Index, IndexMut},
};

use crate::board::{BoardSize, Cell};

/// One value per cell of a square board.
#[derive(Debug, Clone)]
pub(crate) struct Grid<T> {
    /// Dimensions of this board.
    size: BoardSize,
    /// Cells that make up this board.
    cells: Box<[T]>,
}

impl<T: Default> Grid<T> {
    pub(crate) fn new(size: BoardSize) -> Self {
        let cells = (0..size.total_cells()).map(|_| Default::default()).collect();
        Self { size, cells }
    }
}

impl<T> Grid<T> {
    pub(crate) fn size(&self) -> BoardSize {
        self.size
    }

    /// Get a reference to the value at the given [`Cell`].
    pub(crate) fn get<B: Borrow<Cell>>(&self, cell: B) -> Option<&T> {
        self.size
            .try_linearize(cell.borrow())
            .and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the value at the given [`Cell`].
    pub(crate) fn get_mut<B: Borrow<Cell>>(&mut self, cell: B) -> Option<&mut T> {
        self.size
            .try_linearize(cell.borrow())
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Iterate every cell with its value in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, value)| (size.un_linearize(i), value))
    }
}

impl<T, B: Borrow<Cell>> Index<B> for Grid<T> {
    type Output = T;

    fn index(&self, cell: B) -> &Self::Output {
        self.get(cell).expect("cell out of bounds")
    }
}

impl<T, B: Borrow<Cell>> IndexMut<B> for Grid<T> {
    fn index_mut(&mut self, cell: B) -> &mut Self::Output {
        self.get_mut(cell).expect("cell out of bounds")
    }
}
