// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::item::Item;
use serde::Serialize;

/// One materialized board: a shuffled selection of items laid into an
/// R×C grid in row-major order.
///
/// Boards are numbered from 1, matching how they are presented to players.
/// The cell order is presentation state produced by the seeded shuffle; the
/// item *set* is what the optimizer guarantees properties about.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct GeneratedBoard {
    number: usize,
    rows: usize,
    cols: usize,
    cells: Vec<Item>,
}

impl GeneratedBoard {
    /// Constructs a board from its shuffled cells.
    ///
    /// # Panics
    ///
    /// Panics if `cells` does not hold exactly `rows × cols` items.
    pub fn new(number: usize, rows: usize, cols: usize, cells: Vec<Item>) -> Self {
        assert_eq!(
            cells.len(),
            rows * cols,
            "called `GeneratedBoard::new` with inconsistent cell count: the grid is {rows}x{cols} but {} cells were provided",
            cells.len()
        );

        Self {
            number,
            rows,
            cols,
            cells,
        }
    }

    /// Returns the 1-indexed board number.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns all cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Item] {
        &self.cells
    }

    /// Returns one row of the grid.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in `0..rows()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[Item] {
        debug_assert!(
            row < self.rows,
            "called `GeneratedBoard::row` with row out of bounds: the len is {} but the index is {}",
            self.rows,
            row
        );

        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns `true` if the board holds an item with the given identifier.
    pub fn contains_id(&self, id: &str) -> bool {
        self.cells.iter().any(|item| item.id() == id)
    }
}

impl std::fmt::Display for GeneratedBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board {}", self.number)?;
        for row in 0..self.rows {
            for item in self.row(row) {
                writeln!(f, "   {}", item.name())?;
            }
            if row + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("id-{i}"), format!("Item {i}")))
            .collect()
    }

    #[test]
    fn test_rows_are_row_major_slices() {
        let board = GeneratedBoard::new(1, 2, 3, items(6));
        assert_eq!(board.number(), 1);
        assert_eq!(board.row(0).len(), 3);
        assert_eq!(board.row(0)[0].id(), "id-0");
        assert_eq!(board.row(1)[0].id(), "id-3");
        assert_eq!(board.row(1)[2].id(), "id-5");
    }

    #[test]
    fn test_contains_id() {
        let board = GeneratedBoard::new(3, 2, 2, items(4));
        assert!(board.contains_id("id-2"));
        assert!(!board.contains_id("id-9"));
    }

    #[test]
    #[should_panic(expected = "inconsistent cell count")]
    fn test_new_rejects_wrong_cell_count() {
        let _ = GeneratedBoard::new(1, 4, 4, items(5));
    }
}
