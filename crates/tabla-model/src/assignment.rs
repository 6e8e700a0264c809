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

//! The mutable item×board assignment state solvers operate on.
//!
//! `AssignmentMatrix` stores the binary matrix `x[i][b] = 1 iff item i is
//! placed on board b` as one flat, item-major `FixedBitSet`, plus a
//! per-board membership bitset that answers "does board b hold item i" and
//! overlap queries without walking the matrix. The two representations are
//! maintenance state for each other: every mutation goes through a single
//! function boundary (`place`, `remove`, `swap_items`) that updates both,
//! so no caller can observe them out of sync.
//!
//! Invariants the solvers establish and the facade re-verifies:
//! - every column (board) sums to exactly the board size,
//! - every row (item) sums to exactly the item's required frequency,
//! - no two columns are identical (modulo flagged repair exhaustion).

use crate::index::{BoardIndex, ItemIndex};
use fixedbitset::FixedBitSet;

#[inline(always)]
fn flatten_index(num_boards: usize, item_index: ItemIndex, board_index: BoardIndex) -> usize {
    item_index.get() * num_boards + board_index.get()
}

/// An N×B binary assignment matrix with synchronized per-board membership
/// bitsets.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AssignmentMatrix {
    num_items: usize,
    num_boards: usize,
    /// Flat item-major cells: bit `i * num_boards + b`.
    cells: FixedBitSet,
    /// Per-board membership, kept in sync with `cells` by every mutation.
    board_items: Vec<FixedBitSet>,
}

impl AssignmentMatrix {
    /// Creates an empty matrix for the given shape.
    pub fn new(num_items: usize, num_boards: usize) -> Self {
        Self {
            num_items,
            num_boards,
            cells: FixedBitSet::with_capacity(num_items * num_boards),
            board_items: vec![FixedBitSet::with_capacity(num_items); num_boards],
        }
    }

    /// Returns the number of items (rows).
    #[inline]
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Returns the number of boards (columns).
    #[inline]
    pub fn num_boards(&self) -> usize {
        self.num_boards
    }

    /// Returns `true` if the item is placed on the board.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either index is out of bounds.
    #[inline]
    pub fn contains(&self, item_index: ItemIndex, board_index: BoardIndex) -> bool {
        debug_assert!(
            item_index.get() < self.num_items,
            "called `AssignmentMatrix::contains` with item index out of bounds: the len is {} but the index is {}",
            self.num_items,
            item_index.get()
        );
        debug_assert!(
            board_index.get() < self.num_boards,
            "called `AssignmentMatrix::contains` with board index out of bounds: the len is {} but the index is {}",
            self.num_boards,
            board_index.get()
        );

        self.cells
            .contains(flatten_index(self.num_boards, item_index, board_index))
    }

    /// Places an item on a board.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the item is already on the board or an
    /// index is out of bounds.
    #[inline]
    pub fn place(&mut self, item_index: ItemIndex, board_index: BoardIndex) {
        debug_assert!(
            !self.contains(item_index, board_index),
            "called `AssignmentMatrix::place` with {} already present on {}",
            item_index,
            board_index
        );

        self.cells
            .set(flatten_index(self.num_boards, item_index, board_index), true);
        self.board_items[board_index.get()].set(item_index.get(), true);
    }

    /// Removes an item from a board.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the item is not on the board.
    #[inline]
    pub fn remove(&mut self, item_index: ItemIndex, board_index: BoardIndex) {
        debug_assert!(
            self.contains(item_index, board_index),
            "called `AssignmentMatrix::remove` with {} not present on {}",
            item_index,
            board_index
        );

        self.cells
            .set(flatten_index(self.num_boards, item_index, board_index), false);
        self.board_items[board_index.get()].set(item_index.get(), false);
    }

    /// Exchanges one item between two boards: `outgoing` moves from
    /// `board_a` to `board_b`, `incoming` moves from `board_b` to `board_a`.
    ///
    /// Both the flat cells and the membership bitsets are updated inside
    /// this single call; intermediate states are never observable.
    ///
    /// # Panics
    ///
    /// Panics in debug builds unless `board_a` holds `outgoing` but not
    /// `incoming`, and `board_b` holds `incoming` but not `outgoing`.
    pub fn swap_items(
        &mut self,
        board_a: BoardIndex,
        outgoing: ItemIndex,
        board_b: BoardIndex,
        incoming: ItemIndex,
    ) {
        debug_assert!(
            board_a != board_b,
            "called `AssignmentMatrix::swap_items` with identical boards {board_a}"
        );
        debug_assert!(
            self.contains(outgoing, board_a) && !self.contains(incoming, board_a),
            "called `AssignmentMatrix::swap_items` with invalid state on {board_a}: must hold {outgoing} and not {incoming}"
        );
        debug_assert!(
            self.contains(incoming, board_b) && !self.contains(outgoing, board_b),
            "called `AssignmentMatrix::swap_items` with invalid state on {board_b}: must hold {incoming} and not {outgoing}"
        );

        self.remove(outgoing, board_a);
        self.remove(incoming, board_b);
        self.place(incoming, board_a);
        self.place(outgoing, board_b);
    }

    /// Returns the number of items on a board (column sum).
    #[inline]
    pub fn board_len(&self, board_index: BoardIndex) -> usize {
        self.board_items[board_index.get()].count_ones(..)
    }

    /// Returns the number of boards an item is placed on (row sum).
    #[inline]
    pub fn item_frequency(&self, item_index: ItemIndex) -> usize {
        (0..self.num_boards)
            .filter(|&b| self.contains(item_index, BoardIndex::new(b)))
            .count()
    }

    /// Returns the membership bitset of a board.
    #[inline]
    pub fn board_items(&self, board_index: BoardIndex) -> &FixedBitSet {
        &self.board_items[board_index.get()]
    }

    /// Iterates the items on a board in ascending item order.
    #[inline]
    pub fn board_item_indices(
        &self,
        board_index: BoardIndex,
    ) -> impl Iterator<Item = ItemIndex> + '_ {
        self.board_items[board_index.get()].ones().map(ItemIndex::new)
    }

    /// Returns the number of items shared between two boards.
    #[inline]
    pub fn overlap(&self, a: BoardIndex, b: BoardIndex) -> usize {
        self.board_items[a.get()]
            .intersection(&self.board_items[b.get()])
            .count()
    }

    /// Returns the items shared between two boards, ascending.
    pub fn shared_items(&self, a: BoardIndex, b: BoardIndex) -> Vec<ItemIndex> {
        self.board_items[a.get()]
            .intersection(&self.board_items[b.get()])
            .map(ItemIndex::new)
            .collect()
    }

    /// Returns `true` if two boards hold exactly the same item set.
    #[inline]
    pub fn boards_equal(&self, a: BoardIndex, b: BoardIndex) -> bool {
        self.board_items[a.get()] == self.board_items[b.get()]
    }

    /// Returns some board holding the same item set as `board`, if any.
    pub fn duplicate_of(&self, board: BoardIndex) -> Option<BoardIndex> {
        (0..self.num_boards)
            .map(BoardIndex::new)
            .find(|&other| other != board && self.boards_equal(board, other))
    }

    /// Scans every board pair and returns the pair with the highest overlap
    /// together with that overlap, or `None` when fewer than two boards
    /// exist. Ties resolve to the first pair in (a, b) lexicographic order.
    pub fn max_pairwise_overlap(&self) -> Option<(BoardIndex, BoardIndex, usize)> {
        let mut worst: Option<(BoardIndex, BoardIndex, usize)> = None;
        for a in 0..self.num_boards {
            for b in (a + 1)..self.num_boards {
                let overlap = self.overlap(BoardIndex::new(a), BoardIndex::new(b));
                if worst.map_or(true, |(_, _, w)| overlap > w) {
                    worst = Some((BoardIndex::new(a), BoardIndex::new(b), overlap));
                }
            }
        }
        worst
    }
}

impl std::fmt::Display for AssignmentMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AssignmentMatrix(items: {}, boards: {})",
            self.num_items, self.num_boards
        )
    }
}
