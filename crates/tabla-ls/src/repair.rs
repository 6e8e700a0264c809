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

//! Duplicate-board repair.
//!
//! Greedy seeding optimizes placement cost, not board-set uniqueness, so
//! two boards can end up with identical item sets. Repair separates the
//! first duplicate pair per pass by exchanging one item between the
//! duplicate and a third board, picking a swap where neither board holds
//! the other's item and both touched boards end up distinct from every
//! board in the pool. Row and column sums are untouched by construction.
//!
//! Repair is bounded. Exhausting the bound (or finding a pair with no
//! legal swap) is reported, not raised: the caller downgrades it to a
//! warning and still returns the feasible, possibly non-unique boards.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tabla_model::{
    assignment::AssignmentMatrix,
    index::{BoardIndex, ItemIndex},
};

/// What a repair run accomplished.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RepairOutcome {
    /// `true` when no duplicate pairs remain.
    pub resolved: bool,
    /// Number of passes performed.
    pub passes: usize,
    /// Number of swaps applied.
    pub swaps: usize,
    /// Duplicate pairs remaining after the run.
    pub remaining_duplicates: usize,
}

/// Finds `(first occurrence, duplicate)` board pairs, keyed on the exact
/// item set.
pub fn find_duplicate_pairs(matrix: &AssignmentMatrix) -> Vec<(BoardIndex, BoardIndex)> {
    let mut seen: FxHashMap<Vec<usize>, BoardIndex> = FxHashMap::default();
    let mut duplicates = Vec::new();

    for board in (0..matrix.num_boards()).map(BoardIndex::new) {
        let key: Vec<usize> = matrix.board_item_indices(board).map(|i| i.get()).collect();
        match seen.entry(key) {
            Entry::Occupied(original) => duplicates.push((*original.get(), board)),
            Entry::Vacant(slot) => {
                slot.insert(board);
            }
        }
    }

    duplicates
}

/// Repairs duplicate boards in place, bounded at `max_passes`.
pub fn repair_duplicates(matrix: &mut AssignmentMatrix, max_passes: usize) -> RepairOutcome {
    let mut swaps = 0;

    for pass in 0..max_passes {
        let duplicates = find_duplicate_pairs(matrix);
        let Some(&(original, duplicate)) = duplicates.first() else {
            return RepairOutcome {
                resolved: true,
                passes: pass,
                swaps,
                remaining_duplicates: 0,
            };
        };

        if separate_pair(matrix, original, duplicate) {
            swaps += 1;
        } else {
            // No legal swap exists for this pair; the search is
            // deterministic, so further passes would retrace it.
            return RepairOutcome {
                resolved: false,
                passes: pass + 1,
                swaps,
                remaining_duplicates: duplicates.len(),
            };
        }
    }

    let remaining = find_duplicate_pairs(matrix).len();
    RepairOutcome {
        resolved: remaining == 0,
        passes: max_passes,
        swaps,
        remaining_duplicates: remaining,
    }
}

/// Tries one swap that makes `duplicate` differ from `original` without
/// creating a new duplicate anywhere. Returns `true` on success.
fn separate_pair(
    matrix: &mut AssignmentMatrix,
    original: BoardIndex,
    duplicate: BoardIndex,
) -> bool {
    let outgoing_candidates: Vec<ItemIndex> = matrix.board_item_indices(duplicate).collect();

    for &outgoing in &outgoing_candidates {
        for third in (0..matrix.num_boards()).map(BoardIndex::new) {
            if third == original || third == duplicate {
                continue;
            }
            if matrix.contains(outgoing, third) {
                continue;
            }

            let incoming_candidates: Vec<ItemIndex> = matrix.board_item_indices(third).collect();
            for &incoming in &incoming_candidates {
                if matrix.contains(incoming, duplicate) {
                    continue;
                }

                matrix.swap_items(duplicate, outgoing, third, incoming);
                if matrix.duplicate_of(duplicate).is_none() && matrix.duplicate_of(third).is_none()
                {
                    return true;
                }
                matrix.swap_items(duplicate, incoming, third, outgoing);
            }
        }
    }

    false
}
