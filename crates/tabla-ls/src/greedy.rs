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

//! Scarcity-first greedy seeding.
//!
//! Items are placed in ascending frequency order: scarce items are the
//! hardest to place well, so they claim boards while most capacity is
//! still open. For each item, the eligible boards (remaining capacity,
//! item absent) are ranked by the overlap the placement would cause, ties
//! broken toward boards with more remaining capacity, then by board index
//! so the whole stage is deterministic.
//!
//! If an item finds fewer eligible boards than its frequency requires, the
//! instance is infeasible *under this ordering* — a different order might
//! succeed, but this stage does not backtrack. The error is fatal for the
//! generation attempt.

use tabla_model::{
    assignment::AssignmentMatrix,
    index::{BoardIndex, ItemIndex},
    instance::Instance,
};
use tabla_search::result::SolveError;

/// How costly it would be to put `item` on `board` right now: the maximum,
/// over all other boards, of the overlap `board` would have with that
/// board after the placement.
pub fn placement_score(matrix: &AssignmentMatrix, item: ItemIndex, board: BoardIndex) -> usize {
    (0..matrix.num_boards())
        .filter(|&other| other != board.get())
        .map(|other| {
            let other = BoardIndex::new(other);
            matrix.overlap(board, other) + usize::from(matrix.contains(item, other))
        })
        .max()
        .unwrap_or(0)
}

/// Builds the initial assignment.
///
/// Column sums stay within capacity throughout, and on success every row
/// sums to exactly its required frequency. Board uniqueness is *not*
/// guaranteed here; see [`crate::repair`].
pub fn seed_assignment(instance: &Instance) -> Result<AssignmentMatrix, SolveError> {
    let num_items = instance.num_items();
    let num_boards = instance.num_boards();

    let mut matrix = AssignmentMatrix::new(num_items, num_boards);
    let mut capacity = vec![instance.board_size(); num_boards];

    // Ascending by frequency; the stable sort keeps index order for ties.
    let mut order: Vec<usize> = (0..num_items).collect();
    order.sort_by_key(|&item| instance.frequencies().get(ItemIndex::new(item)));

    for &item in &order {
        let item_index = ItemIndex::new(item);
        let required = instance.frequencies().get(item_index);

        let mut candidates: Vec<(usize, usize, usize)> = (0..num_boards)
            .filter(|&board| {
                capacity[board] > 0 && !matrix.contains(item_index, BoardIndex::new(board))
            })
            .map(|board| {
                (
                    board,
                    placement_score(&matrix, item_index, BoardIndex::new(board)),
                    capacity[board],
                )
            })
            .collect();

        candidates.sort_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)).then(a.0.cmp(&b.0)));

        if candidates.len() < required {
            return Err(SolveError::Placement {
                item,
                required,
                available: candidates.len(),
            });
        }

        for &(board, _, _) in candidates.iter().take(required) {
            matrix.place(item_index, BoardIndex::new(board));
            capacity[board] -= 1;
        }
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabla_model::frequency::auto_distribute;

    fn instance(items: usize, boards: usize, board_size: usize) -> Instance {
        let auto = auto_distribute(items, boards, board_size);
        Instance::new(items, boards, board_size, auto.frequencies)
    }

    #[test]
    fn test_seed_satisfies_row_and_column_sums() {
        let instance = instance(36, 15, 16);
        let matrix = seed_assignment(&instance).unwrap();

        for board in 0..15 {
            assert_eq!(matrix.board_len(BoardIndex::new(board)), 16, "board {board}");
        }
        for item in 0..36 {
            let item_index = ItemIndex::new(item);
            assert_eq!(
                matrix.item_frequency(item_index),
                instance.frequencies().get(item_index),
                "item {item}"
            );
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let instance = instance(24, 8, 9);
        let first = seed_assignment(&instance).unwrap();
        let second = seed_assignment(&instance).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_all_items_on_all_boards() {
        // 5 items, 3 boards, board size 5: frequency 3 = B for every item.
        let instance = instance(5, 3, 5);
        let matrix = seed_assignment(&instance).unwrap();
        for item in 0..5 {
            assert_eq!(matrix.item_frequency(ItemIndex::new(item)), 3);
        }
    }

    #[test]
    fn test_seed_reports_placement_failure() {
        // One item required on more boards than exist.
        use tabla_model::frequency::FrequencyVector;
        let instance = Instance::new(1, 2, 1, FrequencyVector::from_counts(vec![3]));

        let err = seed_assignment(&instance).unwrap_err();
        match err {
            SolveError::Placement {
                item,
                required,
                available,
            } => {
                assert_eq!(item, 0);
                assert_eq!(required, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected placement failure, got {other}"),
        }
    }

    #[test]
    fn test_placement_score_counts_prospective_overlap() {
        let mut matrix = AssignmentMatrix::new(3, 3);
        // Board 0 holds items 0 and 1; board 1 holds item 0.
        matrix.place(ItemIndex::new(0), BoardIndex::new(0));
        matrix.place(ItemIndex::new(1), BoardIndex::new(0));
        matrix.place(ItemIndex::new(0), BoardIndex::new(1));

        // Placing item 1 on board 1: overlap with board 0 is currently 1
        // and board 0 already holds item 1, so the prospective max is 2.
        let score = placement_score(&matrix, ItemIndex::new(1), BoardIndex::new(1));
        assert_eq!(score, 2);

        // Placing item 2 on board 2 overlaps with nothing.
        let score = placement_score(&matrix, ItemIndex::new(2), BoardIndex::new(2));
        assert_eq!(score, 0);
    }
}
