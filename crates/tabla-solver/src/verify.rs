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

//! Defensive re-verification of solver output.
//!
//! The facade re-scans every assignment matrix before trusting it, whether
//! it came from the exact backend or the heuristic pipeline. The scan
//! checks exactly the two hard invariants: every column sums to the board
//! size, every row sums to the item's required frequency. Verification
//! never mutates state and makes no attempt to prove anything beyond the
//! sums; board uniqueness is tracked separately because repair exhaustion
//! legitimately relaxes it.

use tabla_model::{
    assignment::AssignmentMatrix,
    index::{BoardIndex, ItemIndex},
    instance::Instance,
};

/// A hard invariant the assignment matrix failed to uphold.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("board {board} holds {actual} items, expected {expected}")]
    BoardSize {
        board: usize,
        actual: usize,
        expected: usize,
    },

    #[error("item {item} appears on {actual} boards, expected {expected}")]
    ItemFrequency {
        item: usize,
        actual: usize,
        expected: usize,
    },
}

/// Re-checks column and row sums against the instance.
pub fn verify_assignment(
    matrix: &AssignmentMatrix,
    instance: &Instance,
) -> Result<(), VerificationError> {
    for board in 0..matrix.num_boards() {
        let actual = matrix.board_len(BoardIndex::new(board));
        if actual != instance.board_size() {
            return Err(VerificationError::BoardSize {
                board,
                actual,
                expected: instance.board_size(),
            });
        }
    }

    for item in 0..matrix.num_items() {
        let actual = matrix.item_frequency(ItemIndex::new(item));
        let expected = instance.frequencies().get(ItemIndex::new(item));
        if actual != expected {
            return Err(VerificationError::ItemFrequency {
                item,
                actual,
                expected,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabla_model::frequency::FrequencyVector;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    fn bi(b: usize) -> BoardIndex {
        BoardIndex::new(b)
    }

    #[test]
    fn test_consistent_matrix_passes() {
        let instance = Instance::new(3, 2, 2, FrequencyVector::from_counts(vec![2, 1, 1]));
        let mut matrix = AssignmentMatrix::new(3, 2);
        matrix.place(ii(0), bi(0));
        matrix.place(ii(1), bi(0));
        matrix.place(ii(0), bi(1));
        matrix.place(ii(2), bi(1));

        assert!(verify_assignment(&matrix, &instance).is_ok());
    }

    #[test]
    fn test_short_board_is_reported() {
        let instance = Instance::new(3, 2, 2, FrequencyVector::from_counts(vec![2, 1, 1]));
        let mut matrix = AssignmentMatrix::new(3, 2);
        matrix.place(ii(0), bi(0));
        matrix.place(ii(1), bi(0));
        matrix.place(ii(0), bi(1));

        let err = verify_assignment(&matrix, &instance).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::BoardSize {
                board: 1,
                actual: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_wrong_frequency_is_reported() {
        let instance = Instance::new(2, 2, 1, FrequencyVector::from_counts(vec![2, 0]));
        let mut matrix = AssignmentMatrix::new(2, 2);
        matrix.place(ii(0), bi(0));
        matrix.place(ii(1), bi(1));

        let err = verify_assignment(&matrix, &instance).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::ItemFrequency {
                item: 0,
                actual: 1,
                expected: 2
            }
        ));
    }
}
