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

//! Board materialization.
//!
//! Converts an assignment matrix into presentation-ready boards. Items are
//! extracted per board in ascending item order — the canonical order the
//! determinism contract is anchored on — then shuffled with an explicit
//! seeded generator purely for visual diversity, and laid into the R×C
//! grid row-major. Shuffling never touches the optimization result, only
//! the cell order.
//!
//! The generator is a local `ChaCha8Rng` instance seeded from a single
//! `u64`, passed down rather than ambient, so concurrent generation calls
//! stay isolated and a recorded seed reproduces the exact cell layout.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tabla_model::{
    assignment::AssignmentMatrix, board::GeneratedBoard, config::GeneratorConfig,
    index::BoardIndex, item::Item,
};

/// Materializes every board from the matrix, numbering them from 1.
///
/// # Panics
///
/// Panics in debug builds if the matrix shape disagrees with the
/// configuration.
pub fn materialize_boards(
    matrix: &AssignmentMatrix,
    config: &GeneratorConfig,
    seed: u64,
) -> Vec<GeneratedBoard> {
    debug_assert!(
        matrix.num_items() == config.num_items() && matrix.num_boards() == config.num_boards(),
        "called `materialize_boards` with mismatched shapes: matrix is {}x{} but config is {}x{}",
        matrix.num_items(),
        matrix.num_boards(),
        config.num_items(),
        config.num_boards()
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let geometry = config.board();

    (0..matrix.num_boards())
        .map(|board| {
            let mut cells: Vec<Item> = matrix
                .board_item_indices(BoardIndex::new(board))
                .map(|item| config.items()[item.get()].clone())
                .collect();
            cells.shuffle(&mut rng);
            GeneratedBoard::new(board + 1, geometry.rows(), geometry.cols(), cells)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabla_model::{config::BoardConfig, index::ItemIndex};

    fn config(n: usize, boards: usize, rows: usize, cols: usize) -> GeneratorConfig {
        GeneratorConfig::builder()
            .items((0..n).map(|i| Item::new(format!("id-{i}"), format!("Item {i}"))))
            .num_boards(boards)
            .board(BoardConfig::new(rows, cols))
            .build()
    }

    fn full_matrix(n: usize, boards: usize) -> AssignmentMatrix {
        let mut matrix = AssignmentMatrix::new(n, boards);
        for board in 0..boards {
            for item in 0..n {
                matrix.place(ItemIndex::new(item), BoardIndex::new(board));
            }
        }
        matrix
    }

    #[test]
    fn test_boards_are_numbered_from_one() {
        let config = config(4, 3, 2, 2);
        let boards = materialize_boards(&full_matrix(4, 3), &config, 1);
        let numbers: Vec<usize> = boards.iter().map(GeneratedBoard::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_shuffle_permutes_not_mutates() {
        let config = config(6, 2, 2, 3);
        let boards = materialize_boards(&full_matrix(6, 2), &config, 99);

        for board in &boards {
            assert_eq!(board.cells().len(), 6);
            // Same item set regardless of shuffle order.
            let mut ids: Vec<&str> = board.cells().iter().map(Item::id).collect();
            ids.sort_unstable();
            assert_eq!(ids, vec!["id-0", "id-1", "id-2", "id-3", "id-4", "id-5"]);
        }
    }

    #[test]
    fn test_same_seed_reproduces_cell_order() {
        let config = config(9, 4, 3, 3);
        let matrix = full_matrix(9, 4);
        let first = materialize_boards(&matrix, &config, 1234);
        let second = materialize_boards(&matrix, &config, 1234);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_usually_differ() {
        let config = config(16, 1, 4, 4);
        let matrix = full_matrix(16, 1);
        let first = materialize_boards(&matrix, &config, 1);
        let second = materialize_boards(&matrix, &config, 2);
        // 16! orderings; two seeds colliding would be remarkable.
        assert_ne!(first, second);
    }
}
