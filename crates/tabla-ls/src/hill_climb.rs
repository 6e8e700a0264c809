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

//! First-improvement hill climbing on the worst board pair.
//!
//! Each outer iteration locates the board pair with the highest overlap.
//! If that overlap already sits at or below the acceptable threshold the
//! search stops early. Otherwise the shared items of the pair are
//! candidates for eviction: each one, from either of its two source
//! boards, may swap against an item of a third board, provided the swap
//! does not create a duplicate board. The first swap that strictly lowers
//! the pair's overlap is kept; everything else is reverted on the spot.
//!
//! Guarantees are deliberately modest: the worst-pair overlap never
//! increases, and the iteration ceiling plus a per-iteration attempt
//! budget bound the running time even in pathological cases. No claim of
//! global optimality is made.

use crate::{solver::HeuristicConfig, stats::HeuristicStatistics};
use tabla_model::{assignment::AssignmentMatrix, index::BoardIndex};

/// Runs the local search in place.
pub fn reduce_max_overlap(
    matrix: &mut AssignmentMatrix,
    config: &HeuristicConfig,
    stats: &mut HeuristicStatistics,
) {
    for _ in 0..config.max_climb_iterations {
        let Some((board_a, board_b, worst)) = matrix.max_pairwise_overlap() else {
            break;
        };
        if worst <= config.acceptable_overlap {
            break;
        }

        stats.on_climb_iteration();

        if !improve_pair(matrix, board_a, board_b, worst, config, stats) {
            // Local optimum: no improving swap within the attempt budget.
            break;
        }
    }
}

/// Searches for one strictly improving swap for the given pair. Returns
/// `true` if a swap was accepted.
fn improve_pair(
    matrix: &mut AssignmentMatrix,
    board_a: BoardIndex,
    board_b: BoardIndex,
    worst: usize,
    config: &HeuristicConfig,
    stats: &mut HeuristicStatistics,
) -> bool {
    let shared = matrix.shared_items(board_a, board_b);
    let mut attempts = 0usize;

    for &item in &shared {
        for &source in &[board_a, board_b] {
            for third in (0..matrix.num_boards()).map(BoardIndex::new) {
                if third == board_a || third == board_b {
                    continue;
                }
                if matrix.contains(item, third) {
                    continue;
                }

                let incoming_candidates: Vec<_> = matrix.board_item_indices(third).collect();
                for &incoming in &incoming_candidates {
                    if attempts >= config.max_swap_attempts {
                        return false;
                    }
                    if matrix.contains(incoming, source) {
                        continue;
                    }

                    attempts += 1;
                    stats.on_swap_attempt();

                    matrix.swap_items(source, item, third, incoming);
                    if matrix.overlap(board_a, board_b) < worst
                        && matrix.duplicate_of(source).is_none()
                        && matrix.duplicate_of(third).is_none()
                    {
                        stats.on_accepted_swap();
                        return true;
                    }
                    matrix.swap_items(source, incoming, third, item);
                }
            }
        }
    }

    false
}
