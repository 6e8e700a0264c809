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

use crate::{greedy, hill_climb, repair, stats::HeuristicStatistics};
use std::time::Instant;
use tabla_model::instance::Instance;
use tabla_search::{
    result::{SolveError, SolveOutcome},
    solver::{AssignmentSolver, SolverKind},
};

/// Tunables for the heuristic pipeline.
///
/// The defaults bound every stage tightly enough that a solve always
/// completes without external cancellation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HeuristicConfig {
    /// Upper bound on duplicate-repair passes.
    pub max_repair_passes: usize,
    /// Upper bound on outer hill-climbing iterations.
    pub max_climb_iterations: usize,
    /// Worst-pair overlap at which the local search stops early.
    pub acceptable_overlap: usize,
    /// Upper bound on candidate swaps evaluated per climb iteration.
    pub max_swap_attempts: usize,
}

impl Default for HeuristicConfig {
    #[inline]
    fn default() -> Self {
        Self {
            max_repair_passes: 100,
            max_climb_iterations: 50,
            acceptable_overlap: 6,
            max_swap_attempts: 20,
        }
    }
}

/// The heuristic solving strategy: greedy seed, duplicate repair, local
/// search. Deterministic for a given instance, bounded in time, suitable
/// for instances far beyond what the exact formulation can carry.
#[derive(Clone, Debug, Default)]
pub struct HeuristicSolver {
    config: HeuristicConfig,
}

impl HeuristicSolver {
    /// Creates a solver with the default tunables.
    #[inline]
    pub fn new() -> Self {
        Self {
            config: HeuristicConfig::default(),
        }
    }

    /// Overrides the tunables.
    #[inline]
    pub fn with_config(mut self, config: HeuristicConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active tunables.
    #[inline]
    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }
}

impl AssignmentSolver for HeuristicSolver {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn solve(&self, instance: &Instance) -> Result<SolveOutcome, SolveError> {
        let start = Instant::now();
        let mut stats = HeuristicStatistics::default();

        let mut matrix = greedy::seed_assignment(instance)?;

        let repair = repair::repair_duplicates(&mut matrix, self.config.max_repair_passes);
        stats.repair_passes = repair.passes as u64;
        stats.repair_swaps = repair.swaps as u64;

        let mut warnings = Vec::new();
        if !repair.resolved {
            tracing::warn!(
                passes = repair.passes,
                remaining = repair.remaining_duplicates,
                "duplicate repair exhausted its bound"
            );
            warnings.push(format!(
                "duplicate repair stopped after {} pass(es) with {} duplicate board pair(s) remaining",
                repair.passes, repair.remaining_duplicates
            ));
        }

        hill_climb::reduce_max_overlap(&mut matrix, &self.config, &mut stats);

        stats.set_total_time(start.elapsed());
        tracing::debug!(
            climb_iterations = stats.climb_iterations,
            accepted_swaps = stats.accepted_swaps,
            elapsed = ?stats.time_total,
            "heuristic solve finished"
        );

        Ok(SolveOutcome::new(matrix, SolverKind::Heuristic, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::find_duplicate_pairs;
    use tabla_model::{
        frequency::auto_distribute,
        index::{BoardIndex, ItemIndex},
    };

    fn instance(items: usize, boards: usize, board_size: usize) -> Instance {
        let auto = auto_distribute(items, boards, board_size);
        Instance::new(items, boards, board_size, auto.frequencies)
    }

    #[test]
    fn test_solve_produces_feasible_unique_boards() {
        // 50 items across 20 boards on a 5x5 grid.
        let instance = instance(50, 20, 25);
        let solver = HeuristicSolver::new();
        let outcome = solver.solve(&instance).unwrap();

        assert_eq!(outcome.kind(), SolverKind::Heuristic);
        let matrix = outcome.matrix();

        for board in 0..20 {
            assert_eq!(matrix.board_len(BoardIndex::new(board)), 25);
        }
        for item in 0..50 {
            let item_index = ItemIndex::new(item);
            assert_eq!(
                matrix.item_frequency(item_index),
                instance.frequencies().get(item_index)
            );
        }
        assert!(find_duplicate_pairs(matrix).is_empty());
        assert!(outcome.warnings().is_empty());
    }

    #[test]
    fn test_solve_canonical_loteria_shape() {
        let instance = instance(36, 15, 16);
        let outcome = HeuristicSolver::new().solve(&instance).unwrap();
        let matrix = outcome.matrix();

        assert!(find_duplicate_pairs(matrix).is_empty());
        let (_, _, worst) = matrix.max_pairwise_overlap().unwrap();
        assert!(worst <= 16);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let instance = instance(40, 12, 12);
        let solver = HeuristicSolver::new();
        let first = solver.solve(&instance).unwrap();
        let second = solver.solve(&instance).unwrap();
        assert_eq!(first.matrix(), second.matrix());
    }

    #[test]
    fn test_solve_surfaces_placement_failure() {
        use tabla_model::frequency::FrequencyVector;
        let instance = Instance::new(2, 3, 1, FrequencyVector::from_counts(vec![4, 2]));
        let err = HeuristicSolver::new().solve(&instance).unwrap_err();
        assert!(matches!(err, SolveError::Placement { .. }), "{err}");
    }

    #[test]
    fn test_solve_warns_when_uniqueness_is_impossible() {
        use tabla_model::frequency::FrequencyVector;
        // Two boards forced to hold the single item: duplicates cannot be
        // repaired, the solve still succeeds with a warning.
        let instance = Instance::new(1, 2, 1, FrequencyVector::from_counts(vec![2]));
        let outcome = HeuristicSolver::new().solve(&instance).unwrap();

        assert_eq!(outcome.warnings().len(), 1);
        assert!(outcome.warnings()[0].contains("duplicate"));
        assert_eq!(find_duplicate_pairs(outcome.matrix()).len(), 1);
    }
}
