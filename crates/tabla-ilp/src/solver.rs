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

//! The exact assignment formulation.
//!
//! One binary `x_{i}_{b}` per item-board pair, an equality row per item
//! (its frequency) and per board (the board size). Small instances
//! additionally carry the linearized minimax-overlap objective: an AND
//! variable `o_{i}_{b1}_{b2}` per item and board pair with
//! `o ≤ x₁`, `o ≤ x₂`, `o ≥ x₁ + x₂ − 1`, and a scalar `z ∈ [0, S]`
//! with `z ≥ Σᵢ o` for every pair, minimized. The auxiliary-variable count
//! grows as O(N·B²), so the objective is only encoded under a size budget;
//! past it the model solves for feasibility with `z` pinned to zero.

use crate::{
    backend::LpBackend,
    model::{LpModel, Relation},
    solution::{LpSolution, LpStatus},
};
use std::time::Duration;
use tabla_model::{
    assignment::AssignmentMatrix,
    index::{BoardIndex, ItemIndex},
    instance::Instance,
};
use tabla_search::{
    result::{SolveError, SolveOutcome},
    solver::{AssignmentSolver, SolverKind},
};

#[inline]
fn x_var(item: usize, board: usize) -> String {
    format!("x_{item}_{board}")
}

#[inline]
fn o_var(item: usize, board_a: usize, board_b: usize) -> String {
    format!("o_{item}_{board_a}_{board_b}")
}

const Z_VAR: &str = "z";

/// Size budget under which the quadratic minimax-overlap encoding is
/// considered tractable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OverlapObjectiveBudget {
    /// Maximum `num_items × num_boards` before the encoding is skipped.
    pub max_cells: usize,
    /// Maximum board count before the encoding is skipped.
    pub max_boards: usize,
}

impl Default for OverlapObjectiveBudget {
    #[inline]
    fn default() -> Self {
        Self {
            max_cells: 400,
            max_boards: 15,
        }
    }
}

impl OverlapObjectiveBudget {
    /// Returns `true` if the instance fits the budget.
    #[inline]
    pub fn admits(&self, instance: &Instance) -> bool {
        instance.num_items() * instance.num_boards() <= self.max_cells
            && instance.num_boards() <= self.max_boards
    }
}

/// The exact solving strategy: formulate, delegate to the backend, decode.
#[derive(Clone, Debug)]
pub struct ExactSolver<B> {
    backend: B,
    budget: OverlapObjectiveBudget,
    time_limit: Option<Duration>,
}

impl<B> ExactSolver<B>
where
    B: LpBackend,
{
    /// Creates an exact solver on top of the given backend.
    #[inline]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            budget: OverlapObjectiveBudget::default(),
            time_limit: None,
        }
    }

    /// Overrides the minimax-objective size budget.
    #[inline]
    pub fn with_overlap_budget(mut self, budget: OverlapObjectiveBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the time budget forwarded to the backend.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Builds the ILP for an instance. Public for diagnostics and tests.
    pub fn build_model(instance: &Instance, with_overlap_objective: bool) -> LpModel {
        let num_items = instance.num_items();
        let num_boards = instance.num_boards();
        let board_size = instance.board_size() as i64;

        let mut model = LpModel::new("tabla board assignment");
        model.minimize(1, Z_VAR);

        for item in 0..num_items {
            for board in 0..num_boards {
                model.add_binary(x_var(item, board));
            }
        }

        // Row per item: it appears on exactly `frequency` boards.
        for item in 0..num_items {
            let terms = (0..num_boards).map(|board| (1, x_var(item, board))).collect();
            model.add_constraint(
                format!("item_{item}"),
                terms,
                Relation::Eq,
                instance.frequencies().get(ItemIndex::new(item)) as i64,
            );
        }

        // Row per board: it holds exactly `board_size` items.
        for board in 0..num_boards {
            let terms = (0..num_items).map(|item| (1, x_var(item, board))).collect();
            model.add_constraint(format!("board_{board}"), terms, Relation::Eq, board_size);
        }

        if with_overlap_objective {
            model.add_general(Z_VAR, 0, board_size);

            for board_a in 0..num_boards {
                for board_b in (board_a + 1)..num_boards {
                    for item in 0..num_items {
                        let o = o_var(item, board_a, board_b);
                        let x_a = x_var(item, board_a);
                        let x_b = x_var(item, board_b);
                        model.add_binary(o.clone());
                        model.add_constraint(
                            format!("and_a_{item}_{board_a}_{board_b}"),
                            vec![(1, o.clone()), (-1, x_a.clone())],
                            Relation::Le,
                            0,
                        );
                        model.add_constraint(
                            format!("and_b_{item}_{board_a}_{board_b}"),
                            vec![(1, o.clone()), (-1, x_b.clone())],
                            Relation::Le,
                            0,
                        );
                        model.add_constraint(
                            format!("and_c_{item}_{board_a}_{board_b}"),
                            vec![(1, o), (-1, x_a), (-1, x_b)],
                            Relation::Ge,
                            -1,
                        );
                    }

                    // z dominates the overlap of every board pair.
                    let mut terms: Vec<(i64, String)> = vec![(1, Z_VAR.to_string())];
                    terms.extend((0..num_items).map(|item| (-1, o_var(item, board_a, board_b))));
                    model.add_constraint(
                        format!("overlap_{board_a}_{board_b}"),
                        terms,
                        Relation::Ge,
                        0,
                    );
                }
            }
        } else {
            // Feasibility only: pin the objective scalar so the row stays
            // well-formed for any backend.
            model.add_general(Z_VAR, 0, 0);
        }

        model
    }

    fn decode(solution: &LpSolution, instance: &Instance) -> Result<AssignmentMatrix, SolveError> {
        let mut matrix = AssignmentMatrix::new(instance.num_items(), instance.num_boards());
        for item in 0..instance.num_items() {
            for board in 0..instance.num_boards() {
                if solution.is_one(&x_var(item, board)) {
                    matrix.place(ItemIndex::new(item), BoardIndex::new(board));
                }
            }
        }

        // Guard against rounding damage before anyone trusts the matrix.
        for board in 0..instance.num_boards() {
            let len = matrix.board_len(BoardIndex::new(board));
            if len != instance.board_size() {
                return Err(SolveError::Infeasible {
                    reason: format!(
                        "decoded board {board} holds {len} items, expected {}",
                        instance.board_size()
                    ),
                });
            }
        }
        for item in 0..instance.num_items() {
            let frequency = matrix.item_frequency(ItemIndex::new(item));
            let required = instance.frequencies().get(ItemIndex::new(item));
            if frequency != required {
                return Err(SolveError::Infeasible {
                    reason: format!(
                        "decoded item {item} appears {frequency} times, expected {required}"
                    ),
                });
            }
        }

        Ok(matrix)
    }
}

impl<B> AssignmentSolver for ExactSolver<B>
where
    B: LpBackend,
{
    fn name(&self) -> &'static str {
        "exact"
    }

    fn solve(&self, instance: &Instance) -> Result<SolveOutcome, SolveError> {
        let with_overlap_objective = self.budget.admits(instance);
        let model = Self::build_model(instance, with_overlap_objective);

        tracing::debug!(
            backend = self.backend.name(),
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            minimax = with_overlap_objective,
            "submitting assignment model to exact backend"
        );

        let solution = self
            .backend
            .solve(&model, self.time_limit)
            .map_err(|error| SolveError::Backend(Box::new(error)))?;

        match solution.status() {
            LpStatus::Optimal => {
                let matrix = Self::decode(&solution, instance)?;
                Ok(SolveOutcome::new(matrix, SolverKind::Exact, Vec::new()))
            }
            LpStatus::Infeasible => Err(SolveError::Infeasible {
                reason: "backend proved the assignment model infeasible".to_string(),
            }),
            LpStatus::Other(status) => Err(SolveError::Infeasible {
                reason: format!("backend stopped without an optimal solution: {status}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use rustc_hash::FxHashMap;
    use tabla_model::frequency::FrequencyVector;

    /// A backend that replays a prepared listing, for exercising the
    /// adapter without an external process.
    struct StubBackend {
        solution: LpSolution,
    }

    impl LpBackend for StubBackend {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn solve(
            &self,
            _model: &LpModel,
            _time_limit: Option<Duration>,
        ) -> Result<LpSolution, BackendError> {
            Ok(self.solution.clone())
        }
    }

    struct FailingBackend;

    impl LpBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn solve(
            &self,
            _model: &LpModel,
            _time_limit: Option<Duration>,
        ) -> Result<LpSolution, BackendError> {
            Err(BackendError::Unavailable {
                command: "cbc".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    /// 3 items on 2 boards of size 2, frequencies [2, 1, 1].
    fn small_instance() -> Instance {
        Instance::new(3, 2, 2, FrequencyVector::from_counts(vec![2, 1, 1]))
    }

    fn feasible_values() -> FxHashMap<String, f64> {
        // Board 0: items 0, 1. Board 1: items 0, 2.
        let mut values = FxHashMap::default();
        values.insert("x_0_0".to_string(), 1.0);
        values.insert("x_0_1".to_string(), 1.0);
        values.insert("x_1_0".to_string(), 1.0);
        values.insert("x_2_1".to_string(), 1.0);
        values.insert("z".to_string(), 1.0);
        values
    }

    #[test]
    fn test_model_shape_without_overlap_objective() {
        let instance = Instance::new(4, 3, 2, FrequencyVector::from_counts(vec![2, 2, 1, 1]));
        let model = ExactSolver::<StubBackend>::build_model(&instance, false);

        // One binary per cell plus the pinned z.
        assert_eq!(model.num_variables(), 4 * 3 + 1);
        // One row per item, one per board.
        assert_eq!(model.num_constraints(), 4 + 3);
    }

    #[test]
    fn test_model_shape_with_overlap_objective() {
        let instance = Instance::new(4, 3, 2, FrequencyVector::from_counts(vec![2, 2, 1, 1]));
        let model = ExactSolver::<StubBackend>::build_model(&instance, true);

        let pairs = 3; // C(3,2)
        // Cells + one AND variable per (item, pair) + z.
        assert_eq!(model.num_variables(), 4 * 3 + 4 * pairs + 1);
        // Item rows + board rows + three AND links per (item, pair) + one
        // dominance row per pair.
        assert_eq!(model.num_constraints(), 4 + 3 + 3 * 4 * pairs + pairs);
    }

    #[test]
    fn test_budget_switches_encoding() {
        let tight = OverlapObjectiveBudget {
            max_cells: 4,
            max_boards: 2,
        };
        let instance = small_instance();
        assert!(!tight.admits(&instance)); // 3 * 2 = 6 cells > 4
        assert!(OverlapObjectiveBudget::default().admits(&instance));
    }

    #[test]
    fn test_solve_decodes_optimal_listing() {
        let backend = StubBackend {
            solution: LpSolution::new(LpStatus::Optimal, Some(1.0), feasible_values()),
        };
        let solver = ExactSolver::new(backend);
        let outcome = solver.solve(&small_instance()).unwrap();

        assert_eq!(outcome.kind(), SolverKind::Exact);
        let matrix = outcome.matrix();
        assert!(matrix.contains(ItemIndex::new(0), BoardIndex::new(0)));
        assert!(matrix.contains(ItemIndex::new(0), BoardIndex::new(1)));
        assert!(matrix.contains(ItemIndex::new(1), BoardIndex::new(0)));
        assert!(matrix.contains(ItemIndex::new(2), BoardIndex::new(1)));
        assert_eq!(matrix.board_len(BoardIndex::new(0)), 2);
        assert_eq!(matrix.board_len(BoardIndex::new(1)), 2);
    }

    #[test]
    fn test_solve_maps_infeasible_status() {
        let backend = StubBackend {
            solution: LpSolution::new(LpStatus::Infeasible, None, FxHashMap::default()),
        };
        let solver = ExactSolver::new(backend);
        let err = solver.solve(&small_instance()).unwrap_err();
        assert!(matches!(err, SolveError::Infeasible { .. }), "{err}");
    }

    #[test]
    fn test_solve_maps_backend_failure() {
        let solver = ExactSolver::new(FailingBackend);
        let err = solver.solve(&small_instance()).unwrap_err();
        assert!(matches!(err, SolveError::Backend(_)), "{err}");
    }

    #[test]
    fn test_solve_rejects_inconsistent_listing() {
        // Listing claims optimality but drops item 2 entirely.
        let mut values = feasible_values();
        values.remove("x_2_1");
        let backend = StubBackend {
            solution: LpSolution::new(LpStatus::Optimal, Some(1.0), values),
        };
        let solver = ExactSolver::new(backend);
        let err = solver.solve(&small_instance()).unwrap_err();
        assert!(matches!(err, SolveError::Infeasible { .. }), "{err}");
    }
}
