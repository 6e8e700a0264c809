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

//! # The Generation Facade
//!
//! Orchestrates one generation call end to end: validation, the exact
//! attempt, the heuristic fallback, defensive re-verification, seeded
//! materialization, and statistics.
//!
//! ## Fallback discipline
//!
//! The exact strategy runs only when one is configured, the time budget
//! has not already been consumed, and — inside the adapter — the instance
//! fits the backend's size budget. *Any* failure on the exact path is
//! recoverable: it logs a warning and the heuristic takes over with the
//! same instance. The two paths never contribute to one result together,
//! and whichever path wins is re-verified by a full matrix scan before
//! materialization, rather than trusting solver-reported feasibility.
//!
//! ## Usage
//!
//! ```rust
//! use tabla_model::config::{BoardConfig, GeneratorConfig};
//! use tabla_model::item::Item;
//! use tabla_solver::generator::GeneratorBuilder;
//!
//! let config = GeneratorConfig::builder()
//!     .items((0..36).map(|i| Item::new(format!("{i}"), format!("Card {i}"))))
//!     .num_boards(15)
//!     .board(BoardConfig::new(4, 4))
//!     .seed(42)
//!     .build();
//!
//! let generator = GeneratorBuilder::new().build();
//! let outcome = generator.generate(&config);
//! assert!(outcome.success());
//! assert_eq!(outcome.boards().len(), 15);
//! ```

use crate::{
    materialize::materialize_boards,
    result::{GenerationOutcome, GenerationStats},
    verify,
};
use std::time::Duration;
use tabla_ls::solver::{HeuristicConfig, HeuristicSolver};
use tabla_model::{config::GeneratorConfig, instance::Instance, validate::validate};
use tabla_search::{
    result::{SolveError, SolveOutcome},
    solver::AssignmentSolver,
    time::Deadline,
};

/// The generation facade. Construct via [`GeneratorBuilder`].
pub struct Generator {
    exact: Option<Box<dyn AssignmentSolver>>,
    heuristic: HeuristicSolver,
    time_limit: Option<Duration>,
}

impl Generator {
    /// Runs one full generation for the configuration.
    ///
    /// The call is synchronous and self-contained: all state is local to
    /// the invocation, so concurrent calls on one `Generator` require no
    /// coordination beyond what the exact backend itself demands.
    pub fn generate(&self, config: &GeneratorConfig) -> GenerationOutcome {
        let deadline = Deadline::start(self.time_limit);

        let report = validate(config);
        if !report.is_satisfied() {
            return GenerationOutcome::refused(report.error_messages());
        }

        let instance = Instance::from_config(config);
        let outcome = match self.solve_with_fallback(&instance, &deadline) {
            Ok(outcome) => outcome,
            Err(error) => return GenerationOutcome::refused(vec![error.to_string()]),
        };

        let (matrix, kind, warnings) = outcome.into_parts();

        let seed = config.seed().unwrap_or_else(rand::random);
        let boards = materialize_boards(&matrix, config, seed);
        let stats = GenerationStats::from_boards(&boards, kind, deadline.elapsed(), seed);

        GenerationOutcome::generated(boards, stats, warnings)
    }

    /// Tries the exact strategy, then the heuristic. Whichever result is
    /// returned has survived the defensive re-scan.
    fn solve_with_fallback(
        &self,
        instance: &Instance,
        deadline: &Deadline,
    ) -> Result<SolveOutcome, SolveError> {
        if let Some(exact) = &self.exact {
            if deadline.expired() {
                tracing::warn!(
                    solver = exact.name(),
                    "time budget consumed before the exact attempt; skipping to heuristic"
                );
            } else {
                match exact.solve(instance).and_then(|outcome| {
                    verify::verify_assignment(outcome.matrix(), instance)
                        .map_err(|error| SolveError::Infeasible {
                            reason: error.to_string(),
                        })
                        .map(|()| outcome)
                }) {
                    Ok(outcome) => return Ok(outcome),
                    Err(error) => {
                        tracing::warn!(
                            solver = exact.name(),
                            %error,
                            "exact solver failed; falling back to heuristic"
                        );
                    }
                }
            }
        }

        let outcome = self.heuristic.solve(instance)?;
        verify::verify_assignment(outcome.matrix(), instance).map_err(|error| {
            SolveError::Infeasible {
                reason: error.to_string(),
            }
        })?;
        Ok(outcome)
    }
}

/// Builder for [`Generator`].
///
/// The exact strategy is opt-in because it requires an installed backend;
/// without one the facade goes straight to the heuristic pipeline.
pub struct GeneratorBuilder {
    exact: Option<Box<dyn AssignmentSolver>>,
    heuristic_config: HeuristicConfig,
    time_limit: Option<Duration>,
}

impl Default for GeneratorBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorBuilder {
    /// Creates a builder with no exact strategy and default heuristic
    /// tunables.
    #[inline]
    pub fn new() -> Self {
        Self {
            exact: None,
            heuristic_config: HeuristicConfig::default(),
            time_limit: None,
        }
    }

    /// Installs an exact strategy to try before the heuristic.
    #[inline]
    pub fn with_exact_solver<S>(mut self, solver: S) -> Self
    where
        S: AssignmentSolver + 'static,
    {
        self.exact = Some(Box::new(solver));
        self
    }

    /// Overrides the heuristic tunables.
    #[inline]
    pub fn with_heuristic_config(mut self, config: HeuristicConfig) -> Self {
        self.heuristic_config = config;
        self
    }

    /// Sets the caller-visible time budget gating the exact attempt.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Builds the facade.
    #[inline]
    pub fn build(self) -> Generator {
        Generator {
            exact: self.exact,
            heuristic: HeuristicSolver::new().with_config(self.heuristic_config),
            time_limit: self.time_limit,
        }
    }
}
