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

use crate::result::{SolveError, SolveOutcome};
use serde::Serialize;
use tabla_model::instance::Instance;

/// Which solving strategy produced an assignment. Reported on outcomes and
/// statistics for observability.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Integer-programming formulation solved by an external backend.
    Exact,
    /// Greedy seeding plus repair and local search.
    Heuristic,
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::Exact => write!(f, "exact"),
            SolverKind::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// A strategy that turns an [`Instance`] into a feasible assignment matrix.
///
/// Implementations must be self-contained per call: no state may leak
/// between invocations, so concurrent generation requests stay independent
/// by construction. A strategy that cannot produce a feasible assignment
/// returns a [`SolveError`]; the facade decides whether that is recoverable
/// (fall back to another strategy) or fatal for the attempt.
pub trait AssignmentSolver {
    /// Returns a short, stable name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Attempts to produce a feasible assignment for the instance.
    fn solve(&self, instance: &Instance) -> Result<SolveOutcome, SolveError>;
}
