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

use crate::solver::SolverKind;
use tabla_model::assignment::AssignmentMatrix;

/// A successful solve: the feasible matrix, the strategy that produced it,
/// and any non-fatal warnings accumulated along the way (e.g., duplicate
/// repair exhausting its bound).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SolveOutcome {
    matrix: AssignmentMatrix,
    kind: SolverKind,
    warnings: Vec<String>,
}

impl SolveOutcome {
    /// Constructs a new outcome.
    #[inline]
    pub fn new(matrix: AssignmentMatrix, kind: SolverKind, warnings: Vec<String>) -> Self {
        Self {
            matrix,
            kind,
            warnings,
        }
    }

    /// Returns the assignment matrix.
    #[inline]
    pub fn matrix(&self) -> &AssignmentMatrix {
        &self.matrix
    }

    /// Returns which strategy produced this outcome.
    #[inline]
    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    /// Returns the non-fatal warnings attached to this outcome.
    #[inline]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Decomposes the outcome into its parts.
    #[inline]
    pub fn into_parts(self) -> (AssignmentMatrix, SolverKind, Vec<String>) {
        (self.matrix, self.kind, self.warnings)
    }
}

/// Why a solve attempt produced no feasible assignment.
///
/// `Infeasible` and `Backend` are recoverable from the facade's point of
/// view (it falls back to the heuristic strategy); `Placement` is fatal for
/// the generation attempt and surfaces to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    /// The backend proved or reported that no feasible assignment exists
    /// under this formulation.
    #[error("no feasible assignment: {reason}")]
    Infeasible { reason: String },

    /// An item could not be placed on enough boards given the current
    /// partial assignment. A different placement order might succeed; this
    /// strategy does not backtrack.
    #[error(
        "item {item} must appear on {required} boards but only {available} can still take it"
    )]
    Placement {
        item: usize,
        required: usize,
        available: usize,
    },

    /// The external backend failed: unavailable executable, crashed
    /// process, malformed solution listing, or timeout.
    #[error("exact backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
