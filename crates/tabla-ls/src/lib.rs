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

//! # Tabla LS
//!
//! The heuristic solving strategy: a deterministic three-stage pipeline
//! that produces a feasible assignment in bounded time for arbitrarily
//! large instances, without exact optimality guarantees.
//!
//! Core flow
//! - `greedy`: scarcity-first seeding. Items with low frequency are hardest
//!   to place well, so they go first while most board capacity is open.
//! - `repair`: board-set uniqueness is a late-order concern for the greedy
//!   stage, so set-equal boards are separated afterwards by bounded
//!   three-board swaps.
//! - `hill_climb`: first-improvement local search on the worst board pair,
//!   monotonically non-increasing in the maximum pairwise overlap, with a
//!   hard iteration ceiling as the termination contract.
//!
//! All three stages mutate one shared [`tabla_model::assignment::AssignmentMatrix`];
//! every swap goes through the matrix's single mutation boundary, so the
//! flat cells and the per-board membership sets can never drift apart.
//!
//! Module map
//! - `solver`: [`solver::HeuristicSolver`] tying the stages together, plus
//!   the tunables in [`solver::HeuristicConfig`].
//! - `stats`: lightweight counters/timing for observability.

pub mod greedy;
pub mod hill_climb;
pub mod repair;
pub mod solver;
pub mod stats;
