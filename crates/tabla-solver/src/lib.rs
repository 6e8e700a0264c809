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

//! # Tabla Solver
//!
//! The public generation surface: validate a configuration, obtain a
//! feasible assignment from the exact strategy with a heuristic fallback,
//! re-verify it defensively, materialize shuffled boards, and report
//! statistics recomputed from the final output.
//!
//! ## Orchestration
//!
//! [`generator::Generator`] runs the fallback chain. The exact strategy is
//! opt-in (it needs an installed backend); any failure on that path —
//! missing executable, infeasibility, timeout, or an assignment that does
//! not survive re-verification — logs a warning and hands the instance to
//! the heuristic. Results from the two paths are never mixed.
//!
//! ## Determinism
//!
//! Every run shuffles with an explicit `ChaCha8Rng` seeded from the
//! configuration (or a freshly drawn seed recorded in the statistics), so
//! identical configurations with identical seeds reproduce boards
//! cell-for-cell. No hidden global state exists anywhere in the pipeline.
//!
//! Module map
//! - `generator`: the facade and its builder.
//! - `materialize`: seeded shuffle + row-major grid layout.
//! - `verify`: defensive re-verification of solver output.
//! - `result`: [`result::GenerationOutcome`] and [`result::GenerationStats`].

pub mod generator;
pub mod materialize;
pub mod result;
pub mod verify;
