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

//! # Tabla ILP
//!
//! Exact solving via integer programming. The adapter formulates the board
//! assignment as a text-based linear/integer model, hands it to a pluggable
//! external backend, and decodes the returned solution listing into an
//! assignment matrix.
//!
//! Core flow
//! - `model`: an abstract ILP description (binary/integer variables, linear
//!   equality/inequality constraints, bounds) rendered to CPLEX-LP text.
//! - `solution`: the parsed solution listing (variable name → value, with
//!   an optimal/infeasible status flag).
//! - `backend`: the [`backend::LpBackend`] trait plus a process-spawning
//!   CBC implementation. Any backend accepting the abstract model shape
//!   works; the core never assumes more.
//! - `solver`: [`solver::ExactSolver`], the [`tabla_search::solver::AssignmentSolver`]
//!   implementation. For small instances it additionally encodes the
//!   minimax-overlap objective; the auxiliary-variable count grows as
//!   O(N·B²), so larger instances solve for feasibility only.
//!
//! Every failure along this path — missing executable, crashed process,
//! reported infeasibility, malformed listing, timeout — is reported as a
//! recoverable error. The facade falls back to the heuristic strategy;
//! nothing here is fatal to the caller.

pub mod backend;
pub mod model;
pub mod solution;
pub mod solver;
