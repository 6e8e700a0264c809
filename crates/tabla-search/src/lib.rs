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

//! # Tabla Search
//!
//! Shared abstractions between the solving strategies and the facade. The
//! exact ILP formulation and the greedy-plus-local-search pipeline are two
//! interchangeable strategies behind one interface; this crate defines that
//! interface so the facade's fallback logic stays backend-agnostic and new
//! strategies can be added without touching calling code.
//!
//! - `solver`: the [`solver::AssignmentSolver`] strategy trait and the
//!   [`solver::SolverKind`] tag reported for observability.
//! - `result`: solve outcomes and the recoverable/fatal error taxonomy.
//! - `time`: a deadline primitive carrying caller-visible time limits into
//!   solve attempts.

pub mod result;
pub mod solver;
pub mod time;
