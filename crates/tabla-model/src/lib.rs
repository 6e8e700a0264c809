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

//! # Tabla Model
//!
//! **The Core Domain Model for the Tabla Board-Distribution Solver.**
//!
//! This crate defines the fundamental data structures used to represent the
//! board-distribution problem: assigning a fixed pool of items onto a set of
//! boards so that every item appears a prescribed number of times, every
//! board holds exactly its grid size in unique items, and no two boards are
//! identical. It serves as the data interchange layer between the problem
//! definition (caller input) and the solving engines (`tabla_ilp`,
//! `tabla_ls`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **configuration**, **validation**, and **solving**:
//!
//! * **`index`**: Strongly-typed wrappers (`ItemIndex`, `BoardIndex`) to
//!   prevent logical indexing errors.
//! * **`item`** / **`config`**: The immutable caller-supplied configuration
//!   (items, board geometry, distribution strategy, seed).
//! * **`frequency`**: Per-item frequency vectors derived from a distribution
//!   strategy, plus the auto-distribute convenience.
//! * **`validate`**: Independent, non-short-circuiting constraint checks
//!   with severities and human-readable detail.
//! * **`assignment`**: The mutable item×board assignment matrix solvers
//!   operate on, with synchronized per-board membership bitsets.
//! * **`instance`**: The immutable problem statement handed to solvers.
//! * **`board`**: The materialized board record consumed by presentation
//!   layers.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally
//!     use an `ItemIndex` to access a board.
//! 2.  **Memory Layout**: The assignment matrix is a flat bitset with index
//!     arithmetic rather than nested collections, because set-membership
//!     lookups sit on the hot path of local search.
//! 3.  **Fail-Fast**: Mutation primitives validate their preconditions under
//!     debug assertions so solvers never operate on an inconsistent state.

pub mod assignment;
pub mod board;
pub mod config;
pub mod frequency;
pub mod index;
pub mod instance;
pub mod item;
pub mod validate;
