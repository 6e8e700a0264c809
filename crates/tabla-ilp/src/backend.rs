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

//! Pluggable ILP backends.
//!
//! A backend receives the abstract model, solves it however it likes, and
//! returns a parsed solution listing. The shipped implementation spawns an
//! external CBC process; the backend may be shared across concurrent
//! generation calls because every solve works in its own scratch directory.

use crate::{
    model::LpModel,
    solution::{LpSolution, MalformedSolution},
};
use std::process::Command;
use std::time::Duration;

/// Why a backend could not deliver a solution listing.
///
/// All variants are recoverable from the facade's point of view: the
/// heuristic path takes over.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The solver executable could not be launched — most commonly it is
    /// not installed in the current runtime.
    #[error("solver executable `{command}` is not available: {source}")]
    Unavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The solver process launched but exited unsuccessfully.
    #[error("solver process exited with {status}")]
    ProcessFailed { status: std::process::ExitStatus },

    /// The solver produced output this adapter cannot understand.
    #[error(transparent)]
    Malformed(#[from] MalformedSolution),

    /// Scratch-file plumbing failed.
    #[error("i/o failure while invoking the solver: {0}")]
    Io(std::io::Error),
}

/// An external integer-programming solver.
///
/// The contract is the text-based collaborator boundary: the backend gets
/// the abstract model description and an optional time budget, and returns
/// a solution listing with a status flag. Implementations must tolerate
/// concurrent calls or serialize internally.
pub trait LpBackend {
    /// Returns a short, stable name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Solves the model within the optional time budget.
    fn solve(&self, model: &LpModel, time_limit: Option<Duration>)
        -> Result<LpSolution, BackendError>;
}

/// A backend that shells out to the COIN-OR CBC command-line solver.
///
/// Each solve writes the LP text into a fresh temporary directory, runs
/// `cbc <model.lp> [sec <limit>] solve solution <out>`, and parses the
/// produced solution file. The time budget is enforced by CBC itself via
/// its `sec` argument.
#[derive(Clone, Debug)]
pub struct CbcBackend {
    command: String,
}

impl Default for CbcBackend {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl CbcBackend {
    /// Creates a backend invoking `cbc` from `PATH`.
    #[inline]
    pub fn new() -> Self {
        Self {
            command: "cbc".to_string(),
        }
    }

    /// Overrides the executable to invoke (e.g., an absolute path).
    #[inline]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}

impl LpBackend for CbcBackend {
    fn name(&self) -> &'static str {
        "cbc"
    }

    fn solve(
        &self,
        model: &LpModel,
        time_limit: Option<Duration>,
    ) -> Result<LpSolution, BackendError> {
        let scratch = tempfile::tempdir().map_err(BackendError::Io)?;
        let model_path = scratch.path().join("model.lp");
        let solution_path = scratch.path().join("solution.txt");

        std::fs::write(&model_path, model.to_lp_format()).map_err(BackendError::Io)?;

        let mut command = Command::new(&self.command);
        command.arg(&model_path);
        if let Some(limit) = time_limit {
            command.arg("sec").arg(limit.as_secs().max(1).to_string());
        }
        command.arg("solve").arg("solution").arg(&solution_path);

        let output = command.output().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                BackendError::Unavailable {
                    command: self.command.clone(),
                    source,
                }
            } else {
                BackendError::Io(source)
            }
        })?;

        if !output.status.success() {
            return Err(BackendError::ProcessFailed {
                status: output.status,
            });
        }

        let listing = std::fs::read_to_string(&solution_path).map_err(BackendError::Io)?;
        Ok(LpSolution::parse_cbc(&listing)?)
    }
}
