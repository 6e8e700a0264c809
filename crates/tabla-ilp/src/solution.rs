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

//! Parsed backend solution listings.
//!
//! A solution listing is the second half of the text-based collaborator
//! boundary: a status flag plus `variable → value` rows. The parser here
//! understands the CBC solution-file dialect; other backends can construct
//! [`LpSolution`] values directly.

use rustc_hash::FxHashMap;

/// The status a backend reported for a solve.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LpStatus {
    /// The backend proved optimality of the returned assignment.
    Optimal,
    /// The backend proved the model infeasible.
    Infeasible,
    /// Anything else: stopped on a limit, unbounded, unknown.
    Other(String),
}

impl std::fmt::Display for LpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LpStatus::Optimal => write!(f, "optimal"),
            LpStatus::Infeasible => write!(f, "infeasible"),
            LpStatus::Other(status) => write!(f, "{status}"),
        }
    }
}

/// The solution listing could not be understood.
#[derive(Debug, thiserror::Error)]
#[error("malformed solution listing: {reason}")]
pub struct MalformedSolution {
    pub reason: String,
}

impl MalformedSolution {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A parsed solution: status, optional objective value, and the variable
/// assignment.
#[derive(Clone, PartialEq, Debug)]
pub struct LpSolution {
    status: LpStatus,
    objective: Option<f64>,
    values: FxHashMap<String, f64>,
}

impl LpSolution {
    /// Constructs a solution directly, for backends with their own parsing.
    pub fn new(status: LpStatus, objective: Option<f64>, values: FxHashMap<String, f64>) -> Self {
        Self {
            status,
            objective,
            values,
        }
    }

    /// Parses a CBC solution file.
    ///
    /// The first line carries the status and objective
    /// (`Optimal - objective value 4.00000000`); each following row is
    /// `index name value reduced-cost`, occasionally prefixed with `**`
    /// for rows CBC flags as outside bounds.
    pub fn parse_cbc(text: &str) -> Result<Self, MalformedSolution> {
        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| MalformedSolution::new("empty listing"))?;

        let lowered = header.to_ascii_lowercase();
        let status = if lowered.starts_with("optimal") {
            LpStatus::Optimal
        } else if lowered.contains("infeasible") {
            LpStatus::Infeasible
        } else {
            LpStatus::Other(header.trim().to_string())
        };

        let objective = header
            .split_whitespace()
            .last()
            .and_then(|token| token.parse::<f64>().ok());

        let mut values = FxHashMap::default();
        for line in lines {
            let line = line.trim_start_matches("**").trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let _index = tokens.next();
            let name = tokens
                .next()
                .ok_or_else(|| MalformedSolution::new(format!("row without a name: `{line}`")))?;
            let value = tokens
                .next()
                .ok_or_else(|| MalformedSolution::new(format!("row without a value: `{line}`")))?
                .parse::<f64>()
                .map_err(|_| MalformedSolution::new(format!("unparseable value in `{line}`")))?;
            values.insert(name.to_string(), value);
        }

        Ok(Self {
            status,
            objective,
            values,
        })
    }

    /// Returns the backend-reported status.
    #[inline]
    pub fn status(&self) -> &LpStatus {
        &self.status
    }

    /// Returns the backend-reported objective value, if any.
    #[inline]
    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    /// Returns the value of a variable, if the listing mentioned it.
    #[inline]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Returns `true` if the variable rounds to 1. Variables missing from
    /// the listing count as 0 — CBC omits columns at their lower bound.
    #[inline]
    pub fn is_one(&self, name: &str) -> bool {
        self.value(name).map_or(false, |v| v >= 0.5)
    }
}
