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

//! Configuration feasibility checks.
//!
//! [`validate`] evaluates every check independently — no short-circuiting —
//! so a UI can present all failures at once. Each check carries a stable
//! name, a severity, a pass/fail flag, and a human-readable explanation
//! with the concrete numbers involved. Validation is a pure function of the
//! configuration: running it twice yields identical reports.

use crate::{config::GeneratorConfig, frequency::FrequencyVector};
use serde::Serialize;
use tabla_core::math::combinatorics::{binomial, Magnitude};

/// How severe a failed check is.
///
/// All built-in checks report `Error`; `Warning` and `Info` are part of the
/// reporting contract consumed by UIs and downstream tooling.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// The outcome of one named validation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ConstraintCheck {
    name: &'static str,
    severity: Severity,
    passed: bool,
    detail: String,
}

impl ConstraintCheck {
    #[inline]
    fn new(name: &'static str, severity: Severity, passed: bool, detail: String) -> Self {
        Self {
            name,
            severity,
            passed,
            detail,
        }
    }

    /// Returns the stable name of this check.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the severity a failure of this check carries.
    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns `true` if the check passed.
    #[inline]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Returns the human-readable explanation with concrete numbers.
    #[inline]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl std::fmt::Display for ConstraintCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.passed { "ok" } else { "FAILED" };
        write!(
            f,
            "[{}] {} ({}): {}",
            status, self.name, self.severity, self.detail
        )
    }
}

/// The ordered list of all evaluated checks for one configuration.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ConstraintReport {
    checks: Vec<ConstraintCheck>,
}

impl ConstraintReport {
    /// Returns every evaluated check, in evaluation order.
    #[inline]
    pub fn checks(&self) -> &[ConstraintCheck] {
        &self.checks
    }

    /// Returns `true` if no error-severity check failed.
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        !self
            .checks
            .iter()
            .any(|c| !c.passed() && c.severity() == Severity::Error)
    }

    /// Returns the failed checks.
    #[inline]
    pub fn failures(&self) -> impl Iterator<Item = &ConstraintCheck> {
        self.checks.iter().filter(|c| !c.passed())
    }

    /// Renders the failed error-severity checks as standalone messages,
    /// suitable for attaching to a refused generation outcome.
    pub fn error_messages(&self) -> Vec<String> {
        self.failures()
            .filter(|c| c.severity() == Severity::Error)
            .map(|c| format!("{}: {}", c.name(), c.detail()))
            .collect()
    }
}

impl std::fmt::Display for ConstraintReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for check in &self.checks {
            writeln!(f, "{}", check)?;
        }
        Ok(())
    }
}

/// Evaluates all constraint checks for a configuration.
///
/// The checks, in order:
///
/// 1. `slot-balance` — the frequency sum must equal `B×S`.
/// 2. `min-items` — at least one board's worth of distinct items.
/// 3. `min-frequency` — every item appears at least once; an item with
///    frequency 0 is a silent configuration bug, not an optional item.
/// 4. `max-frequency` — no item appears on more boards than exist.
/// 5. `feasibility-range` — `N ≤ B×S ≤ N×B`.
/// 6. `uniqueness-capacity` — `C(N,S) ≥ B`, or that many unique boards
///    cannot exist even in principle.
///
/// # Examples
///
/// ```rust
/// use tabla_model::config::{BoardConfig, GeneratorConfig};
/// use tabla_model::item::Item;
/// use tabla_model::validate::validate;
///
/// let config = GeneratorConfig::builder()
///     .items((0..36).map(|i| Item::new(format!("{i}"), format!("Item {i}"))))
///     .num_boards(15)
///     .board(BoardConfig::new(4, 4))
///     .build();
///
/// let report = validate(&config);
/// assert!(report.is_satisfied());
/// assert_eq!(report.checks().len(), 6);
/// ```
pub fn validate(config: &GeneratorConfig) -> ConstraintReport {
    let num_items = config.num_items();
    let num_boards = config.num_boards();
    let board_size = config.board().size();
    let total_slots = config.total_slots();
    let frequencies = FrequencyVector::from_strategy(config);

    let mut checks = Vec::with_capacity(6);

    // 1. Slot balance.
    let sum = frequencies.total();
    checks.push(ConstraintCheck::new(
        "slot-balance",
        Severity::Error,
        sum == total_slots,
        format!(
            "frequencies sum to {sum}, boards offer {num_boards} x {board_size} = {total_slots} slots"
        ),
    ));

    // 2. Enough distinct items to fill one board.
    checks.push(ConstraintCheck::new(
        "min-items",
        Severity::Error,
        num_items >= board_size,
        format!("{num_items} distinct items available, one board needs {board_size}"),
    ));

    // 3. Every item must appear at least once.
    let zero_frequency = frequencies.counts().iter().filter(|&&f| f == 0).count();
    checks.push(ConstraintCheck::new(
        "min-frequency",
        Severity::Error,
        zero_frequency == 0,
        format!("{zero_frequency} of {num_items} items have frequency 0"),
    ));

    // 4. An item cannot appear on more boards than exist.
    let max_frequency = frequencies.max().unwrap_or(0);
    checks.push(ConstraintCheck::new(
        "max-frequency",
        Severity::Error,
        max_frequency <= num_boards,
        format!("highest item frequency is {max_frequency}, only {num_boards} boards exist"),
    ));

    // 5. Feasibility range on the total slot count.
    let in_range = num_items <= total_slots && total_slots <= num_items * num_boards;
    checks.push(ConstraintCheck::new(
        "feasibility-range",
        Severity::Error,
        in_range,
        format!(
            "total slots {total_slots} must lie within [{num_items}, {}]",
            num_items * num_boards
        ),
    ));

    // 6. Enough distinct S-subsets of the pool to keep boards unique.
    let capacity = binomial(num_items as u64, board_size as u64);
    checks.push(ConstraintCheck::new(
        "uniqueness-capacity",
        Severity::Error,
        capacity >= num_boards as f64,
        format!(
            "{num_items} items admit {} distinct {board_size}-item boards, {num_boards} required",
            Magnitude::new(capacity)
        ),
    ));

    ConstraintReport { checks }
}
