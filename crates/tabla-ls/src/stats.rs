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

//! Statistics reporting for heuristic solver runs.
//!
//! A lightweight container for tracking aggregate metrics across the three
//! pipeline stages: repair passes and swaps, climb iterations, swap
//! attempts and acceptances, and total elapsed time. Updates use
//! saturating arithmetic so the hot loop never traps on overflow.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HeuristicStatistics {
    /// Number of duplicate-repair passes performed.
    pub repair_passes: u64,

    /// Number of swaps applied by duplicate repair.
    pub repair_swaps: u64,

    /// Number of outer hill-climbing iterations performed.
    pub climb_iterations: u64,

    /// Number of candidate swaps evaluated by the local search.
    pub swap_attempts: u64,

    /// Number of improving swaps accepted by the local search.
    pub accepted_swaps: u64,

    /// Total time taken by the heuristic pipeline.
    pub time_total: Duration,
}

impl HeuristicStatistics {
    /// Called at each outer hill-climbing iteration.
    #[inline]
    pub fn on_climb_iteration(&mut self) {
        self.climb_iterations = self.climb_iterations.saturating_add(1);
    }

    /// Called when the local search evaluates a candidate swap.
    #[inline]
    pub fn on_swap_attempt(&mut self) {
        self.swap_attempts = self.swap_attempts.saturating_add(1);
    }

    /// Called when the local search accepts an improving swap.
    #[inline]
    pub fn on_accepted_swap(&mut self) {
        self.accepted_swaps = self.accepted_swaps.saturating_add(1);
    }

    /// Sets the total time taken by the pipeline.
    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Returns the number of evaluated swaps that were reverted.
    #[inline]
    pub fn rejected_swaps(&self) -> u64 {
        self.swap_attempts.saturating_sub(self.accepted_swaps)
    }
}

impl std::fmt::Display for HeuristicStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tabla-LS-Solver Statistics:")?;
        writeln!(f, "   Repair Passes:      {}", self.repair_passes)?;
        writeln!(f, "   Repair Swaps:       {}", self.repair_swaps)?;
        writeln!(f, "   Climb Iterations:   {}", self.climb_iterations)?;
        writeln!(f, "   Swap Attempts:      {}", self.swap_attempts)?;
        writeln!(f, "   Accepted Swaps:     {}", self.accepted_swaps)?;
        writeln!(f, "   Rejected Swaps:     {}", self.rejected_swaps())?;
        writeln!(f, "   Total Time:         {:?}", self.time_total)?;
        Ok(())
    }
}
