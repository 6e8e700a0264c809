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

//! Generation results and statistics.
//!
//! Statistics are recomputed from the materialized boards — never carried
//! over from the solver — so they always describe exactly what the caller
//! received, shuffle and all.

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tabla_model::board::GeneratedBoard;
use tabla_search::solver::SolverKind;

/// Aggregate statistics over one generation run.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct GenerationStats {
    /// Total item placements across all boards.
    pub total_slots: usize,
    /// Number of board pairs analyzed (`B(B−1)/2`).
    pub pairs_analyzed: usize,
    /// Smallest pairwise overlap.
    pub min_overlap: usize,
    /// Largest pairwise overlap.
    pub max_overlap: usize,
    /// Mean pairwise overlap.
    pub avg_overlap: f64,
    /// Board numbers (1-indexed) of the worst pair, if at least two boards
    /// exist.
    pub worst_pair: Option<(usize, usize)>,
    /// Which strategy produced the assignment.
    pub solver: SolverKind,
    /// Wall-clock time of the whole generation call.
    pub elapsed: Duration,
    /// The seed that drove the shuffle; recorded even when freshly drawn
    /// so any run can be reproduced.
    pub seed: u64,
    /// Realized occurrences per item id, recomputed from the boards.
    pub item_frequencies: BTreeMap<String, usize>,
}

impl GenerationStats {
    /// Computes statistics from the final materialized boards.
    pub fn from_boards(
        boards: &[GeneratedBoard],
        solver: SolverKind,
        elapsed: Duration,
        seed: u64,
    ) -> Self {
        let total_slots = boards.iter().map(|b| b.cells().len()).sum();

        let mut item_frequencies = BTreeMap::new();
        for board in boards {
            for item in board.cells() {
                *item_frequencies.entry(item.id().to_string()).or_insert(0) += 1;
            }
        }

        let id_sets: Vec<FxHashSet<&str>> = boards
            .iter()
            .map(|b| b.cells().iter().map(|item| item.id()).collect())
            .collect();

        let mut pairs_analyzed = 0usize;
        let mut min_overlap = usize::MAX;
        let mut max_overlap = 0usize;
        let mut overlap_sum = 0usize;
        let mut worst_pair = None;

        for a in 0..id_sets.len() {
            for b in (a + 1)..id_sets.len() {
                let overlap = id_sets[a].intersection(&id_sets[b]).count();
                pairs_analyzed += 1;
                overlap_sum += overlap;
                min_overlap = min_overlap.min(overlap);
                // Ties keep the first pair in scan order.
                if worst_pair.is_none() || overlap > max_overlap {
                    max_overlap = overlap;
                    worst_pair = Some((boards[a].number(), boards[b].number()));
                }
            }
        }

        let (min_overlap, avg_overlap) = if pairs_analyzed == 0 {
            (0, 0.0)
        } else {
            (min_overlap, overlap_sum as f64 / pairs_analyzed as f64)
        };

        Self {
            total_slots,
            pairs_analyzed,
            min_overlap,
            max_overlap,
            avg_overlap,
            worst_pair,
            solver,
            elapsed,
            seed,
            item_frequencies,
        }
    }
}

impl std::fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Generation Statistics:")?;
        writeln!(f, "  Total Slots:     {}", self.total_slots)?;
        writeln!(f, "  Pairs Analyzed:  {}", self.pairs_analyzed)?;
        writeln!(
            f,
            "  Overlap:         min {} / avg {:.2} / max {}",
            self.min_overlap, self.avg_overlap, self.max_overlap
        )?;
        if let Some((a, b)) = self.worst_pair {
            writeln!(f, "  Worst Pair:      boards {a} and {b}")?;
        }
        writeln!(f, "  Solver:          {}", self.solver)?;
        writeln!(f, "  Seed:            {}", self.seed)?;
        writeln!(
            f,
            "  Elapsed (secs):  {:.3}",
            self.elapsed.as_secs_f64()
        )
    }
}

/// What one generation call returned to the caller.
///
/// On refusal (`success == false`) the boards are empty, the statistics
/// are absent, and `errors` enumerates the specific constraint failures
/// that blocked generation.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct GenerationOutcome {
    success: bool,
    boards: Vec<GeneratedBoard>,
    stats: Option<GenerationStats>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl GenerationOutcome {
    /// Constructs a successful outcome.
    #[inline]
    pub fn generated(
        boards: Vec<GeneratedBoard>,
        stats: GenerationStats,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            boards,
            stats: Some(stats),
            warnings,
            errors: Vec::new(),
        }
    }

    /// Constructs a refused outcome carrying the blocking errors.
    #[inline]
    pub fn refused(errors: Vec<String>) -> Self {
        Self {
            success: false,
            boards: Vec::new(),
            stats: None,
            warnings: Vec::new(),
            errors,
        }
    }

    /// Returns `true` if boards were generated.
    #[inline]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the generated boards (empty on refusal).
    #[inline]
    pub fn boards(&self) -> &[GeneratedBoard] {
        &self.boards
    }

    /// Returns the statistics, present on success.
    #[inline]
    pub fn stats(&self) -> Option<&GenerationStats> {
        self.stats.as_ref()
    }

    /// Returns non-fatal warnings attached to a successful outcome.
    #[inline]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the errors that blocked generation.
    #[inline]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl std::fmt::Display for GenerationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.success {
            write!(f, "Generated {} board(s)", self.boards.len())?;
            if !self.warnings.is_empty() {
                write!(f, " with {} warning(s)", self.warnings.len())?;
            }
            Ok(())
        } else {
            writeln!(f, "Generation refused:")?;
            for error in &self.errors {
                writeln!(f, "  - {error}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabla_model::item::Item;

    fn board(number: usize, ids: &[&str]) -> GeneratedBoard {
        let cells: Vec<Item> = ids.iter().map(|id| Item::new(*id, *id)).collect();
        GeneratedBoard::new(number, 1, ids.len(), cells)
    }

    #[test]
    fn test_stats_from_boards() {
        let boards = vec![
            board(1, &["a", "b", "c"]),
            board(2, &["a", "b", "d"]),
            board(3, &["d", "e", "f"]),
        ];
        let stats =
            GenerationStats::from_boards(&boards, SolverKind::Heuristic, Duration::ZERO, 7);

        assert_eq!(stats.total_slots, 9);
        assert_eq!(stats.pairs_analyzed, 3);
        assert_eq!(stats.min_overlap, 0);
        assert_eq!(stats.max_overlap, 2);
        assert!((stats.avg_overlap - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.worst_pair, Some((1, 2)));
        assert_eq!(stats.item_frequencies["a"], 2);
        assert_eq!(stats.item_frequencies["f"], 1);
        assert_eq!(stats.seed, 7);
    }

    #[test]
    fn test_stats_with_one_board() {
        let boards = vec![board(1, &["a", "b"])];
        let stats = GenerationStats::from_boards(&boards, SolverKind::Exact, Duration::ZERO, 0);

        assert_eq!(stats.pairs_analyzed, 0);
        assert_eq!(stats.min_overlap, 0);
        assert_eq!(stats.max_overlap, 0);
        assert_eq!(stats.avg_overlap, 0.0);
        assert_eq!(stats.worst_pair, None);
    }

    #[test]
    fn test_refused_outcome_shape() {
        let outcome = GenerationOutcome::refused(vec!["min-items: too few".to_string()]);
        assert!(!outcome.success());
        assert!(outcome.boards().is_empty());
        assert!(outcome.stats().is_none());
        assert_eq!(outcome.errors().len(), 1);
        assert!(format!("{outcome}").contains("refused"));
    }

    #[test]
    fn test_outcome_serializes_solver_kind() {
        let boards = vec![board(1, &["a"])];
        let stats =
            GenerationStats::from_boards(&boards, SolverKind::Heuristic, Duration::ZERO, 1);
        let outcome = GenerationOutcome::generated(boards, stats, Vec::new());

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"solver\":\"heuristic\""));
        assert!(json.contains("\"success\":true"));
    }
}
