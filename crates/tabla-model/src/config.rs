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

//! Caller-facing generator configuration.
//!
//! A [`GeneratorConfig`] bundles everything a generation run consumes: the
//! ordered item pool, the board count, the board geometry, the distribution
//! strategy, and an optional deterministic seed. The configuration is
//! read-only to the optimizer; validation happens in [`crate::validate`]
//! before any solving begins.
//!
//! Construction goes through [`GeneratorConfigBuilder`], which starts from
//! permissive defaults and lets callers narrow them down setter by setter.

use crate::item::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Board geometry: a grid of `rows` × `cols` cells.
///
/// The board size is always derived from the two dimensions and never
/// stored independently.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BoardConfig {
    rows: usize,
    cols: usize,
}

impl BoardConfig {
    /// Creates a new board geometry.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Returns the number of rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of cells on one board (`rows × cols`).
    #[inline]
    pub const fn size(&self) -> usize {
        self.rows * self.cols
    }
}

impl std::fmt::Display for BoardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// One contiguous range of the item index space with a fixed frequency.
///
/// `start` and `end` are inclusive, zero-indexed positions in the item
/// sequence. Ranges are applied in order; later groups overwrite earlier
/// ones where they overlap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FrequencyGroup {
    pub start: usize,
    pub end: usize,
    pub frequency: usize,
}

impl FrequencyGroup {
    /// Creates a new frequency group covering `[start, end]` inclusive.
    #[inline]
    pub const fn new(start: usize, end: usize, frequency: usize) -> Self {
        Self {
            start,
            end,
            frequency,
        }
    }
}

/// How per-item frequencies are derived from the configuration.
///
/// Exactly one variant is active per configuration:
///
/// - `Uniform`: every item receives `⌊B×S / N⌋` occurrences, with the
///   remainder distributed (+1 each) to the first `B×S mod N` items in
///   index order. Slot balance holds by construction.
/// - `Grouped`: an ordered list of ranges, each overwriting the frequency
///   for its span. Indices outside any group default to 0; the
///   `min-frequency` validation flags such items.
/// - `Custom`: an explicit per-item lookup keyed by item identifier. Items
///   not referenced default to 0, with the same flagging behavior.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DistributionStrategy {
    Uniform,
    Grouped(Vec<FrequencyGroup>),
    Custom(BTreeMap<String, usize>),
}

impl DistributionStrategy {
    /// Returns a short human-readable name for the active variant.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            DistributionStrategy::Uniform => "uniform",
            DistributionStrategy::Grouped(_) => "grouped",
            DistributionStrategy::Custom(_) => "custom",
        }
    }
}

/// The full, immutable input of one generation run.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    items: Vec<Item>,
    num_boards: usize,
    board: BoardConfig,
    strategy: DistributionStrategy,
    seed: Option<u64>,
}

impl GeneratorConfig {
    /// Returns a builder initialized with permissive defaults.
    #[inline]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Returns the ordered item pool. The position of an item in this
    /// sequence is its canonical handle for solver purposes.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items in the pool.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of boards to generate.
    #[inline]
    pub fn num_boards(&self) -> usize {
        self.num_boards
    }

    /// Returns the board geometry.
    #[inline]
    pub fn board(&self) -> BoardConfig {
        self.board
    }

    /// Returns the active distribution strategy.
    #[inline]
    pub fn strategy(&self) -> &DistributionStrategy {
        &self.strategy
    }

    /// Returns the explicit seed, if the caller provided one.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the total number of item placements across all boards
    /// (`num_boards × board size`).
    #[inline]
    pub fn total_slots(&self) -> usize {
        self.num_boards * self.board.size()
    }
}

impl std::fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeneratorConfig(items: {}, boards: {}, grid: {}, strategy: {})",
            self.num_items(),
            self.num_boards,
            self.board,
            self.strategy.name()
        )
    }
}

/// Builder for [`GeneratorConfig`].
///
/// # Defaults
///
/// | Field | Default | Semantics |
/// | :--- | :--- | :--- |
/// | `items` | empty | No pool. Must be supplied before the config is useful. |
/// | `num_boards` | `0` | Nothing to generate. |
/// | `board` | `4x4` | The canonical Lotería grid. |
/// | `strategy` | `Uniform` | Even distribution with deterministic remainder. |
/// | `seed` | `None` | A fresh seed is drawn per run and recorded in stats. |
///
/// # Examples
///
/// ```rust
/// use tabla_model::config::{BoardConfig, GeneratorConfig};
/// use tabla_model::item::Item;
///
/// let config = GeneratorConfig::builder()
///     .items((0..36).map(|i| Item::new(format!("card-{i}"), format!("Card {i}"))))
///     .num_boards(15)
///     .board(BoardConfig::new(4, 4))
///     .seed(42)
///     .build();
///
/// assert_eq!(config.num_items(), 36);
/// assert_eq!(config.total_slots(), 240);
/// ```
#[derive(Clone, Debug)]
pub struct GeneratorConfigBuilder {
    items: Vec<Item>,
    num_boards: usize,
    board: BoardConfig,
    strategy: DistributionStrategy,
    seed: Option<u64>,
}

impl Default for GeneratorConfigBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorConfigBuilder {
    /// Creates a new builder with the defaults documented on the type.
    #[inline]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            num_boards: 0,
            board: BoardConfig::new(4, 4),
            strategy: DistributionStrategy::Uniform,
            seed: None,
        }
    }

    /// Sets the item pool, replacing any previously supplied items.
    #[inline]
    pub fn items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = Item>,
    {
        self.items = items.into_iter().collect();
        self
    }

    /// Sets the number of boards to generate.
    #[inline]
    pub fn num_boards(mut self, num_boards: usize) -> Self {
        self.num_boards = num_boards;
        self
    }

    /// Sets the board geometry.
    #[inline]
    pub fn board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Sets the distribution strategy.
    #[inline]
    pub fn strategy(mut self, strategy: DistributionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the deterministic seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> GeneratorConfig {
        GeneratorConfig {
            items: self.items,
            num_boards: self.num_boards,
            board: self.board,
            strategy: self.strategy,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("id-{i}"), format!("Item {i}")))
            .collect()
    }

    #[test]
    fn test_board_config_size_is_derived() {
        let board = BoardConfig::new(4, 4);
        assert_eq!(board.size(), 16);
        assert_eq!(format!("{}", board), "4x4");

        let board = BoardConfig::new(3, 5);
        assert_eq!(board.size(), 15);
    }

    #[test]
    fn test_builder_defaults() {
        let config = GeneratorConfig::builder().build();
        assert_eq!(config.num_items(), 0);
        assert_eq!(config.num_boards(), 0);
        assert_eq!(config.board(), BoardConfig::new(4, 4));
        assert_eq!(config.strategy(), &DistributionStrategy::Uniform);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let groups = vec![FrequencyGroup::new(0, 23, 7), FrequencyGroup::new(24, 35, 6)];
        let config = GeneratorConfig::builder()
            .items(pool(36))
            .num_boards(15)
            .board(BoardConfig::new(4, 4))
            .strategy(DistributionStrategy::Grouped(groups.clone()))
            .seed(7)
            .build();

        assert_eq!(config.num_items(), 36);
        assert_eq!(config.num_boards(), 15);
        assert_eq!(config.total_slots(), 240);
        assert_eq!(config.strategy(), &DistributionStrategy::Grouped(groups));
        assert_eq!(config.seed(), Some(7));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(DistributionStrategy::Uniform.name(), "uniform");
        assert_eq!(DistributionStrategy::Grouped(Vec::new()).name(), "grouped");
        assert_eq!(DistributionStrategy::Custom(BTreeMap::new()).name(), "custom");
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = GeneratorConfig::builder()
            .items(pool(4))
            .num_boards(2)
            .board(BoardConfig::new(1, 2))
            .build();

        let json = serde_json::to_string(&config).unwrap();
        let back: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
