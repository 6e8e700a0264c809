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

//! Per-item frequency derivation.
//!
//! A [`FrequencyVector`] holds, for every item in the pool, the number of
//! boards that item must appear on. For a valid configuration the vector
//! satisfies the slot-balance invariant `Σfᵢ = B×S`; the `Uniform` strategy
//! guarantees it by construction, while `Grouped` and `Custom` strategies
//! are caller-authored and checked by [`crate::validate`].

use crate::{
    config::{DistributionStrategy, GeneratorConfig},
    index::ItemIndex,
};

/// The required number of occurrences for each item, indexed by the item's
/// position in the configuration's item sequence.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrequencyVector {
    counts: Vec<usize>,
}

impl FrequencyVector {
    /// Builds the frequency vector prescribed by a configuration's
    /// distribution strategy.
    ///
    /// - `Uniform`: every item receives `⌊B×S / N⌋`, and the first
    ///   `B×S mod N` items (in index order) receive one extra. The result
    ///   sums to exactly `B×S`, deterministically, regardless of
    ///   divisibility.
    /// - `Grouped`: each group overwrites its inclusive `[start, end]`
    ///   range; positions outside every group stay 0. Ranges reaching past
    ///   the end of the item sequence are clamped.
    /// - `Custom`: per-item lookup by identifier; unreferenced items stay 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabla_model::config::{BoardConfig, GeneratorConfig};
    /// use tabla_model::frequency::FrequencyVector;
    /// use tabla_model::item::Item;
    ///
    /// let config = GeneratorConfig::builder()
    ///     .items((0..36).map(|i| Item::new(format!("{i}"), format!("Item {i}"))))
    ///     .num_boards(15)
    ///     .board(BoardConfig::new(4, 4))
    ///     .build();
    ///
    /// let freqs = FrequencyVector::from_strategy(&config);
    /// assert_eq!(freqs.total(), 240);
    /// assert_eq!(freqs.counts()[0], 7);  // 24 items get the +1 remainder
    /// assert_eq!(freqs.counts()[35], 6);
    /// ```
    pub fn from_strategy(config: &GeneratorConfig) -> Self {
        let num_items = config.num_items();
        let mut counts = vec![0usize; num_items];

        match config.strategy() {
            DistributionStrategy::Uniform => {
                if num_items > 0 {
                    let total = config.total_slots();
                    let base = total / num_items;
                    let remainder = total % num_items;
                    for (index, count) in counts.iter_mut().enumerate() {
                        *count = base + usize::from(index < remainder);
                    }
                }
            }
            DistributionStrategy::Grouped(groups) => {
                for group in groups {
                    if group.start >= num_items || group.end < group.start {
                        continue;
                    }
                    let end = group.end.min(num_items.saturating_sub(1));
                    for count in &mut counts[group.start..=end] {
                        *count = group.frequency;
                    }
                }
            }
            DistributionStrategy::Custom(map) => {
                for (index, item) in config.items().iter().enumerate() {
                    counts[index] = map.get(item.id()).copied().unwrap_or(0);
                }
            }
        }

        Self { counts }
    }

    /// Creates a frequency vector directly from raw counts.
    #[inline]
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// Returns the number of items covered by this vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the vector covers no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the required frequency for the specified item.
    ///
    /// # Panics
    ///
    /// Panics if `item_index` is not in `0..len()`.
    #[inline]
    pub fn get(&self, item_index: ItemIndex) -> usize {
        let index = item_index.get();
        debug_assert!(
            index < self.counts.len(),
            "called `FrequencyVector::get` with item index out of bounds: the len is {} but the index is {}",
            self.counts.len(),
            index
        );

        self.counts[index]
    }

    /// Returns the raw counts slice.
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Returns the sum of all frequencies. For a valid configuration this
    /// equals the total slot count `B×S`.
    #[inline]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Returns the smallest frequency, or `None` for an empty vector.
    #[inline]
    pub fn min(&self) -> Option<usize> {
        self.counts.iter().copied().min()
    }

    /// Returns the largest frequency, or `None` for an empty vector.
    #[inline]
    pub fn max(&self) -> Option<usize> {
        self.counts.iter().copied().max()
    }
}

/// The result of the auto-distribute convenience: the `Uniform` frequency
/// vector plus an advisory suggestion when the frequency bounds would be
/// violated. The suggestion is not a constraint in itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AutoDistribution {
    pub frequencies: FrequencyVector,
    pub suggestion: Option<String>,
}

/// Builds the `Uniform` strategy's frequency vector for the given shape and
/// attaches a suggestion string when the max/min frequency bounds are
/// violated.
///
/// # Examples
///
/// ```rust
/// use tabla_model::frequency::auto_distribute;
///
/// let auto = auto_distribute(36, 15, 16);
/// assert_eq!(auto.frequencies.total(), 240);
/// assert!(auto.suggestion.is_none());
///
/// // Ten items cannot fill a 16-cell board without repeats.
/// let auto = auto_distribute(10, 15, 16);
/// assert!(auto.suggestion.is_some());
/// ```
pub fn auto_distribute(num_items: usize, num_boards: usize, board_size: usize) -> AutoDistribution {
    let total = num_boards * board_size;
    let mut counts = vec![0usize; num_items];
    if num_items > 0 {
        let base = total / num_items;
        let remainder = total % num_items;
        for (index, count) in counts.iter_mut().enumerate() {
            *count = base + usize::from(index < remainder);
        }
    }
    let frequencies = FrequencyVector::from_counts(counts);

    let suggestion = if frequencies.max().unwrap_or(0) > num_boards {
        // ceil(B*S / N) > B happens exactly when N < S.
        Some(format!(
            "an even distribution needs each item on more than {num_boards} boards; \
             grow the item pool to at least {board_size} items or shrink the board"
        ))
    } else if num_items > 0 && frequencies.min().unwrap_or(0) == 0 {
        Some(format!(
            "{num_items} items cannot all appear across {total} slots; \
             reduce the item pool to {total} or add boards"
        ))
    } else {
        None
    };

    AutoDistribution {
        frequencies,
        suggestion,
    }
}
