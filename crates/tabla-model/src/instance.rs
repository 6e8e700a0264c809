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

use crate::{config::GeneratorConfig, frequency::FrequencyVector};

/// The immutable problem statement handed to solvers.
///
/// An `Instance` reduces a validated configuration to the four quantities
/// the assignment algorithms care about: the item count, the board count,
/// the board size, and the per-item frequency vector. Items are referred
/// to purely by index; names and identifiers stay in the configuration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instance {
    num_items: usize,
    num_boards: usize,
    board_size: usize,
    frequencies: FrequencyVector,
}

impl Instance {
    /// Constructs an instance from raw parts.
    ///
    /// # Panics
    ///
    /// Panics if the frequency vector does not cover exactly `num_items`.
    pub fn new(
        num_items: usize,
        num_boards: usize,
        board_size: usize,
        frequencies: FrequencyVector,
    ) -> Self {
        assert_eq!(
            frequencies.len(),
            num_items,
            "called `Instance::new` with inconsistent lengths: frequencies cover {} items but num_items is {}",
            frequencies.len(),
            num_items
        );

        Self {
            num_items,
            num_boards,
            board_size,
            frequencies,
        }
    }

    /// Derives the instance from a configuration, computing the frequency
    /// vector from the active distribution strategy.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            config.num_items(),
            config.num_boards(),
            config.board().size(),
            FrequencyVector::from_strategy(config),
        )
    }

    /// Returns the number of items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Returns the number of boards.
    #[inline]
    pub fn num_boards(&self) -> usize {
        self.num_boards
    }

    /// Returns the number of cells on one board.
    #[inline]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Returns the per-item frequency vector.
    #[inline]
    pub fn frequencies(&self) -> &FrequencyVector {
        &self.frequencies
    }

    /// Returns the total number of placements (`num_boards × board_size`).
    #[inline]
    pub fn total_slots(&self) -> usize {
        self.num_boards * self.board_size
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(items: {}, boards: {}, board size: {})",
            self.num_items, self.num_boards, self.board_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::item::Item;

    #[test]
    fn test_from_config() {
        let config = GeneratorConfig::builder()
            .items((0..36).map(|i| Item::new(format!("id-{i}"), format!("Item {i}"))))
            .num_boards(15)
            .board(BoardConfig::new(4, 4))
            .build();

        let instance = Instance::from_config(&config);
        assert_eq!(instance.num_items(), 36);
        assert_eq!(instance.num_boards(), 15);
        assert_eq!(instance.board_size(), 16);
        assert_eq!(instance.total_slots(), 240);
        assert_eq!(instance.frequencies().total(), 240);
    }

    #[test]
    #[should_panic(expected = "inconsistent lengths")]
    fn test_new_rejects_mismatched_frequencies() {
        let frequencies = FrequencyVector::from_counts(vec![1, 1]);
        let _ = Instance::new(3, 2, 2, frequencies);
    }
}
