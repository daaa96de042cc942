// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The HighSpeed TCP AIMD table from <https://www.rfc-editor.org/rfc/rfc3649#appendix-B>.
//!
//! Each entry maps an upper congestion window bound (in segments) to the multiplicative
//! decrease applied when a congestion event happens while the window is in that bracket.
//! The additive increase for a bracket is its index plus one.

/// Fixed-point shift applied to [`Entry::decrease_factor`]
pub const DECREASE_FACTOR_SHIFT: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    /// The largest congestion window, in segments, covered by this entry
    pub threshold: u32,
    /// Multiplicative decrease ratio, scaled by `1 << DECREASE_FACTOR_SHIFT`
    pub decrease_factor: u32,
}

impl Entry {
    pub const fn new(threshold: u32, decrease_factor: u32) -> Self {
        Self {
            threshold,
            decrease_factor,
        }
    }
}

const HSTCP_AIMD_ENTRIES: &[Entry] = &[
    Entry::new(38, 128),
    Entry::new(118, 112),
    Entry::new(221, 104),
    Entry::new(347, 98),
    Entry::new(495, 93),
    Entry::new(663, 89),
    Entry::new(851, 86),
    Entry::new(1058, 83),
    Entry::new(1284, 81),
    Entry::new(1529, 78),
    Entry::new(1793, 76),
    Entry::new(2076, 74),
    Entry::new(2378, 72),
    Entry::new(2699, 71),
    Entry::new(3039, 69),
    Entry::new(3399, 68),
    Entry::new(3778, 66),
    Entry::new(4177, 65),
    Entry::new(4596, 64),
    Entry::new(5036, 62),
    Entry::new(5497, 61),
    Entry::new(5979, 60),
    Entry::new(6483, 59),
    Entry::new(7009, 58),
    Entry::new(7558, 57),
    Entry::new(8130, 56),
    Entry::new(8726, 55),
    Entry::new(9346, 54),
    Entry::new(9991, 53),
    Entry::new(10661, 52),
    Entry::new(11358, 52),
    Entry::new(12082, 51),
    Entry::new(12834, 50),
    Entry::new(13614, 49),
    Entry::new(14424, 48),
    Entry::new(15265, 48),
    Entry::new(16137, 47),
    Entry::new(17042, 46),
    Entry::new(17981, 45),
    Entry::new(18955, 45),
    Entry::new(19965, 44),
    Entry::new(21013, 43),
    Entry::new(22101, 43),
    Entry::new(23230, 42),
    Entry::new(24402, 41),
    Entry::new(25618, 41),
    Entry::new(26881, 40),
    Entry::new(28193, 39),
    Entry::new(29557, 39),
    Entry::new(30975, 38),
    Entry::new(32450, 38),
    Entry::new(33986, 37),
    Entry::new(35586, 36),
    Entry::new(37253, 36),
    Entry::new(38992, 35),
    Entry::new(40808, 35),
    Entry::new(42707, 34),
    Entry::new(44694, 33),
    Entry::new(46776, 33),
    Entry::new(48961, 32),
    Entry::new(51258, 32),
    Entry::new(53677, 31),
    Entry::new(56230, 30),
    Entry::new(58932, 30),
    Entry::new(61799, 29),
    Entry::new(64851, 28),
    Entry::new(68113, 28),
    Entry::new(71617, 27),
    Entry::new(75401, 26),
    Entry::new(79517, 26),
    Entry::new(84035, 25),
    Entry::new(89053, 24),
];

/// The table used by the China congestion controller
pub static HSTCP_AIMD: GrowthTable = GrowthTable::new(HSTCP_AIMD_ENTRIES);

/// The largest decrease factor in [`HSTCP_AIMD`]
pub const MAX_DECREASE_FACTOR: u32 = max_decrease_factor(HSTCP_AIMD_ENTRIES);

/// The largest congestion window for which `window * decrease_factor` fits in a `u32`
pub const MAX_CLAMP: u32 = u32::MAX / MAX_DECREASE_FACTOR;

/// An immutable, ascending table of window thresholds
///
/// Connections only ever hold an index into the table. The index is moved incrementally
/// as the window changes, which is amortized O(1) since the window usually moves by a
/// single segment between lookups.
#[derive(Debug)]
pub struct GrowthTable {
    entries: &'static [Entry],
}

impl GrowthTable {
    /// Creates a table from the given entries
    ///
    /// Panics (at compile time when used in a `static`) if the entries are empty, not
    /// strictly increasing, or contain a decrease factor of 1.0 or more.
    pub const fn new(entries: &'static [Entry]) -> Self {
        assert!(!entries.is_empty(), "growth table must not be empty");

        let mut i = 0;
        while i < entries.len() {
            assert!(
                entries[i].decrease_factor < 1 << DECREASE_FACTOR_SHIFT,
                "decrease factor must be less than 1.0"
            );
            if i > 0 {
                assert!(
                    entries[i - 1].threshold < entries[i].threshold,
                    "thresholds must be strictly increasing"
                );
            }
            i += 1;
        }

        Self { entries }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        // `new` rejects empty tables
        false
    }

    #[inline]
    pub const fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    #[inline]
    pub fn entries(&self) -> &'static [Entry] {
        self.entries
    }

    #[inline]
    pub const fn max_decrease_factor(&self) -> u32 {
        max_decrease_factor(self.entries)
    }

    /// Moves `index` up until `window` fits under the threshold at `index`, or until the
    /// last entry is reached
    #[inline]
    pub fn advance_index_for(&self, window: u32, mut index: usize) -> usize {
        while window > self.entries[index].threshold && index < self.last_index() {
            index += 1;
        }
        index
    }

    /// Moves `index` down while `window` also fits under the previous threshold
    #[inline]
    pub fn retreat_index_for(&self, window: u32, mut index: usize) -> usize {
        while index > 0 && window <= self.entries[index - 1].threshold {
            index -= 1;
        }
        index
    }

    /// Returns the index for `window` with a binary search
    ///
    /// Equivalent to calling [`Self::advance_index_for`] followed by
    /// [`Self::retreat_index_for`] from any starting index.
    #[inline]
    pub fn index_for(&self, window: u32) -> usize {
        self.entries
            .partition_point(|entry| entry.threshold < window)
            .min(self.last_index())
    }

    /// Returns true if `index` is the correct bracket for `window`
    #[inline]
    pub fn is_index_valid(&self, window: u32, index: usize) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };

        let above_previous = index == 0 || self.entries[index - 1].threshold < window;
        let below_current = window <= entry.threshold || index == self.last_index();

        above_previous && below_current
    }
}

const fn max_decrease_factor(entries: &[Entry]) -> u32 {
    let mut max = 0;
    let mut i = 0;
    while i < entries.len() {
        if entries[i].decrease_factor > max {
            max = entries[i].decrease_factor;
        }
        i += 1;
    }
    max
}
