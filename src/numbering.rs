//! Section numbering over the filtered heading sequence.
//!
//! A growable counter array, one slot per depth below the minimum visible
//! level. Advancing at level L increments slot L-1, zeroes every deeper
//! slot, and yields the number path for the heading. Numbering is computed
//! whether or not numbers are displayed, because composite identifiers are
//! derived from it and must stay stable either way.

/// Per-level section counters.
#[derive(Default)]
pub struct SectionCounter {
    counters: Vec<usize>,
}

impl SectionCounter {
    #[must_use]
    /// Fresh counter array; slots are created lazily as levels appear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter at a 1-based level and return the number path.
    ///
    /// A level-1 heading after a level-3 "2.1.4" resets to "3"; a following
    /// level-2 becomes "3.1".
    pub fn advance(&mut self, level: usize) -> Vec<usize> {
        if self.counters.len() < level {
            self.counters.resize(level, 0);
        }
        self.counters[level - 1] += 1;
        for slot in self.counters.iter_mut().skip(level) {
            *slot = 0;
        }
        self.counters[..level].to_vec()
    }
}

#[must_use]
/// Render a number path as a dotted label, e.g. `[1, 2, 3]` -> "1.2.3".
pub fn dotted(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
#[path = "tests/numbering.rs"]
mod tests;
