//! The outline tree and the identifier mapper.
//!
//! Entries live in a flat arena in document order with parent/child indices,
//! so the structure is testable without a rendering surface; the sidebar is
//! a projection of this tree, never the other way round. A rebuild discards
//! the previous tree entirely. Composite identifiers (source id + dotted
//! number) are unique within one rebuild because each heading consumes a
//! distinct number path, and they link entries back to their headings for
//! highlight resolution.

use crate::numbering::{dotted, SectionCounter};
use crate::scan::ScannedHeading;
use std::collections::HashMap;

#[derive(Clone)]
/// One outline entry, carrying the link back to its heading.
pub struct OutlineEntry {
    /// Source id + "-" + dotted number; the link key for this rebuild.
    pub composite_id: String,
    /// The heading's own anchor identifier.
    pub source_id: String,
    /// Number path, e.g. `[1, 2, 3]`.
    pub number: Vec<usize>,
    /// Normalized level; equals 1 + the number of ancestors.
    pub level: usize,
    /// Link text cloned from the heading.
    pub title: String,
    /// Cell holding the heading.
    pub cell_index: usize,
    /// Arena index of the containing entry.
    pub parent: Option<usize>,
    /// Arena indices of directly nested entries, in document order.
    pub children: Vec<usize>,
}

impl OutlineEntry {
    #[must_use]
    /// Dotted section label.
    pub fn label(&self) -> String {
        dotted(&self.number)
    }
}

/// The outline tree for one rebuild pass.
#[derive(Default)]
pub struct Outline {
    entries: Vec<OutlineEntry>,
    by_composite: HashMap<String, usize>,
}

impl Outline {
    #[must_use]
    /// Build the outline from the filtered heading sequence in one pass.
    ///
    /// A cursor walks left to right keeping the ancestor chain on a stack:
    /// an entry's parent is the nearest earlier entry at a shallower level.
    /// When the document starts below level 1 (possible after re-basing with
    /// a dangling deeper heading first), the entry simply has no parent.
    pub fn build(scanned: &[ScannedHeading]) -> Self {
        let mut counter = SectionCounter::new();
        let mut entries: Vec<OutlineEntry> = Vec::with_capacity(scanned.len());
        let mut by_composite = HashMap::with_capacity(scanned.len());
        // (level, arena index) ancestors of the insertion point
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for heading in scanned {
            let number = counter.advance(heading.level);
            let composite_id = format!("{}-{}", heading.source_id, dotted(&number));

            while stack.last().is_some_and(|&(lvl, _)| lvl >= heading.level) {
                stack.pop();
            }
            let parent = stack.last().map(|&(_, idx)| idx);

            let index = entries.len();
            entries.push(OutlineEntry {
                composite_id: composite_id.clone(),
                source_id: heading.source_id.clone(),
                number,
                level: heading.level,
                title: heading.title.clone(),
                cell_index: heading.cell_index,
                parent,
                children: Vec::new(),
            });
            if let Some(p) = parent {
                entries[p].children.push(index);
            }
            by_composite.insert(composite_id, index);
            stack.push((heading.level, index));
        }

        Self {
            entries,
            by_composite,
        }
    }

    #[must_use]
    /// All entries in document order.
    pub fn entries(&self) -> &[OutlineEntry] {
        &self.entries
    }

    #[must_use]
    /// Entry at an arena index.
    pub fn entry(&self, index: usize) -> &OutlineEntry {
        &self.entries[index]
    }

    #[must_use]
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    /// Resolve a composite identifier to its entry.
    pub fn entry_for_composite(&self, composite_id: &str) -> Option<usize> {
        self.by_composite.get(composite_id).copied()
    }

    #[must_use]
    /// Resolve a cell position to the entry that should highlight for it.
    ///
    /// A cell that itself holds headings resolves to its first one; any
    /// other cell resolves to the nearest heading above it. A cell above
    /// every heading resolves to nothing, and no highlight is applied.
    pub fn entry_for_cell(&self, cell_index: usize) -> Option<usize> {
        if let Some(own) = self
            .entries
            .iter()
            .position(|e| e.cell_index == cell_index)
        {
            return Some(own);
        }
        self.entries
            .iter()
            .rposition(|e| e.cell_index < cell_index)
    }

}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
