//! Collapse state for outline branches and the fold notifications that keep
//! it aligned with the document's own foldable headings.
//!
//! State is a set of collapsed composite identifiers plus a queue of
//! outbound notices. User-initiated toggles notify, so an external
//! fold-headings feature can mirror them; inbound fold events apply without
//! notifying, which breaks the event feedback loop.

use crate::outline::Outline;
use std::collections::BTreeSet;

/// Caret glyph for an expanded branch.
pub const CARET_OPEN: char = '\u{25be}';
/// Caret glyph for a collapsed branch.
pub const CARET_CLOSED: char = '\u{25b8}';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Outbound fold/unfold notification, keyed by the heading's cell.
pub struct FoldNotice {
    /// Cell holding the heading that was folded or unfolded.
    pub cell_index: usize,
    /// True for fold, false for unfold.
    pub folded: bool,
}

/// Collapse state of the current outline.
#[derive(Default)]
pub struct CollapseState {
    collapsed: BTreeSet<String>,
    notices: Vec<FoldNotice>,
}

impl CollapseState {
    #[must_use]
    /// Empty state: everything expanded, no pending notices.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Whether the identified branch is collapsed.
    pub fn is_collapsed(&self, composite_id: &str) -> bool {
        self.collapsed.contains(composite_id)
    }

    /// Collapse or expand a branch.
    ///
    /// With `notify` set (user-initiated) a [`FoldNotice`] is queued for the
    /// external fold feature; inbound fold events pass `notify: false`.
    /// Unknown identifiers are ignored.
    pub fn set_collapsed(
        &mut self,
        outline: &Outline,
        composite_id: &str,
        collapsed: bool,
        notify: bool,
    ) {
        let Some(index) = outline.entry_for_composite(composite_id) else {
            return;
        };
        let changed = if collapsed {
            self.collapsed.insert(composite_id.to_string())
        } else {
            self.collapsed.remove(composite_id)
        };
        if notify && changed {
            self.notices.push(FoldNotice {
                cell_index: outline.entry(index).cell_index,
                folded: collapsed,
            });
        }
    }

    /// Toggle a branch from its caret. Leaf entries have no caret, so the
    /// toggle is only honored for entries with children.
    pub fn toggle(&mut self, outline: &Outline, composite_id: &str) {
        let Some(index) = outline.entry_for_composite(composite_id) else {
            return;
        };
        if outline.entry(index).children.is_empty() {
            return;
        }
        let collapse = !self.is_collapsed(composite_id);
        self.set_collapsed(outline, composite_id, collapse, true);
    }

    /// Apply an inbound document fold event without re-notifying.
    pub fn apply_fold_event(&mut self, outline: &Outline, cell_index: usize, folded: bool) {
        let composite = outline
            .entries()
            .iter()
            .find(|e| e.cell_index == cell_index)
            .map(|e| e.composite_id.clone());
        if let Some(id) = composite {
            self.set_collapsed(outline, &id, folded, false);
        }
    }

    /// Take the queued fold notices.
    pub fn drain_notices(&mut self) -> Vec<FoldNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Carry collapse state across a rebuild.
    ///
    /// Composite identifiers are reassigned on every rebuild, so collapsed
    /// branches are matched up by source identifier instead.
    pub fn remap(&mut self, old: &Outline, new: &Outline) {
        let sources: BTreeSet<&str> = self
            .collapsed
            .iter()
            .filter_map(|id| old.entry_for_composite(id))
            .map(|idx| old.entry(idx).source_id.as_str())
            .collect();
        self.collapsed = new
            .entries()
            .iter()
            .filter(|e| sources.contains(e.source_id.as_str()))
            .map(|e| e.composite_id.clone())
            .collect();
    }

    #[must_use]
    /// Caret affordance for an entry: open/closed for branches, a blank of
    /// equal width for leaves so entries stay aligned.
    pub fn caret(&self, outline: &Outline, index: usize) -> char {
        let entry = outline.entry(index);
        if entry.children.is_empty() {
            ' '
        } else if self.is_collapsed(&entry.composite_id) {
            CARET_CLOSED
        } else {
            CARET_OPEN
        }
    }

    #[must_use]
    /// Entries visible in the sidebar: those with no collapsed ancestor.
    pub fn visible_entries(&self, outline: &Outline) -> Vec<usize> {
        let mut hidden = vec![false; outline.len()];
        let mut visible = Vec::with_capacity(outline.len());
        for (index, entry) in outline.entries().iter().enumerate() {
            if let Some(parent) = entry.parent {
                hidden[index] =
                    hidden[parent] || self.is_collapsed(&outline.entry(parent).composite_id);
            }
            if !hidden[index] {
                visible.push(index);
            }
        }
        visible
    }

    #[must_use]
    /// Document cells hidden by folded headings.
    ///
    /// A collapsed heading hides every cell after its own, up to the next
    /// heading at the same or a shallower level (or the end of the
    /// document). The heading's own cell stays visible.
    pub fn hidden_cells(&self, outline: &Outline, cell_count: usize) -> BTreeSet<usize> {
        let mut hidden = BTreeSet::new();
        for (index, entry) in outline.entries().iter().enumerate() {
            if !self.is_collapsed(&entry.composite_id) {
                continue;
            }
            let end = outline.entries()[index + 1..]
                .iter()
                .find(|later| later.level <= entry.level)
                .map_or(cell_count, |later| later.cell_index);
            for cell in entry.cell_index + 1..end {
                hidden.insert(cell);
            }
        }
        hidden
    }
}

#[cfg(test)]
#[path = "tests/collapse.rs"]
mod tests;
