//! The event-driven bridge between notebook cells and outline highlights.
//!
//! The controller owns the outline, its collapse state, and the highlight
//! marks. Structure flows one way (scan, number, build, project); highlight
//! and collapse state flow both ways through discrete events. Everything
//! runs synchronously on the caller's thread: a rebuild completes before
//! the handler returns, so two rebuilds never interleave, and a redundant
//! rebuild is idempotent.
//!
//! What survives a rebuild is intent, not marks: the selected cell and the
//! running cell set are kept and re-resolved against the fresh outline.

use crate::collapse::CollapseState;
use crate::config::Config;
use crate::outline::Outline;
use crate::scan::{self, Heading};
use std::collections::BTreeSet;

/// Cell-lifecycle events the controller subscribes to.
pub enum NotebookEvent {
    /// A cell became the selected cell.
    CellSelected(usize),
    /// A code cell started executing.
    ExecutionStarted(usize),
    /// An execution reply arrived; carries the cells still running.
    ///
    /// The shell delivers this after a short settle delay so the document
    /// has finished updating; the reconciliation itself is synchronous.
    ExecutionReply {
        /// Cells still executing when the reply was processed.
        running: BTreeSet<usize>,
    },
    /// A markdown cell was re-rendered; headings may have changed.
    MarkdownRendered,
    /// The document finished loading.
    NotebookLoaded,
    /// The document folded or unfolded a heading.
    FoldHeading {
        /// Cell holding the folded heading.
        cell_index: usize,
        /// True for fold, false for unfold.
        folded: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Highlight state of one outline entry.
pub enum EntryMark {
    /// No highlight.
    None,
    /// Entry of the selected cell.
    Selected,
    /// Entry of at least one executing cell.
    Executing,
    /// Both at once; selection is never silently lost to an execution mark.
    ExecutingSelected,
}

/// Owns the outline and keeps its highlights in sync with the document.
#[derive(Default)]
pub struct SyncController {
    /// Current outline tree, rebuilt wholesale on structural change.
    pub outline: Outline,
    /// Collapse state, carried across rebuilds by source identifier.
    pub collapse: CollapseState,
    selected_cell: Option<usize>,
    running_cells: BTreeSet<usize>,
    selected_entry: Option<usize>,
    executing_entries: BTreeSet<usize>,
}

impl SyncController {
    #[must_use]
    /// Controller with an empty outline; feed it `NotebookLoaded` to start.
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a document event.
    ///
    /// `headings` is the document's current heading sequence, consulted when
    /// the event forces a rebuild. Events whose position resolves to no
    /// heading fall through silently.
    pub fn handle_event(&mut self, event: NotebookEvent, headings: &[Heading], cfg: &Config) {
        match event {
            NotebookEvent::CellSelected(cell) => {
                self.selected_cell = Some(cell);
                self.selected_entry = self.outline.entry_for_cell(cell);
            }
            NotebookEvent::ExecutionStarted(cell) => {
                self.running_cells.insert(cell);
                // additive: an execution mark never clears the selection
                if let Some(entry) = self.outline.entry_for_cell(cell) {
                    self.executing_entries.insert(entry);
                }
            }
            NotebookEvent::ExecutionReply { running } => {
                self.running_cells = running;
                self.resolve_marks();
            }
            NotebookEvent::MarkdownRendered | NotebookEvent::NotebookLoaded => {
                self.rebuild(headings, cfg);
            }
            NotebookEvent::FoldHeading { cell_index, folded } => {
                if cfg.collapse_to_match_collapsible_headings {
                    self.collapse.apply_fold_event(&self.outline, cell_index, folded);
                }
            }
        }
    }

    /// Rebuild the outline from the current document headings.
    ///
    /// The old tree is discarded entirely; collapse state and highlight
    /// intent are re-resolved against the new one.
    pub fn rebuild(&mut self, headings: &[Heading], cfg: &Config) {
        let scanned = scan::scan(headings, cfg);
        let fresh = Outline::build(&scanned);
        self.collapse.remap(&self.outline, &fresh);
        self.outline = fresh;
        self.resolve_marks();
    }

    /// Recompute both marks from the selected cell and the running set.
    fn resolve_marks(&mut self) {
        self.selected_entry = self
            .selected_cell
            .and_then(|cell| self.outline.entry_for_cell(cell));
        self.executing_entries = self
            .running_cells
            .iter()
            .filter_map(|&cell| self.outline.entry_for_cell(cell))
            .collect();
    }

    #[must_use]
    /// Entry currently marked selected, if any.
    pub fn selected_entry(&self) -> Option<usize> {
        self.selected_entry
    }

    #[must_use]
    /// Entries currently marked executing.
    pub fn executing_entries(&self) -> &BTreeSet<usize> {
        &self.executing_entries
    }

    #[must_use]
    /// Cell the document reports as selected.
    pub fn selected_cell(&self) -> Option<usize> {
        self.selected_cell
    }

    #[must_use]
    /// Cells the document reports as running.
    pub fn running_cells(&self) -> &BTreeSet<usize> {
        &self.running_cells
    }

    #[must_use]
    /// Highlight state of one entry.
    pub fn mark(&self, index: usize) -> EntryMark {
        let selected = self.selected_entry == Some(index);
        let executing = self.executing_entries.contains(&index);
        match (selected, executing) {
            (true, true) => EntryMark::ExecutingSelected,
            (true, false) => EntryMark::Selected,
            (false, true) => EntryMark::Executing,
            (false, false) => EntryMark::None,
        }
    }
}

#[cfg(test)]
#[path = "tests/sync.rs"]
mod tests;
