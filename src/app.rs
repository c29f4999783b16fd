//! The shell state machine bridging the notebook document and the sidebar.
//!
//! This is the host-collaborator side of the design: it owns the open
//! notebook, the merged configuration, the sidebar geometry, and an
//! in-process execution runner that stands in for a kernel. It feeds
//! discrete events to the sync controller and persists display preferences
//! back into the notebook's metadata on exit.

use crate::config::Config;
use crate::notebook::{CellKind, Notebook};
use crate::scan::Heading;
use crate::sidebar::SidebarState;
use crate::sync::{NotebookEvent, SyncController};
use std::collections::BTreeSet;
use std::io;
use std::time::{Duration, Instant};

/// Simulated run time of one code cell.
const RUN_TIME: Duration = Duration::from_millis(600);
/// Settle delay between an execution reply and highlight reconciliation,
/// matching the original extension's deferred re-check.
const SETTLE_TIME: Duration = Duration::from_millis(100);

struct RunningCell {
    cell: usize,
    finish_at: Instant,
}

/// Top-level application state for one open notebook.
pub struct App {
    /// The open document.
    pub notebook: Notebook,
    /// Merged installation + per-notebook configuration.
    pub cfg: Config,
    /// Outline, highlights, and collapse state.
    pub controller: SyncController,
    /// Sidebar geometry.
    pub sidebar: SidebarState,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    headings: Vec<Heading>,
    runner: Vec<RunningCell>,
    settle_at: Option<Instant>,
}

impl App {
    #[must_use]
    /// Build the application state and run the initial outline pass.
    pub fn new(notebook: Notebook, cfg: Config) -> Self {
        let doc = notebook.doc_settings();
        let sidebar = SidebarState::from_config(&cfg, &doc);
        let headings = notebook.headings();
        let mut controller = SyncController::new();
        controller.handle_event(NotebookEvent::NotebookLoaded, &headings, &cfg);
        if !notebook.cells.is_empty() {
            controller.handle_event(NotebookEvent::CellSelected(0), &headings, &cfg);
        }
        Self {
            notebook,
            cfg,
            controller,
            sidebar,
            message: None,
            headings,
            runner: Vec::new(),
            settle_at: None,
        }
    }

    #[must_use]
    /// Cells currently hidden by folded headings.
    pub fn hidden_cells(&self) -> BTreeSet<usize> {
        self.controller
            .collapse
            .hidden_cells(&self.controller.outline, self.notebook.cells.len())
    }

    /// Select the nearest visible cell below the current one, skipping cells
    /// hidden by folded headings.
    pub fn select_next(&mut self) {
        self.select_step(1);
    }

    /// Select the nearest visible cell above the current one.
    pub fn select_prev(&mut self) {
        self.select_step(-1);
    }

    fn select_step(&mut self, direction: isize) {
        let count = self.notebook.cells.len();
        if count == 0 {
            return;
        }
        let hidden = self.hidden_cells();
        let mut index = self.controller.selected_cell().unwrap_or(0);
        loop {
            index = match index.checked_add_signed(direction) {
                Some(i) if i < count => i,
                _ => return,
            };
            if !hidden.contains(&index) {
                break;
            }
        }
        self.controller
            .handle_event(NotebookEvent::CellSelected(index), &self.headings, &self.cfg);
    }

    /// Run the selected code cell and select the cell below, the way the
    /// notebook's run-and-advance shortcut behaves. Markdown and raw cells
    /// only advance.
    pub fn run_selected(&mut self) {
        let Some(cell) = self.controller.selected_cell() else {
            return;
        };
        if self.notebook.cells[cell].kind == CellKind::Code {
            self.controller.handle_event(
                NotebookEvent::ExecutionStarted(cell),
                &self.headings,
                &self.cfg,
            );
            self.runner.push(RunningCell {
                cell,
                finish_at: Instant::now() + RUN_TIME,
            });
        }
        self.select_next();
    }

    /// Service the runner: finished cells queue a reply, and once the settle
    /// delay passes the reply is delivered with the still-running set.
    pub fn tick(&mut self, now: Instant) {
        let before = self.runner.len();
        self.runner.retain(|r| r.finish_at > now);
        if self.runner.len() < before {
            self.settle_at = Some(now + SETTLE_TIME);
        }
        if self.settle_at.is_some_and(|at| at <= now) {
            self.settle_at = None;
            let running: BTreeSet<usize> = self.runner.iter().map(|r| r.cell).collect();
            self.controller.handle_event(
                NotebookEvent::ExecutionReply { running },
                &self.headings,
                &self.cfg,
            );
        }
        // we are also the fold-heading host, so notices terminate here
        self.controller.collapse.drain_notices();
    }

    /// Collapse or expand the outline branch of the selected cell's heading.
    pub fn collapse_current(&mut self) {
        let Some(entry) = self.controller.selected_entry() else {
            return;
        };
        let id = self.controller.outline.entry(entry).composite_id.clone();
        self.controller.collapse.toggle(&self.controller.outline, &id);
    }

    /// Toggle section numbering. Identifiers are unaffected; numbering is
    /// computed either way.
    pub fn toggle_numbering(&mut self) {
        self.cfg.number_sections = !self.cfg.number_sections;
    }

    /// Re-scan the document and rebuild the outline (the reload button).
    pub fn reload(&mut self) {
        self.headings = self.notebook.headings();
        self.controller
            .handle_event(NotebookEvent::MarkdownRendered, &self.headings, &self.cfg);
        self.message = Some("Reloaded".to_string());
    }

    /// Persist display preferences into `metadata.toc` and save the file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the notebook fails.
    pub fn persist(&mut self) -> io::Result<()> {
        let mut doc = self.notebook.doc_settings();
        doc.number_sections = Some(self.cfg.number_sections);
        doc.skip_h1_title = Some(self.cfg.skip_h1_title);
        self.sidebar.store(&mut doc);
        self.notebook.set_doc_settings(&doc);
        self.notebook.save()
    }
}

#[cfg(test)]
#[path = "tests/app.rs"]
mod tests;
