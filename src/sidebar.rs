//! Sidebar geometry: width, docked side, open/closed state.
//!
//! The shell owns this state and persists it per notebook; the core only
//! ever asks it to show or hide. Resize handling just recomputes bounds and
//! never touches the outline.

use crate::config::{Config, DocSettings, TocPosition};

/// Narrowest usable sidebar.
const MIN_WIDTH: u16 = 16;
/// Columns always left to the cell pane.
const MIN_NOTEBOOK_WIDTH: u16 = 20;

#[derive(Clone, Copy, PartialEq, Eq)]
/// Screen edge the sidebar docks to.
pub enum Side {
    /// Docked left of the cell pane.
    Left,
    /// Docked right of the cell pane.
    Right,
}

impl Side {
    #[must_use]
    /// Parse a persisted side name; anything unrecognized docks left.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("right") {
            Self::Right
        } else {
            Self::Left
        }
    }

    #[must_use]
    /// Name used in persisted settings.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Visual state of the sidebar container.
pub struct SidebarState {
    /// Whether the sidebar is shown at all.
    pub visible: bool,
    /// Whether the outline list under the header is expanded.
    pub list_open: bool,
    /// Width in terminal columns.
    pub width: u16,
    /// Docked edge.
    pub side: Side,
}

impl SidebarState {
    #[must_use]
    /// Initial state from the merged configuration and persisted values.
    pub fn from_config(cfg: &Config, doc: &DocSettings) -> Self {
        let position = doc.toc_position.as_ref();
        let width = position
            .and_then(|p| p.width)
            .unwrap_or(cfg.sidebar_width)
            .max(MIN_WIDTH);
        let side = position
            .and_then(|p| p.side.as_deref())
            .unwrap_or(&cfg.sidebar_side);
        Self {
            visible: doc.toc_window_display.unwrap_or(cfg.side_bar),
            list_open: doc.toc_section_display.as_deref() != Some("none"),
            width,
            side: Side::from_name(side),
        }
    }

    /// Show or hide the whole sidebar.
    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    /// Fold or unfold the outline list, leaving the header bar.
    pub fn toggle_list(&mut self) {
        self.list_open = !self.list_open;
    }

    /// Grow the sidebar by one column, within the frame.
    pub fn widen(&mut self, frame_width: u16) {
        self.width = (self.width + 1).min(frame_width.saturating_sub(MIN_NOTEBOOK_WIDTH));
        self.width = self.width.max(MIN_WIDTH);
    }

    /// Shrink the sidebar by one column.
    pub fn narrow(&mut self) {
        self.width = self.width.saturating_sub(1).max(MIN_WIDTH);
    }

    /// Re-fit the width after a terminal resize.
    pub fn clamp_to(&mut self, frame_width: u16) {
        let max = frame_width.saturating_sub(MIN_NOTEBOOK_WIDTH).max(MIN_WIDTH);
        self.width = self.width.clamp(MIN_WIDTH, max);
    }

    /// Record current geometry into the persisted per-notebook settings.
    pub fn store(&self, doc: &mut DocSettings) {
        doc.toc_window_display = Some(self.visible);
        doc.toc_section_display = Some(if self.list_open { "block" } else { "none" }.to_string());
        doc.toc_position = Some(TocPosition {
            width: Some(self.width),
            side: Some(self.side.name().to_string()),
        });
    }
}

#[cfg(test)]
#[path = "tests/sidebar.rs"]
mod tests;
