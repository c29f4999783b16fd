//! nbtoc: a live table-of-contents sidebar for Jupyter notebooks.
//!
//! The crate is split into a pure outline model and a thin terminal shell.
//! The model scans the notebook's rendered headings, numbers them, builds a
//! nested outline, and keeps selection/execution highlights and collapse
//! state in sync with cell-lifecycle events. The shell projects that model
//! into a ratatui sidebar and drives it from the keyboard.
#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod collapse;
pub mod config;
pub mod notebook;
pub mod numbering;
pub mod outline;
pub mod scan;
pub mod sidebar;
pub mod sync;
pub mod ui;
