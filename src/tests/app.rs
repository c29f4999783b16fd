use super::App;
use crate::config::Config;
use crate::notebook::Notebook;
use serde_json::json;
use std::io::Write;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

fn cfg() -> Config {
    facet_toml::from_str::<Config>("").unwrap()
}

fn md(source: &str) -> serde_json::Value {
    json!({"cell_type": "markdown", "metadata": {}, "source": source})
}

fn code(source: &str) -> serde_json::Value {
    json!({
        "cell_type": "code", "metadata": {}, "outputs": [],
        "execution_count": null, "source": source
    })
}

/// cells: 0 "# A", 1 code, 2 "## B", 3 code, 4 "# C", 5 code
fn open_app() -> (App, NamedTempFile) {
    let value = json!({
        "cells": [
            md("# A\n"), code("a = 1"), md("## B\n"),
            code("b = 2"), md("# C\n"), code("c = 3"),
        ],
        "metadata": {},
        "nbformat": 4,
        "nbformat_minor": 5
    });
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&value).unwrap()).unwrap();
    let notebook = Notebook::load(file.path()).unwrap();
    (App::new(notebook, cfg()), file)
}

#[test]
fn test_initial_outline_and_selection() {
    let (app, _file) = open_app();
    assert_eq!(app.controller.outline.len(), 3);
    assert_eq!(app.controller.selected_cell(), Some(0));
    assert_eq!(app.controller.selected_entry(), Some(0));
}

#[test]
fn test_navigation_skips_folded_cells() {
    let (mut app, _file) = open_app();
    // fold section A: cells 1..=3 disappear until "# C"
    app.collapse_current();
    let hidden: Vec<usize> = app.hidden_cells().into_iter().collect();
    assert_eq!(hidden, vec![1, 2, 3]);

    app.select_next();
    assert_eq!(app.controller.selected_cell(), Some(4));
    app.select_prev();
    assert_eq!(app.controller.selected_cell(), Some(0));

    // unfold and the immediate neighbor is reachable again
    app.collapse_current();
    app.select_next();
    assert_eq!(app.controller.selected_cell(), Some(1));
}

#[test]
fn test_run_highlights_then_reconciles() {
    let (mut app, _file) = open_app();
    app.select_next();
    app.run_selected();
    // run-and-advance: the next cell is now selected
    assert_eq!(app.controller.selected_cell(), Some(2));
    assert!(app.controller.running_cells().contains(&1));
    assert!(app.controller.executing_entries().contains(&0));

    // well past the simulated run plus the settle delay
    let later = Instant::now() + Duration::from_secs(2);
    app.tick(later);
    app.tick(later + Duration::from_secs(1));
    assert!(app.controller.executing_entries().is_empty());
    // selection was reasserted by the reply, not lost
    assert_eq!(app.controller.selected_entry(), Some(1));
}

#[test]
fn test_running_a_markdown_cell_only_advances() {
    let (mut app, _file) = open_app();
    app.run_selected();
    assert!(app.controller.running_cells().is_empty());
    assert_eq!(app.controller.selected_cell(), Some(1));
}

#[test]
fn test_toggles_and_reload() {
    let (mut app, _file) = open_app();
    assert!(app.cfg.number_sections);
    app.toggle_numbering();
    assert!(!app.cfg.number_sections);

    let ids: Vec<String> = app
        .controller
        .outline
        .entries()
        .iter()
        .map(|e| e.composite_id.clone())
        .collect();
    app.reload();
    let after: Vec<String> = app
        .controller
        .outline
        .entries()
        .iter()
        .map(|e| e.composite_id.clone())
        .collect();
    // identifiers are independent of whether numbers are displayed
    assert_eq!(ids, after);
}

#[test]
fn test_persist_writes_display_preferences() {
    let (mut app, file) = open_app();
    app.toggle_numbering();
    app.sidebar.toggle_visible();
    app.persist().unwrap();

    let reloaded = Notebook::load(file.path()).unwrap();
    let doc = reloaded.doc_settings();
    assert_eq!(doc.number_sections, Some(false));
    assert_eq!(doc.toc_window_display, Some(false));
    assert!(doc.toc_position.is_some());
}
