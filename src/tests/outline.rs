use super::Outline;
use crate::config::Config;
use crate::scan::{self, Heading, ScannedHeading};

fn cfg() -> Config {
    facet_toml::from_str::<Config>("").unwrap()
}

fn scanned(cell_index: usize, level: usize, title: &str) -> ScannedHeading {
    ScannedHeading {
        cell_index,
        level,
        source_id: title.replace(' ', "-"),
        title: title.to_string(),
    }
}

fn heading(cell_index: usize, raw_level: usize, title: &str) -> Heading {
    Heading {
        cell_index,
        raw_level,
        source_id: title.replace(' ', "-"),
        title: title.to_string(),
        skip: false,
    }
}

#[test]
fn test_numbering_and_composite_ids() {
    let records: Vec<ScannedHeading> = [(0, 1, "A"), (1, 2, "B"), (2, 2, "C"), (3, 3, "D"), (4, 1, "E"), (5, 2, "F")]
        .iter()
        .map(|&(cell, level, title)| scanned(cell, level, title))
        .collect();
    let outline = Outline::build(&records);
    let labels: Vec<String> = outline.entries().iter().map(super::OutlineEntry::label).collect();
    assert_eq!(labels, vec!["1", "1.1", "1.2", "1.2.1", "2", "2.1"]);
    assert_eq!(outline.entry(3).composite_id, "D-1.2.1");
}

#[test]
fn test_tree_depth_invariant_and_document_order() {
    let records = vec![
        scanned(0, 1, "A"),
        scanned(1, 2, "B"),
        scanned(2, 3, "C"),
        scanned(3, 2, "D"),
        scanned(4, 1, "E"),
    ];
    let outline = Outline::build(&records);
    for (index, entry) in outline.entries().iter().enumerate() {
        let mut ancestors = 0;
        let mut cursor = entry.parent;
        while let Some(p) = cursor {
            ancestors += 1;
            cursor = outline.entry(p).parent;
        }
        assert_eq!(entry.level, ancestors + 1, "entry {index}");
    }
    // siblings under A preserve document order
    assert_eq!(outline.entry(0).children, vec![1, 3]);
    assert_eq!(outline.entry(1).children, vec![2]);
    assert_eq!(outline.entry(4).children, Vec::<usize>::new());
}

#[test]
fn test_rebuild_is_deterministic() {
    let headings = vec![
        heading(0, 1, "Intro"),
        heading(2, 2, "Setup"),
        heading(5, 2, "Data"),
    ];
    let first = Outline::build(&scan::scan(&headings, &cfg()));
    let second = Outline::build(&scan::scan(&headings, &cfg()));
    let ids = |o: &Outline| -> Vec<String> {
        o.entries().iter().map(|e| e.composite_id.clone()).collect()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn test_document_starting_below_level_one() {
    // document order h4 then h3: re-basing makes the first record level 2
    let headings = vec![heading(0, 4, "Deep"), heading(1, 3, "Shallow")];
    let outline = Outline::build(&scan::scan(&headings, &cfg()));
    assert_eq!(outline.len(), 2);
    assert_eq!(outline.entry(0).level, 2);
    assert_eq!(outline.entry(0).parent, None);
    assert_eq!(outline.entry(0).label(), "0.1");
    assert_eq!(outline.entry(1).level, 1);
    assert_eq!(outline.entry(1).label(), "1");
}

#[test]
fn test_threshold_exclusion_does_not_skip_numbers() {
    let headings = vec![
        heading(0, 1, "One"),
        heading(1, 2, "Two"),
        heading(2, 3, "Buried"),
        heading(3, 2, "Three"),
    ];
    let mut cfg = cfg();
    cfg.threshold = 2;
    let outline = Outline::build(&scan::scan(&headings, &cfg));
    let labels: Vec<String> = outline.entries().iter().map(super::OutlineEntry::label).collect();
    assert_eq!(labels, vec!["1", "1.1", "1.2"]);
}

#[test]
fn test_cell_resolution() {
    let records = vec![scanned(1, 1, "A"), scanned(1, 2, "B"), scanned(4, 1, "C")];
    let outline = Outline::build(&records);
    // a cell above every heading resolves to nothing
    assert_eq!(outline.entry_for_cell(0), None);
    // a cell holding headings resolves to its first one
    assert_eq!(outline.entry_for_cell(1), Some(0));
    // cells below a heading resolve to the nearest one above
    assert_eq!(outline.entry_for_cell(2), Some(1));
    assert_eq!(outline.entry_for_cell(3), Some(1));
    assert_eq!(outline.entry_for_cell(4), Some(2));
    assert_eq!(outline.entry_for_cell(9), Some(2));
}

#[test]
fn test_composite_lookup() {
    let records = vec![scanned(0, 1, "A"), scanned(1, 2, "B"), scanned(2, 1, "C")];
    let outline = Outline::build(&records);
    assert_eq!(outline.entry_for_composite("A-1"), Some(0));
    assert_eq!(outline.entry_for_composite("B-1.1"), Some(1));
    assert_eq!(outline.entry_for_composite("missing"), None);
}

#[test]
fn test_empty_outline() {
    let outline = Outline::build(&[]);
    assert!(outline.is_empty());
    assert_eq!(outline.entry_for_cell(3), None);
}
