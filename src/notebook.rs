//! Notebook loading and heading extraction.
//!
//! A notebook file is JSON; we keep the parsed document around untyped so a
//! save round-trips every field we do not understand, and project just the
//! cell list out of it. Headings are extracted from markdown cell sources
//! with tree-sitter, the same way the front end derives them from the
//! rendered cells.

use crate::config::DocSettings;
use crate::scan::Heading;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::{fs, fmt};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

#[derive(Clone, Copy, PartialEq, Eq)]
/// The kind of a notebook cell, from its `cell_type` field.
pub enum CellKind {
    /// Markdown cell; the only source of outline headings.
    Markdown,
    /// Executable code cell.
    Code,
    /// Raw cell, carried but never scanned or executed.
    Raw,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "md"),
            Self::Code => write!(f, "code"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

#[derive(Clone)]
/// One notebook cell: its kind and joined source text.
pub struct Cell {
    /// Cell kind.
    pub kind: CellKind,
    /// Source text with multi-line fragments joined.
    pub source: String,
}

impl Cell {
    #[must_use]
    /// First non-empty source line, for one-line cell listings.
    pub fn summary(&self) -> &str {
        self.source
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or_default()
    }
}

/// An open notebook document: the untyped JSON plus the projected cell list.
pub struct Notebook {
    path: PathBuf,
    raw: Value,
    /// Cells in document order.
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Load a notebook from an `.ipynb` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object
    /// with a `cells` array.
    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let raw: Value = serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let cells = raw
            .get("cells")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "notebook has no cells array")
            })?
            .iter()
            .map(parse_cell)
            .collect();
        Ok(Self {
            path: path.to_path_buf(),
            raw,
            cells,
        })
    }

    /// Write the notebook back to disk, preserving unrecognized fields.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> io::Result<()> {
        let contents = serde_json::to_string_pretty(&self.raw).map_err(io::Error::other)?;
        fs::write(&self.path, contents)
    }

    #[must_use]
    /// Per-notebook settings stored under `metadata.toc`, defaults if absent.
    pub fn doc_settings(&self) -> DocSettings {
        self.raw
            .get("metadata")
            .and_then(|m| m.get("toc"))
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// Replace the persisted `metadata.toc` object.
    pub fn set_doc_settings(&mut self, settings: &DocSettings) {
        let Ok(value) = serde_json::to_value(settings) else {
            return;
        };
        let Some(root) = self.raw.as_object_mut() else {
            return;
        };
        let metadata = root
            .entry("metadata")
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if let Value::Object(map) = metadata {
            map.insert("toc".to_string(), value);
        }
    }

    #[must_use]
    /// File name for titles and messages.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[must_use]
    /// Extract the ordered heading sequence from all markdown cells.
    pub fn headings(&self) -> Vec<Heading> {
        let mut headings = Vec::new();
        let Some(mut parser) = markdown_parser() else {
            return headings;
        };
        for (cell_index, cell) in self.cells.iter().enumerate() {
            if cell.kind == CellKind::Markdown {
                collect_headings(&mut parser, &cell.source, cell_index, &mut headings);
            }
        }
        headings
    }
}

fn parse_cell(value: &Value) -> Cell {
    let kind = match value.get("cell_type").and_then(Value::as_str) {
        Some("markdown") => CellKind::Markdown,
        Some("code") => CellKind::Code,
        _ => CellKind::Raw,
    };
    // nbformat allows source as either a string or a list of line fragments
    let source = match value.get("source") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .concat(),
        _ => String::new(),
    };
    Cell { kind, source }
}

fn markdown_parser() -> Option<Parser> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_md::LANGUAGE.into()).ok()?;
    Some(parser)
}

fn collect_headings(parser: &mut Parser, source: &str, cell_index: usize, out: &mut Vec<Heading>) {
    let Some(tree) = parser.parse(source, None) else {
        return;
    };
    let Ok(query) = Query::new(
        &tree_sitter_md::LANGUAGE.into(),
        "[(atx_heading) (setext_heading)] @heading",
    ) else {
        return;
    };
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let Some(raw_level) = heading_level(node) else {
                continue;
            };
            let raw_title = inline_text(node, source).unwrap_or_default();
            let skip = raw_title.contains("tocSkip");
            let title = strip_markup(raw_title);
            let source_id = anchor_id(&title);
            out.push(Heading {
                cell_index,
                raw_level,
                source_id,
                title,
                skip,
            });
        }
    }
}

/// Heading depth 1..=6 from the marker child, ATX or setext.
fn heading_level(node: Node) -> Option<usize> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = child.kind();
        if let Some(rest) = kind.strip_prefix("atx_h") {
            if let Some(digit) = rest.chars().next().and_then(|c| c.to_digit(10)) {
                return Some(digit as usize);
            }
        }
        match kind {
            "setext_h1_underline" => return Some(1),
            "setext_h2_underline" => return Some(2),
            _ => {}
        }
    }
    None
}

/// Text of the first `inline` descendant, i.e. the heading title markup.
fn inline_text<'a>(node: Node, source: &'a str) -> Option<&'a str> {
    if node.kind() == "inline" {
        return node.utf8_text(source.as_bytes()).ok();
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(text) = inline_text(child, source) {
            return Some(text);
        }
    }
    None
}

/// Drop embedded HTML tags (anchor decorations, opt-out markers) from a
/// heading title so the outline link text carries only the visible words.
fn strip_markup(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    words.join(" ")
}

/// Anchor identifier the way the notebook front end generates it: the title
/// with spaces replaced by dashes. An empty title yields an empty id, which
/// the scanner later drops.
fn anchor_id(title: &str) -> String {
    title.trim().replace(' ', "-")
}

#[cfg(test)]
#[path = "tests/notebook.rs"]
mod tests;
