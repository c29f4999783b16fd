//! Heading scanning: filtering and level normalization.
//!
//! The scanner walks the document's heading sequence, drops headings that
//! cannot or should not appear in the outline, and re-bases depths so the
//! shallowest visible heading is level 1. Records are recomputed on every
//! rebuild and never persisted.

use crate::config::Config;

/// Identifier of the outline container cell itself. A notebook that embeds
/// its own "Table of Contents" heading would otherwise list the outline
/// inside the outline.
pub const CONTAINER_ID: &str = "Table-of-Contents";

#[derive(Clone)]
/// One heading as found in the document, before filtering.
pub struct Heading {
    /// Index of the containing cell in document order.
    pub cell_index: usize,
    /// Nesting depth as authored, 1..=6.
    pub raw_level: usize,
    /// Anchor identifier; may be empty when the title has no text.
    pub source_id: String,
    /// Rendered title with markup stripped.
    pub title: String,
    /// Whether the heading carries the opt-out marker.
    pub skip: bool,
}

#[derive(Clone)]
/// A heading that survived filtering, with its normalized level.
pub struct ScannedHeading {
    /// Index of the containing cell.
    pub cell_index: usize,
    /// Depth re-based so the shallowest visible heading is 1.
    pub level: usize,
    /// Anchor identifier, non-empty by construction.
    pub source_id: String,
    /// Outline link text.
    pub title: String,
}

#[must_use]
/// Shallowest heading depth that participates in the outline.
///
/// Starts at 1 (or 2 when the title heading is skipped), then is raised to
/// the shallowest depth actually present so a document starting at depth 3
/// re-bases to level 1. Returns 7 when no depth qualifies, which filters
/// everything.
pub fn min_level(headings: &[Heading], skip_h1_title: bool) -> usize {
    let base = 1 + usize::from(skip_h1_title);
    (base..=6)
        .find(|lvl| headings.iter().any(|h| h.raw_level == *lvl))
        .unwrap_or(7)
}

#[must_use]
/// Filter and normalize the heading sequence.
///
/// Applies, in order: level re-basing against [`min_level`], the depth
/// threshold, the missing-identifier rule, the outline-container guard, and
/// the explicit opt-out marker. An empty result is not an error; the
/// outline simply renders empty.
pub fn scan(headings: &[Heading], cfg: &Config) -> Vec<ScannedHeading> {
    let min = min_level(headings, cfg.skip_h1_title);
    headings
        .iter()
        .filter_map(|h| {
            let level = (h.raw_level + 1).checked_sub(min)?;
            if level < 1 || level > cfg.threshold {
                return None;
            }
            if h.source_id.is_empty() || h.source_id == CONTAINER_ID || h.skip {
                return None;
            }
            Some(ScannedHeading {
                cell_index: h.cell_index,
                level,
                source_id: h.source_id.clone(),
                title: h.title.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/scan.rs"]
mod tests;
