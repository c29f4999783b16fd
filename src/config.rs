//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Settings come from two tiers: installation-wide defaults in an nbtoc.toml
//! (if present), overridden by per-notebook values persisted under the
//! `metadata.toc` object of the notebook file. Per-notebook values win.

use facet::Facet;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Facet, Clone)]
#[allow(clippy::struct_excessive_bools)]
/// User preferences loaded from nbtoc.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 4)]
    /// Maximum heading depth shown in the outline.
    pub threshold: usize,
    #[facet(default = true)]
    /// Whether dotted section numbers are rendered in outline entries.
    pub number_sections: bool,
    #[facet(default = false)]
    /// Excludes the top-level heading, treating it as the document title.
    pub skip_h1_title: bool,
    #[facet(default = true)]
    /// Whether the outline renders as a sidebar at startup.
    pub side_bar: bool,
    #[facet(default = false)]
    /// Whether outline collapse state follows the document's folded headings.
    pub collapse_to_match_collapsible_headings: bool,
    #[facet(default = 32)]
    /// Initial sidebar width in terminal columns.
    pub sidebar_width: u16,
    #[facet(default = "left".to_string())]
    /// Which edge of the screen the sidebar occupies ("left" or "right").
    pub sidebar_side: String,
    #[facet(default = "yellow".to_string())]
    /// Highlight color for the entry matching the selected cell.
    pub selected_color: String,
    #[facet(default = "red".to_string())]
    /// Highlight color for entries whose cells are currently executing.
    pub running_color: String,
}

impl Config {
    #[must_use]
    /// Load configuration from nbtoc.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("nbtoc.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }

    #[must_use]
    /// Overlay per-notebook settings onto this configuration.
    pub fn with_doc(&self, doc: &DocSettings) -> Self {
        let mut cfg = self.clone();
        if let Some(v) = doc.number_sections {
            cfg.number_sections = v;
        }
        if let Some(v) = doc.skip_h1_title {
            cfg.skip_h1_title = v;
        }
        if let Some(v) = doc.side_bar {
            cfg.side_bar = v;
        }
        if let Some(ref pos) = doc.toc_position {
            if let Some(w) = pos.width {
                cfg.sidebar_width = w;
            }
            if let Some(ref side) = pos.side {
                cfg.sidebar_side.clone_from(side);
            }
        }
        cfg
    }
}

#[derive(Serialize, Deserialize, Clone, Default)]
/// Per-notebook settings persisted under `metadata.toc`.
///
/// Field names match the keys the original notebook front end stored, so a
/// notebook annotated by one tool remains legible to the other. Absent
/// fields defer to the installation-wide [`Config`].
pub struct DocSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Per-notebook override for section numbering.
    pub number_sections: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Per-notebook override for skipping the title heading.
    pub skip_h1_title: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Per-notebook override for sidebar placement.
    pub side_bar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Persisted sidebar geometry.
    pub toc_position: Option<TocPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Whether the outline list under the header is expanded ("block") or
    /// hidden ("none").
    pub toc_section_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Whether the sidebar itself is shown.
    pub toc_window_display: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Default)]
/// Persisted sidebar geometry, a terminal rendition of the original's
/// left/top/width/height box.
pub struct TocPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Sidebar width in terminal columns.
    pub width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Screen edge the sidebar is docked to.
    pub side: Option<String>,
}
