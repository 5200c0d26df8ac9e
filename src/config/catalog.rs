//! Catalog configuration loading from config.toml
//!
//! This module provides the presentation catalog: expense categories, credit
//! sources, wishlist categories, and wishlist priorities, each with the icon
//! and color names the UI layer renders them with. A config.toml file can
//! override any section; missing sections fall back to the built-in defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Icon name used when a category or source is not in the catalog
pub const FALLBACK_ICON: &str = "ellipsis.circle.fill";
/// Color name used when a category or source is not in the catalog
pub const FALLBACK_COLOR: &str = "gray";
/// Rank assigned to priorities not in the catalog, sorting them last
pub const FALLBACK_PRIORITY_RANK: u8 = 3;

/// A named catalog entry with its icon and color
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display name, also the value stored on ledger rows
    pub name: String,
    /// Symbol name rendered next to the entry
    pub icon: String,
    /// Color name the entry is tinted with
    pub color: String,
}

/// A wishlist priority with its sort rank (lower sorts first)
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PriorityEntry {
    /// Display name, also the value stored on wishlist items
    pub name: String,
    /// Sort rank, lower is more urgent
    pub rank: u8,
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Expense categories in display order
    #[serde(default = "default_categories")]
    pub categories: Vec<CatalogEntry>,
    /// Credit sources in display order
    #[serde(default = "default_sources")]
    pub sources: Vec<CatalogEntry>,
    /// Wishlist categories in display order
    #[serde(default = "default_wishlist_categories")]
    pub wishlist_categories: Vec<String>,
    /// Wishlist priorities in display order
    #[serde(default = "default_priorities")]
    pub priorities: Vec<PriorityEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            sources: default_sources(),
            wishlist_categories: default_wishlist_categories(),
            priorities: default_priorities(),
        }
    }
}

impl Catalog {
    /// Returns the icon for an expense category, falling back for unknown names
    pub fn category_icon(&self, name: &str) -> &str {
        lookup_icon(&self.categories, name)
    }

    /// Returns the color for an expense category, falling back for unknown names
    pub fn category_color(&self, name: &str) -> &str {
        lookup_color(&self.categories, name)
    }

    /// Returns the icon for a credit source, falling back for unknown names
    pub fn source_icon(&self, name: &str) -> &str {
        lookup_icon(&self.sources, name)
    }

    /// Returns the color for a credit source, falling back for unknown names
    pub fn source_color(&self, name: &str) -> &str {
        lookup_color(&self.sources, name)
    }

    /// Returns the sort rank for a wishlist priority.
    ///
    /// Unknown priorities rank after every configured one, so stored rows keep
    /// a stable position even if the catalog shrinks.
    pub fn priority_rank(&self, name: &str) -> u8 {
        self.priorities
            .iter()
            .find(|p| p.name == name)
            .map_or(FALLBACK_PRIORITY_RANK, |p| p.rank)
    }
}

fn lookup_icon<'a>(entries: &'a [CatalogEntry], name: &str) -> &'a str {
    entries
        .iter()
        .find(|e| e.name == name)
        .map_or(FALLBACK_ICON, |e| e.icon.as_str())
}

fn lookup_color<'a>(entries: &'a [CatalogEntry], name: &str) -> &'a str {
    entries
        .iter()
        .find(|e| e.name == name)
        .map_or(FALLBACK_COLOR, |e| e.color.as_str())
}

fn entry(name: &str, icon: &str, color: &str) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

fn default_categories() -> Vec<CatalogEntry> {
    vec![
        entry("Food", "fork.knife", "orange"),
        entry("Shopping", "cart.fill", "blue"),
        entry("Travel", "airplane", "green"),
        entry("Bills", "doc.text.fill", "red"),
        entry("Entertainment", "tv.fill", "purple"),
        entry("Health", "heart.fill", "pink"),
        entry("Education", "book.fill", "indigo"),
        entry("Others", "ellipsis.circle.fill", "gray"),
    ]
}

fn default_sources() -> Vec<CatalogEntry> {
    vec![
        entry("Salary", "briefcase.fill", "green"),
        entry("Freelance", "laptopcomputer", "blue"),
        entry("Investment", "chart.line.uptrend.xyaxis", "purple"),
        entry("Gift", "gift.fill", "pink"),
        entry("Other", "ellipsis.circle.fill", "gray"),
    ]
}

fn default_wishlist_categories() -> Vec<String> {
    [
        "Electronics",
        "Fashion",
        "Home",
        "Books",
        "Gadgets",
        "Sports",
        "Travel",
        "Others",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_priorities() -> Vec<PriorityEntry> {
    vec![
        PriorityEntry {
            name: "High".to_string(),
            rank: 0,
        },
        PriorityEntry {
            name: "Medium".to_string(),
            rank: 1,
        },
        PriorityEntry {
            name: "Low".to_string(),
            rank: 2,
        },
    ]
}

/// Loads the catalog from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(Catalog)` - Successfully parsed catalog
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the catalog from the default location (./config.toml)
///
/// # Returns
/// * `Ok(Catalog)` - Successfully parsed catalog
/// * `Err(Error)` - Failed to read or parse the configuration file
pub fn load_default_config() -> Result<Catalog> {
    load_config("config.toml")
}
