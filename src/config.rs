//! Site configuration module.
//!
//! Handles loading and validating the site's `config.toml`. Configuration
//! lives at the site root; collections declare themselves here and each one
//! may override the site-wide permalink pattern.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "My Site"                          # Site title, exposed to templates
//! url = ""                                   # Public base URL, exposed to templates
//! permalink = "/:year/:month/:day/:title/"   # Default permalink pattern
//!
//! [collections.posts]
//! permalink = "/:categories/:year/:month/:day/:title/"
//!
//! [collections.notes]
//! # No permalink here - the site-wide default applies.
//! # Extra keys are kept and handed to every document in the collection:
//! layout = "note"
//! ```
//!
//! Each `[collections.<name>]` table maps to a content directory `_<name>/`
//! at the site root. Collection tables are open mappings: keys beyond
//! `permalink` are preserved verbatim so templates and documents can read
//! them, which is why this module does not reject unknown keys the way a
//! closed schema would.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults; a missing config file yields a site with no
/// collections and the stock permalink pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, exposed to templates as `site.title`.
    pub title: String,
    /// Public base URL, exposed to templates as `site.url`.
    pub url: String,
    /// Default permalink pattern for collections that don't set their own.
    pub permalink: String,
    /// Named collections; each maps to a `_<name>/` content directory.
    pub collections: BTreeMap<String, CollectionConfig>,
}

fn default_permalink() -> String {
    "/:year/:month/:day/:title/".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            permalink: default_permalink(),
            collections: BTreeMap::new(),
        }
    }
}

impl SiteConfig {
    /// The permalink pattern in effect for a collection: its own `permalink`
    /// key if set, otherwise the site-wide default.
    pub fn effective_permalink<'a>(&'a self, collection: &'a CollectionConfig) -> &'a str {
        collection.permalink.as_deref().unwrap_or(&self.permalink)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.permalink.trim().is_empty() {
            return Err(ConfigError::Validation("permalink must not be empty".into()));
        }
        for (name, collection) in &self.collections {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "collection names must not be empty".into(),
                ));
            }
            if let Some(permalink) = &collection.permalink
                && permalink.trim().is_empty()
            {
                return Err(ConfigError::Validation(format!(
                    "collections.{name}.permalink must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Per-collection configuration.
///
/// The same mapping is handed to every document in the collection. Beyond
/// `permalink`, collection config is an open key→value table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Permalink pattern override for this collection.
    pub permalink: Option<String>,
    /// Any further keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file yields the defaults; an unreadable or invalid file is an
/// error.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Plume Configuration
# ===================
#
# Place this file at your site root, next to your _<collection> directories.
# Every option is optional; delete anything you don't want to override.

# Site title, exposed to templates as {{ site.title }}.
title = ""

# Public base URL, exposed to templates as {{ site.url }}.
url = ""

# Default permalink pattern. Recognized tokens:
#   :year :month :day :hour    - from the document's date prefix
#   :title :slug               - the document slug
#   :categories                - front-matter categories joined with /
permalink = "/:year/:month/:day/:title/"

# Collections. Each [collections.<name>] table corresponds to a _<name>/
# directory of date-prefixed content files. Keys other than `permalink`
# are passed through to documents and templates unchanged.
#
# [collections.posts]
# permalink = "/:categories/:year/:month/:day/:title/"
#
# [collections.notes]
# layout = "note"
"##
}
