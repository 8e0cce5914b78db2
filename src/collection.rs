//! Collection assembly: directory scan → ordered, resolved documents.
//!
//! Each `[collections.<name>]` entry in the site config corresponds to a
//! `_<name>/` directory of content files. Assembly runs the full pipeline
//! for every configured collection:
//!
//! ```text
//! config → find files → build documents → resolve → sort → Collection
//! ```
//!
//! Only files containing a front-matter delimiter block are considered;
//! anything else in the directory is ignored by the finder.
//!
//! ## Ordering
//!
//! Documents are sorted descending by date (most recent first) with a
//! stable, explicit tie-break: equal dates fall back to ascending basename
//! order. Documents without a date sort after all dated documents — a
//! missing date never masquerades as "now".
//!
//! ## Failure isolation
//!
//! A document that fails to resolve (malformed front matter, a permalink
//! referencing a missing field, a template error) is skipped and recorded
//! as a [`SkippedDocument`] on the [`Assembly`]. It never aborts its
//! siblings or other collections, and nothing here prints — diagnostics
//! are data for the caller.

use crate::config::{CollectionConfig, SiteConfig};
use crate::document::{Document, DocumentError, ResolvedDocument};
use crate::finder::{self, FinderError};
use crate::render::Renderer;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("finder error in collection '{collection}': {source}")]
    Finder {
        collection: String,
        source: FinderError,
    },
}

/// Pattern a file must contain to count as a document: a front-matter block
/// bounded by `---` lines.
const FRONT_MATTER_DELIMITER: &str = r"(?sm)^---\s*$.+?^---\s*$";

/// A named, ordered group of resolved documents.
#[derive(Debug, Serialize)]
pub struct Collection {
    /// Collection name, unique within the site config.
    pub name: String,
    /// The configuration shared by every document in this collection.
    pub config: CollectionConfig,
    /// Documents, descending by date (most recent first).
    pub documents: Vec<ResolvedDocument>,
}

/// A document that failed to resolve, with its structured error.
#[derive(Debug)]
pub struct SkippedDocument {
    /// Source path relative to the site root.
    pub path: PathBuf,
    /// Collection the document belonged to.
    pub collection: String,
    /// Why resolution failed.
    pub error: DocumentError,
}

/// Result of an assembly run: all collections plus skip diagnostics.
#[derive(Debug)]
pub struct Assembly {
    /// Collection name → assembled collection.
    pub collections: BTreeMap<String, Collection>,
    /// Documents that failed to resolve, in discovery order.
    pub skipped: Vec<SkippedDocument>,
}

impl Assembly {
    /// Total resolved documents across all collections.
    pub fn document_count(&self) -> usize {
        self.collections.values().map(|c| c.documents.len()).sum()
    }
}

/// Assemble every configured collection under `root`.
///
/// No configured collections yields an empty assembly, not an error. IO and
/// traversal failures are collection-level errors; per-document failures
/// land in [`Assembly::skipped`].
pub fn assemble(
    root: &Path,
    site: &SiteConfig,
    renderer: &Renderer,
) -> Result<Assembly, AssembleError> {
    let delimiter =
        Regex::new(FRONT_MATTER_DELIMITER).expect("front matter delimiter pattern must compile");

    let mut collections = BTreeMap::new();
    let mut skipped = Vec::new();

    for (name, config) in &site.collections {
        let files = finder::find(root, &format!("_{name}"), &delimiter).map_err(|source| {
            AssembleError::Finder {
                collection: name.clone(),
                source,
            }
        })?;

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            match Document::new(file, config, site).resolve(renderer) {
                Ok(doc) => documents.push(doc),
                Err(error) => skipped.push(SkippedDocument {
                    path: file.path.clone(),
                    collection: name.clone(),
                    error,
                }),
            }
        }

        // Stable sort: descending date, then ascending basename. Dateless
        // documents (date None < any Some) end up last.
        documents.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.basename.cmp(&b.basename)));

        collections.insert(
            name.clone(),
            Collection {
                name: name.clone(),
                config: config.clone(),
                documents,
            },
        );
    }

    Ok(Assembly {
        collections,
        skipped,
    })
}
