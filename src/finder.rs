//! File discovery for collection assembly.
//!
//! The finder answers one question: which files under the site root belong
//! to a collection? A match must satisfy both filters:
//!
//! - **Path**: the file lives under the collection's storage directory,
//!   `_<name>/`, directly below the site root (nested subdirectories are
//!   included).
//! - **Content**: the file contains a must-contain pattern — in practice
//!   the front-matter delimiter block, so stray files without metadata
//!   never become documents.
//!
//! Results are a finite snapshot: owned [`SourceFile`] handles carrying
//! basename, path, and full contents, sorted by path so assembly is
//! deterministic regardless of directory-iteration order. Documents borrow
//! these handles; the assembler owns the snapshot for the lifetime of a run.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A content file discovered by the finder.
///
/// `basename` is the final path component including extension; date and slug
/// derivation read it directly, so it is resolved once here.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the site root.
    pub path: PathBuf,
    /// Final path component, e.g. `2020-05-01-hello-world.md`.
    pub basename: String,
    /// Full raw contents, front matter included.
    pub contents: String,
}

/// Find files under `root` whose path starts with `dir` and whose contents
/// match `must_contain`.
///
/// `dir` is a single directory name relative to the root (e.g. `_posts`).
/// Hidden files are skipped, as are files that are not UTF-8 text (a stray
/// image next to the posts can never contain the delimiter block). IO
/// errors from traversal itself still surface as [`FinderError`].
pub fn find(root: &Path, dir: &str, must_contain: &Regex) -> Result<Vec<SourceFile>, FinderError> {
    let collection_dir = root.join(dir);
    if !collection_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&collection_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let basename = entry.file_name().to_string_lossy().to_string();
        if basename.starts_with('.') {
            continue;
        }

        let contents = match fs::read_to_string(entry.path()) {
            Ok(contents) => contents,
            // Binary content cannot match a text pattern; not a document.
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => continue,
            Err(e) => return Err(FinderError::Io(e)),
        };
        if !must_contain.is_match(&contents) {
            continue;
        }

        let path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        files.push(SourceFile {
            path,
            basename,
            contents,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
