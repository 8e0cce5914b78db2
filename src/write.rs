//! Output writing: materialize resolved documents to disk.
//!
//! The document URL determines its file location under the output root:
//!
//! - `/2020/05/01/hello/` → `2020/05/01/hello/index.html` (directory-style
//!   URLs get an index file, so plain file servers serve them as-is)
//! - `/feed.xml` → `feed.xml` (an explicit extension is kept)
//! - `/about` → `about.html` (extensionless file URLs get `.html`)
//!
//! The rendered HTML content is the file body. Intermediate directories are
//! created as needed.

use crate::collection::Assembly;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map a document URL to its file path under the output root.
pub fn output_file(output: &Path, url: &str) -> PathBuf {
    let rel = url.trim_start_matches('/');
    if rel.is_empty() || url.ends_with('/') {
        return output.join(rel).join("index.html");
    }
    let path = output.join(rel);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("html")
    }
}

/// Write every resolved document in the assembly to the output directory.
///
/// Returns the number of files written.
pub fn write_site(assembly: &Assembly, output: &Path) -> Result<usize, WriteError> {
    let mut written = 0;
    for collection in assembly.collections.values() {
        for doc in &collection.documents {
            let path = output_file(output, &doc.url);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &doc.content)?;
            written += 1;
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::assemble;
    use crate::config::{CollectionConfig, SiteConfig};
    use crate::render::Renderer;
    use tempfile::TempDir;

    // =========================================================================
    // output_file() tests
    // =========================================================================

    #[test]
    fn directory_url_gets_index_html() {
        let path = output_file(Path::new("dist"), "/2020/05/01/hello/");
        assert_eq!(path, PathBuf::from("dist/2020/05/01/hello/index.html"));
    }

    #[test]
    fn root_url_is_top_level_index() {
        let path = output_file(Path::new("dist"), "/");
        assert_eq!(path, PathBuf::from("dist/index.html"));
    }

    #[test]
    fn file_url_with_extension_kept() {
        let path = output_file(Path::new("dist"), "/feed.xml");
        assert_eq!(path, PathBuf::from("dist/feed.xml"));
    }

    #[test]
    fn extensionless_file_url_gets_html() {
        let path = output_file(Path::new("dist"), "/about");
        assert_eq!(path, PathBuf::from("dist/about.html"));
    }

    // =========================================================================
    // write_site() tests
    // =========================================================================

    #[test]
    fn writes_documents_at_their_urls() {
        let site_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();

        let posts = site_dir.path().join("_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("2020-05-01-hello.md"),
            "---\ntitle: Hello\n---\n# Hello\n",
        )
        .unwrap();

        let mut site = SiteConfig::default();
        site.collections
            .insert("posts".to_string(), CollectionConfig::default());
        let renderer = Renderer::new(&site);
        let assembly = assemble(site_dir.path(), &site, &renderer).unwrap();

        let written = write_site(&assembly, out_dir.path()).unwrap();
        assert_eq!(written, 1);

        let page = out_dir.path().join("2020/05/01/hello/index.html");
        let html = fs::read_to_string(page).unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
    }

    #[test]
    fn empty_assembly_writes_nothing() {
        let site_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();

        let site = SiteConfig::default();
        let renderer = Renderer::new(&site);
        let assembly = assemble(site_dir.path(), &site, &renderer).unwrap();

        let written = write_site(&assembly, out_dir.path()).unwrap();
        assert_eq!(written, 0);
    }
}
