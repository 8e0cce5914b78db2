//! Document resolution — the core of the pipeline.
//!
//! A [`Document`] pairs a discovered source file with its collection's
//! configuration. Calling [`Document::resolve`] computes everything the
//! rest of the system needs, exactly once, in dependency order:
//!
//! ```text
//! date → slug → front matter → output path → rendered content
//! ```
//!
//! and returns an immutable [`ResolvedDocument`]. There are no lazy fields
//! to race on or access out of order: the output path can only see a
//! document whose date, slug, and front matter already exist, and every
//! accessor afterwards returns the same stored value.
//!
//! ## Date and slug
//!
//! Both derive from the basename alone, never from file contents:
//!
//! - `2020-05-01-hello-world.md` → date 2020-05-01, slug `hello-world`
//! - `notes.md` → no date, slug `notes`
//!
//! The date is the first 10 characters parsed as `YYYY-MM-DD`. When they
//! parse, the slug is the filename stem minus the 11-character
//! date-plus-separator prefix; otherwise the slug is the whole stem. An
//! unparseable prefix means "no date" — never an error, and never silently
//! "now".
//!
//! ## Attribute lookup
//!
//! [`ResolvedDocument::get`] gives templates and callers a single dynamic
//! accessor with a fixed precedence: `date` (RFC 3339, absent date is a
//! typed error), then dedicated accessors (`title`, `slug`, `url`, `path`,
//! `content`, `front_matter`, `file`, `permalink`), then raw front-matter
//! keys, then a defined `None`. Dedicated accessors shadow front-matter
//! fields of the same name so computed semantics can't be hijacked by a
//! stray metadata key — except `title`, whose contract is exactly "read
//! from front matter".

use crate::config::{CollectionConfig, SiteConfig};
use crate::finder::SourceFile;
use crate::matter::{self, MatterError};
use crate::permalink::{self, PermalinkError};
use crate::render::{RenderError, Renderer};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("front matter error: {0}")]
    FrontMatter(#[from] MatterError),
    #[error("permalink error: {0}")]
    Permalink(#[from] PermalinkError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("document '{basename}' has no parseable date prefix")]
    MissingDate { basename: String },
}

/// An unresolved content file: a borrowed source plus the configuration of
/// the collection it belongs to.
///
/// The source file is owned by the finder's snapshot; documents only borrow
/// it. Resolution produces a fully owned [`ResolvedDocument`].
pub struct Document<'a> {
    source: &'a SourceFile,
    config: &'a CollectionConfig,
    site: &'a SiteConfig,
}

impl<'a> Document<'a> {
    pub fn new(source: &'a SourceFile, config: &'a CollectionConfig, site: &'a SiteConfig) -> Self {
        Self {
            source,
            config,
            site,
        }
    }

    /// Resolve this document: date, slug, front matter, output path, URL,
    /// and rendered content, in that order.
    ///
    /// Errors are per-document and recoverable at the assembly level: a bad
    /// front-matter block or a permalink referencing a missing field fails
    /// this document only.
    pub fn resolve(&self, renderer: &Renderer) -> Result<ResolvedDocument, DocumentError> {
        let date = date_prefix(&self.source.basename);
        let slug = derive_slug(file_stem(&self.source.basename), date.is_some());
        let front_matter = matter::front_matter(&self.source.contents)?;

        let pattern = self.site.effective_permalink(self.config);
        let categories = if pattern.contains(":categories") {
            categories_list(&front_matter)?
        } else {
            None
        };
        let path = permalink::resolve(pattern, date, &slug, categories.as_deref())?;
        let url = permalink::collapse_separators(&path);

        // Content comes last: the template context exposes everything
        // resolved above.
        let page = page_context(date, &slug, &url, &path, &front_matter);
        let body = matter::body(&self.source.contents)?;
        let content = renderer.render_body(body, page)?;

        Ok(ResolvedDocument {
            source_path: self.source.path.clone(),
            basename: self.source.basename.clone(),
            date,
            slug,
            front_matter,
            permalink: pattern.to_string(),
            path,
            url,
            content,
        })
    }
}

/// A fully resolved document. Immutable; every accessor returns the value
/// computed during [`Document::resolve`].
///
/// All fields are owned, so resolved documents can be freely shared across
/// threads after resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDocument {
    /// Source file path, relative to the site root.
    pub source_path: PathBuf,
    /// Source basename, e.g. `2020-05-01-hello-world.md`.
    pub basename: String,
    /// Date from the basename prefix, if it parsed.
    pub date: Option<NaiveDate>,
    /// URL-safe identifier derived from the basename.
    pub slug: String,
    /// Front-matter mapping; arbitrary keys, unique.
    pub front_matter: Mapping,
    /// The permalink pattern this document was resolved against.
    pub permalink: String,
    /// Output path: the pattern with tokens substituted.
    pub path: String,
    /// Public URL: the path with duplicate separators collapsed.
    pub url: String,
    /// Rendered HTML content (template pass + Markdown pass).
    pub content: String,
}

impl ResolvedDocument {
    /// Title from front matter, if present.
    pub fn title(&self) -> Option<&Value> {
        self.front_matter.get("title")
    }

    /// The resolved date formatted per RFC 3339 (midnight UTC; basenames
    /// carry no time component). A dateless document is a typed error.
    pub fn date_rfc3339(&self) -> Result<String, DocumentError> {
        let date = self.date.ok_or_else(|| DocumentError::MissingDate {
            basename: self.basename.clone(),
        })?;
        Ok(rfc3339(date))
    }

    /// Generic attribute lookup with fixed precedence.
    ///
    /// 1. `date` → RFC 3339 string (absent date is an error).
    /// 2. A dedicated accessor, if one exists for `name`.
    /// 3. A front-matter key equal to `name`.
    /// 4. `Ok(None)` — a defined absent result, not an error.
    pub fn get(&self, name: &str) -> Result<Option<Value>, DocumentError> {
        match name {
            "date" => Ok(Some(Value::String(self.date_rfc3339()?))),
            "title" => Ok(self.title().cloned()),
            "slug" => Ok(Some(Value::String(self.slug.clone()))),
            "url" => Ok(Some(Value::String(self.url.clone()))),
            "path" => Ok(Some(Value::String(self.path.clone()))),
            "content" => Ok(Some(Value::String(self.content.clone()))),
            "front_matter" => Ok(Some(Value::Mapping(self.front_matter.clone()))),
            "file" => Ok(Some(Value::String(
                self.source_path.to_string_lossy().into_owned(),
            ))),
            "permalink" => Ok(Some(Value::String(self.permalink.clone()))),
            _ => Ok(self.front_matter.get(name).cloned()),
        }
    }

    /// Rendered HTML content. Always the same string computed at resolve
    /// time.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Parse the first 10 characters of a basename as `YYYY-MM-DD`.
fn date_prefix(basename: &str) -> Option<NaiveDate> {
    let prefix = basename.get(0..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Filename stem: basename without the final extension.
fn file_stem(basename: &str) -> &str {
    Path::new(basename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(basename)
}

/// Slug from a stem: everything past the `YYYY-MM-DD-` prefix when a date
/// parsed, otherwise the whole stem.
fn derive_slug(stem: &str, has_date: bool) -> String {
    if has_date {
        stem.get(11..).unwrap_or("").to_string()
    } else {
        stem.to_string()
    }
}

/// Extract the front-matter `categories` list as strings.
///
/// `None` when the key is absent (the permalink resolver reports the
/// missing-field error); a present-but-not-a-list value is an error here.
fn categories_list(front_matter: &Mapping) -> Result<Option<Vec<String>>, PermalinkError> {
    let Some(value) = front_matter.get("categories") else {
        return Ok(None);
    };
    let Some(seq) = value.as_sequence() else {
        return Err(PermalinkError::InvalidField {
            field: "categories".to_string(),
        });
    };
    let mut categories = Vec::with_capacity(seq.len());
    for item in seq {
        match scalar_to_string(item) {
            Some(s) => categories.push(s),
            None => {
                return Err(PermalinkError::InvalidField {
                    field: "categories".to_string(),
                });
            }
        }
    }
    Ok(Some(categories))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Build the `page` template value: front-matter fields with the computed
/// attributes (`slug`, `url`, `path`, `date`) layered on top, so computed
/// semantics win over same-named metadata.
fn page_context(
    date: Option<NaiveDate>,
    slug: &str,
    url: &str,
    path: &str,
    front_matter: &Mapping,
) -> minijinja::Value {
    let mut map = front_matter.clone();
    map.insert("slug".into(), slug.into());
    map.insert("url".into(), url.into());
    map.insert("path".into(), path.into());
    if let Some(date) = date {
        map.insert("date".into(), rfc3339(date).into());
    }
    minijinja::Value::from_serialize(&map)
}

fn rfc3339(date: NaiveDate) -> String {
    NaiveDateTime::new(date, NaiveTime::MIN)
        .format("%Y-%m-%dT%H:%M:%S+00:00")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(basename: &str, contents: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(format!("_posts/{basename}")),
            basename: basename.to_string(),
            contents: contents.to_string(),
        }
    }

    fn resolve_with(
        basename: &str,
        contents: &str,
        site: &SiteConfig,
        config: &CollectionConfig,
    ) -> Result<ResolvedDocument, DocumentError> {
        let src = source(basename, contents);
        let renderer = Renderer::new(site);
        Document::new(&src, config, site).resolve(&renderer)
    }

    fn resolve(basename: &str, contents: &str) -> ResolvedDocument {
        let site = SiteConfig::default();
        let config = CollectionConfig::default();
        resolve_with(basename, contents, &site, &config).unwrap()
    }

    const HELLO: &str = "---\ntitle: Hello World\ncategories:\n  - tech\n  - news\n---\n# Hi\n\nBody.\n";

    // =========================================================================
    // Date and slug tests
    // =========================================================================

    #[test]
    fn date_and_slug_from_dated_basename() {
        let doc = resolve("2020-05-01-hello-world.md", HELLO);
        assert_eq!(doc.date, NaiveDate::from_ymd_opt(2020, 5, 1));
        assert_eq!(doc.slug, "hello-world");
    }

    #[test]
    fn no_date_prefix_falls_back_to_whole_stem() {
        let doc = resolve("notes.md", "---\ntitle: Notes\n---\nBody.");
        assert_eq!(doc.date, None);
        assert_eq!(doc.slug, "notes");
    }

    #[test]
    fn invalid_date_prefix_is_absent_not_error() {
        let doc = resolve("2020-13-99-bad-date.md", "---\nt: 1\n---\nBody.");
        assert_eq!(doc.date, None);
        assert_eq!(doc.slug, "2020-13-99-bad-date");
    }

    #[test]
    fn short_basename_has_no_date() {
        let doc = resolve("a.md", "---\nt: 1\n---\nBody.");
        assert_eq!(doc.date, None);
        assert_eq!(doc.slug, "a");
    }

    #[test]
    fn date_only_stem_gives_empty_slug() {
        let doc = resolve("2020-05-01.md", "---\nt: 1\n---\nBody.");
        assert_eq!(doc.date, NaiveDate::from_ymd_opt(2020, 5, 1));
        assert_eq!(doc.slug, "");
    }

    // =========================================================================
    // Path and URL tests
    // =========================================================================

    #[test]
    fn categories_pattern_resolves_full_path() {
        let site = SiteConfig::default();
        let config = CollectionConfig {
            permalink: Some("/:categories/:year/:month/:day/:title/".to_string()),
            ..Default::default()
        };
        let doc = resolve_with("2020-05-01-hello-world.md", HELLO, &site, &config).unwrap();
        assert_eq!(doc.path, "/tech/news/2020/05/01/hello-world/");
        assert_eq!(doc.url, "/tech/news/2020/05/01/hello-world/");
    }

    #[test]
    fn missing_categories_is_reported() {
        let site = SiteConfig::default();
        let config = CollectionConfig {
            permalink: Some("/:categories/:title/".to_string()),
            ..Default::default()
        };
        let err = resolve_with(
            "2020-05-01-post.md",
            "---\ntitle: No Cats\n---\nBody.",
            &site,
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Permalink(PermalinkError::MissingField { .. })
        ));
    }

    #[test]
    fn scalar_categories_is_reported() {
        let site = SiteConfig::default();
        let config = CollectionConfig {
            permalink: Some("/:categories/:title/".to_string()),
            ..Default::default()
        };
        let err = resolve_with(
            "2020-05-01-post.md",
            "---\ncategories: tech\n---\nBody.",
            &site,
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Permalink(PermalinkError::InvalidField { .. })
        ));
    }

    #[test]
    fn url_collapses_duplicate_separators() {
        let site = SiteConfig::default();
        let config = CollectionConfig {
            permalink: Some("/blog//:slug/".to_string()),
            ..Default::default()
        };
        let doc = resolve_with("2020-05-01-post.md", "---\nt: 1\n---\nBody.", &site, &config)
            .unwrap();
        assert_eq!(doc.path, "/blog//post/");
        assert_eq!(doc.url, "/blog/post/");
    }

    #[test]
    fn site_default_pattern_applies_without_override() {
        let doc = resolve("2020-05-01-hello.md", "---\nt: 1\n---\nBody.");
        assert_eq!(doc.path, "/2020/05/01/hello/");
        assert_eq!(doc.permalink, "/:year/:month/:day/:title/");
    }

    #[test]
    fn bad_front_matter_fails_resolution() {
        let site = SiteConfig::default();
        let config = CollectionConfig::default();
        let err = resolve_with(
            "2020-05-01-bad.md",
            "---\ntitle: [broken\n---\nBody.",
            &site,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, DocumentError::FrontMatter(_)));
    }

    // =========================================================================
    // Memoization tests
    // =========================================================================

    #[test]
    fn content_is_the_same_value_every_access() {
        let doc = resolve("2020-05-01-hello.md", HELLO);
        let first = doc.content();
        let second = doc.content();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn path_is_idempotent() {
        let doc = resolve("2020-05-01-hello.md", HELLO);
        assert!(std::ptr::eq(doc.path.as_str(), doc.path.as_str()));
        assert_eq!(doc.path, doc.path.clone());
    }

    // =========================================================================
    // Rendering tests
    // =========================================================================

    #[test]
    fn content_is_rendered_html() {
        let doc = resolve("2020-05-01-hello.md", HELLO);
        assert!(doc.content.contains("<h1>Hi</h1>"));
        assert!(!doc.content.contains("title: Hello World"));
    }

    #[test]
    fn body_templates_see_page_attributes() {
        let doc = resolve(
            "2020-05-01-hello.md",
            "---\ntitle: Hi\n---\nThis lives at {{ page.url }}.",
        );
        assert!(doc.content.contains("This lives at /2020/05/01/hello/."));
    }

    #[test]
    fn body_templates_see_front_matter_fields() {
        let doc = resolve(
            "2020-05-01-hello.md",
            "---\ntitle: Hi\nauthor: jo\n---\nBy {{ page.author }}.",
        );
        assert!(doc.content.contains("By jo."));
    }

    // =========================================================================
    // get() dispatch tests
    // =========================================================================

    #[test]
    fn get_date_returns_rfc3339() {
        let doc = resolve("2020-05-01-hello.md", HELLO);
        let date = doc.get("date").unwrap().unwrap();
        assert_eq!(date.as_str(), Some("2020-05-01T00:00:00+00:00"));
    }

    #[test]
    fn get_date_without_date_is_an_error() {
        let doc = resolve("notes.md", "---\nt: 1\n---\nBody.");
        assert!(matches!(
            doc.get("date"),
            Err(DocumentError::MissingDate { .. })
        ));
    }

    #[test]
    fn get_title_reads_front_matter() {
        let doc = resolve("2020-05-01-hello.md", HELLO);
        let title = doc.get("title").unwrap().unwrap();
        assert_eq!(title.as_str(), Some("Hello World"));
    }

    #[test]
    fn dedicated_accessor_shadows_front_matter() {
        // A front-matter `slug` must not override the computed slug.
        let doc = resolve(
            "2020-05-01-hello.md",
            "---\nslug: impostor\n---\nBody.",
        );
        let slug = doc.get("slug").unwrap().unwrap();
        assert_eq!(slug.as_str(), Some("hello"));
    }

    #[test]
    fn get_falls_back_to_front_matter_keys() {
        let doc = resolve("2020-05-01-hello.md", "---\nauthor: jo\n---\nBody.");
        let author = doc.get("author").unwrap().unwrap();
        assert_eq!(author.as_str(), Some("jo"));
    }

    #[test]
    fn get_unknown_is_none_not_error() {
        let doc = resolve("2020-05-01-hello.md", HELLO);
        assert!(doc.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn get_url_and_path() {
        let doc = resolve("2020-05-01-hello.md", HELLO);
        assert_eq!(
            doc.get("url").unwrap().unwrap().as_str(),
            Some("/2020/05/01/hello/")
        );
        assert_eq!(
            doc.get("path").unwrap().unwrap().as_str(),
            Some("/2020/05/01/hello/")
        );
    }

    #[test]
    fn get_file_returns_source_path() {
        let doc = resolve("2020-05-01-hello.md", HELLO);
        let file = doc.get("file").unwrap().unwrap();
        assert_eq!(file.as_str(), Some("_posts/2020-05-01-hello.md"));
    }
}
