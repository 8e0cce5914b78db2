//! Permalink pattern resolution.
//!
//! A permalink pattern is a path template containing recognized tokens that
//! describe where a document lives in the generated site:
//!
//! | Token         | Replacement                                  |
//! |---------------|----------------------------------------------|
//! | `:year`       | 4-digit year from the document date          |
//! | `:month`      | 2-digit zero-padded month                    |
//! | `:day`        | 2-digit zero-padded day                      |
//! | `:hour`       | 2-digit zero-padded hour (always `00`)       |
//! | `:title`      | the document slug                            |
//! | `:slug`       | the document slug                            |
//! | `:categories` | front-matter `categories` joined with `/`    |
//!
//! Resolution runs in two passes: date tokens first, then name tokens over
//! the already-substituted string. Both passes are literal replacement of
//! the exact token text; anything outside the recognized set passes through
//! verbatim, so `/:weird/:year/` with date 2020-05-01 becomes `/:weird/2020/`.
//!
//! Date tokens on a document without a date are left unresolved rather than
//! substituted with a fake "now" — a dateless document with a dated pattern
//! is a content problem the caller can detect by the remaining `:` tokens.
//!
//! The resolved string is the document's output path. The public URL is the
//! same string with runs of `/` collapsed to one, since naive substitution
//! (an empty pattern segment, or a pattern like `/blog//:slug/`) can produce
//! doubled separators.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PermalinkError {
    #[error("permalink pattern '{pattern}' references :{field} but front matter has no {field} list")]
    MissingField { pattern: String, field: String },
    #[error("front matter {field} must be a list of scalars")]
    InvalidField { field: String },
}

/// Date tokens, replaced in the first pass when the document has a date.
const DATE_TOKENS: &[&str] = &[":year", ":month", ":day", ":hour"];

/// Name tokens, replaced in the second pass over the date-substituted string.
const NAME_TOKENS: &[&str] = &[":title", ":categories", ":slug"];

/// Resolve a permalink pattern into an output path.
///
/// `categories` are the document's front-matter categories, if any. They are
/// only required when the pattern actually references `:categories`; a
/// pattern that does while `categories` is `None` is a
/// [`PermalinkError::MissingField`], never an empty path segment.
pub fn resolve(
    pattern: &str,
    date: Option<NaiveDate>,
    slug: &str,
    categories: Option<&[String]>,
) -> Result<String, PermalinkError> {
    let mut path = pattern.to_string();

    // Date pass. Files carry only YYYY-MM-DD, so :hour is always midnight.
    if let Some(date) = date
        && DATE_TOKENS.iter().any(|t| path.contains(t))
    {
        path = path.replace(":year", &date.format("%Y").to_string());
        path = path.replace(":month", &date.format("%m").to_string());
        path = path.replace(":day", &date.format("%d").to_string());
        path = path.replace(":hour", "00");
    }

    // Name pass, over the string as substituted by the date pass.
    if NAME_TOKENS.iter().any(|t| path.contains(t)) {
        if path.contains(":categories") {
            let categories = categories.ok_or_else(|| PermalinkError::MissingField {
                pattern: pattern.to_string(),
                field: "categories".to_string(),
            })?;
            path = path.replace(":categories", &categories.join("/"));
        }
        path = path.replace(":title", slug);
        path = path.replace(":slug", slug);
    }

    Ok(path)
}

/// Collapse runs of `/` into a single separator.
///
/// Used when deriving the public URL from an output path. `/a//b///c/`
/// becomes `/a/b/c/`.
pub fn collapse_separators(path: &str) -> String {
    let mut url = String::with_capacity(path.len());
    let mut prev_sep = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_sep {
                url.push('/');
            }
            prev_sep = true;
        } else {
            url.push(c);
            prev_sep = false;
        }
    }
    url
}
