//! Front matter parsing and body splitting.
//!
//! Content files open with a metadata block bounded by `---` lines:
//!
//! ```text
//! ---
//! title: Hello World
//! categories: [tech, news]
//! ---
//! The body starts here.
//! ```
//!
//! The block is YAML, parsed into an open [`Mapping`] rather than a fixed
//! struct: documents carry arbitrary keys that stay reachable through the
//! generic attribute lookup on a resolved document.
//!
//! A file with no block at all yields an empty mapping and the full contents
//! as body. A block that opens but never closes, or closes around YAML that
//! does not parse, is a typed error — never silently-partial data.

use serde_yaml::Mapping;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatterError {
    #[error("unclosed front matter block: missing closing ---")]
    Unclosed,
    #[error("invalid YAML in front matter: {0}")]
    InvalidYaml(String),
    #[error("front matter must be a key/value mapping")]
    NotAMapping,
}

/// Split raw contents into the front-matter source and the body.
///
/// Returns `(yaml, body)` where `yaml` is `None` when the file carries no
/// front-matter block.
fn split(contents: &str) -> Result<(Option<&str>, &str), MatterError> {
    let trimmed = contents.trim_start();
    let Some((first, rest)) = trimmed.split_once('\n') else {
        return Ok((None, contents));
    };
    if first.trim_end() != "---" {
        return Ok((None, contents));
    }

    // Only a full `---` line closes the block. A `----` key or a `---`
    // embedded mid-line stays inside the front matter.
    let mut consumed = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = rest[..consumed].trim();
            let body = &rest[consumed + line.len()..];
            return Ok((Some(yaml), body.trim_start_matches(['\r', '\n'])));
        }
        consumed += line.len();
    }
    Err(MatterError::Unclosed)
}

/// Parse the front-matter block from raw file contents.
///
/// Keys are unique (YAML mapping semantics); insertion order is preserved by
/// `serde_yaml` but irrelevant to callers.
pub fn front_matter(contents: &str) -> Result<Mapping, MatterError> {
    let (yaml, _) = split(contents)?;
    let Some(yaml) = yaml else {
        return Ok(Mapping::new());
    };
    if yaml.is_empty() {
        return Ok(Mapping::new());
    }
    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| MatterError::InvalidYaml(e.to_string()))?;
    match value {
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        _ => Err(MatterError::NotAMapping),
    }
}

/// Return the body text with the front-matter block removed.
pub fn body(contents: &str) -> Result<&str, MatterError> {
    let (_, body) = split(contents)?;
    Ok(body)
}
