//! # Plume
//!
//! A minimal static site generator for dated blog collections. Your
//! filesystem is the data source: each `_<collection>/` directory holds
//! date-prefixed content files (`2021-03-01-first-light.md`), and every
//! file's date, slug, output path, and rendered HTML derive from its
//! basename, front matter, and the collection's permalink pattern.
//!
//! # Architecture: Resolution Pipeline
//!
//! Assembly runs one pipeline per configured collection:
//!
//! ```text
//! config.toml → find files → resolve each document → sort → Collection
//!                               │
//!                               └─ date → slug → front matter → path → content
//! ```
//!
//! The heart of the system is [`document::Document::resolve`]: a one-time
//! step that computes every document attribute in dependency order and
//! returns an immutable [`document::ResolvedDocument`]. Nothing is
//! computed twice, nothing can be observed half-computed, and a resolved
//! document is freely shareable afterwards.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading and validation (collections, permalink patterns) |
//! | [`finder`] | Walks `_<collection>/` directories, filters on the front-matter delimiter |
//! | [`matter`] | Front-matter block parsing (YAML) and body splitting |
//! | [`document`] | Document resolution: date, slug, front matter, path, content |
//! | [`permalink`] | Permalink-token substitution and URL separator collapsing |
//! | [`render`] | Template pass (minijinja) + Markdown pass (pulldown-cmark) |
//! | [`collection`] | Per-collection assembly, ordering, and skip diagnostics |
//! | [`write`] | Materializes resolved documents under the output directory |
//! | [`output`] | CLI report formatting — the only module that prints |
//!
//! # Design Decisions
//!
//! ## Resolve Once, Then Immutable
//!
//! Attributes depend on each other: the output path needs the date, the
//! slug, and front matter; the rendered content needs all of those for its
//! template context. Rather than lazily memoizing each field (and inviting
//! out-of-order access and first-access races), resolution is a single
//! ordered step producing an immutable value. The at-most-once guarantee
//! holds by construction.
//!
//! ## Filename Is the Source of Truth for Date and Slug
//!
//! `2021-03-01-first-light.md` carries its own date and slug; front matter
//! cannot override them, and an unparseable prefix means "no date" — never
//! an error and never a silent "now". Dateless documents still resolve
//! (date permalink tokens stay verbatim) and sort after all dated ones.
//!
//! ## Failures Are Data
//!
//! A malformed front-matter block or a permalink referencing a missing
//! `categories` list fails that document only. The assembly collects the
//! skip with its typed error; sibling documents and other collections are
//! untouched, and nothing in the pipeline prints.
//!
//! ## Explicit Attribute Dispatch
//!
//! Templates and callers read document attributes through one accessor,
//! [`document::ResolvedDocument::get`], backed by a fixed match — not
//! reflection. Computed attributes (`slug`, `url`, `path`, `date`) shadow
//! same-named front-matter keys, so a stray `slug:` in metadata can't
//! change where a document lives.

pub mod collection;
pub mod config;
pub mod document;
pub mod finder;
pub mod matter;
pub mod output;
pub mod permalink;
pub mod render;
pub mod write;
