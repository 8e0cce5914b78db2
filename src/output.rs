//! CLI output formatting for assembly results.
//!
//! Output is information-centric: the primary display for every document is
//! its semantic identity — position, date, slug, and where it will live in
//! the generated site — with the source file shown as secondary context via
//! an indented `Source:` line.
//!
//! ```text
//! Collections
//! posts (3 documents)
//!     001 2021-03-01 first-light → /2021/03/01/first-light/
//!         Source: _posts/2021-03-01-first-light.md
//!     002 2021-02-01 thaw → /2021/02/01/thaw/
//!         Source: _posts/2021-02-01-thaw.md
//!
//! Skipped
//!     _posts/2021-01-05-broken.md (posts)
//!         front matter error: invalid YAML in front matter: ...
//! ```
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Nothing outside this
//! module prints; the pipeline itself only returns structured values.

use crate::collection::Assembly;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an assembly report: every collection with its documents in final
/// order, followed by skip diagnostics if any.
pub fn format_assembly_output(assembly: &Assembly) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Collections".to_string());
    if assembly.collections.is_empty() {
        lines.push(format!("{}(none configured)", indent(1)));
    }
    for collection in assembly.collections.values() {
        let noun = if collection.documents.len() == 1 {
            "document"
        } else {
            "documents"
        };
        lines.push(format!(
            "{} ({} {})",
            collection.name,
            collection.documents.len(),
            noun
        ));
        for (pos, doc) in collection.documents.iter().enumerate() {
            let date = doc
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "(no date)".to_string());
            lines.push(format!(
                "{}{} {} {} → {}",
                indent(1),
                format_index(pos + 1),
                date,
                doc.slug,
                doc.url
            ));
            lines.push(format!(
                "{}Source: {}",
                indent(2),
                doc.source_path.display()
            ));
        }
    }

    if !assembly.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skip in &assembly.skipped {
            lines.push(format!(
                "{}{} ({})",
                indent(1),
                skip.path.display(),
                skip.collection
            ));
            lines.push(format!("{}{}", indent(2), skip.error));
        }
    }

    lines
}

/// Print the assembly report to stdout.
pub fn print_assembly_output(assembly: &Assembly) {
    for line in format_assembly_output(assembly) {
        println!("{line}");
    }
}
