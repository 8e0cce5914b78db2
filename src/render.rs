//! Content rendering: template evaluation and Markdown conversion.
//!
//! A document body is not plain Markdown — it may contain template
//! directives that reference the document and the site:
//!
//! ```text
//! ---
//! title: Hello
//! ---
//! Welcome to {{ site.title }}. This post lives at {{ page.url }}.
//! ```
//!
//! Rendering is two steps, in order:
//!
//! 1. **Template pass**: the body is evaluated with minijinja against a
//!    context of `page`, `post` (an alias of `page`, matching the
//!    convention blog templates expect), and `site`.
//! 2. **Markdown pass**: the expanded text is converted to HTML with
//!    pulldown-cmark.
//!
//! The `page` value exposes the document's public surface: `title`, `slug`,
//! `url`, `path`, `date` (RFC 3339), and every front-matter field by name.
//!
//! One custom filter is registered, `highlight`, which wraps its input in a
//! `<pre><code class="language-...">` block:
//!
//! ```text
//! {{ "fn main() {}" | highlight("rust") }}
//! ```

use crate::config::SiteConfig;
use minijinja::{Environment, Value, context};
use pulldown_cmark::{Parser, html as md_html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Template engine plus Markdown converter, shared across all documents in
/// an assembly run.
pub struct Renderer {
    env: Environment<'static>,
    site: Value,
}

impl Renderer {
    /// Create a renderer for a site. The site config is serialized once and
    /// exposed to every body as `site`.
    pub fn new(site: &SiteConfig) -> Self {
        let mut env = Environment::new();
        env.add_filter("highlight", highlight);
        Self {
            env,
            site: Value::from_serialize(site),
        }
    }

    /// Evaluate `body` as a template with the given page context, then
    /// convert the result from Markdown to HTML.
    pub fn render_body(&self, body: &str, page: Value) -> Result<String, RenderError> {
        let expanded = self.env.render_str(
            body,
            context! {
                page => page.clone(),
                post => page,
                site => self.site.clone(),
            },
        )?;

        let parser = Parser::new(&expanded);
        let mut html = String::new();
        md_html::push_html(&mut html, parser);
        Ok(html)
    }
}

/// Wrap code in a language-tagged `<pre><code>` block with HTML escaping.
fn highlight(code: String, lang: Option<String>) -> String {
    let escaped = escape_html(&code);
    match lang {
        Some(lang) => format!("<pre><code class=\"language-{lang}\">{escaped}</code></pre>"),
        None => format!("<pre><code>{escaped}</code></pre>"),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
