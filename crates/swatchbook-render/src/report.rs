//! Row/table/document assembly.
//!
//! The assembler composes dispatcher output into tables (one per
//! classification bucket, with captions and anchors), a table of contents,
//! and the final self-contained HTML document. Structure lives in minijinja
//! templates; the template names carry `.html` so the engine's default
//! auto-escaping covers keys and captions, while the dispatcher's
//! pre-escaped cell fragments pass through `| safe`.
//!
//! [`generate_report`] is the one-shot entry point: it owns the run; report
//! directory creation, the run-scoped [`ImageStore`], classification,
//! rendering every row, and writing the document exactly once.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{context, Environment};
use serde::Serialize;
use tracing::info;

use crate::classify::{classify, BucketPolicy};
use crate::dispatch::render_value;
use crate::error::ReportError;
use crate::store::ImageStore;
use crate::value::Dictionary;

/// File name of the generated document inside the report directory.
pub const REPORT_FILE: &str = "defaults.html";

const TABLE_TEMPLATE: &str = r#"<table>
<caption id="{{ table.anchor }}">{{ table.caption }}</caption>
<thead><tr><th>Key</th><th>Value</th><th>Preview</th></tr></thead>
<tbody>
{% for row in table.rows %}<tr><td><code>{{ row.key }}</code></td>{{ row.cells | safe }}</tr>
{% endfor %}</tbody>
</table>
"#;

const TOC_TEMPLATE: &str = r##"<nav>
<ul>
{% for table in tables %}<li><a href="#{{ table.anchor }}">{{ table.caption }}</a></li>
{% endfor %}<li><a href="#note">About the markers</a></li>
</ul>
</nav>
"##;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en-US">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width">
<title>{{ title }}</title>
<style>
body { font-family: system-ui, sans-serif; margin: 1.5rem; }
table { border-collapse: collapse; margin: 1.5rem 0; }
caption { font-weight: bold; text-align: left; padding: 0.5rem 0; }
th, td { border: 1px solid #ccc; padding: 0.25rem 0.5rem; vertical-align: top; }
th { background: #eee; text-align: left; }
img { vertical-align: middle; }
em.skip-paint { color: #b00020; font-style: normal; font-weight: bold; }
em.deferred { color: #555; }
footer { margin-top: 2rem; border-top: 1px solid #ccc; font-size: 0.9rem; }
</style>
</head>
<body>
<hgroup id="title">
<h1>{{ title }}</h1>
<p>browsing the defaults dictionary of one theme.</p>
</hgroup>
<header>
<figure>
<figcaption>{{ theme_name }}</figcaption>
{% include "toc.html" %}
</figure>
</header>
<main>
{% for table in tables %}{% include "table.html" %}
{% endfor %}</main>
<footer id="note">
<p><em class="deferred">deferred</em> marks an entry whose displayed value was
resolved from a deferred factory at report time; hover the marker for the
factory's own description.</p>
<p><em class="skip-paint">skip paint</em> marks a preview whose paint attempt
failed at runtime; the image shows whatever was drawn before the failure.</p>
</footer>
</body>
</html>
"#;

#[derive(Serialize)]
struct RowContext {
    key: String,
    /// Pre-escaped `<td>` fragments from the dispatcher.
    cells: String,
}

#[derive(Serialize)]
struct TableContext {
    caption: String,
    anchor: String,
    rows: Vec<RowContext>,
}

fn environment() -> Result<Environment<'static>, ReportError> {
    let mut env = Environment::new();
    env.add_template("toc.html", TOC_TEMPLATE)?;
    env.add_template("table.html", TABLE_TEMPLATE)?;
    env.add_template("document.html", DOCUMENT_TEMPLATE)?;
    Ok(env)
}

/// Derives a fragment anchor from a table caption.
fn slug(caption: &str) -> String {
    let mut out = String::with_capacity(caption.len());
    let mut pending_dash = false;
    for ch in caption.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Generates the full report for one dictionary.
///
/// Writes `<output_root>/<theme_name>/defaults.html` plus the image
/// artifacts the rows produce, and returns the document path. The document
/// is written exactly once, at the end, so a fatal error never leaves a
/// half-written report behind.
///
/// # Errors
///
/// An empty dictionary is refused ([`ReportError::EmptyDefaults`]); there is
/// no partial report in that case. Directory creation, template rendering
/// and the final write surface as [`ReportError`] too. Per-entry paint
/// failures do not: those degrade to marked cells.
pub fn generate_report(
    defaults: &Dictionary,
    theme_name: &str,
    output_root: &Path,
    policy: &dyn BucketPolicy,
) -> Result<PathBuf, ReportError> {
    if defaults.is_empty() {
        return Err(ReportError::EmptyDefaults);
    }

    let report_dir = output_root.join(theme_name);
    fs::create_dir_all(&report_dir)?;
    let mut store = ImageStore::new(&report_dir);

    let mut tables = Vec::new();
    for bucket in classify(defaults, policy) {
        let rows = bucket
            .entries
            .iter()
            .map(|(key, value)| RowContext {
                key: (*key).to_string(),
                cells: render_value(key, value, defaults, &mut store).cells,
            })
            .collect();
        tables.push(TableContext {
            anchor: slug(&bucket.name),
            caption: bucket.name,
            rows,
        });
    }

    let env = environment()?;
    let html = env.get_template("document.html")?.render(context! {
        title => "Theme defaults browser",
        theme_name => theme_name,
        tables => tables,
    })?;

    let path = report_dir.join(REPORT_FILE);
    fs::write(&path, html)?;
    info!(path = %path.display(), "wrote report");
    Ok(path)
}
