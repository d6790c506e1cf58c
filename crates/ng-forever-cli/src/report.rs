//! HTML report export.
//!
//! Generates a standalone HTML document from a scan result and writes it
//! into the scanned directory. Export is best-effort: the caller logs
//! failures and the scan result itself is unaffected.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use ng_forever_core::ScanResult;

/// File name of the exported report.
pub const REPORT_FILE_NAME: &str = "ng-forever-report.html";

const HTML_HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>ng-forever report</title>
<style>
    body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem auto; max-width: 60rem; color: #1f2328; }
    h1 { border-bottom: 1px solid #d1d9e0; padding-bottom: .3rem; }
    table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
    th, td { border: 1px solid #d1d9e0; padding: .4rem .6rem; text-align: left; }
    th { background: #f6f8fa; }
    code { background: #f6f8fa; padding: .1rem .3rem; border-radius: 3px; font-size: .9em; }
    .summary { color: #59636e; }
    .clean { color: #1a7f37; }
    ul.suggestions { background: #f6f8fa; padding: .8rem 2rem; border-radius: 6px; }
</style>
</head>
<body>
<h1>ng-forever report</h1>
"#;

const HTML_FOOTER: &str = "</body>\n</html>\n";

/// Renders the full report document.
#[must_use]
pub fn render(result: &ScanResult) -> String {
    let mut output = String::from(HTML_HEADER);

    let _ = writeln!(
        output,
        "<p class=\"summary\">{} issue(s) &middot; {} file(s) scanned &middot; {} director(ies) &middot; {} error(s)</p>",
        result.total_issues(),
        result.stats.files_scanned,
        result.stats.directories_scanned,
        result.stats.errors
    );

    for (index, report) in result.reports.iter().enumerate() {
        let _ = writeln!(
            output,
            "<h2>{}. {}</h2>",
            index + 1,
            html_escape(&report.rule)
        );

        if report.issues.is_empty() {
            output.push_str("<p class=\"clean\">No issues found.</p>\n");
            continue;
        }

        output.push_str("<table>\n<tr><th>#</th><th>File</th><th>Line</th><th>Code</th></tr>\n");
        for (n, issue) in report.issues.iter().enumerate() {
            let _ = writeln!(
                output,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td><code>{}</code></td></tr>",
                n + 1,
                html_escape(&issue.file.display().to_string()),
                issue.line,
                html_escape(&issue.code)
            );
        }
        output.push_str("</table>\n");

        if let Some(fix) = &report.fix_suggestion {
            let _ = writeln!(output, "<h3>{}</h3>", html_escape(&fix.description));
            output.push_str("<ul class=\"suggestions\">\n");
            for step in &fix.suggestions {
                let _ = writeln!(output, "<li>{}</li>", html_escape(step));
            }
            output.push_str("</ul>\n");
        }
    }

    output.push_str(HTML_FOOTER);
    output
}

/// Renders the report and writes it into `dir`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_html(result: &ScanResult, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(REPORT_FILE_NAME);
    std::fs::write(&path, render(result))?;
    Ok(path)
}

/// Escapes the five HTML-significant characters.
fn html_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
