//! Output formatting for comparison results

use crate::compare::{ComparisonResult, DiffReport};
use crate::error::Result;
use crate::reconcile::{ReconciliationReport, SheetEntry, SheetStatus};
use crate::render::{escape_html, render_ansi, render_plain_text};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Tree-style text report for the terminal
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Structural report followed by one diff block per matched sheet
    pub fn format_result(result: &ComparisonResult, color: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🔍 Comparing {} → {}", result.old_id, result.new_id);
        out.push_str(&Self::format_reconciliation(&result.reconciliation));

        for sheet in &result.sheets {
            out.push('\n');
            out.push_str(&Self::format_sheet(sheet, color));
        }
        out
    }

    pub fn format_reconciliation(report: &ReconciliationReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "📑 Sheets");

        for entry in &report.entries {
            let _ = writeln!(out, "├─ {}", Self::describe_entry(entry));
        }

        if report.same_set && report.same_order {
            let _ = writeln!(out, "└─ ✅ Same sheet names in the same order");
        } else if report.same_set {
            let _ = writeln!(out, "└─ ❌ Same sheet names, different order");
        } else {
            let _ = writeln!(out, "└─ ❌ Sheet names differ: {}", report.summary());
        }
        out
    }

    pub fn format_sheet(sheet: &DiffReport, color: bool) -> String {
        let mut out = String::new();
        if sheet.has_changes() {
            let _ = writeln!(
                out,
                "📄 {} (+{} / -{} chars)",
                sheet.sheet_name,
                sheet.inserted_chars(),
                sheet.deleted_chars()
            );
        } else {
            let _ = writeln!(out, "📄 {} (unchanged)", sheet.sheet_name);
        }

        if color {
            out.push_str(&render_ansi(&sheet.ops));
        } else {
            out.push_str(&render_plain_text(&sheet.ops));
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    fn describe_entry(entry: &SheetEntry) -> String {
        match entry.status {
            SheetStatus::MatchedSamePosition => {
                format!("✅ {} exists in both spreadsheets", entry.name)
            }
            SheetStatus::MatchedDifferentPosition => format!(
                "🔀 {} moved (position {} → {})",
                entry.name,
                display_position(entry.old_index),
                display_position(entry.new_index)
            ),
            SheetStatus::OnlyInOld => format!("➖ {} only in old", entry.name),
            SheetStatus::OnlyInNew => format!("➕ {} only in new", entry.name),
        }
    }
}

fn display_position(index: Option<usize>) -> String {
    index.map_or_else(|| "-".to_string(), |i| (i + 1).to_string())
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Standalone HTML page with the structural report and highlighted diffs
pub struct HtmlFormatter;

const PAGE_STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:4px 8px}\
pre{white-space:pre-wrap;background:#fafafa;padding:1em;border:1px solid #eee}\
ins.diff-insert{background:#e6ffe6;text-decoration:none}\
del.diff-delete{background:#ffe6e6}";

impl HtmlFormatter {
    pub fn format_page(result: &ComparisonResult, generated: DateTime<Utc>) -> String {
        let mut out = String::new();
        let title = format!("Comparing {} and {}", result.old_id, result.new_id);

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_html(&title));
        let _ = writeln!(out, "<style>{}</style>", PAGE_STYLE);
        out.push_str("</head>\n<body>\n");
        let _ = writeln!(out, "<h1>{}</h1>", escape_html(&title));
        let _ = writeln!(
            out,
            "<p class=\"generated\">Generated {}</p>",
            generated.format("%Y-%m-%d %H:%M:%S UTC")
        );

        out.push_str(&Self::format_reconciliation(&result.reconciliation));

        for sheet in &result.sheets {
            let _ = writeln!(
                out,
                "<h2>{}</h2>\n<pre class=\"diff\">{}</pre>",
                escape_html(&sheet.sheet_name),
                sheet.markup()
            );
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn format_reconciliation(report: &ReconciliationReport) -> String {
        let mut out = String::new();
        out.push_str("<table class=\"reconciliation\">\n");
        out.push_str("<tr><th>Sheet</th><th>Status</th><th>Old position</th><th>New position</th></tr>\n");
        for entry in &report.entries {
            let status = match entry.status {
                SheetStatus::MatchedSamePosition => "matched",
                SheetStatus::MatchedDifferentPosition => "moved",
                SheetStatus::OnlyInOld => "only in old",
                SheetStatus::OnlyInNew => "only in new",
            };
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&entry.name),
                status,
                display_position(entry.old_index),
                display_position(entry.new_index)
            );
        }
        out.push_str("</table>\n");
        let _ = writeln!(
            out,
            "<p class=\"summary\">Same set: {}, same order: {}</p>",
            report.same_set, report.same_order
        );
        out
    }
}
