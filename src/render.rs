//! Plain-text, terminal and markup renderings of an edit script

use crate::diff::{DiffKind, DiffOp};
use colored::Colorize;

pub const INSERT_OPEN: &str = "{+";
pub const INSERT_CLOSE: &str = "+}";
pub const DELETE_OPEN: &str = "[-";
pub const DELETE_CLOSE: &str = "-]";

/// Render with wdiff-style markers: `[-deleted-]` and `{+inserted+}`
pub fn render_plain_text(ops: &[DiffOp]) -> String {
    let mut out = String::new();
    for op in ops {
        match op.kind {
            DiffKind::Equal => out.push_str(&op.text),
            DiffKind::Insert => {
                out.push_str(INSERT_OPEN);
                out.push_str(&op.text);
                out.push_str(INSERT_CLOSE);
            }
            DiffKind::Delete => {
                out.push_str(DELETE_OPEN);
                out.push_str(&op.text);
                out.push_str(DELETE_CLOSE);
            }
        }
    }
    out
}

/// Render for a terminal: inserts green, deletes red
pub fn render_ansi(ops: &[DiffOp]) -> String {
    let mut out = String::new();
    for op in ops {
        match op.kind {
            DiffKind::Equal => out.push_str(&op.text),
            DiffKind::Insert => out.push_str(&op.text.green().to_string()),
            DiffKind::Delete => out.push_str(&op.text.red().to_string()),
        }
    }
    out
}

/// Render as inline HTML. Every span is escaped.
pub fn render_markup(ops: &[DiffOp]) -> String {
    let mut out = String::new();
    for op in ops {
        let (tag, class) = match op.kind {
            DiffKind::Equal => ("span", "diff-equal"),
            DiffKind::Insert => ("ins", "diff-insert"),
            DiffKind::Delete => ("del", "diff-delete"),
        };
        out.push('<');
        out.push_str(tag);
        out.push_str(" class=\"");
        out.push_str(class);
        out.push_str("\">");
        push_escaped(&mut out, &op.text);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    out
}

/// HTML-escape `text` onto `out`; newlines become a visible pilcrow and a break
pub fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("&para;<br>"),
            c => out.push(c),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}
