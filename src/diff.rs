//! Character-level diff with semantic cleanup
//!
//! The raw edit script comes from `similar` (Myers O(ND)), run first over
//! lines and then over characters inside each block of replaced lines.
//! Blocks too large for a character diff are split into row pairs, and a
//! row pair that is still too large is kept as a whole delete/insert. It is
//! then post-processed so that short coincidental equalities inside a larger
//! change are absorbed, which turns single-character noise into
//! whole-cell or whole-row edits. Every pass keeps the script valid:
//! Equal+Delete texts rebuild the old input, Equal+Insert the new one.

use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Equal,
    Insert,
    Delete,
}

/// One span of the edit script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffOp {
    pub fn equal(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Equal,
            text: text.into(),
        }
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Insert,
            text: text.into(),
        }
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Delete,
            text: text.into(),
        }
    }
}

/// Diff two strings at character granularity and clean the result up.
pub fn diff(old: &str, new: &str) -> Vec<DiffOp> {
    if old == new {
        return if old.is_empty() {
            Vec::new()
        } else {
            vec![DiffOp::equal(old)]
        };
    }

    let mut ops = raw_diff(old, new);
    cleanup_merge(&mut ops);
    cleanup_semantic(&mut ops);
    ops
}

/// Combined char count above which a replaced block is not diffed by char
const CHAR_DIFF_LIMIT: usize = 2_000;

/// Myers diff over lines, then over chars within replaced lines.
/// Adjacent changes of the same kind are coalesced.
pub fn raw_diff(old: &str, new: &str) -> Vec<DiffOp> {
    let line_diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(old, new);

    let mut ops: Vec<DiffOp> = Vec::new();
    let mut deleted = String::new();
    let mut inserted = String::new();
    for change in line_diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => {
                flush_replaced(&mut ops, &mut deleted, &mut inserted);
                push_span(&mut ops, DiffKind::Equal, change.value());
            }
            ChangeTag::Delete => deleted.push_str(change.value()),
            ChangeTag::Insert => inserted.push_str(change.value()),
        }
    }
    flush_replaced(&mut ops, &mut deleted, &mut inserted);
    ops
}

/// Emit one block of replaced lines and clear the buffers
fn flush_replaced(ops: &mut Vec<DiffOp>, deleted: &mut String, inserted: &mut String) {
    if deleted.is_empty() || inserted.is_empty() {
        push_span(ops, DiffKind::Delete, deleted);
        push_span(ops, DiffKind::Insert, inserted);
    } else if char_len(deleted) + char_len(inserted) <= CHAR_DIFF_LIMIT {
        char_diff_into(ops, deleted, inserted);
    } else {
        let old_lines: Vec<&str> = deleted.split_inclusive('\n').collect();
        let new_lines: Vec<&str> = inserted.split_inclusive('\n').collect();
        let paired = old_lines.len().min(new_lines.len());

        for (old_line, new_line) in old_lines.iter().zip(&new_lines) {
            if char_len(old_line) + char_len(new_line) <= CHAR_DIFF_LIMIT {
                char_diff_into(ops, old_line, new_line);
            } else {
                push_span(ops, DiffKind::Delete, old_line);
                push_span(ops, DiffKind::Insert, new_line);
            }
        }
        for line in &old_lines[paired..] {
            push_span(ops, DiffKind::Delete, line);
        }
        for line in &new_lines[paired..] {
            push_span(ops, DiffKind::Insert, line);
        }
    }
    deleted.clear();
    inserted.clear();
}

fn char_diff_into(ops: &mut Vec<DiffOp>, old: &str, new: &str) {
    let text_diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(old, new);

    for change in text_diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => DiffKind::Equal,
            ChangeTag::Insert => DiffKind::Insert,
            ChangeTag::Delete => DiffKind::Delete,
        };
        push_span(ops, kind, change.value());
    }
}

fn push_span(ops: &mut Vec<DiffOp>, kind: DiffKind, text: &str) {
    if text.is_empty() {
        return;
    }
    match ops.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => ops.push(DiffOp {
            kind,
            text: text.to_string(),
        }),
    }
}

/// Text of the old input: Equal and Delete spans in order
pub fn old_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.kind != DiffKind::Insert)
        .map(|op| op.text.as_str())
        .collect()
}

/// Text of the new input: Equal and Insert spans in order
pub fn new_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.kind != DiffKind::Delete)
        .map(|op| op.text.as_str())
        .collect()
}

/// Fold equalities that are no longer than the edits on both sides of
/// them into those edits.
pub fn cleanup_semantic(ops: &mut Vec<DiffOp>) {
    let mut changed = false;
    // Indices of equalities seen so far that may still be folded
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality_len: Option<usize> = None;
    let (mut ins_before, mut del_before) = (0usize, 0usize);
    let (mut ins_after, mut del_after) = (0usize, 0usize);

    let mut i = 0;
    while i < ops.len() {
        if ops[i].kind == DiffKind::Equal {
            equalities.push(i);
            ins_before = ins_after;
            del_before = del_after;
            ins_after = 0;
            del_after = 0;
            last_equality_len = Some(char_len(&ops[i].text));
            i += 1;
            continue;
        }

        let len = char_len(&ops[i].text);
        if ops[i].kind == DiffKind::Insert {
            ins_after += len;
        } else {
            del_after += len;
        }

        if let (Some(eq_len), Some(&at)) = (last_equality_len, equalities.last()) {
            if eq_len > 0
                && eq_len <= ins_before.max(del_before)
                && eq_len <= ins_after.max(del_after)
            {
                let text = ops[at].text.clone();
                ops.insert(at, DiffOp::delete(text));
                ops[at + 1].kind = DiffKind::Insert;

                // Drop this equality and the one before it, which has to be re-evaluated
                equalities.pop();
                equalities.pop();
                i = equalities.last().map_or(0, |&p| p + 1);

                ins_before = 0;
                del_before = 0;
                ins_after = 0;
                del_after = 0;
                last_equality_len = None;
                changed = true;
                continue;
            }
        }

        i += 1;
    }

    if changed {
        cleanup_merge(ops);
    }
}

/// Normalise an edit script: drop empty spans, coalesce runs, hoist
/// shared prefixes and suffixes of delete/insert pairs into the
/// surrounding equalities and slide lone edits to remove equalities.
pub fn cleanup_merge(ops: &mut Vec<DiffOp>) {
    loop {
        merge_runs(ops);
        if !shift_single_edits(ops) {
            break;
        }
    }
}

fn merge_runs(ops: &mut Vec<DiffOp>) {
    coalesce(ops);
    // Sentinel so the final run is flushed
    ops.push(DiffOp::equal(""));

    let mut i = 0;
    let mut count_delete = 0usize;
    let mut count_insert = 0usize;
    let mut text_delete = String::new();
    let mut text_insert = String::new();

    while i < ops.len() {
        match ops[i].kind {
            DiffKind::Insert => {
                count_insert += 1;
                text_insert.push_str(&ops[i].text);
                i += 1;
            }
            DiffKind::Delete => {
                count_delete += 1;
                text_delete.push_str(&ops[i].text);
                i += 1;
            }
            DiffKind::Equal => {
                let run = count_delete + count_insert;
                if run > 1 {
                    let mut start = i - run;

                    if count_delete > 0 && count_insert > 0 {
                        let prefix = common_prefix_len(&text_insert, &text_delete);
                        if prefix > 0 {
                            let common = text_insert[..prefix].to_string();
                            if start > 0 && ops[start - 1].kind == DiffKind::Equal {
                                ops[start - 1].text.push_str(&common);
                            } else {
                                ops.insert(0, DiffOp::equal(common));
                                start += 1;
                                i += 1;
                            }
                            text_insert.drain(..prefix);
                            text_delete.drain(..prefix);
                        }

                        let suffix = common_suffix_len(&text_insert, &text_delete);
                        if suffix > 0 {
                            let split = text_insert.len() - suffix;
                            ops[i].text.insert_str(0, &text_insert[split..]);
                            text_insert.truncate(split);
                            let split = text_delete.len() - suffix;
                            text_delete.truncate(split);
                        }
                    }

                    let mut merged = Vec::with_capacity(2);
                    if !text_delete.is_empty() {
                        merged.push(DiffOp::delete(std::mem::take(&mut text_delete)));
                    }
                    if !text_insert.is_empty() {
                        merged.push(DiffOp::insert(std::mem::take(&mut text_insert)));
                    }
                    let n = merged.len();
                    ops.splice(start..i, merged);
                    i = start + n + 1;
                } else if i > 0 && ops[i - 1].kind == DiffKind::Equal {
                    let text = std::mem::take(&mut ops[i].text);
                    ops[i - 1].text.push_str(&text);
                    ops.remove(i);
                } else {
                    i += 1;
                }

                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }

    coalesce(ops);
}

/// `A<ins>BA</ins>C` becomes `<ins>AB</ins>AC`, `A<ins>CB</ins>C` becomes
/// `AC<ins>BC</ins>`. Returns true when anything moved.
fn shift_single_edits(ops: &mut Vec<DiffOp>) -> bool {
    let mut changed = false;
    let mut i = 1;

    while i + 1 < ops.len() {
        if ops[i - 1].kind == DiffKind::Equal
            && ops[i + 1].kind == DiffKind::Equal
            && ops[i].kind != DiffKind::Equal
        {
            let prev = ops[i - 1].text.clone();
            let next = ops[i + 1].text.clone();

            if ops[i].text.ends_with(prev.as_str()) {
                let keep = ops[i].text.len() - prev.len();
                ops[i].text = format!("{}{}", prev, &ops[i].text[..keep]);
                ops[i + 1].text = format!("{}{}", prev, next);
                ops.remove(i - 1);
                changed = true;
            } else if ops[i].text.starts_with(next.as_str()) {
                ops[i - 1].text.push_str(&next);
                ops[i].text = format!("{}{}", &ops[i].text[next.len()..], next);
                ops.remove(i + 1);
                changed = true;
            }
        }
        i += 1;
    }

    changed
}

/// Drop empty spans and join neighbours of the same kind
fn coalesce(ops: &mut Vec<DiffOp>) {
    let mut out: Vec<DiffOp> = Vec::with_capacity(ops.len());
    for op in ops.drain(..) {
        if op.text.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.kind == op.kind => last.text.push_str(&op.text),
            _ => out.push(op),
        }
    }
    *ops = out;
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte length of the common prefix, always on a char boundary
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}

/// Byte length of the common suffix, always on a char boundary
fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}
