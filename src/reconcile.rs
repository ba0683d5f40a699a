//! Structural reconciliation of sheet names between two documents

use crate::model::Document;
use serde::{Deserialize, Serialize};

/// How a sheet name lines up between the old and new document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetStatus {
    MatchedSamePosition,
    MatchedDifferentPosition,
    OnlyInOld,
    OnlyInNew,
}

impl SheetStatus {
    pub fn is_matched(self) -> bool {
        matches!(
            self,
            SheetStatus::MatchedSamePosition | SheetStatus::MatchedDifferentPosition
        )
    }
}

/// A single reconciled sheet name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetEntry {
    pub name: String,
    pub status: SheetStatus,
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
}

/// Result of comparing the ordered sheet names of two documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub entries: Vec<SheetEntry>,
    pub same_set: bool,
    pub same_order: bool,
}

impl ReconciliationReport {
    /// `(old_index, new_index)` for every matched sheet, in old document order
    pub fn matched_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .entries
            .iter()
            .filter(|e| e.status.is_matched())
            .filter_map(|e| Some((e.old_index?, e.new_index?)))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn count(&self, status: SheetStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// One-line description used when a driver halts on mismatch
    pub fn summary(&self) -> String {
        if self.same_set && self.same_order {
            return "sheets have the same names in the same order".to_string();
        }

        let mut parts = Vec::new();
        let moved = self.count(SheetStatus::MatchedDifferentPosition);
        let only_old = self.count(SheetStatus::OnlyInOld);
        let only_new = self.count(SheetStatus::OnlyInNew);
        if moved > 0 {
            parts.push(format!("{} moved", moved));
        }
        if only_old > 0 {
            parts.push(format!("{} only in old", only_old));
        }
        if only_new > 0 {
            parts.push(format!("{} only in new", only_new));
        }
        if parts.is_empty() {
            // Every entry matched in place, so only the counts can differ
            parts.push("sheet counts differ".to_string());
        }
        parts.join(", ")
    }
}

/// Compare the sheet names of `old` and `new` by position.
///
/// Never fails and never aborts; a mismatch is only recorded in the report.
/// Duplicate names are matched against the first unvisited old index, so
/// every old sheet is paired at most once.
pub fn reconcile(old: &Document, new: &Document) -> ReconciliationReport {
    let old_names = old.sheet_names();
    let mut visited = vec![false; old_names.len()];
    let mut entries = Vec::with_capacity(old_names.len().max(new.sheets.len()));

    for (i, sheet) in new.sheets.iter().enumerate() {
        let name = sheet.name.as_str();

        let (status, old_index) = if old_names.get(i) == Some(&name) && !visited[i] {
            (SheetStatus::MatchedSamePosition, Some(i))
        } else {
            let unvisited = old_names
                .iter()
                .enumerate()
                .position(|(j, n)| *n == name && !visited[j]);
            match unvisited {
                Some(j) => (SheetStatus::MatchedDifferentPosition, Some(j)),
                None => (SheetStatus::OnlyInNew, None),
            }
        };

        if let Some(j) = old_index {
            visited[j] = true;
        }

        entries.push(SheetEntry {
            name: name.to_string(),
            status,
            old_index,
            new_index: Some(i),
        });
    }

    for (j, name) in old_names.iter().enumerate() {
        if !visited[j] {
            entries.push(SheetEntry {
                name: name.to_string(),
                status: SheetStatus::OnlyInOld,
                old_index: Some(j),
                new_index: None,
            });
        }
    }

    let same_set = entries.iter().all(|e| e.status.is_matched());
    let same_order = old_names.len() == new.sheets.len()
        && entries
            .iter()
            .all(|e| e.status == SheetStatus::MatchedSamePosition);

    log::debug!(
        "Reconciled {} old / {} new sheets: same_set={}, same_order={}",
        old_names.len(),
        new.sheets.len(),
        same_set,
        same_order
    );

    ReconciliationReport {
        entries,
        same_set,
        same_order,
    }
}
