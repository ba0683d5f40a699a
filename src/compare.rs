//! Comparison of two documents: reconciliation, then per-sheet content diffs

use crate::diff::{self, DiffKind, DiffOp};
use crate::error::{Result, SheetDiffError};
use crate::model::{Document, Sheet};
use crate::reconcile::{reconcile, ReconciliationReport};
use crate::render;
use crate::serializer::serialize;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Content diff of one sheet present in both documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub sheet_name: String,
    pub ops: Vec<DiffOp>,
}

impl DiffReport {
    pub fn has_changes(&self) -> bool {
        self.ops.iter().any(|op| op.kind != DiffKind::Equal)
    }

    pub fn inserted_chars(&self) -> usize {
        self.count_chars(DiffKind::Insert)
    }

    pub fn deleted_chars(&self) -> usize {
        self.count_chars(DiffKind::Delete)
    }

    pub fn plain_text(&self) -> String {
        render::render_plain_text(&self.ops)
    }

    pub fn markup(&self) -> String {
        render::render_markup(&self.ops)
    }

    fn count_chars(&self, kind: DiffKind) -> usize {
        self.ops
            .iter()
            .filter(|op| op.kind == kind)
            .map(|op| op.text.chars().count())
            .sum()
    }
}

/// Everything produced by one comparison request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub old_id: String,
    pub new_id: String,
    pub reconciliation: ReconciliationReport,
    /// One report per matched sheet, in the old document's order
    pub sheets: Vec<DiffReport>,
}

impl ComparisonResult {
    pub fn has_changes(&self) -> bool {
        !self.reconciliation.same_set
            || !self.reconciliation.same_order
            || self.sheets.iter().any(DiffReport::has_changes)
    }
}

/// Shared flag for best-effort cancellation of an in-flight comparison
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SheetDiffError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Notified as each sheet diff completes; may be called from worker threads.
pub trait DiffProgress: Sync {
    fn on_sheets_matched(&self, _total: usize) {}
    fn on_sheet_done(&self, sheet_name: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl DiffProgress for NoProgress {
    fn on_sheet_done(&self, _sheet_name: &str) {}
}

/// Runs comparisons on a dedicated rayon pool
#[derive(Debug, Clone)]
pub struct Comparator {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Comparator {
    /// `worker_threads == 0` uses rayon's global pool
    pub fn new(worker_threads: usize) -> Result<Self> {
        let pool = if worker_threads == 0 {
            None
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(worker_threads)
                .thread_name(|i| format!("sheetdiff-worker-{}", i))
                .build()
                .map_err(|e| SheetDiffError::config(format!("unable to start worker pool: {}", e)))?;
            Some(Arc::new(pool))
        };

        Ok(Self { pool })
    }

    pub fn compare(
        &self,
        old: &Document,
        new: &Document,
        cancel: &CancelToken,
    ) -> Result<ComparisonResult> {
        self.compare_with_progress(old, new, cancel, &NoProgress)
    }

    /// Reconcile sheet names, then diff every matched sheet in parallel.
    ///
    /// Returns `Cancelled` if the token fires at any point; a partial
    /// result is never returned.
    pub fn compare_with_progress(
        &self,
        old: &Document,
        new: &Document,
        cancel: &CancelToken,
        progress: &dyn DiffProgress,
    ) -> Result<ComparisonResult> {
        cancel.check()?;

        let reconciliation = reconcile(old, new);
        let pairs: Vec<(&Sheet, &Sheet)> = reconciliation
            .matched_pairs()
            .into_iter()
            .map(|(o, n)| (&old.sheets[o], &new.sheets[n]))
            .collect();
        progress.on_sheets_matched(pairs.len());

        let run = || -> Result<Vec<DiffReport>> {
            pairs
                .par_iter()
                .map(|(old_sheet, new_sheet)| {
                    cancel.check()?;
                    let report = diff_sheet(old_sheet, new_sheet);
                    cancel.check()?;
                    progress.on_sheet_done(&report.sheet_name);
                    Ok(report)
                })
                .collect()
        };

        let sheets = match &self.pool {
            Some(pool) => pool.install(run)?,
            None => run()?,
        };
        cancel.check()?;

        Ok(ComparisonResult {
            old_id: old.id.clone(),
            new_id: new.id.clone(),
            reconciliation,
            sheets,
        })
    }
}

/// Serialize both sheets and diff their text. Labelled with the old sheet's name.
pub fn diff_sheet(old: &Sheet, new: &Sheet) -> DiffReport {
    let old_text = serialize(old);
    let new_text = serialize(new);
    let ops = diff::diff(&old_text, &new_text);

    log::debug!(
        "Sheet '{}': {} -> {} chars, {} ops",
        old.name,
        old_text.len(),
        new_text.len(),
        ops.len()
    );

    DiffReport {
        sheet_name: old.name.clone(),
        ops,
    }
}
