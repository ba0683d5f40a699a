//! # sheetdiff
//!
//! Compares two snapshots of a spreadsheet: which sheets exist and in what
//! order, then a character-level diff of each shared sheet's contents.

pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod progress;
pub mod reconcile;
pub mod render;
pub mod serializer;
pub mod server;
pub mod source;

pub use compare::{CancelToken, Comparator, ComparisonResult, DiffReport};
pub use diff::{diff, DiffKind, DiffOp};
pub use error::{Result, SheetDiffError};
pub use model::{CellValue, Document, DocumentId, Sheet};
pub use reconcile::{reconcile, ReconciliationReport, SheetStatus};
pub use render::{render_markup, render_plain_text};
pub use serializer::serialize;
pub use source::{DirectorySource, DocumentSource, MemorySource};
