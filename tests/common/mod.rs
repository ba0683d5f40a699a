//! Common test utilities and helpers

use sheetdiff::{Document, DirectorySource, Result, Sheet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture backed by a temporary documents directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub source: DirectorySource,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let source = DirectorySource::new(temp_dir.path());
        Ok(Self { temp_dir, source })
    }

    /// Get the documents directory
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a document whose cells are all text
    pub fn write_document(&self, id: &str, sheets: &[(&str, &[&[&str]])]) -> Result<PathBuf> {
        let document = text_document(id, sheets);
        let path = self.root().join(format!("{}.json", id));
        fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        Ok(path)
    }

    /// Write raw snapshot content, valid or not
    pub fn write_raw(&self, id: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(format!("{}.json", id));
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Build an in-memory document from text rows
pub fn text_document(id: &str, sheets: &[(&str, &[&[&str]])]) -> Document {
    Document::new(
        id,
        sheets
            .iter()
            .map(|(name, rows)| Sheet::from_text_rows(*name, rows))
            .collect(),
    )
}

/// Build a sheet with `rows` x `cols` distinct cells
pub fn large_sheet(name: &str, rows: usize, cols: usize) -> Sheet {
    let owned: Vec<Vec<String>> = (0..rows)
        .map(|r| (0..cols).map(|c| format!("value_{}_{}", r, c)).collect())
        .collect();
    Sheet::new(
        name,
        owned
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect(),
    )
}
