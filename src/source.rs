//! Document sources: where the two snapshots being compared come from

use crate::error::{Result, SheetDiffError};
use crate::model::{CellValue, Document, DocumentId, Sheet};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Fetches a document by identifier.
///
/// Implementations must be shareable across threads; the HTTP service
/// holds one source for every request.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, id: &DocumentId) -> Result<Document>;
}

/// Reads `<root>/<id>.json` snapshots from a local directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    sheets: Vec<RawSheet>,
}

#[derive(Debug, Deserialize)]
struct RawSheet {
    name: String,
    #[serde(default)]
    rows: Vec<Vec<serde_json::Value>>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Identifiers of every valid snapshot in the directory, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        if !self.root.exists() {
            return Ok(ids);
        }

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if DocumentId::parse(stem).is_ok() {
                    ids.push(stem.to_string());
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Parse snapshot JSON into a document
    pub fn parse_document(id: &DocumentId, content: &str) -> Result<Document> {
        let raw: RawDocument = serde_json::from_str(content)
            .map_err(|e| SheetDiffError::fetch(id.as_str(), format!("malformed document: {}", e)))?;

        let mut sheets = Vec::with_capacity(raw.sheets.len());
        for raw_sheet in raw.sheets {
            let mut rows = Vec::with_capacity(raw_sheet.rows.len());
            for (r, raw_row) in raw_sheet.rows.into_iter().enumerate() {
                let mut row = Vec::with_capacity(raw_row.len());
                for (c, value) in raw_row.into_iter().enumerate() {
                    let cell = CellValue::try_from(value).map_err(|e| {
                        SheetDiffError::serialization(format!(
                            "document '{}', sheet '{}', row {}, column {}: {}",
                            id,
                            raw_sheet.name,
                            r + 1,
                            c + 1,
                            e
                        ))
                    })?;
                    row.push(cell);
                }
                rows.push(row);
            }
            sheets.push(Sheet::new(raw_sheet.name, rows));
        }

        Ok(Document {
            id: raw.id.unwrap_or_else(|| id.to_string()),
            title: raw.title,
            sheets,
        })
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, id: &DocumentId) -> Result<Document> {
        let path = self.path_for(id);
        log::debug!("Reading document '{}' from {}", id, path.display());

        let content = fs::read_to_string(&path)
            .map_err(|e| SheetDiffError::fetch(id.as_str(), format!("{}: {}", path.display(), e)))?;

        Self::parse_document(id, &content)
    }
}

/// Documents held in memory, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Document>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, document: Document) {
        self.documents.insert(document.id.clone(), document);
    }

    pub fn with(mut self, document: Document) -> Self {
        self.insert(document);
        self
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, id: &DocumentId) -> Result<Document> {
        self.documents
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| SheetDiffError::fetch(id.as_str(), "document not found"))
    }
}

/// Validate both identifiers, then fetch both documents.
///
/// Nothing is fetched unless both identifiers are valid.
pub fn fetch_pair(
    source: &dyn DocumentSource,
    old_id: &str,
    new_id: &str,
) -> Result<(Document, Document)> {
    let old_id = DocumentId::parse(old_id)?;
    let new_id = DocumentId::parse(new_id)?;

    let old = source.fetch(&old_id)?;
    let new = source.fetch(&new_id)?;
    Ok((old, new))
}
