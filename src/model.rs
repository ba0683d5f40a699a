//! Document, sheet and cell types shared by the comparison engine

use crate::error::{Result, SheetDiffError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated document identifier.
///
/// Only ASCII letters, digits, `-` and `_` are accepted, and the whole
/// string must match. Identifiers end up in file paths and URLs, so
/// anything else is rejected before a fetch is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(SheetDiffError::validation(raw, "identifier is empty"));
        }

        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SheetDiffError::validation(
                raw,
                format!("character '{}' is not allowed (use letters, digits, '-' or '_')", bad),
            ));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One spreadsheet snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub sheets: Vec<Sheet>,
}

impl Document {
    pub fn new(id: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Self {
            id: id.into(),
            title: None,
            sheets,
        }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// A named 2-D grid of cell values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Build a sheet whose cells are all text
    pub fn from_text_rows(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| CellValue::from(*c)).collect())
            .collect();
        Self::new(name, rows)
    }
}

/// A single cell as authored (formula or literal text, not the computed value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Textual form of the cell. Total over every variant.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
            // f64 Display is the shortest round-trip form and drops ".0" on integers
            CellValue::Number(n) if *n == 0.0 => "0".to_string(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl TryFrom<serde_json::Value> for CellValue {
    type Error = SheetDiffError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(CellValue::Empty),
            Value::Bool(b) => Ok(CellValue::Bool(b)),
            Value::String(s) => Ok(CellValue::Text(s)),
            Value::Number(n) => n.as_f64().map(CellValue::Number).ok_or_else(|| {
                SheetDiffError::serialization(format!("number {} is not representable", n))
            }),
            Value::Array(_) => Err(SheetDiffError::serialization(
                "cell holds an array, expected a scalar",
            )),
            Value::Object(_) => Err(SheetDiffError::serialization(
                "cell holds an object, expected a scalar",
            )),
        }
    }
}
