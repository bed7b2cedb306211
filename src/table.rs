use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::HashMap;
use std::fmt;

/// Semantic type of a column, as inferred by the external ingestion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    #[serde(rename = "numerical")]
    Numerical,
    #[serde(rename = "categorical")]
    Categorical,
}

/// A single cell value. Equality is type-sensitive: `Text("1")` and
/// `Number(1.0)` are distinct grouping keys.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// The numeric value, only if this cell actually holds a number.
    /// Text is never parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// One data row: column name -> cell value. Cells absent from the map are
/// missing values (null or absent in the ingestion payload).
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: String, value: Value) {
        self.cells.insert(column, value);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Numeric cell value, or None when the cell is missing or holds text.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_number)
    }
}

/// Response shape of the external ingestion service (see the upload
/// endpoint contract): column order, inferred types, row data and the raw
/// suggestion text.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub columns: Vec<String>,
    pub types: HashMap<String, ColumnType>,
    pub preview: Vec<Json>,
    pub chart_suggestions: String,
}

/// The session dataset: ordered rows plus the column type map. Built once
/// per upload and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TypedTable {
    columns: Vec<(String, ColumnType)>,
    rows: Vec<Row>,
}

impl TypedTable {
    pub fn new(columns: Vec<(String, ColumnType)>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from an ingestion response. JSON numbers become
    /// `Value::Number`, strings become `Value::Text`, booleans are kept as
    /// text, nulls become missing cells.
    pub fn from_upload(upload: &UploadResponse) -> Result<Self> {
        let mut columns = Vec::with_capacity(upload.columns.len());
        for name in &upload.columns {
            let col_type = upload
                .types
                .get(name)
                .copied()
                .ok_or_else(|| anyhow!("Column '{}' has no declared type", name))?;
            columns.push((name.clone(), col_type));
        }

        let mut rows = Vec::with_capacity(upload.preview.len());
        for item in &upload.preview {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Preview rows must be JSON objects"))?;

            let mut row = Row::new();
            for (name, _) in &columns {
                match obj.get(name) {
                    Some(Json::Number(n)) => {
                        let v = n.as_f64().ok_or_else(|| {
                            anyhow!("Unrepresentable number in column '{}'", name)
                        })?;
                        row.set(name.clone(), Value::Number(v));
                    }
                    Some(Json::String(s)) => row.set(name.clone(), Value::Text(s.clone())),
                    Some(Json::Bool(b)) => row.set(name.clone(), Value::Text(b.to_string())),
                    Some(Json::Null) | None => {}
                    Some(other) => {
                        return Err(anyhow!(
                            "Unsupported value {} for column '{}'",
                            other,
                            name
                        ))
                    }
                }
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[(String, ColumnType)] {
        &self.columns
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, t)| *t)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(col, _)| col == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_upload() -> UploadResponse {
        serde_json::from_value(json!({
            "columns": ["City", "Sales", "Active"],
            "types": {"City": "categorical", "Sales": "numerical", "Active": "categorical"},
            "preview": [
                {"City": "A", "Sales": 10, "Active": true},
                {"City": "B", "Sales": null, "Active": false}
            ],
            "chart_suggestions": ""
        }))
        .unwrap()
    }

    #[test]
    fn test_from_upload_conversion() {
        let table = TypedTable::from_upload(&make_upload()).unwrap();
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.column_type("Sales"), Some(ColumnType::Numerical));
        assert_eq!(table.column_type("City"), Some(ColumnType::Categorical));
        assert!(table.has_column("Active"));
        assert!(!table.has_column("Missing"));

        let first = &table.rows()[0];
        assert_eq!(first.number("Sales"), Some(10.0));
        assert_eq!(first.get("City"), Some(&Value::from("A")));
        assert_eq!(first.get("Active"), Some(&Value::from("true")));

        // Null becomes a missing cell, not a sentinel value
        let second = &table.rows()[1];
        assert!(second.get("Sales").is_none());
    }

    #[test]
    fn test_from_upload_missing_type() {
        let upload: UploadResponse = serde_json::from_value(json!({
            "columns": ["a"],
            "types": {},
            "preview": [],
            "chart_suggestions": ""
        }))
        .unwrap();
        assert!(TypedTable::from_upload(&upload).is_err());
    }

    #[test]
    fn test_value_equality_is_type_sensitive() {
        assert_ne!(Value::from("1"), Value::from(1.0));
        assert_eq!(Value::from(1.0), Value::from(1.0));
        assert_eq!(Value::from("x"), Value::from("x"));
    }

    #[test]
    fn test_text_is_never_parsed_as_number() {
        let mut row = Row::new();
        row.set("n".to_string(), Value::from("42"));
        assert_eq!(row.number("n"), None);
    }
}
