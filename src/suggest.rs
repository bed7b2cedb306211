//! Decoder for the externally generated suggestion payload: free-form text
//! expected to contain (possibly fenced) JSON of shape
//! `{ "charts": { "<label>": { "x": ..., "y": ... } } }`.
//!
//! This stage is strictly syntactic. Eligibility and column-existence
//! checks happen in the dashboard assembler.

use crate::chart::AxisSpec;
use crate::error::{ChartError, ChartResult};
use serde::Deserialize;
use serde_json::Value as Json;

#[derive(Debug, Deserialize)]
struct SuggestionPayload {
    charts: serde_json::Map<String, Json>,
}

/// Parse the raw suggestion text into (label, axes) entries in payload
/// order. Fence markers are stripped before parsing. A payload that is not
/// JSON, or that lacks a `charts` object, fails as [`ChartError::MalformedSuggestion`];
/// individual entries that do not decode as an axis spec are dropped.
pub fn parse_suggestions(raw: &str) -> ChartResult<Vec<(String, AxisSpec)>> {
    let cleaned = strip_fences(raw);
    let payload: SuggestionPayload = serde_json::from_str(&cleaned)
        .map_err(|e| ChartError::MalformedSuggestion(e.to_string()))?;

    let mut entries = Vec::with_capacity(payload.charts.len());
    for (label, value) in payload.charts {
        if let Ok(axes) = serde_json::from_value::<AxisSpec>(value) {
            entries.push((label, axes));
        }
    }
    Ok(entries)
}

fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_payload() {
        let raw = "```json\n{\"charts\":{\"Bar\":{\"x\":\"City\",\"y\":\"Sales\"}}}\n```";
        let entries = parse_suggestions(raw).unwrap();
        assert_eq!(
            entries,
            vec![("Bar".to_string(), AxisSpec::new("City").with_y("Sales"))]
        );
    }

    #[test]
    fn test_bare_payload_and_order() {
        let raw = r#"{"charts":{
            "Histogram":{"x":"Sales"},
            "PieChart":{"x":"City","y":"Sales"},
            "Line":{"x":"Year","y":"Sales"}
        }}"#;
        let entries = parse_suggestions(raw).unwrap();
        let labels: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Histogram", "PieChart", "Line"]);
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = parse_suggestions("not json").unwrap_err();
        assert!(matches!(err, ChartError::MalformedSuggestion(_)));
    }

    #[test]
    fn test_missing_charts_field_is_malformed() {
        let err = parse_suggestions(r#"{"plots":{}}"#).unwrap_err();
        assert!(matches!(err, ChartError::MalformedSuggestion(_)));
    }

    #[test]
    fn test_undecodable_entry_is_dropped() {
        let raw = r#"{"charts":{"Bar":{"x":"City","y":"Sales"},"Pie":"nope","Line":{"y":"Sales"}}}"#;
        let entries = parse_suggestions(raw).unwrap();
        // "Pie" is not an object and "Line" has no x; both are discarded
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "Bar");
    }
}
