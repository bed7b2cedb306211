use crate::chart::ChartKind;
use serde::Serialize;
use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Recoverable failures of the chart engine. None of these are fatal: every
/// one degrades to "render nothing for this chart" while the rest of the
/// session stays usable.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum ChartError {
    /// A required axis field is unset or blank. Rendering is suppressed
    /// until the selection is corrected.
    #[error("axis '{axis}' is required but not selected")]
    InvalidAxisSelection { axis: &'static str },

    #[error("dataset has no rows")]
    EmptyDataset,

    /// The suggestion payload could not be decoded as JSON with a `charts`
    /// object. The whole suggested dashboard degrades to empty.
    #[error("malformed suggestion payload: {0}")]
    MalformedSuggestion(String),

    #[error("unknown chart kind '{0}'")]
    UnknownChartKind(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// The chart kind is not valid for the selected column types.
    #[error("chart kind '{kind}' is not eligible for the selected column types")]
    IneligibleChart { kind: ChartKind },

    /// A cell in a numerical column held text. The table's typing promises
    /// this cannot happen, so this surfaces as a defect report.
    #[error("column '{column}' contains a non-numeric value")]
    TypeMismatch { column: String },
}
