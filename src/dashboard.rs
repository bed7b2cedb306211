//! Orchestration: the interactive single-chart picker and the suggested
//! dashboard grid. Both flows route through the eligibility lookup and the
//! aggregators; neither ever mutates the table.

use crate::aggregate;
use crate::chart::{AxisSpec, ChartKind, ChartSeries};
use crate::eligibility::eligible_charts;
use crate::error::{ChartError, ChartResult};
use crate::suggest::parse_suggestions;
use crate::table::TypedTable;
use serde::Serialize;

/// The user's current axis and chart choices, as an explicit immutable
/// value. Blank strings count as "not selected".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub x: Option<String>,
    pub y: Option<String>,
    pub size: Option<String>,
    pub kind: Option<ChartKind>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x(self, x: impl Into<String>) -> Self {
        Self { x: Some(x.into()), ..self }
    }

    pub fn with_y(self, y: impl Into<String>) -> Self {
        Self { y: Some(y.into()), ..self }
    }

    pub fn with_size(self, size: impl Into<String>) -> Self {
        Self { size: Some(size.into()), ..self }
    }

    pub fn with_kind(self, kind: ChartKind) -> Self {
        Self { kind: Some(kind), ..self }
    }
}

fn selected(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Chart-choice buttons to offer for the current selection, in display
/// order. Unselected or unknown columns yield no choices.
pub fn derive_eligibility(table: &TypedTable, selection: &SelectionState) -> &'static [ChartKind] {
    let Some(x) = selected(&selection.x) else { return &[] };
    let Some(x_type) = table.column_type(x) else { return &[] };
    match selected(&selection.y) {
        Some(y) => match table.column_type(y) {
            Some(y_type) => eligible_charts(x_type, Some(y_type)),
            None => &[],
        },
        None => eligible_charts(x_type, None),
    }
}

/// Run the aggregator for the selected chart, or `Ok(None)` while the
/// selection is still incomplete for that kind (no aggregation runs until
/// every required axis is set; Bubble additionally waits for a size column).
pub fn derive_series(
    table: &TypedTable,
    selection: &SelectionState,
) -> ChartResult<Option<ChartSeries>> {
    let Some(kind) = selection.kind else { return Ok(None) };
    let Some(x) = selected(&selection.x) else { return Ok(None) };
    let y = selected(&selection.y);
    if kind.needs_y() && y.is_none() {
        return Ok(None);
    }
    let size = selected(&selection.size);
    if kind.needs_size() && size.is_none() {
        return Ok(None);
    }

    let axes = AxisSpec {
        x: x.to_string(),
        y: y.map(str::to_string),
        size: size.map(str::to_string),
    };
    aggregate::run(kind, table, &axes).map(Some)
}

/// One render-ready dashboard cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCell {
    pub label: String,
    pub kind: ChartKind,
    pub axes: AxisSpec,
    pub series: ChartSeries,
}

/// A suggestion entry the assembler dropped, with the reason it was
/// dropped. Partial success is normal; skips are reported, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEntry {
    pub label: String,
    pub reason: ChartError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    pub cells: Vec<DashboardCell>,
    pub skipped: Vec<SkippedEntry>,
}

/// Build the suggested dashboard: parse the payload, then run each entry
/// through the same eligibility gate and aggregators as a manual selection.
/// Cell order is payload order. A malformed payload degrades the whole
/// section to an empty dashboard; a bad entry only loses that entry.
pub fn assemble_dashboard(table: &TypedTable, raw_suggestions: &str) -> Dashboard {
    let entries = match parse_suggestions(raw_suggestions) {
        Ok(entries) => entries,
        Err(err) => {
            return Dashboard {
                cells: Vec::new(),
                skipped: vec![SkippedEntry {
                    label: "charts".to_string(),
                    reason: err,
                }],
            }
        }
    };

    let mut dashboard = Dashboard::default();
    for (label, axes) in entries {
        match build_cell(table, &label, axes) {
            Ok(cell) => dashboard.cells.push(cell),
            Err(reason) => dashboard.skipped.push(SkippedEntry { label, reason }),
        }
    }
    dashboard
}

fn build_cell(table: &TypedTable, label: &str, axes: AxisSpec) -> ChartResult<DashboardCell> {
    let kind = ChartKind::from_label(label)
        .ok_or_else(|| ChartError::UnknownChartKind(label.to_string()))?;

    for col in [Some(axes.x.as_str()), axes.y.as_deref(), axes.size.as_deref()]
        .into_iter()
        .flatten()
    {
        if !table.has_column(col) {
            return Err(ChartError::UnknownColumn(col.to_string()));
        }
    }

    // Suggested entries pass the same type gate as manual axis choices.
    let x_type = table
        .column_type(&axes.x)
        .ok_or_else(|| ChartError::UnknownColumn(axes.x.clone()))?;
    let y_type = axes.y.as_deref().and_then(|y| table.column_type(y));
    if !eligible_charts(x_type, y_type).contains(&kind) {
        return Err(ChartError::IneligibleChart { kind });
    }

    let series = aggregate::run(kind, table, &axes)?;
    Ok(DashboardCell {
        label: label.to_string(),
        kind,
        axes,
        series,
    })
}

/// Owner of the current table. Each upload replaces the table wholesale and
/// bumps the epoch; results computed against an older epoch are rejected
/// rather than merged.
#[derive(Debug, Default)]
pub struct Session {
    table: Option<TypedTable>,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> Option<&TypedTable> {
        self.table.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Install a new upload's table, superseding everything computed
    /// against the previous one. Returns the new epoch.
    pub fn replace_table(&mut self, table: TypedTable) -> u64 {
        self.epoch += 1;
        self.table = Some(table);
        self.epoch
    }

    /// Accept a result only if it was computed against the current table.
    pub fn accept<T>(&self, epoch: u64, result: T) -> Option<T> {
        (epoch == self.epoch).then_some(result)
    }
}
