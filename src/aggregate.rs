//! One aggregation routine per chart kind. Each is a pure function of the
//! table and an axis spec; each validates its inputs and returns an explicit
//! error instead of a partial series.
//!
//! Grouping keys compare by exact, type-sensitive value equality and group
//! order is first-seen row order. Numeric arithmetic only ever reads cells
//! that actually hold numbers; text is never parsed.

use crate::chart::{AxisSpec, BubblePoint, ChartKind, ChartSeries, ScatterPoint, StackedSeries};
use crate::error::{ChartError, ChartResult};
use crate::table::{Row, TypedTable, Value};

/// Fixed linear scale applied to the bubble size column.
const BUBBLE_RADIUS_SCALE: f64 = 5.0;

/// Run the aggregator matching `kind`. StackedBar runs as the single
/// value-column instance of [`stacked_bar`].
pub fn run(kind: ChartKind, table: &TypedTable, axes: &AxisSpec) -> ChartResult<ChartSeries> {
    match kind {
        ChartKind::Line => line(table, axes),
        ChartKind::Scatter => scatter(table, axes),
        ChartKind::Bubble => bubble(table, axes),
        ChartKind::Bar => bar(table, axes),
        ChartKind::StackedBar => {
            let y = required_axis(axes.y.as_deref(), "y")?.to_string();
            stacked_bar(table, &axes.x, std::slice::from_ref(&y))
        }
        ChartKind::Pie => pie(table, axes),
        ChartKind::Histogram => histogram(table, axes),
    }
}

/// Mean of y per distinct x, one point per distinct x, sorted ascending by
/// numeric x. Duplicate x values collapse to their arithmetic mean.
pub fn line(table: &TypedTable, axes: &AxisSpec) -> ChartResult<ChartSeries> {
    let x = required_axis(Some(&axes.x), "x")?;
    let y = required_axis(axes.y.as_deref(), "y")?;
    check_column(table, x)?;
    check_column(table, y)?;
    check_rows(table)?;

    let (labels, values) = group_means(table, x, y)?;

    let mut points = Vec::with_capacity(labels.len());
    for (label, value) in labels.iter().zip(&values) {
        let x_num = label
            .as_number()
            .ok_or_else(|| ChartError::TypeMismatch { column: x.to_string() })?;
        points.push((x_num, *value));
    }
    points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    Ok(ChartSeries::Labeled {
        labels: points.iter().map(|p| Value::Number(p.0)).collect(),
        values: points.iter().map(|p| p.1).collect(),
    })
}

/// One point per row in row order. No aggregation: duplicate coordinates
/// stay duplicate points.
pub fn scatter(table: &TypedTable, axes: &AxisSpec) -> ChartResult<ChartSeries> {
    let x = required_axis(Some(&axes.x), "x")?;
    let y = required_axis(axes.y.as_deref(), "y")?;
    check_column(table, x)?;
    check_column(table, y)?;
    check_rows(table)?;

    let mut points = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        points.push(ScatterPoint {
            x: numeric_cell(row, x)?,
            y: numeric_cell(row, y)?,
        });
    }
    Ok(ChartSeries::Points { points })
}

/// Scatter plus a radius from the size column. Rows whose size cell is
/// missing or non-numeric are excluded rather than erroring.
pub fn bubble(table: &TypedTable, axes: &AxisSpec) -> ChartResult<ChartSeries> {
    let x = required_axis(Some(&axes.x), "x")?;
    let y = required_axis(axes.y.as_deref(), "y")?;
    let size = required_axis(axes.size.as_deref(), "size")?;
    check_column(table, x)?;
    check_column(table, y)?;
    check_column(table, size)?;
    check_rows(table)?;

    let mut points = Vec::new();
    for row in table.rows() {
        let Some(r) = row.number(size) else { continue };
        points.push(BubblePoint {
            x: numeric_cell(row, x)?,
            y: numeric_cell(row, y)?,
            r: r * BUBBLE_RADIUS_SCALE,
        });
    }
    Ok(ChartSeries::Bubbles { points })
}

/// Mean of y per category. Same grouping arithmetic as [`line`], but labels
/// keep first-seen order instead of being sorted.
pub fn bar(table: &TypedTable, axes: &AxisSpec) -> ChartResult<ChartSeries> {
    let x = required_axis(Some(&axes.x), "x")?;
    let y = required_axis(axes.y.as_deref(), "y")?;
    check_column(table, x)?;
    check_column(table, y)?;
    check_rows(table)?;

    let (labels, values) = group_means(table, x, y)?;
    Ok(ChartSeries::Labeled { labels, values })
}

/// Sum (not mean) of each value column per category, categories in
/// first-seen order. The single value-column chart is the length-1 instance;
/// multiple columns become independent stacked series sharing the category
/// axis. Missing or non-numeric cells contribute nothing to a stack.
pub fn stacked_bar(
    table: &TypedTable,
    x: &str,
    value_columns: &[String],
) -> ChartResult<ChartSeries> {
    let x = required_axis(Some(x), "x")?;
    if value_columns.is_empty() {
        return Err(ChartError::InvalidAxisSelection { axis: "y" });
    }
    check_column(table, x)?;
    for col in value_columns {
        check_column(table, col)?;
    }
    check_rows(table)?;

    let mut labels: Vec<Value> = Vec::new();
    let mut sums: Vec<Vec<f64>> = vec![Vec::new(); value_columns.len()];
    for row in table.rows() {
        let Some(key) = row.get(x) else { continue };
        let idx = match labels.iter().position(|l| l == key) {
            Some(i) => i,
            None => {
                labels.push(key.clone());
                for col_sums in &mut sums {
                    col_sums.push(0.0);
                }
                labels.len() - 1
            }
        };
        for (ci, col) in value_columns.iter().enumerate() {
            sums[ci][idx] += row.number(col).unwrap_or(0.0);
        }
    }

    let series = value_columns
        .iter()
        .zip(sums)
        .map(|(name, values)| StackedSeries {
            name: name.clone(),
            values,
        })
        .collect();
    Ok(ChartSeries::Stacked { labels, series })
}

/// Row count per category, categories in first-seen order. Pie never reads
/// a numerical column; it always counts occurrences.
pub fn pie(table: &TypedTable, axes: &AxisSpec) -> ChartResult<ChartSeries> {
    let x = required_axis(Some(&axes.x), "x")?;
    check_column(table, x)?;
    check_rows(table)?;

    let mut labels: Vec<Value> = Vec::new();
    let mut counts: Vec<f64> = Vec::new();
    for row in table.rows() {
        let Some(key) = row.get(x) else { continue };
        match labels.iter().position(|l| l == key) {
            Some(i) => counts[i] += 1.0,
            None => {
                labels.push(key.clone());
                counts.push(1.0);
            }
        }
    }
    Ok(ChartSeries::Labeled {
        labels,
        values: counts,
    })
}

/// Raw column values in row order, unsorted and unbucketed; the rendering
/// side counts frequencies per distinct label. No bin-width computation
/// happens here.
pub fn histogram(table: &TypedTable, axes: &AxisSpec) -> ChartResult<ChartSeries> {
    let x = required_axis(Some(&axes.x), "x")?;
    check_column(table, x)?;
    check_rows(table)?;

    let mut labels = Vec::new();
    let mut values = Vec::new();
    for row in table.rows() {
        let Some(cell) = row.get(x) else { continue };
        let n = cell
            .as_number()
            .ok_or_else(|| ChartError::TypeMismatch { column: x.to_string() })?;
        labels.push(cell.clone());
        values.push(n);
    }
    Ok(ChartSeries::Labeled { labels, values })
}

/// Shared grouping step of Line and Bar: count and sum per distinct x key,
/// emit sum/count. Labels come out in first-seen order.
fn group_means(table: &TypedTable, x: &str, y: &str) -> ChartResult<(Vec<Value>, Vec<f64>)> {
    let mut labels: Vec<Value> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut totals: Vec<f64> = Vec::new();

    for row in table.rows() {
        let Some(key) = row.get(x) else { continue };
        let y_val = numeric_cell(row, y)?;
        match labels.iter().position(|l| l == key) {
            Some(i) => {
                counts[i] += 1;
                totals[i] += y_val;
            }
            None => {
                labels.push(key.clone());
                counts.push(1);
                totals.push(y_val);
            }
        }
    }

    let values = totals
        .iter()
        .zip(&counts)
        .map(|(total, count)| total / *count as f64)
        .collect();
    Ok((labels, values))
}

fn required_axis<'a>(value: Option<&'a str>, axis: &'static str) -> ChartResult<&'a str> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ChartError::InvalidAxisSelection { axis }),
    }
}

fn check_column(table: &TypedTable, name: &str) -> ChartResult<()> {
    if table.has_column(name) {
        Ok(())
    } else {
        Err(ChartError::UnknownColumn(name.to_string()))
    }
}

fn check_rows(table: &TypedTable) -> ChartResult<()> {
    if table.is_empty() {
        Err(ChartError::EmptyDataset)
    } else {
        Ok(())
    }
}

fn numeric_cell(row: &Row, column: &str) -> ChartResult<f64> {
    row.number(column)
        .ok_or_else(|| ChartError::TypeMismatch {
            column: column.to_string(),
        })
}
