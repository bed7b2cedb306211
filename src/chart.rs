use crate::table::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of chart kinds the engine can aggregate for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Scatter,
    Bubble,
    Bar,
    StackedBar,
    Pie,
    Histogram,
}

impl ChartKind {
    /// Resolve the free-form labels the suggestion service uses
    /// ("LineChart", "Scatter Plot", ...) onto a kind. Unknown labels are
    /// None, never an error here.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Line" | "LineChart" => Some(Self::Line),
            "Scatter" | "ScatterPlot" | "Scatter Plot" => Some(Self::Scatter),
            "Bubble" | "BubbleChart" => Some(Self::Bubble),
            "Bar" | "BarChart" => Some(Self::Bar),
            "StackedBar" | "StackedBarChart" => Some(Self::StackedBar),
            "Pie" | "PieChart" => Some(Self::Pie),
            "Histogram" => Some(Self::Histogram),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Scatter => "Scatter",
            Self::Bubble => "Bubble",
            Self::Bar => "Bar",
            Self::StackedBar => "StackedBar",
            Self::Pie => "Pie",
            Self::Histogram => "Histogram",
        }
    }

    /// Pie counts categories and Histogram reads a single column; everything
    /// else needs a y axis.
    pub fn needs_y(&self) -> bool {
        !matches!(self, Self::Pie | Self::Histogram)
    }

    pub fn needs_size(&self) -> bool {
        matches!(self, Self::Bubble)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column names assigned to a chart's roles. Which fields are required
/// depends on the chart kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl AxisSpec {
    pub fn new(x: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: None,
            size: None,
        }
    }

    pub fn with_y(mut self, y: impl Into<String>) -> Self {
        self.y = Some(y.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// One named value column of a stacked bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Fully materialized, render-ready output of an aggregator. Downstream
/// rendering needs random access and totals, so nothing here is lazy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartSeries {
    /// Line, Bar, Pie and Histogram: parallel label/value sequences.
    Labeled { labels: Vec<Value>, values: Vec<f64> },
    /// StackedBar: one category axis shared by one or more value series.
    Stacked {
        labels: Vec<Value>,
        series: Vec<StackedSeries>,
    },
    /// Scatter: one point per row.
    Points { points: Vec<ScatterPoint> },
    /// Bubble: one point per row that carries a size value.
    Bubbles { points: Vec<BubblePoint> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_aliases() {
        assert_eq!(ChartKind::from_label("Line"), Some(ChartKind::Line));
        assert_eq!(ChartKind::from_label("LineChart"), Some(ChartKind::Line));
        assert_eq!(ChartKind::from_label("Scatter Plot"), Some(ChartKind::Scatter));
        assert_eq!(ChartKind::from_label("PieChart"), Some(ChartKind::Pie));
        assert_eq!(ChartKind::from_label(" Histogram "), Some(ChartKind::Histogram));
        assert_eq!(ChartKind::from_label("Treemap"), None);
    }

    #[test]
    fn test_required_axes() {
        assert!(ChartKind::Line.needs_y());
        assert!(!ChartKind::Pie.needs_y());
        assert!(!ChartKind::Histogram.needs_y());
        assert!(ChartKind::Bubble.needs_size());
        assert!(!ChartKind::Scatter.needs_size());
    }

    #[test]
    fn test_axis_spec_deserialize() {
        let axes: AxisSpec = serde_json::from_str(r#"{"x":"City","y":"Sales"}"#).unwrap();
        assert_eq!(axes, AxisSpec::new("City").with_y("Sales"));
    }
}
