// Library exports for dashgraph

pub mod aggregate;
pub mod chart;
pub mod dashboard;
pub mod eligibility;
pub mod error;
pub mod suggest;
pub mod table;

pub use chart::{AxisSpec, ChartKind, ChartSeries};
pub use dashboard::{
    assemble_dashboard, derive_eligibility, derive_series, Dashboard, SelectionState, Session,
};
pub use eligibility::eligible_charts;
pub use error::{ChartError, ChartResult};
pub use table::{ColumnType, Row, TypedTable, UploadResponse, Value};
