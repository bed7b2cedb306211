use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};

use dashgraph::chart::ChartKind;
use dashgraph::dashboard::{self, SelectionState};
use dashgraph::table::{TypedTable, UploadResponse};

#[derive(Parser, Debug)]
#[command(name = "dashgraph")]
#[command(about = "Aggregate an ingestion response into chart-ready series", long_about = None)]
struct Args {
    /// Ingestion response JSON file ('-' for stdin)
    input: String,

    /// X-axis column (enables the single-chart flow)
    #[arg(long)]
    x: Option<String>,

    /// Y-axis column
    #[arg(long)]
    y: Option<String>,

    /// Size column (Bubble charts)
    #[arg(long)]
    size: Option<String>,

    /// Chart kind to aggregate (e.g. Line, Bar, Pie)
    #[arg(long)]
    chart: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = if args.input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read ingestion response from stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read '{}'", args.input))?
    };

    let upload: UploadResponse =
        serde_json::from_str(&raw).context("Failed to parse ingestion response JSON")?;
    let table =
        TypedTable::from_upload(&upload).context("Failed to build table from ingestion response")?;

    let output = if args.x.is_some() {
        let mut selection = SelectionState::new();
        if let Some(x) = args.x {
            selection = selection.with_x(x);
        }
        if let Some(y) = args.y {
            selection = selection.with_y(y);
        }
        if let Some(size) = args.size {
            selection = selection.with_size(size);
        }
        if let Some(label) = &args.chart {
            let kind = ChartKind::from_label(label)
                .ok_or_else(|| anyhow!("Unknown chart kind '{}'", label))?;
            selection = selection.with_kind(kind);
        }

        let eligible = dashboard::derive_eligibility(&table, &selection);
        let series = dashboard::derive_series(&table, &selection)
            .context("Failed to aggregate the selected chart")?;
        serde_json::json!({ "eligible": eligible, "series": series })
    } else {
        let board = dashboard::assemble_dashboard(&table, &upload.chart_suggestions);
        for skip in &board.skipped {
            eprintln!("Warning: skipped suggestion '{}': {}", skip.label, skip.reason);
        }
        serde_json::json!({ "dashboard": board.cells })
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &output)
        .context("Failed to write series JSON to stdout")?;
    handle
        .write_all(b"\n")
        .context("Failed to write series JSON to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
