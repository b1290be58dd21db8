//! dealsheet CLI - builds the formatted deal analysis workbook

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dealsheet::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dealsheet")]
#[command(
    author,
    version,
    about = "Formats and charts a real-estate investment analysis workbook"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the workbook, run both passes and write it as XLSX
    Build {
        /// Output XLSX file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON layout overriding the default one
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Replace rules and charts from earlier passes instead of appending
        #[arg(long)]
        rebuild: bool,

        /// Number of times to run both passes
        #[arg(long, default_value = "1")]
        repeat: u32,
    },

    /// Print every host call both passes make, one per line
    Plan {
        /// JSON layout overriding the default one
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },

    /// Print the classification of each banding row
    Rows {
        /// JSON layout overriding the default one
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },

    /// Print the default layout as JSON
    Layout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            output,
            layout,
            rebuild,
            repeat,
        } => build(&output, layout.as_deref(), rebuild, repeat),
        Commands::Plan { layout } => plan(layout.as_deref()),
        Commands::Rows { layout } => rows(layout.as_deref()),
        Commands::Layout => print_layout(),
    }
}

fn load_layout(path: Option<&Path>) -> Result<Layout> {
    let Some(path) = path else {
        return Ok(Layout::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse layout '{}'", path.display()))
}

fn build(output: &Path, layout: Option<&Path>, rebuild: bool, repeat: u32) -> Result<()> {
    let layout = load_layout(layout)?;
    let options = if rebuild {
        PassOptions::rebuild()
    } else {
        PassOptions::default()
    };

    let mut workbook = new_workbook(&layout).context("Failed to create workbook")?;

    for pass in 1..=repeat.max(1) {
        let report = configure_workbook(&mut workbook, &layout, &options)
            .with_context(|| format!("Pass {} failed", pass))?;
        eprintln!(
            "Pass {}: {} number formats, {} rules, {} banded rows on '{}'; {} charts on '{}'",
            pass,
            report.formatting.number_formats,
            report.formatting.rules_added,
            report.formatting.banded_rows,
            layout.main_sheet,
            report.charts,
            layout.dashboard_sheet
        );
    }

    let main = workbook.worksheet_by_name(&layout.main_sheet)?;
    let dashboard = workbook.worksheet_by_name(&layout.dashboard_sheet)?;
    eprintln!(
        "Totals: {} formatted cells, {} conditional rules, {} charts",
        main.formatted_cell_count(),
        main.conditional_format_count(),
        dashboard.chart_count()
    );

    workbook
        .save(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    eprintln!("Wrote '{}'", output.display());

    Ok(())
}

fn plan(layout: Option<&Path>) -> Result<()> {
    let layout = load_layout(layout)?;
    let options = PassOptions::default();

    let mut main = RecordingHost::new(Worksheet::new(layout.main_sheet.as_str()));
    let mut dashboard = RecordingHost::new(Worksheet::new(layout.dashboard_sheet.as_str()));

    apply_formatting(&mut main, &layout, &options).context("Formatting pass failed")?;
    add_charts(&mut dashboard, &main, &layout, &options).context("Chart pass failed")?;

    let mut out = io::stdout().lock();
    for call in main.calls().iter().chain(dashboard.calls().iter()) {
        writeln!(out, "{}", call).context("Failed to write to stdout")?;
    }

    Ok(())
}

fn rows(layout: Option<&Path>) -> Result<()> {
    let layout = load_layout(layout)?;
    let banded = layout.banded_rows();

    let mut out = io::stdout().lock();
    for row in layout.banding.first_row..=layout.banding.last_row {
        let band = if banded.contains(&row) { "banded" } else { "" };
        writeln!(out, "{}\t{}\t{}", row, layout.row_kind(row), band)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn print_layout() -> Result<()> {
    let json = serde_json::to_string_pretty(&Layout::default())
        .context("Failed to serialize layout")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_layout_default() {
        assert_eq!(load_layout(None).unwrap(), Layout::default());
    }

    #[test]
    fn test_load_layout_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{ "dashboard_sheet": "Charts" }"#).unwrap();

        let layout = load_layout(Some(&path)).unwrap();
        assert_eq!(layout.dashboard_sheet, "Charts");
        assert_eq!(layout.main_sheet, "Main");
    }

    #[test]
    fn test_load_layout_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_layout(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_default_layout_round_trips_through_json() {
        let json = serde_json::to_string_pretty(&Layout::default()).unwrap();
        let parsed: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Layout::default());
    }
}
