//! Dashboard chart pass

use dealsheet_core::chart::{
    AxisTitles, ChartOptions, GaugeOptions, LegendPosition, PieSliceText, SeriesOptions,
    SourceRange,
};
use dealsheet_core::{Chart, ChartPosition, ChartType, SheetHost};

use crate::error::Result;
use crate::layout::{parse_color, ChartSource, Layout};
use crate::options::{ChartMode, PassOptions};

pub const EXPENSES_TITLE: &str = "Monthly Expenses Breakdown";
pub const APPRECIATION_TITLE: &str = "Property Value Projection by Appreciation Rate";
pub const INTEREST_RATE_TITLE: &str = "Monthly Cash Flow by Interest Rate";
pub const SCENARIOS_TITLE: &str = "Scenario Comparison";
pub const ROI_TITLE: &str = "Return on Investment";

/// Titles of the charts this pass owns
pub const CHART_TITLES: [&str; 5] = [
    EXPENSES_TITLE,
    APPRECIATION_TITLE,
    INTEREST_RATE_TITLE,
    SCENARIOS_TITLE,
    ROI_TITLE,
];

const GOOGLE_BLUE: &str = "#4285F4";
const GOOGLE_GREEN: &str = "#34A853";
const GOOGLE_YELLOW: &str = "#FBBC05";

const CHART_WIDTH: u32 = 500;
const CHART_HEIGHT: u32 = 300;
const GAUGE_WIDTH: u32 = 400;
const GAUGE_HEIGHT: u32 = 200;

/// Build the five dashboard charts from main-sheet ranges, in insertion order
pub fn chart_definitions<M: SheetHost + ?Sized>(main: &M, layout: &Layout) -> Result<Vec<Chart>> {
    let sources = &layout.charts;
    let blue = parse_color("chart colour", GOOGLE_BLUE)?;
    let green = parse_color("chart colour", GOOGLE_GREEN)?;
    let yellow = parse_color("chart colour", GOOGLE_YELLOW)?;

    let expenses = sourced(Chart::new(ChartType::Pie), main, &sources.expenses)?
        .with_position(ChartPosition::new(15, 1, 0, 0))
        .with_options(ChartOptions {
            title: Some(EXPENSES_TITLE.to_string()),
            width: Some(CHART_WIDTH),
            height: Some(CHART_HEIGHT),
            legend: Some(LegendPosition::Right),
            pie_slice_text: Some(PieSliceText::Percentage),
            ..Default::default()
        });

    let appreciation = sourced(Chart::new(ChartType::Line), main, &sources.appreciation)?
        .with_position(ChartPosition::new(15, 5, 0, 0))
        .with_options(ChartOptions {
            title: Some(APPRECIATION_TITLE.to_string()),
            width: Some(CHART_WIDTH),
            height: Some(CHART_HEIGHT),
            axes: AxisTitles::new("Appreciation Rate", "Projected Value ($)"),
            series: vec![
                SeriesOptions::labelled("5-Year Value"),
                SeriesOptions::labelled("10-Year Value"),
            ],
            ..Default::default()
        });

    let interest_rate = sourced(Chart::new(ChartType::Column), main, &sources.interest_rate)?
        .with_position(ChartPosition::new(30, 1, 0, 0))
        .with_options(ChartOptions {
            title: Some(INTEREST_RATE_TITLE.to_string()),
            width: Some(CHART_WIDTH),
            height: Some(CHART_HEIGHT),
            axes: AxisTitles::new("Interest Rate", "Monthly Cash Flow ($)"),
            colors: vec![blue],
            ..Default::default()
        });

    let scenarios = sourced(Chart::new(ChartType::Bar), main, &sources.scenarios)?
        .with_position(ChartPosition::new(30, 5, 0, 0))
        .with_options(ChartOptions {
            title: Some(SCENARIOS_TITLE.to_string()),
            width: Some(CHART_WIDTH),
            height: Some(CHART_HEIGHT),
            legend: Some(LegendPosition::Top),
            axes: AxisTitles::new("Value", "Metric"),
            colors: vec![blue, green, yellow],
            ..Default::default()
        });

    let roi = sourced(Chart::new(ChartType::Gauge), main, &sources.roi)?
        .with_position(ChartPosition::new(45, 3, 0, 0))
        .with_options(ChartOptions {
            title: Some(ROI_TITLE.to_string()),
            width: Some(GAUGE_WIDTH),
            height: Some(GAUGE_HEIGHT),
            gauge: Some(
                GaugeOptions::new(0.0, 30.0)
                    .with_red(0.0, 5.0)
                    .with_yellow(5.0, 15.0)
                    .with_green(15.0, 30.0),
            ),
            ..Default::default()
        });

    Ok(vec![expenses, appreciation, interest_rate, scenarios, roi])
}

fn sourced<M: SheetHost + ?Sized>(chart: Chart, main: &M, source: &ChartSource) -> Result<Chart> {
    let labels = main.range(&source.labels)?;
    let values = main.range(&source.values)?;
    Ok(chart
        .add_range(SourceRange::new(main.name(), labels))
        .add_range(SourceRange::new(main.name(), values)))
}

/// Build the five charts and insert them on the dashboard. Returns the number inserted.
pub fn add_charts<D, M>(
    dashboard: &mut D,
    main: &M,
    layout: &Layout,
    options: &PassOptions,
) -> Result<usize>
where
    D: SheetHost + ?Sized,
    M: SheetHost + ?Sized,
{
    let charts = chart_definitions(main, layout)?;

    if options.charts == ChartMode::Replace {
        let stale: Vec<usize> = dashboard
            .charts()
            .iter()
            .enumerate()
            .filter(|(_, chart)| CHART_TITLES.iter().any(|title| *title == chart.title()))
            .map(|(index, _)| index)
            .collect();
        if !stale.is_empty() {
            tracing::warn!(
                sheet = dashboard.name(),
                removed = stale.len(),
                "replacing existing charts"
            );
        }
        for index in stale.into_iter().rev() {
            dashboard.remove_chart(index)?;
        }
    }

    let mut inserted = 0;
    for chart in charts {
        tracing::debug!(
            sheet = dashboard.name(),
            kind = chart.chart_type.as_str(),
            title = chart.title(),
            "inserting chart"
        );
        dashboard.insert_chart(chart)?;
        inserted += 1;
    }

    tracing::info!(sheet = dashboard.name(), inserted, "chart pass complete");
    Ok(inserted)
}
