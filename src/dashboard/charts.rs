//! Chart generation and rendering for the dashboard.
//!
//! The monthly trend is rendered as an ECharts grouped bar chart: one series
//! for income and one for expenses, one bar group per month. The chart is
//! generated as JSON configuration for the ECharts library together with its
//! HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::Bar,
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::prelude::ToPrimitive;
use time::Month;

use crate::html::HeadElement;

use super::trend::MonthlyTrend;

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a dashboard chart.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        section id="charts" class="w-full mx-auto mb-4" {
            div id=(chart.id) class="min-h-[320px] rounded dark:bg-gray-100" {}
        }
    )
}

/// Generates JavaScript initialization code for a dashboard chart.
///
/// Creates a script that initializes the ECharts instance with dark mode
/// support and responsive resizing.
pub(super) fn chart_script(chart: &DashboardChart) -> HeadElement {
    let script_content = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        chart.id, chart.options
    );

    HeadElement::ScriptSource(PreEscaped(script_content))
}

pub(super) fn trend_chart(trend: &[MonthlyTrend]) -> Chart {
    let labels: Vec<String> = trend
        .iter()
        .map(|entry| month_abbrev(entry.month.month()).to_string())
        .collect();
    // Lossy conversion is acceptable here: the chart is display-only and all
    // arithmetic happens on `Decimal` values.
    let income: Vec<f64> = trend
        .iter()
        .map(|entry| entry.total_income.to_f64().unwrap_or_default())
        .collect();
    let expenses: Vec<f64> = trend
        .iter()
        .map(|entry| entry.total_expense.to_f64().unwrap_or_default())
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income vs Expenses")
                .subtext("Last six months"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().top("8%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expenses").data(expenses))
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
