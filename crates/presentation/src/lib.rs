//! # Tradescope Presentation
//!
//! Read-only adapters from the view model to what a screen shows: formatted
//! figures, summary cards, chart configurations and the export report.

pub mod cards;
pub mod charts;
pub mod format;
pub mod report;

// Re-export the adapters to provide a clean public API.
pub use cards::{overview_cards, OverviewCard, Trend};
pub use charts::{
    commodity_category_chart, country_bar_chart, quarterly_trend_chart, regional_pie_chart,
    DashboardCharts,
};
pub use format::{format_change, format_currency, format_millions, format_percent};
pub use report::ExportReport;
