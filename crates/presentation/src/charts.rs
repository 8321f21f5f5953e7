//! Chart configurations in the shape the dashboard front end hands to Chart.js.
//!
//! Every builder returns a complete config. Empty input yields a placeholder
//! config with `noData: true` so the front end can show a message instead of
//! an empty canvas.

use crate::format::{format_millions, format_percent};
use core_types::{
    CommodityCategory, CommodityEntry, CountryEntry, QuarterPoint, RegionEntry, ViewModel,
};
use serde::Serialize;
use serde_json::{json, Value};

pub const NO_DATA_MESSAGE: &str = "No data available";

const PALETTE: [&str; 8] = [
    "#2563eb", "#16a34a", "#f59e0b", "#dc2626", "#7c3aed", "#0891b2", "#db2777", "#64748b",
];

pub fn no_data(chart_type: &str, title: &str) -> Value {
    json!({
        "type": chart_type,
        "noData": true,
        "message": NO_DATA_MESSAGE,
        "data": { "labels": [], "datasets": [] },
        "options": { "plugins": { "title": { "display": true, "text": title } } },
    })
}

fn colors(count: usize) -> Vec<&'static str> {
    PALETTE.iter().copied().cycle().take(count).collect()
}

/// `value` as a percentage of the largest value, for bar widths.
pub fn percent_of_max(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        (value / max * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Horizontal bar chart of a ranked partner list.
pub fn country_bar_chart(entries: &[CountryEntry], title: &str) -> Value {
    if entries.is_empty() {
        return no_data("bar", title);
    }

    let max = entries.iter().map(|e| e.value).fold(0.0, f64::max);
    let rows: Vec<Value> = entries
        .iter()
        .map(|e| {
            json!({
                "rank": e.rank,
                "country": e.country,
                "value": e.value,
                "formatted": format_millions(e.value),
                "share": format_percent(e.share_of_total),
                "performanceScore": e.performance_score,
                "percentOfMax": percent_of_max(e.value, max),
            })
        })
        .collect();

    json!({
        "type": "bar",
        "noData": false,
        "data": {
            "labels": entries.iter().map(|e| e.country.as_str()).collect::<Vec<_>>(),
            "datasets": [{
                "label": "US$ millions",
                "data": entries.iter().map(|e| e.value).collect::<Vec<_>>(),
                "backgroundColor": PALETTE[0],
            }],
        },
        "options": {
            "indexAxis": "y",
            "plugins": { "title": { "display": true, "text": title } },
        },
        "rows": rows,
    })
}

/// Doughnut chart of commodity value summed per category, in taxonomy order.
/// Categories with no value are left out.
pub fn commodity_category_chart(entries: &[CommodityEntry], title: &str) -> Value {
    let totals: Vec<(CommodityCategory, f64)> = CommodityCategory::ALL
        .iter()
        .map(|category| {
            let total = entries
                .iter()
                .filter(|e| e.category == *category)
                .map(|e| e.value)
                .sum();
            (*category, total)
        })
        .filter(|(_, total)| *total > 0.0)
        .collect();

    if totals.is_empty() {
        return no_data("doughnut", title);
    }

    json!({
        "type": "doughnut",
        "noData": false,
        "data": {
            "labels": totals.iter().map(|(c, _)| c.label()).collect::<Vec<_>>(),
            "datasets": [{
                "data": totals.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
                "backgroundColor": colors(totals.len()),
            }],
        },
        "options": { "plugins": { "title": { "display": true, "text": title } } },
    })
}

pub fn quarterly_trend_chart(points: &[QuarterPoint]) -> Value {
    const TITLE: &str = "Quarterly Trade Trend";
    if points.is_empty() {
        return no_data("line", TITLE);
    }

    let series = |f: fn(&QuarterPoint) -> f64| points.iter().map(f).collect::<Vec<_>>();
    json!({
        "type": "line",
        "noData": false,
        "data": {
            "labels": points.iter().map(|p| p.quarter.as_str()).collect::<Vec<_>>(),
            "datasets": [
                { "label": "Exports", "data": series(|p| p.exports), "borderColor": PALETTE[1] },
                { "label": "Imports", "data": series(|p| p.imports), "borderColor": PALETTE[3] },
                { "label": "Balance", "data": series(|p| p.balance), "borderColor": PALETTE[0] },
            ],
        },
        "options": { "plugins": { "title": { "display": true, "text": TITLE } } },
    })
}

pub fn regional_pie_chart(regions: &[RegionEntry]) -> Value {
    const TITLE: &str = "Trade by Regional Block";
    if regions.is_empty() {
        return no_data("pie", TITLE);
    }

    json!({
        "type": "pie",
        "noData": false,
        "data": {
            "labels": regions.iter().map(|r| r.region.as_str()).collect::<Vec<_>>(),
            "datasets": [{
                "data": regions.iter().map(|r| r.value).collect::<Vec<_>>(),
                "backgroundColor": colors(regions.len()),
            }],
        },
        "options": { "plugins": { "title": { "display": true, "text": TITLE } } },
    })
}

/// Every chart the dashboard shows, built from one model snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub export_destinations: Value,
    pub import_sources: Value,
    pub export_categories: Value,
    pub import_categories: Value,
    pub quarterly: Value,
    pub regions: Value,
}

impl DashboardCharts {
    pub fn from_view_model(model: &ViewModel) -> Self {
        Self {
            export_destinations: country_bar_chart(
                &model.export_destinations,
                "Top Export Destinations",
            ),
            import_sources: country_bar_chart(&model.import_sources, "Top Import Sources"),
            export_categories: commodity_category_chart(
                &model.export_commodities,
                "Exports by Category",
            ),
            import_categories: commodity_category_chart(
                &model.import_commodities,
                "Imports by Category",
            ),
            quarterly: quarterly_trend_chart(&model.quarterly),
            regions: regional_pie_chart(&model.regions),
        }
    }
}
