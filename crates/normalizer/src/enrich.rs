//! Secondary passes over the optional analytics sections.

use crate::raw::{coerce, RawComprehensive, RawQuarter, RawRegion};
use crate::scoring::round_to;
use core_types::{Insight, InsightKind, InsightOrigin, QuarterPoint, RegionEntry};

pub const DEFAULT_INSIGHT_TITLE: &str = "Key Finding";

/// Reads HHI the way antitrust practice does, on a 0-1 scale.
pub fn interpret_hhi(hhi: f64) -> (&'static str, InsightKind) {
    if hhi < 0.01 {
        ("highly competitive", InsightKind::Info)
    } else if hhi < 0.15 {
        ("unconcentrated", InsightKind::Info)
    } else if hhi < 0.25 {
        ("moderately concentrated", InsightKind::Info)
    } else {
        ("highly concentrated", InsightKind::Warning)
    }
}

/// Untitled findings are numbered in arrival order ("Key Finding 1", ...) so
/// that title deduplication keeps each of them.
pub fn comprehensive_insights(bundle: &RawComprehensive) -> Vec<Insight> {
    let mut untitled = 0;
    let mut insights: Vec<Insight> = bundle
        .insights
        .iter()
        .map(|raw| {
            let title = match raw.title.as_deref() {
                Some(title) => title.to_string(),
                None => {
                    untitled += 1;
                    format!("{DEFAULT_INSIGHT_TITLE} {untitled}")
                }
            };
            Insight::new(
                raw.kind
                    .as_deref()
                    .map_or(InsightKind::Info, InsightKind::from_upstream),
                InsightOrigin::Comprehensive,
                title,
                raw.message.as_deref().unwrap_or_default(),
            )
        })
        .collect();

    if let Some(hhi) = bundle.destination_hhi.as_ref().and_then(|n| n.value()) {
        let (reading, kind) = interpret_hhi(hhi);
        insights.push(Insight::new(
            kind,
            InsightOrigin::Comprehensive,
            "Export Market Concentration",
            format!("Export destinations have an HHI of {hhi:.3}, which is {reading}."),
        ));
    }

    insights
}

/// Builds the quarterly series, recomputing balance and quarter-over-quarter
/// export growth (in percent; 0 for the first point or after a quarter with
/// no positive exports).
pub fn quarter_points(raw: &[RawQuarter]) -> Vec<QuarterPoint> {
    let mut points: Vec<QuarterPoint> = Vec::with_capacity(raw.len());
    for (index, quarter) in raw.iter().enumerate() {
        let exports = coerce(&quarter.exports);
        let imports = coerce(&quarter.imports);
        let export_growth = match points.last() {
            Some(prev) if prev.exports > 0.0 => {
                round_to((exports - prev.exports) / prev.exports * 100.0, 1)
            }
            _ => 0.0,
        };
        points.push(QuarterPoint {
            quarter: quarter
                .quarter
                .clone()
                .unwrap_or_else(|| format!("Q{}", index + 1)),
            exports,
            imports,
            balance: exports - imports,
            export_growth,
        });
    }
    points
}

pub fn quarterly_insights(points: &[QuarterPoint]) -> Vec<Insight> {
    let [.., prev, last] = points else {
        return Vec::new();
    };

    if last.export_growth < 0.0 {
        vec![Insight::new(
            InsightKind::Warning,
            InsightOrigin::Quarterly,
            "Quarterly Export Decline",
            format!(
                "Exports fell {:.1}% from {} to {}, to ${:.2}M.",
                last.export_growth.abs(),
                prev.quarter,
                last.quarter,
                last.exports
            ),
        )]
    } else if last.export_growth > 0.0 {
        vec![Insight::new(
            InsightKind::Success,
            InsightOrigin::Quarterly,
            "Quarterly Export Growth",
            format!(
                "Exports rose {:.1}% from {} to {}, to ${:.2}M.",
                last.export_growth, prev.quarter, last.quarter, last.exports
            ),
        )]
    } else {
        Vec::new()
    }
}

/// Ranks follow input order. A block without an upstream share gets one
/// computed against the sum of all block values.
pub fn region_entries(raw: &[RawRegion]) -> Vec<RegionEntry> {
    let total: f64 = raw.iter().map(|r| coerce(&r.value)).sum();
    raw.iter()
        .enumerate()
        .map(|(index, region)| {
            let value = coerce(&region.value);
            let share_of_total = match region.share_percentage.as_ref().and_then(|s| s.value()) {
                Some(share) => share,
                None if total > 0.0 => round_to(value / total * 100.0, 2),
                None => 0.0,
            };
            RegionEntry {
                rank: index + 1,
                region: region
                    .region
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                value,
                share_of_total,
            }
        })
        .collect()
}

pub fn regional_insights(regions: &[RegionEntry]) -> Vec<Insight> {
    let Some(leader) = regions
        .iter()
        .max_by(|a, b| a.value.total_cmp(&b.value))
    else {
        return Vec::new();
    };

    vec![Insight::new(
        InsightKind::Info,
        InsightOrigin::Regional,
        "Regional Trade Focus",
        format!(
            "{} leads {} tracked regional blocks with ${:.2}M ({:.1}% of the total).",
            leader.region,
            regions.len(),
            leader.value,
            leader.share_of_total
        ),
    )]
}
