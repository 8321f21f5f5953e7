use crate::enums::{CommodityCategory, InsightKind, InsightOrigin};
use serde::{Deserialize, Serialize};

// Using `#[serde(rename_all = "camelCase")]` so the exported report mirrors the
// field names the dashboard front end reads.

/// Headline trade figures for the reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOverview {
    pub total_exports: f64,
    pub total_imports: f64,
    /// Always `total_exports + total_imports`.
    pub total_trade: f64,
    pub trade_balance: f64,
    #[serde(rename = "exportGrowthQoQ")]
    pub export_growth_qoq: f64,
    #[serde(rename = "importGrowthQoQ")]
    pub import_growth_qoq: f64,
    /// `total_imports / total_trade`, or 0 when there is no trade.
    pub import_dependency_ratio: f64,
}

impl TradeOverview {
    /// Builds an overview, recomputing every derived field from the inputs.
    pub fn new(
        total_exports: f64,
        total_imports: f64,
        trade_balance: f64,
        export_growth_qoq: f64,
        import_growth_qoq: f64,
    ) -> Self {
        let total_trade = total_exports + total_imports;
        let import_dependency_ratio = if total_trade > 0.0 {
            total_imports / total_trade
        } else {
            0.0
        };
        Self {
            total_exports,
            total_imports,
            total_trade,
            trade_balance,
            export_growth_qoq,
            import_growth_qoq,
            import_dependency_ratio,
        }
    }
}

/// A trading partner in a ranked destination or source list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    /// 1-based position in upstream order.
    pub rank: usize,
    pub country: String,
    pub value: f64,
    pub share_of_total: f64,
    #[serde(rename = "growthYoY")]
    pub growth_yoy: f64,
    pub performance_score: f64,
}

/// A commodity line (usually an SITC section) in a ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityEntry {
    pub rank: usize,
    pub description: String,
    pub value: f64,
    pub share_of_total: f64,
    #[serde(rename = "growthYoY")]
    pub growth_yoy: f64,
    pub category: CommodityCategory,
}

/// One quarter of the quarterly comparison series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterPoint {
    pub quarter: String,
    pub exports: f64,
    pub imports: f64,
    pub balance: f64,
    /// Percentage change in exports against the preceding point.
    pub export_growth: f64,
}

/// A regional trade block (EAC, COMESA, ...) and its trade value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionEntry {
    pub rank: usize,
    pub region: String,
    pub value: f64,
    pub share_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub origin: InsightOrigin,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        origin: InsightOrigin,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            origin,
        }
    }
}

/// Counts describing how much data the upstream analysis covered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub countries_analyzed: usize,
    pub commodities_analyzed: usize,
    pub quarters_analyzed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// The canonical, fully-defaulted model every renderer reads from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub overview: TradeOverview,
    pub export_destinations: Vec<CountryEntry>,
    pub import_sources: Vec<CountryEntry>,
    pub export_commodities: Vec<CommodityEntry>,
    pub import_commodities: Vec<CommodityEntry>,
    pub quarterly: Vec<QuarterPoint>,
    pub regions: Vec<RegionEntry>,
    pub insights: Vec<Insight>,
    pub metadata: Metadata,
}
