//! # Tradescope Normalizer
//!
//! Turns whatever the analysis backend delivered in one refresh cycle into a
//! fully-defaulted [`ViewModel`]. Normalization is total: malformed or missing
//! input resolves to defaults, previous values, or placeholder lists, and is
//! reported through `tracing` at debug level rather than as an error.

use core_types::{Metadata, TradeOverview, ViewModel};
use configuration::DashboardConfig;

pub mod classify;
pub mod enrich;
pub mod fallback;
pub mod insights;
pub mod ranking;
pub mod raw;
pub mod scoring;

// Re-export the main types to provide a clean public API.
pub use insights::InsightLog;
pub use raw::{RawAnalysisPayload, RawNumber};

use raw::{coerce, RawMetadata, RawSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Upper bound on the accumulated insight list.
    pub max_insights: usize,
    /// Substitute placeholder country lists on a cold start with no data.
    pub use_fallback_lists: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for NormalizerConfig {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            max_insights: config.max_insights,
            use_fallback_lists: config.use_fallback_lists,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Produces the next view model from this cycle's payload.
    ///
    /// Every section present in `raw` replaces its counterpart; every section
    /// absent from `raw` is carried forward from `previous` unchanged.
    pub fn normalize(
        &self,
        raw: &RawAnalysisPayload,
        previous: Option<&ViewModel>,
    ) -> ViewModel {
        let overview = match &raw.summary {
            Some(summary) => overview_from(summary),
            None => {
                tracing::debug!("No summary in payload; carrying the previous overview.");
                previous.map(|p| p.overview.clone()).unwrap_or_default()
            }
        };

        let export_destinations = match &raw.export_destinations {
            Some(list) => ranking::rank_countries(list),
            None => self.carry_countries(
                previous.map(|p| &p.export_destinations),
                fallback::export_destinations,
            ),
        };
        let import_sources = match &raw.import_sources {
            Some(list) => ranking::rank_countries(list),
            None => self.carry_countries(
                previous.map(|p| &p.import_sources),
                fallback::import_sources,
            ),
        };

        let export_commodities = raw
            .export_commodities
            .as_deref()
            .map(ranking::rank_commodities)
            .or_else(|| previous.map(|p| p.export_commodities.clone()))
            .unwrap_or_default();
        let import_commodities = raw
            .import_commodities
            .as_deref()
            .map(ranking::rank_commodities)
            .or_else(|| previous.map(|p| p.import_commodities.clone()))
            .unwrap_or_default();

        let quarterly = raw
            .quarterly
            .as_deref()
            .map(enrich::quarter_points)
            .or_else(|| previous.map(|p| p.quarterly.clone()))
            .unwrap_or_default();
        let regions = raw
            .regions
            .as_deref()
            .map(enrich::region_entries)
            .or_else(|| previous.map(|p| p.regions.clone()))
            .unwrap_or_default();

        let mut insights = InsightLog::carried_from(
            self.config.max_insights,
            previous.map_or(&[][..], |p| p.insights.as_slice()),
        );
        if let Some(bundle) = &raw.comprehensive {
            insights.extend(enrich::comprehensive_insights(bundle));
        }
        if raw.quarterly.is_some() {
            insights.extend(enrich::quarterly_insights(&quarterly));
        }
        if raw.regions.is_some() {
            insights.extend(enrich::regional_insights(&regions));
        }
        insights.extend(insights::overview_insights(&overview));

        // Counts the payload does not state follow the lists of this pass;
        // only the generation stamp is carried from the previous model.
        let derived = Metadata {
            countries_analyzed: export_destinations.len() + import_sources.len(),
            commodities_analyzed: export_commodities.len() + import_commodities.len(),
            quarters_analyzed: quarterly.len(),
            generated_at: previous.and_then(|p| p.metadata.generated_at.clone()),
        };
        let metadata = match &raw.metadata {
            Some(meta) => metadata_from(meta, derived),
            None => derived,
        };

        ViewModel {
            overview,
            export_destinations,
            import_sources,
            export_commodities,
            import_commodities,
            quarterly,
            regions,
            insights: insights.into_vec(),
            metadata,
        }
    }

    fn carry_countries(
        &self,
        previous: Option<&Vec<core_types::CountryEntry>>,
        fallback: fn() -> Vec<raw::RawCountry>,
    ) -> Vec<core_types::CountryEntry> {
        match previous {
            Some(list) => list.clone(),
            None if self.config.use_fallback_lists => {
                tracing::debug!("No country list and no previous model; using placeholder list.");
                ranking::rank_countries(&fallback())
            }
            None => Vec::new(),
        }
    }
}

fn overview_from(summary: &RawSummary) -> TradeOverview {
    let exports = coerce(&summary.total_exports);
    let imports = coerce(&summary.total_imports);
    let balance = summary
        .current_balance
        .as_ref()
        .and_then(RawNumber::value)
        .unwrap_or(exports - imports);

    TradeOverview::new(
        exports,
        imports,
        balance,
        coerce(&summary.export_growth_rate),
        coerce(&summary.import_growth_rate),
    )
}

fn count(cell: &Option<RawNumber>, derived: usize) -> usize {
    match cell.as_ref().and_then(RawNumber::value) {
        Some(n) if n >= 0.0 => n.round() as usize,
        _ => derived,
    }
}

fn metadata_from(meta: &RawMetadata, derived: Metadata) -> Metadata {
    Metadata {
        countries_analyzed: count(&meta.countries_analyzed, derived.countries_analyzed),
        commodities_analyzed: count(&meta.commodities_analyzed, derived.commodities_analyzed),
        quarters_analyzed: count(&meta.quarters_analyzed, derived.quarters_analyzed),
        generated_at: meta.generated_at.clone().or(derived.generated_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{InsightKind, InsightOrigin};
    use serde_json::json;

    fn no_fallback() -> Normalizer {
        Normalizer::new(NormalizerConfig {
            max_insights: 24,
            use_fallback_lists: false,
        })
    }

    fn complete_payload() -> RawAnalysisPayload {
        RawAnalysisPayload::from_value(&json!({
            "summary": {
                "total_exports": 677.45,
                "total_imports": 1627.3,
                "export_growth_rate": 3.2,
                "import_growth_rate": "1.5%"
            },
            "metadata": { "generated_at": "2025-06-30T12:00:00" },
            "top_destinations": [
                {
                    "country": "United Arab Emirates",
                    "value": 431.2,
                    "share_percentage": 63.6,
                    "growth_rate": 0.2
                },
                {
                    "country": "Democratic Republic of the Congo",
                    "value": 97.5,
                    "share_percentage": 14.4
                }
            ],
            "top_sources": [{ "country": "China", "value": 303.1, "share_percentage": 18.6 }],
            "export_commodities": [
                { "description": "Gold, non-monetary", "value": 300 },
                { "description": "Food and live animals", "value": 120 }
            ],
            "import_commodities": [{ "description": "Mineral fuels, lubricants", "value": 250 }],
            "quarters": [
                { "quarter": "2024Q4", "exports": 650, "imports": 1600 },
                { "quarter": "2025Q1", "exports": 677.45, "imports": 1627.3 }
            ],
            "regions": [
                { "region": "EAC", "value": 250, "share_percentage": 55 },
                { "regional_block": "COMESA", "value": 200, "share_percentage": 45 }
            ]
        }))
    }

    #[test]
    fn test_missing_summary_defaults_to_zero() {
        let model = no_fallback().normalize(&RawAnalysisPayload::default(), None);
        assert_eq!(model.overview, TradeOverview::default());
        assert_eq!(model.overview.total_trade, 0.0);
        assert_eq!(model.overview.import_dependency_ratio, 0.0);
        assert!(model.export_destinations.is_empty());
        assert!(model.insights.is_empty());
    }

    #[test]
    fn test_deficit_scenario() {
        let raw = RawAnalysisPayload::from_value(&json!({
            "summary": { "total_exports": 100, "total_imports": 150 }
        }));
        let model = no_fallback().normalize(&raw, None);

        assert_eq!(model.overview.trade_balance, -50.0);
        assert_eq!(model.overview.total_trade, 250.0);
        assert!((model.overview.import_dependency_ratio - 0.6).abs() < 1e-12);
        assert_eq!(model.insights.len(), 1);
        assert_eq!(model.insights[0].kind, InsightKind::Warning);
        assert_eq!(model.insights[0].title, "Trade Deficit");
    }

    #[test]
    fn test_upstream_balance_wins_over_computed() {
        let raw = RawAnalysisPayload::from_value(&json!({
            "summary": { "total_exports": 100, "total_imports": 150, "current_balance": -48.5 }
        }));
        let model = no_fallback().normalize(&raw, None);
        assert_eq!(model.overview.trade_balance, -48.5);
    }

    #[test]
    fn test_malformed_numbers_coerce_to_zero() {
        let raw = RawAnalysisPayload::from_value(&json!({
            "summary": { "total_exports": "abc", "total_imports": { "nested": true } }
        }));
        let model = no_fallback().normalize(&raw, None);
        assert_eq!(model.overview.total_exports, 0.0);
        assert_eq!(model.overview.total_imports, 0.0);
        assert_eq!(model.overview.trade_balance, 0.0);
    }

    #[test]
    fn test_complete_payload_is_fully_populated() {
        let model = no_fallback().normalize(&complete_payload(), None);

        assert_eq!(model.export_destinations.len(), 2);
        assert_eq!(model.export_destinations[1].rank, 2);
        assert_eq!(model.import_sources[0].country, "China");
        assert_eq!(model.export_commodities[1].category.label(), "Agricultural");
        assert_eq!(model.import_commodities[0].category.label(), "Mining & Energy");
        assert_eq!(model.quarterly.len(), 2);
        assert_eq!(model.regions[1].region, "COMESA");
        assert_eq!(model.overview.import_growth_qoq, 1.5);
        assert_eq!(model.metadata.countries_analyzed, 3);
        assert_eq!(model.metadata.quarters_analyzed, 2);
        assert_eq!(model.metadata.generated_at.as_deref(), Some("2025-06-30T12:00:00"));

        let titles: Vec<&str> = model.insights.iter().map(|i| i.title.as_str()).collect();
        assert!(titles.contains(&"Trade Deficit"));
        assert!(titles.contains(&"Export Growth"));
        assert!(titles.contains(&"Quarterly Export Growth"));
        assert!(titles.contains(&"Regional Trade Focus"));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let normalizer = no_fallback();
        let raw = complete_payload();
        assert_eq!(normalizer.normalize(&raw, None), normalizer.normalize(&raw, None));
    }

    #[test]
    fn test_absent_sections_carry_forward() {
        let normalizer = no_fallback();
        let previous = normalizer.normalize(&complete_payload(), None);

        let partial = RawAnalysisPayload::from_value(&json!({
            "summary": { "total_exports": 700, "total_imports": 600 }
        }));
        let next = normalizer.normalize(&partial, Some(&previous));

        assert_eq!(next.overview.total_exports, 700.0);
        assert_eq!(next.export_destinations, previous.export_destinations);
        assert_eq!(next.import_commodities, previous.import_commodities);
        assert_eq!(next.quarterly, previous.quarterly);
        assert_eq!(next.regions, previous.regions);
        assert_eq!(next.metadata, previous.metadata);
    }

    #[test]
    fn test_present_sections_override_previous() {
        let normalizer = no_fallback();
        let previous = normalizer.normalize(&complete_payload(), None);

        let raw = RawAnalysisPayload::from_value(&json!({ "top_destinations": [] }));
        let next = normalizer.normalize(&raw, Some(&previous));

        assert!(next.export_destinations.is_empty());
        assert_eq!(next.overview, previous.overview);
    }

    #[test]
    fn test_overview_insights_are_regenerated_not_accumulated() {
        let normalizer = no_fallback();
        let deficit = RawAnalysisPayload::from_value(&json!({
            "summary": { "total_exports": 100, "total_imports": 150 }
        }));
        let first = normalizer.normalize(&deficit, None);

        let surplus = RawAnalysisPayload::from_value(&json!({
            "summary": { "total_exports": 200, "total_imports": 150 }
        }));
        let second = normalizer.normalize(&surplus, Some(&first));

        assert!(second.insights.iter().all(|i| i.title != "Trade Deficit"));
    }

    #[test]
    fn test_enrichment_insights_persist_across_partial_refreshes() {
        let normalizer = no_fallback();
        let first = normalizer.normalize(&complete_payload(), None);
        let second = normalizer.normalize(&RawAnalysisPayload::default(), Some(&first));

        assert!(
            second
                .insights
                .iter()
                .any(|i| i.origin == InsightOrigin::Regional)
        );
        // Overview insights come back because the carried overview still shows a deficit.
        assert!(second.insights.iter().any(|i| i.title == "Trade Deficit"));
        assert_eq!(
            second.insights.iter().filter(|i| i.title == "Trade Deficit").count(),
            1
        );
    }

    #[test]
    fn test_insight_cap_applies() {
        let normalizer = Normalizer::new(NormalizerConfig {
            max_insights: 2,
            use_fallback_lists: false,
        });
        let model = normalizer.normalize(&complete_payload(), None);
        assert_eq!(model.insights.len(), 2);
    }

    #[test]
    fn test_fallback_lists_only_on_cold_start() {
        let normalizer = Normalizer::default();
        let cold = normalizer.normalize(&RawAnalysisPayload::default(), None);
        assert!(!cold.export_destinations.is_empty());
        assert!(!cold.import_sources.is_empty());
        assert!(cold.export_commodities.is_empty());

        let previous = ViewModel::default();
        let warm = normalizer.normalize(&RawAnalysisPayload::default(), Some(&previous));
        assert!(warm.export_destinations.is_empty());
    }

    #[test]
    fn test_metadata_counts_fall_back_to_list_sizes() {
        let raw = RawAnalysisPayload::from_value(&json!({
            "metadata": { "countries_analyzed": "12", "quarters_analyzed": -3 },
            "quarters": [{ "quarter": "2025Q1", "exports": 1, "imports": 2 }]
        }));
        let model = no_fallback().normalize(&raw, None);
        assert_eq!(model.metadata.countries_analyzed, 12);
        assert_eq!(model.metadata.quarters_analyzed, 1);
        assert_eq!(model.metadata.commodities_analyzed, 0);
    }

    #[test]
    fn test_metadata_counts_follow_replaced_lists() {
        let normalizer = no_fallback();
        let first = normalizer.normalize(&complete_payload(), None);
        assert_eq!(first.metadata.countries_analyzed, 3);

        let raw = RawAnalysisPayload::from_value(&json!({
            "top_destinations": [
                { "country": "Kenya", "value": 10 },
                { "country": "Uganda", "value": 8 },
                { "country": "Tanzania", "value": 6 }
            ]
        }));
        let second = normalizer.normalize(&raw, Some(&first));

        assert_eq!(second.export_destinations.len(), 3);
        assert_eq!(second.metadata.countries_analyzed, 4);
        assert_eq!(second.metadata.quarters_analyzed, 2);
        assert_eq!(
            second.metadata.generated_at.as_deref(),
            Some("2025-06-30T12:00:00")
        );
    }

    #[test]
    fn test_bare_comprehensive_findings_all_survive() {
        let raw = RawAnalysisPayload::from_value(&json!({
            "comprehensive": {
                "insights": [
                    "Export destinations are highly concentrated",
                    "Gold dominates the export basket",
                    "Imports grew faster than exports",
                    "Regional trade is led by the EAC"
                ]
            }
        }));
        let model = no_fallback().normalize(&raw, None);

        let messages: Vec<&str> = model
            .insights
            .iter()
            .filter(|i| i.origin == InsightOrigin::Comprehensive)
            .map(|i| i.message.as_str())
            .collect();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], "Export destinations are highly concentrated");
        assert_eq!(messages[3], "Regional trade is led by the EAC");

        // A later bundle renumbers from 1 and replaces rather than piles up.
        let again = no_fallback().normalize(&raw, Some(&model));
        assert_eq!(again.insights.len(), 4);
    }
}
