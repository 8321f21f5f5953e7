//! Typed view of the untrusted analysis JSON.
//!
//! Everything the normalizer reads goes through this module. Each upstream
//! field becomes an `Option`, each numeric field a [`RawNumber`], and the
//! shape probing (alternative key names, list-or-wrapper objects, nested
//! `{ "value": .. }` cells) happens exactly once, here. A field with the wrong
//! shape is treated as absent rather than failing the whole payload.

use api_client::{Endpoint, FetchResults};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// A numeric cell as delivered upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    Malformed,
}

impl RawNumber {
    /// Reads a JSON value. `null` is absence, not a number, so it yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(n.as_f64().map_or(RawNumber::Malformed, RawNumber::Number)),
            Value::String(s) => Some(RawNumber::Text(s.clone())),
            // The overview processor wraps figures as { "value": .., "formatted": .. }.
            Value::Object(obj) => Some(
                obj.get("value")
                    .and_then(RawNumber::from_json)
                    .unwrap_or(RawNumber::Malformed),
            ),
            Value::Bool(_) | Value::Array(_) => Some(RawNumber::Malformed),
        }
    }

    /// The finite number this cell holds, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => Some(*n).filter(|n| n.is_finite()),
            RawNumber::Text(s) => parse_numeric_text(s),
            RawNumber::Malformed => None,
        }
    }

    /// The shared coercion rule: anything that is not a finite number becomes 0.
    pub fn coerce(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

/// Coerces an optional cell, treating absence like any other malformed input.
pub fn coerce(cell: &Option<RawNumber>) -> f64 {
    cell.as_ref().map_or(0.0, RawNumber::coerce)
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

// --- Field probing helpers ---

fn first<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

fn number(obj: &Object, keys: &[&str]) -> Option<RawNumber> {
    first(obj, keys).and_then(RawNumber::from_json)
}

fn text(obj: &Object, keys: &[&str]) -> Option<String> {
    match first(obj, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn object<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Object> {
    first(obj, keys).and_then(Value::as_object)
}

/// A list that is either the value itself or wrapped under one of `keys`.
/// Anything that is not an array is treated as absent.
fn list<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(obj) => first(obj, keys).and_then(Value::as_array),
        _ => None,
    }
}

/// Parses every element; non-object elements become empty elements so
/// positions (and therefore ranks) still follow input order.
fn parse_list<T: Default>(items: &[Value], parse: fn(&Object) -> T) -> Vec<T> {
    items
        .iter()
        .map(|item| item.as_object().map(parse).unwrap_or_default())
        .collect()
}

// --- Key sets ---

const SUMMARY_KEYS: &[&str] = &["summary", "overview"];
const METADATA_KEYS: &[&str] = &["metadata"];
const EXPORT_DESTINATION_KEYS: &[&str] = &[
    "export_destinations",
    "top_destinations",
    "top_export_countries",
];
const IMPORT_SOURCE_KEYS: &[&str] = &["import_sources", "top_sources", "top_import_countries"];
const EXPORT_COMMODITY_KEYS: &[&str] = &["export_commodities", "top_export_commodities"];
const IMPORT_COMMODITY_KEYS: &[&str] = &["import_commodities", "top_import_commodities"];
const COMPREHENSIVE_KEYS: &[&str] = &["comprehensive", "comprehensive_analysis"];
const QUARTERLY_KEYS: &[&str] = &["quarterly", "quarters", "quarterly_comparison"];
const REGION_KEYS: &[&str] = &["regions", "regional_blocks", "regional_comparison"];

const VALUE_KEYS: &[&str] = &[
    "value",
    "total_exports",
    "total_imports",
    "export_value",
    "import_value",
    "latest_value",
];
const SHARE_KEYS: &[&str] = &["share_percentage", "share_of_total", "share"];
const GROWTH_KEYS: &[&str] = &["growth_rate", "growth_yoy", "yoy_growth", "growth"];

// --- Raw records ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSummary {
    pub total_exports: Option<RawNumber>,
    pub total_imports: Option<RawNumber>,
    pub current_balance: Option<RawNumber>,
    pub export_growth_rate: Option<RawNumber>,
    pub import_growth_rate: Option<RawNumber>,
}

impl RawSummary {
    const FIELDS: &'static [&'static str] = &[
        "total_exports",
        "total_imports",
        "current_balance",
        "trade_balance",
        "export_growth_rate",
        "import_growth_rate",
    ];

    fn parse(obj: &Object) -> Self {
        Self {
            total_exports: number(obj, &["total_exports"]),
            total_imports: number(obj, &["total_imports"]),
            current_balance: number(obj, &["current_balance", "trade_balance"]),
            export_growth_rate: number(obj, &["export_growth_rate", "export_growth"]),
            import_growth_rate: number(obj, &["import_growth_rate", "import_growth"]),
        }
    }

    fn looks_like_summary(obj: &Object) -> bool {
        Self::FIELDS.iter().any(|key| obj.contains_key(*key))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCountry {
    pub country: Option<String>,
    pub value: Option<RawNumber>,
    pub share_percentage: Option<RawNumber>,
    pub growth_rate: Option<RawNumber>,
}

impl RawCountry {
    fn parse(obj: &Object) -> Self {
        Self {
            country: text(obj, &["country", "name", "partner", "destination", "source"]),
            value: number(obj, VALUE_KEYS),
            share_percentage: number(obj, SHARE_KEYS),
            growth_rate: number(obj, GROWTH_KEYS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCommodity {
    pub description: Option<String>,
    pub value: Option<RawNumber>,
    pub share_percentage: Option<RawNumber>,
    pub growth_rate: Option<RawNumber>,
}

impl RawCommodity {
    fn parse(obj: &Object) -> Self {
        Self {
            description: text(
                obj,
                &["description", "commodity", "sitc_description", "name"],
            ),
            value: number(obj, VALUE_KEYS),
            share_percentage: number(obj, SHARE_KEYS),
            growth_rate: number(obj, GROWTH_KEYS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuarter {
    pub quarter: Option<String>,
    pub exports: Option<RawNumber>,
    pub imports: Option<RawNumber>,
}

impl RawQuarter {
    fn parse(obj: &Object) -> Self {
        Self {
            quarter: text(obj, &["quarter", "period", "label"]),
            exports: number(obj, &["exports", "export_value", "total_exports"]),
            imports: number(obj, &["imports", "import_value", "total_imports"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRegion {
    pub region: Option<String>,
    pub value: Option<RawNumber>,
    pub share_percentage: Option<RawNumber>,
}

impl RawRegion {
    fn parse(obj: &Object) -> Self {
        Self {
            region: text(obj, &["region", "regional_block", "block", "name"]),
            value: number(
                obj,
                &["value", "total_trade", "total_exports", "latest_value"],
            ),
            share_percentage: number(obj, SHARE_KEYS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInsight {
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
}

impl RawInsight {
    fn parse(value: &Value) -> Option<Self> {
        let insight = match value {
            // Pipelines sometimes emit bare finding strings.
            Value::String(s) if !s.trim().is_empty() => RawInsight {
                message: Some(s.trim().to_string()),
                ..Default::default()
            },
            Value::Object(obj) => RawInsight {
                kind: text(obj, &["type", "kind"]),
                title: text(obj, &["title"]),
                message: text(obj, &["message", "description", "text"]),
            },
            _ => return None,
        };
        (insight.title.is_some() || insight.message.is_some()).then_some(insight)
    }
}

/// The parts of the comprehensive analytics bundle the dashboard uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawComprehensive {
    pub insights: Vec<RawInsight>,
    /// Herfindahl-Hirschman index of export destinations, as a 0-1 fraction.
    pub destination_hhi: Option<RawNumber>,
}

impl RawComprehensive {
    fn parse(obj: &Object) -> Self {
        let insights = first(obj, &["insights", "key_findings"])
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(RawInsight::parse).collect())
            .unwrap_or_default();

        let destination_hhi = object(obj, &["concentration_analysis"]).and_then(|c| {
            object(c, &["country_concentration", "export_destinations"])
                .and_then(|d| number(d, &["hhi"]))
                .or_else(|| number(c, &["hhi"]))
        });

        Self {
            insights,
            destination_hhi,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetadata {
    pub countries_analyzed: Option<RawNumber>,
    pub commodities_analyzed: Option<RawNumber>,
    pub quarters_analyzed: Option<RawNumber>,
    pub generated_at: Option<String>,
}

impl RawMetadata {
    fn parse(obj: &Object) -> Self {
        Self {
            countries_analyzed: number(obj, &["countries_analyzed", "total_countries"]),
            commodities_analyzed: number(obj, &["commodities_analyzed", "total_commodities"]),
            quarters_analyzed: number(obj, &["quarters_analyzed", "total_quarters"]),
            generated_at: text(obj, &["generated_at", "timestamp"]),
        }
    }
}

/// Everything one refresh cycle learned from upstream.
///
/// `None` always means "not delivered this cycle"; the normalizer then carries
/// the previous value forward or substitutes a default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAnalysisPayload {
    pub summary: Option<RawSummary>,
    pub export_destinations: Option<Vec<RawCountry>>,
    pub import_sources: Option<Vec<RawCountry>>,
    pub export_commodities: Option<Vec<RawCommodity>>,
    pub import_commodities: Option<Vec<RawCommodity>>,
    pub comprehensive: Option<RawComprehensive>,
    pub quarterly: Option<Vec<RawQuarter>>,
    pub regions: Option<Vec<RawRegion>>,
    pub metadata: Option<RawMetadata>,
}

impl RawAnalysisPayload {
    /// Reads a single combined document (`{ "summary": .., "top_destinations": .., .. }`).
    /// A non-object document yields an empty payload.
    pub fn from_value(value: &Value) -> Self {
        let mut payload = Self::default();
        payload.absorb_document(value);
        payload
    }

    /// Assembles a payload from the successful endpoints of a fetch cycle.
    pub fn from_fetch_results(results: &FetchResults) -> Self {
        let mut payload = Self::default();
        for endpoint in Endpoint::ALL {
            if let Some(value) = results.payload(endpoint) {
                payload.absorb_endpoint(endpoint, value);
            }
        }
        payload
    }

    /// Merges one endpoint's response. Sections it delivers replace earlier ones.
    pub fn absorb_endpoint(&mut self, endpoint: Endpoint, value: &Value) {
        match endpoint {
            Endpoint::AnalysisSummary => {
                self.absorb_document(value);
                if self.summary.is_none() {
                    if let Some(obj) = value
                        .as_object()
                        .filter(|o| RawSummary::looks_like_summary(o))
                    {
                        self.summary = Some(RawSummary::parse(obj));
                    }
                }
            }
            Endpoint::ExportDestinations => {
                let keys = [&["destinations", "countries", "data"][..], EXPORT_DESTINATION_KEYS]
                    .concat();
                let items = list(value, &keys);
                replace_list(&mut self.export_destinations, items, RawCountry::parse);
            }
            Endpoint::ImportSources => {
                let keys = [&["sources", "countries", "data"][..], IMPORT_SOURCE_KEYS].concat();
                let items = list(value, &keys);
                replace_list(&mut self.import_sources, items, RawCountry::parse);
            }
            Endpoint::Commodities => {
                if value.is_array() {
                    let items = list(value, &[]);
                    replace_list(&mut self.export_commodities, items, RawCommodity::parse);
                } else {
                    let export_keys = [&["exports"][..], EXPORT_COMMODITY_KEYS].concat();
                    let import_keys = [&["imports"][..], IMPORT_COMMODITY_KEYS].concat();
                    let exports = list_in_object(value, &export_keys);
                    let imports = list_in_object(value, &import_keys);
                    replace_list(&mut self.export_commodities, exports, RawCommodity::parse);
                    replace_list(&mut self.import_commodities, imports, RawCommodity::parse);
                }
            }
            Endpoint::Comprehensive => {
                let bundle = value.as_object().map(RawComprehensive::parse);
                replace(&mut self.comprehensive, bundle);
            }
            Endpoint::QuarterlyComparison => {
                let keys = [&["data"][..], QUARTERLY_KEYS].concat();
                replace_list(&mut self.quarterly, list(value, &keys), RawQuarter::parse);
            }
            Endpoint::RegionalDistribution => {
                let keys = [&["data"][..], REGION_KEYS].concat();
                replace_list(&mut self.regions, list(value, &keys), RawRegion::parse);
            }
        }
    }

    fn absorb_document(&mut self, value: &Value) {
        let Some(obj) = value.as_object() else {
            tracing::debug!("Analysis document is not a JSON object; ignoring it.");
            return;
        };

        replace(&mut self.summary, object(obj, SUMMARY_KEYS).map(RawSummary::parse));
        replace(&mut self.metadata, object(obj, METADATA_KEYS).map(RawMetadata::parse));
        replace(
            &mut self.comprehensive,
            object(obj, COMPREHENSIVE_KEYS).map(RawComprehensive::parse),
        );

        let lists = |keys| list_in_object(value, keys);
        replace_list(
            &mut self.export_destinations,
            lists(EXPORT_DESTINATION_KEYS),
            RawCountry::parse,
        );
        replace_list(&mut self.import_sources, lists(IMPORT_SOURCE_KEYS), RawCountry::parse);
        replace_list(
            &mut self.export_commodities,
            lists(EXPORT_COMMODITY_KEYS),
            RawCommodity::parse,
        );
        replace_list(
            &mut self.import_commodities,
            lists(IMPORT_COMMODITY_KEYS),
            RawCommodity::parse,
        );
        replace_list(&mut self.quarterly, lists(QUARTERLY_KEYS), RawQuarter::parse);
        replace_list(&mut self.regions, lists(REGION_KEYS), RawRegion::parse);
    }
}

/// Like `list`, but only looks inside an object, never at the value itself.
fn list_in_object<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    value
        .as_object()
        .and_then(|obj| first(obj, keys))
        .and_then(Value::as_array)
}

fn replace_list<T: Default>(
    slot: &mut Option<Vec<T>>,
    items: Option<&Vec<Value>>,
    parse: fn(&Object) -> T,
) {
    replace(slot, items.map(|items| parse_list(items, parse)));
}

fn replace<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}
