use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a dashboard insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Info,
    Success,
    Warning,
}

impl InsightKind {
    /// Maps an upstream insight `type` string onto our three kinds.
    /// Anything unrecognised (e.g. "primary") is shown as plain info.
    pub fn from_upstream(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "success" | "positive" | "opportunity" => InsightKind::Success,
            "warning" | "danger" | "risk" | "negative" => InsightKind::Warning,
            _ => InsightKind::Info,
        }
    }
}

/// The normalization pass that produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightOrigin {
    Overview,
    Comprehensive,
    Quarterly,
    Regional,
}

/// Fixed commodity taxonomy used to group SITC descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommodityCategory {
    #[serde(rename = "Agricultural")]
    Agricultural,
    #[serde(rename = "Mining & Energy")]
    MiningAndEnergy,
    #[serde(rename = "Manufacturing")]
    Manufacturing,
    #[serde(rename = "Chemicals")]
    Chemicals,
    #[serde(rename = "Other")]
    Other,
}

impl CommodityCategory {
    pub const ALL: [CommodityCategory; 5] = [
        CommodityCategory::Agricultural,
        CommodityCategory::MiningAndEnergy,
        CommodityCategory::Manufacturing,
        CommodityCategory::Chemicals,
        CommodityCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CommodityCategory::Agricultural => "Agricultural",
            CommodityCategory::MiningAndEnergy => "Mining & Energy",
            CommodityCategory::Manufacturing => "Manufacturing",
            CommodityCategory::Chemicals => "Chemicals",
            CommodityCategory::Other => "Other",
        }
    }
}

impl fmt::Display for CommodityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
