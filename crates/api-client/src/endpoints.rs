use crate::error::FetchError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The fixed set of backend endpoints the dashboard reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    AnalysisSummary,
    ExportDestinations,
    ImportSources,
    Commodities,
    Comprehensive,
    QuarterlyComparison,
    RegionalDistribution,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::AnalysisSummary,
        Endpoint::ExportDestinations,
        Endpoint::ImportSources,
        Endpoint::Commodities,
        Endpoint::Comprehensive,
        Endpoint::QuarterlyComparison,
        Endpoint::RegionalDistribution,
    ];

    /// The URL path relative to the backend base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AnalysisSummary => "/api/analysis/summary",
            Endpoint::ExportDestinations => "/api/exports/destinations",
            Endpoint::ImportSources => "/api/imports/sources",
            Endpoint::Commodities => "/api/commodities",
            Endpoint::Comprehensive => "/api/analytics/comprehensive",
            Endpoint::QuarterlyComparison => "/api/analytics/quarterly-comparison",
            Endpoint::RegionalDistribution => "/api/regional/distribution",
        }
    }

    /// The symbolic name, also used as the file stem by `DirectoryClient`.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::AnalysisSummary => "analysis-summary",
            Endpoint::ExportDestinations => "export-destinations",
            Endpoint::ImportSources => "import-sources",
            Endpoint::Commodities => "commodities",
            Endpoint::Comprehensive => "comprehensive",
            Endpoint::QuarterlyComparison => "quarterly-comparison",
            Endpoint::RegionalDistribution => "regional-distribution",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == s)
            .ok_or_else(|| FetchError::UnknownEndpoint(s.to_string()))
    }
}
