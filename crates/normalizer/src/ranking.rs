use crate::classify::categorize;
use crate::raw::{coerce, RawCommodity, RawCountry};
use crate::scoring::performance_score;
use core_types::{CommodityEntry, CountryEntry};

pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const UNKNOWN_COMMODITY: &str = "Unknown";

/// Ranks follow input order; upstream is trusted to have sorted the list.
pub fn rank_countries(raw: &[RawCountry]) -> Vec<CountryEntry> {
    raw.iter()
        .enumerate()
        .map(|(index, entry)| {
            let value = coerce(&entry.value);
            let share_of_total = coerce(&entry.share_percentage);
            let growth_yoy = coerce(&entry.growth_rate);
            CountryEntry {
                rank: index + 1,
                country: entry
                    .country
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
                value,
                share_of_total,
                growth_yoy,
                performance_score: performance_score(value, growth_yoy, share_of_total),
            }
        })
        .collect()
}

pub fn rank_commodities(raw: &[RawCommodity]) -> Vec<CommodityEntry> {
    raw.iter()
        .enumerate()
        .map(|(index, entry)| {
            let description = entry
                .description
                .clone()
                .unwrap_or_else(|| UNKNOWN_COMMODITY.to_string());
            CommodityEntry {
                rank: index + 1,
                category: categorize(&description),
                description,
                value: coerce(&entry.value),
                share_of_total: coerce(&entry.share_percentage),
                growth_yoy: coerce(&entry.growth_rate),
            }
        })
        .collect()
}
