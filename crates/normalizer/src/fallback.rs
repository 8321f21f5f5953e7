use crate::raw::{RawCountry, RawNumber};

/// Placeholder partner lists (US$ millions) shown on a cold start when the
/// backend delivers no country lists at all.
const EXPORT_DESTINATIONS: [(&str, f64, f64); 5] = [
    ("United Arab Emirates", 431.0, 63.4),
    ("Democratic Republic of the Congo", 97.0, 14.3),
    ("China", 27.0, 4.0),
    ("Luxembourg", 15.0, 2.2),
    ("United Kingdom", 14.0, 2.1),
];

const IMPORT_SOURCES: [(&str, f64, f64); 5] = [
    ("China", 303.0, 18.6),
    ("Tanzania", 199.0, 12.2),
    ("Kenya", 141.0, 8.7),
    ("India", 110.0, 6.8),
    ("United Arab Emirates", 98.0, 6.0),
];

fn to_raw(rows: &[(&str, f64, f64)]) -> Vec<RawCountry> {
    rows.iter()
        .map(|(country, value, share)| RawCountry {
            country: Some(country.to_string()),
            value: Some(RawNumber::Number(*value)),
            share_percentage: Some(RawNumber::Number(*share)),
            growth_rate: None,
        })
        .collect()
}

pub fn export_destinations() -> Vec<RawCountry> {
    to_raw(&EXPORT_DESTINATIONS)
}

pub fn import_sources() -> Vec<RawCountry> {
    to_raw(&IMPORT_SOURCES)
}
