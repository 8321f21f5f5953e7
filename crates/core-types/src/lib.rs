//! # Tradescope Core Types
//!
//! The shared vocabulary of the workspace: the canonical dashboard view model
//! that the normalizer produces, the cache owns, and the presentation layer reads.
//! This crate has no logic beyond derived-field construction and no knowledge of
//! where the data comes from.

pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{CommodityCategory, InsightKind, InsightOrigin};
pub use structs::{
    CommodityEntry, CountryEntry, Insight, Metadata, QuarterPoint, RegionEntry, TradeOverview,
    ViewModel,
};
