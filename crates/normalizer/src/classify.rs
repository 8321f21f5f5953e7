use core_types::CommodityCategory;

/// Keyword rules, checked in order; the first match wins.
const RULES: [(CommodityCategory, &[&str]); 4] = [
    (
        CommodityCategory::Agricultural,
        &["food", "animal", "beverage", "tobacco"],
    ),
    (
        CommodityCategory::MiningAndEnergy,
        &["mineral", "fuel", "crude"],
    ),
    (
        CommodityCategory::Manufacturing,
        &["machinery", "transport", "manufactured"],
    ),
    (CommodityCategory::Chemicals, &["chemical"]),
];

/// Buckets a commodity description by case-insensitive substring match.
pub fn categorize(description: &str) -> CommodityCategory {
    let lowered = description.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(CommodityCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_matches() {
        assert_eq!(categorize("Crude petroleum oils"), CommodityCategory::MiningAndEnergy);
        assert_eq!(categorize("Live animals"), CommodityCategory::Agricultural);
        assert_eq!(
            categorize("Machinery and transport equipment"),
            CommodityCategory::Manufacturing
        );
        assert_eq!(
            categorize("Chemicals and related products"),
            CommodityCategory::Chemicals
        );
        assert_eq!(categorize("Unspecified widgets"), CommodityCategory::Other);
    }

    #[test]
    fn test_matching_ignores_case() {
        assert_eq!(categorize("MINERAL FUELS, LUBRICANTS"), CommodityCategory::MiningAndEnergy);
        assert_eq!(categorize("Beverages And Tobacco"), CommodityCategory::Agricultural);
    }

    #[test]
    fn test_earlier_rule_wins_on_overlap() {
        // "animal" (agricultural) is checked before "mineral" and "chemical".
        assert_eq!(
            categorize("Animal and vegetable oils, mineral waxes"),
            CommodityCategory::Agricultural
        );
        assert_eq!(
            categorize("Manufactured goods classified chiefly by material, chemical"),
            CommodityCategory::Manufacturing
        );
    }

    #[test]
    fn test_empty_description_is_other() {
        assert_eq!(categorize(""), CommodityCategory::Other);
    }
}
