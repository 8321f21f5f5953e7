use core_types::{Insight, InsightKind, InsightOrigin, TradeOverview};

/// Bounded, title-deduplicated insight list.
///
/// Pushing an insight whose title is already present replaces the old entry
/// and moves it to the end. Once the cap is exceeded the oldest entries go.
#[derive(Debug, Clone)]
pub struct InsightLog {
    entries: Vec<Insight>,
    cap: usize,
}

impl InsightLog {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Starts from a previous list, minus the insights that get regenerated
    /// on every pass.
    pub fn carried_from(cap: usize, previous: &[Insight]) -> Self {
        let mut log = Self::new(cap);
        log.extend(
            previous
                .iter()
                .filter(|insight| insight.origin != InsightOrigin::Overview)
                .cloned(),
        );
        log
    }

    pub fn push(&mut self, insight: Insight) {
        self.entries.retain(|existing| existing.title != insight.title);
        self.entries.push(insight);
        if self.entries.len() > self.cap {
            let excess = self.entries.len() - self.cap;
            self.entries.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Insight> {
        self.entries
    }
}

impl Extend<Insight> for InsightLog {
    fn extend<I: IntoIterator<Item = Insight>>(&mut self, iter: I) {
        for insight in iter {
            self.push(insight);
        }
    }
}

/// Insights derived from the headline figures alone.
pub fn overview_insights(overview: &TradeOverview) -> Vec<Insight> {
    let mut insights = Vec::new();

    if overview.trade_balance < 0.0 {
        insights.push(Insight::new(
            InsightKind::Warning,
            InsightOrigin::Overview,
            "Trade Deficit",
            format!(
                "Imports of ${:.2}M exceed exports of ${:.2}M, a deficit of ${:.2}M.",
                overview.total_imports,
                overview.total_exports,
                overview.trade_balance.abs()
            ),
        ));
    }

    if overview.export_growth_qoq > 0.0 {
        insights.push(Insight::new(
            InsightKind::Success,
            InsightOrigin::Overview,
            "Export Growth",
            format!(
                "Exports grew {:.1}% quarter-over-quarter to ${:.2}M.",
                overview.export_growth_qoq, overview.total_exports
            ),
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str, origin: InsightOrigin) -> Insight {
        Insight::new(InsightKind::Info, origin, title, "")
    }

    #[test]
    fn test_duplicate_title_replaces_and_moves_to_end() {
        let mut log = InsightLog::new(10);
        log.push(info("A", InsightOrigin::Comprehensive));
        log.push(info("B", InsightOrigin::Comprehensive));
        log.push(Insight::new(
            InsightKind::Warning,
            InsightOrigin::Quarterly,
            "A",
            "newer",
        ));

        let entries = log.into_vec();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "B");
        assert_eq!(entries[1].message, "newer");
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut log = InsightLog::new(2);
        log.extend(["one", "two", "three"].map(|t| info(t, InsightOrigin::Regional)));
        let titles: Vec<String> = log.into_vec().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["two", "three"]);
    }

    #[test]
    fn test_carried_from_drops_overview_insights() {
        let previous = vec![
            info("Trade Deficit", InsightOrigin::Overview),
            info("Regional Trade Focus", InsightOrigin::Regional),
        ];
        let log = InsightLog::carried_from(24, &previous);
        assert_eq!(log.len(), 1);
        assert_eq!(log.into_vec()[0].title, "Regional Trade Focus");
    }

    #[test]
    fn test_deficit_overview_yields_single_warning() {
        let overview = TradeOverview::new(100.0, 150.0, -50.0, 0.0, 0.0);
        let insights = overview_insights(&overview);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert_eq!(insights[0].title, "Trade Deficit");
        assert!(insights[0].message.contains("$50.00M"));
    }

    #[test]
    fn test_growth_overview_yields_success() {
        let overview = TradeOverview::new(200.0, 150.0, 50.0, 4.3, 0.0);
        let insights = overview_insights(&overview);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Success);
        assert!(insights[0].message.contains("4.3%"));
    }

    #[test]
    fn test_flat_surplus_yields_nothing() {
        let overview = TradeOverview::new(200.0, 150.0, 50.0, 0.0, -3.0);
        assert!(overview_insights(&overview).is_empty());
    }
}
