use crate::format::{format_change, format_millions, format_percent};
use core_types::ViewModel;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    fn of(change: f64) -> Self {
        if change > 0.0 {
            Trend::Up
        } else if change < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// Display text for one summary tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: String,
    pub trend: Trend,
}

pub fn overview_cards(model: &ViewModel) -> Vec<OverviewCard> {
    let o = &model.overview;
    let balance_label = if o.trade_balance < 0.0 {
        "Deficit"
    } else {
        "Surplus"
    };

    vec![
        OverviewCard {
            title: "Total Exports",
            value: format_millions(o.total_exports),
            subtitle: format!("{} QoQ", format_change(o.export_growth_qoq)),
            trend: Trend::of(o.export_growth_qoq),
        },
        OverviewCard {
            title: "Total Imports",
            value: format_millions(o.total_imports),
            subtitle: format!("{} QoQ", format_change(o.import_growth_qoq)),
            trend: Trend::of(o.import_growth_qoq),
        },
        OverviewCard {
            title: "Trade Balance",
            value: format_millions(o.trade_balance),
            subtitle: balance_label.to_string(),
            trend: Trend::of(o.trade_balance),
        },
        OverviewCard {
            title: "Total Trade",
            value: format_millions(o.total_trade),
            subtitle: format!(
                "Import dependency {}",
                format_percent(o.import_dependency_ratio * 100.0)
            ),
            trend: Trend::Flat,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TradeOverview;

    #[test]
    fn test_cards_for_deficit() {
        let model = ViewModel {
            overview: TradeOverview::new(100.0, 150.0, -50.0, 3.2, -1.0),
            ..Default::default()
        };
        let cards = overview_cards(&model);

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "$100.0M");
        assert_eq!(cards[0].subtitle, "+3.2% QoQ");
        assert_eq!(cards[0].trend, Trend::Up);
        assert_eq!(cards[1].trend, Trend::Down);
        assert_eq!(cards[2].value, "-$50.0M");
        assert_eq!(cards[2].subtitle, "Deficit");
        assert_eq!(cards[3].subtitle, "Import dependency 60.0%");
    }

    #[test]
    fn test_cards_for_empty_model() {
        let cards = overview_cards(&ViewModel::default());
        assert_eq!(cards[0].value, "$0.0");
        assert_eq!(cards[2].subtitle, "Surplus");
        assert!(cards.iter().all(|c| c.trend == Trend::Flat));
    }
}
