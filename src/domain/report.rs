//! Grouping of matcher output for display. Pure data transformation, no
//! business rules.

use std::collections::BTreeMap;

use super::matcher::MatchOutcome;
use super::profit::ProfitEvent;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearTagSummary {
    pub year: i32,
    pub tag: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerSummary {
    pub ticker: String,
    pub amount: f64,
}

/// One still-open lot, flattened for display.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenLotLine {
    pub ticker: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub acquired_at: NaiveDate,
    pub tag: String,
}

impl OpenLotLine {
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

/// Materialized view over a [`MatchOutcome`], grouped the three ways the
/// dashboard wants them plus the open-lot listing.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerReport {
    /// Realized totals per year, ascending.
    pub by_year: Vec<YearSummary>,
    /// Realized totals per (year, tag), year ascending then tag.
    pub by_year_tag: Vec<YearTagSummary>,
    /// Realized totals per ticker, blank tickers skipped.
    pub by_ticker: Vec<TickerSummary>,
    /// Open lots, ticker ascending, then acquisition order within a ticker.
    pub open_lots: Vec<OpenLotLine>,
    pub total_realized: f64,
}

impl LedgerReport {
    pub fn compute(outcome: &MatchOutcome) -> Self {
        LedgerReport {
            by_year: group_by_year(&outcome.profits),
            by_year_tag: group_by_year_tag(&outcome.profits),
            by_ticker: group_by_ticker(&outcome.profits),
            open_lots: flatten_open_lots(outcome),
            total_realized: outcome.profits.iter().map(|p| p.amount).sum(),
        }
    }
}

fn group_by_year(profits: &[ProfitEvent]) -> Vec<YearSummary> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for event in profits {
        *totals.entry(event.year()).or_insert(0.0) += event.amount;
    }
    totals
        .into_iter()
        .map(|(year, amount)| YearSummary { year, amount })
        .collect()
}

fn group_by_year_tag(profits: &[ProfitEvent]) -> Vec<YearTagSummary> {
    let mut totals: BTreeMap<(i32, String), f64> = BTreeMap::new();
    for event in profits {
        *totals
            .entry((event.year(), event.tag.clone()))
            .or_insert(0.0) += event.amount;
    }
    totals
        .into_iter()
        .map(|((year, tag), amount)| YearTagSummary { year, tag, amount })
        .collect()
}

fn group_by_ticker(profits: &[ProfitEvent]) -> Vec<TickerSummary> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for event in profits {
        if event.ticker.is_empty() {
            continue;
        }
        *totals.entry(event.ticker.clone()).or_insert(0.0) += event.amount;
    }
    totals
        .into_iter()
        .map(|(ticker, amount)| TickerSummary { ticker, amount })
        .collect()
}

fn flatten_open_lots(outcome: &MatchOutcome) -> Vec<OpenLotLine> {
    let mut tickers: Vec<&String> = outcome.open_lots.keys().collect();
    tickers.sort();

    let mut lines = Vec::new();
    for ticker in tickers {
        for lot in &outcome.open_lots[ticker] {
            lines.push(OpenLotLine {
                ticker: lot.ticker.clone(),
                quantity: lot.quantity,
                unit_cost: lot.unit_cost,
                acquired_at: lot.acquired_at,
                tag: lot.tag.clone(),
            });
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lot::Lot;
    use std::collections::{HashMap, VecDeque};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profit(year: i32, amount: f64, ticker: &str, tag: &str) -> ProfitEvent {
        ProfitEvent {
            date: date(year, 6, 1),
            amount,
            is_long_term: false,
            ticker: ticker.to_string(),
            tag: tag.to_string(),
        }
    }

    fn outcome_with(profits: Vec<ProfitEvent>) -> MatchOutcome {
        MatchOutcome {
            profits,
            open_lots: HashMap::new(),
        }
    }

    #[test]
    fn groups_by_year_sorted() {
        let outcome = outcome_with(vec![
            profit(2023, 100.0, "AAPL", "a"),
            profit(2021, 50.0, "AAPL", "a"),
            profit(2023, -30.0, "MSFT", "a"),
        ]);
        let report = LedgerReport::compute(&outcome);

        assert_eq!(report.by_year.len(), 2);
        assert_eq!(report.by_year[0].year, 2021);
        assert!((report.by_year[0].amount - 50.0).abs() < f64::EPSILON);
        assert_eq!(report.by_year[1].year, 2023);
        assert!((report.by_year[1].amount - 70.0).abs() < f64::EPSILON);
        assert!((report.total_realized - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn groups_by_year_and_tag() {
        let outcome = outcome_with(vec![
            profit(2023, 100.0, "AAPL", "individual"),
            profit(2023, 25.0, "AAPL", "roth"),
            profit(2023, 10.0, "MSFT", "individual"),
        ]);
        let report = LedgerReport::compute(&outcome);

        assert_eq!(report.by_year_tag.len(), 2);
        assert_eq!(report.by_year_tag[0].tag, "individual");
        assert!((report.by_year_tag[0].amount - 110.0).abs() < f64::EPSILON);
        assert_eq!(report.by_year_tag[1].tag, "roth");
    }

    #[test]
    fn blank_tickers_are_skipped_in_ticker_grouping() {
        let outcome = outcome_with(vec![
            profit(2023, 100.0, "AAPL", "a"),
            profit(2023, 40.0, "", "a"),
        ]);
        let report = LedgerReport::compute(&outcome);

        assert_eq!(report.by_ticker.len(), 1);
        assert_eq!(report.by_ticker[0].ticker, "AAPL");
        // The blank-ticker amount still counts toward year totals.
        assert!((report.by_year[0].amount - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn open_lots_flatten_in_queue_order() {
        let mut open_lots = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(Lot {
            ticker: "AAPL".into(),
            quantity: 10.0,
            unit_cost: 100.0,
            acquired_at: date(2022, 1, 1),
            tag: "individual".into(),
        });
        queue.push_back(Lot {
            ticker: "AAPL".into(),
            quantity: 5.0,
            unit_cost: 120.0,
            acquired_at: date(2022, 6, 1),
            tag: "individual".into(),
        });
        open_lots.insert("AAPL".to_string(), queue);

        let outcome = MatchOutcome {
            profits: vec![],
            open_lots,
        };
        let report = LedgerReport::compute(&outcome);

        assert_eq!(report.open_lots.len(), 2);
        assert_eq!(report.open_lots[0].acquired_at, date(2022, 1, 1));
        assert!((report.open_lots[0].cost_basis() - 1000.0).abs() < f64::EPSILON);
        assert_eq!(report.open_lots[1].acquired_at, date(2022, 6, 1));
    }

    #[test]
    fn empty_outcome_is_an_empty_report() {
        let report = LedgerReport::compute(&outcome_with(vec![]));
        assert!(report.by_year.is_empty());
        assert!(report.by_year_tag.is_empty());
        assert!(report.by_ticker.is_empty());
        assert!(report.open_lots.is_empty());
        assert_eq!(report.total_realized, 0.0);
    }
}
