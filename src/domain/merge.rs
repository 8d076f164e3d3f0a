//! Chronological interleaving of the stock and option transaction streams.

use chrono::NaiveDate;

use super::transaction::{OptionTransaction, StockTransaction};

/// One entry in the merged event stream fed to the matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeEvent {
    Stock(StockTransaction),
    Option(OptionTransaction),
}

impl TradeEvent {
    pub fn occurred_at(&self) -> NaiveDate {
        match self {
            TradeEvent::Stock(txn) => txn.occurred_at,
            TradeEvent::Option(txn) => txn.occurred_at,
        }
    }

    pub fn ticker(&self) -> &str {
        match self {
            TradeEvent::Stock(txn) => &txn.ticker,
            TradeEvent::Option(txn) => &txn.ticker,
        }
    }
}

/// Merge the two transaction streams into one date-ordered sequence.
///
/// Each input may arrive in any order; both are sorted by `occurred_at`
/// (stable, so same-day records keep their arrival order) before a two-cursor
/// merge. An option record is emitted only when its date is strictly earlier
/// than the next stock record's date. Equal dates go to the stock record:
/// an arbitrary but fixed convention, relied on by the matcher tests.
pub fn merge_events(
    mut stocks: Vec<StockTransaction>,
    mut options: Vec<OptionTransaction>,
) -> Vec<TradeEvent> {
    stocks.sort_by_key(|txn| txn.occurred_at);
    options.sort_by_key(|txn| txn.occurred_at);

    let mut merged = Vec::with_capacity(stocks.len() + options.len());
    let mut stock_iter = stocks.into_iter().peekable();
    let mut option_iter = options.into_iter().peekable();

    loop {
        match (stock_iter.peek(), option_iter.peek()) {
            (Some(stock), Some(option)) => {
                if option.occurred_at < stock.occurred_at {
                    merged.push(TradeEvent::Option(option_iter.next().unwrap()));
                } else {
                    merged.push(TradeEvent::Stock(stock_iter.next().unwrap()));
                }
            }
            (Some(_), None) => merged.push(TradeEvent::Stock(stock_iter.next().unwrap())),
            (None, Some(_)) => merged.push(TradeEvent::Option(option_iter.next().unwrap())),
            (None, None) => break,
        }
    }
    merged
}
