//! Tax-lot matching: the FIFO state machine that turns merged trade events
//! into realized profit events and residual open lots.

use std::collections::{HashMap, VecDeque};

use super::lot::{Lot, LotBook};
use super::merge::TradeEvent;
use super::profit::{is_long_term, ProfitEvent};
use super::transaction::{OptionStatus, OptionTransaction, StockSide, StockTransaction};

/// Standard equity option contract multiplier.
pub const SHARES_PER_CONTRACT: f64 = 100.0;

/// Everything the matcher leaves behind: realized events in emission order,
/// plus whatever is still open per ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub profits: Vec<ProfitEvent>,
    pub open_lots: HashMap<String, VecDeque<Lot>>,
}

/// Running long/short-term accumulators for a single sell.
#[derive(Debug, Default)]
struct Gains {
    long_term: f64,
    short_term: f64,
}

impl Gains {
    fn add(&mut self, amount: f64, long_term: bool) {
        if long_term {
            self.long_term += amount;
        } else {
            self.short_term += amount;
        }
    }
}

/// Run the matcher over an already-merged event sequence.
///
/// Pure function of its input: re-running it on the same sequence yields the
/// same profit events and the same residual lots.
pub fn match_events(events: &[TradeEvent]) -> MatchOutcome {
    let mut book = LotBook::new();
    let mut profits = Vec::new();

    for event in events {
        match event {
            TradeEvent::Stock(txn) => match txn.side {
                StockSide::Buy => apply_buy(&mut book, txn),
                StockSide::Sell => apply_sell(&mut book, &mut profits, txn),
            },
            TradeEvent::Option(txn) => match txn.status {
                // Unresolved contracts carry no realized amount yet.
                OptionStatus::Open => {}
                OptionStatus::Assigned => apply_assignment(&mut book, txn),
                OptionStatus::Expired => profits.push(expiration_event(txn)),
            },
        }
    }

    MatchOutcome {
        profits,
        open_lots: book.into_open_lots(),
    }
}

fn apply_buy(book: &mut LotBook, txn: &StockTransaction) {
    book.push(Lot {
        ticker: txn.ticker.clone(),
        quantity: txn.quantity,
        unit_cost: txn.unit_cost,
        acquired_at: txn.occurred_at,
        tag: txn.tag.clone(),
    });
}

/// Assignment converts the contract into shares: a synthesized purchase lot
/// at the strike, shifted by the premium. A written (STO) contract already
/// collected the premium, so it lowers the effective cost; a held contract
/// paid it, so it adds.
fn apply_assignment(book: &mut LotBook, txn: &OptionTransaction) {
    let premium_shift = if txn.side == super::transaction::OptionSide::Sto {
        -txn.unit_cost
    } else {
        txn.unit_cost
    };
    book.push(Lot {
        ticker: txn.ticker.clone(),
        quantity: SHARES_PER_CONTRACT * txn.quantity,
        unit_cost: txn.strike_price + premium_shift,
        acquired_at: txn.expiration_date,
        tag: format!("{} assigned", txn.side.as_str()),
    });
}

/// Expiration realizes the premium in full: kept if it was collected,
/// lost if it was paid. Options never qualify for long-term treatment here.
fn expiration_event(txn: &OptionTransaction) -> ProfitEvent {
    let premium_total = SHARES_PER_CONTRACT * txn.quantity * txn.unit_cost;
    let amount = if txn.side.collects_premium() {
        premium_total
    } else {
        -premium_total
    };
    ProfitEvent {
        date: txn.expiration_date,
        amount,
        is_long_term: false,
        ticker: txn.ticker.clone(),
        tag: txn.tag.clone(),
    }
}

/// Consume open lots oldest-first until the sold quantity is satisfied.
///
/// Shares with no matching purchase history fall back to a zero cost basis:
/// the unmatched remainder realizes the full sale price as a short-term gain.
fn apply_sell(book: &mut LotBook, profits: &mut Vec<ProfitEvent>, txn: &StockTransaction) {
    let mut needed = txn.quantity;
    let mut gains = Gains::default();

    while needed > 0.0 {
        let Some(front) = book.front_mut(&txn.ticker) else {
            profits.push(ProfitEvent {
                date: txn.occurred_at,
                amount: needed * txn.unit_cost,
                is_long_term: false,
                ticker: txn.ticker.clone(),
                tag: txn.tag.clone(),
            });
            needed = 0.0;
            break;
        };

        if front.quantity > needed {
            // Partial consumption: the lot survives with reduced quantity.
            let long_term = is_long_term(front.acquired_at, txn.occurred_at);
            gains.add(needed * (txn.unit_cost - front.unit_cost), long_term);
            front.quantity -= needed;
            needed = 0.0;
        } else {
            let lot = match book.pop_front(&txn.ticker) {
                Some(lot) => lot,
                None => break,
            };
            let long_term = is_long_term(lot.acquired_at, txn.occurred_at);
            gains.add(lot.quantity * (txn.unit_cost - lot.unit_cost), long_term);
            needed -= lot.quantity;
        }
    }

    if gains.long_term != 0.0 {
        profits.push(ProfitEvent {
            date: txn.occurred_at,
            amount: gains.long_term,
            is_long_term: true,
            ticker: txn.ticker.clone(),
            tag: txn.tag.clone(),
        });
    }
    if gains.short_term != 0.0 {
        profits.push(ProfitEvent {
            date: txn.occurred_at,
            amount: gains.short_term,
            is_long_term: false,
            ticker: txn.ticker.clone(),
            tag: txn.tag.clone(),
        });
    }
}
