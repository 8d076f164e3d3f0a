//! Open purchase lots and the per-ticker FIFO queues that hold them.

use chrono::NaiveDate;
use std::collections::{HashMap, VecDeque};

/// A discrete quantity of shares acquired at one price on one date, tracked
/// until fully sold. `quantity` is the remaining (unsold) share count; the
/// cost and acquisition date never change once the lot exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub ticker: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub acquired_at: NaiveDate,
    pub tag: String,
}

impl Lot {
    /// Remaining cost basis of the unsold shares.
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

/// Per-ticker queues of open lots, oldest first. Sells consume from the
/// front, buys append at the back; a drained lot is removed, never left at
/// zero quantity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LotBook {
    queues: HashMap<String, VecDeque<Lot>>,
}

impl LotBook {
    pub fn new() -> Self {
        LotBook {
            queues: HashMap::new(),
        }
    }

    pub fn push(&mut self, lot: Lot) {
        self.queues
            .entry(lot.ticker.clone())
            .or_default()
            .push_back(lot);
    }

    pub fn front_mut(&mut self, ticker: &str) -> Option<&mut Lot> {
        self.queues.get_mut(ticker).and_then(|q| q.front_mut())
    }

    pub fn pop_front(&mut self, ticker: &str) -> Option<Lot> {
        let lot = self.queues.get_mut(ticker).and_then(|q| q.pop_front());
        if let Some(q) = self.queues.get(ticker) {
            if q.is_empty() {
                self.queues.remove(ticker);
            }
        }
        lot
    }

    pub fn open_quantity(&self, ticker: &str) -> f64 {
        self.queues
            .get(ticker)
            .map(|q| q.iter().map(|l| l.quantity).sum())
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Hand over the surviving queues, dropping tickers with nothing open.
    pub fn into_open_lots(self) -> HashMap<String, VecDeque<Lot>> {
        self.queues
            .into_iter()
            .filter(|(_, q)| !q.is_empty())
            .collect()
    }
}
