#![allow(dead_code)]

use chrono::NaiveDate;
use lotledger::domain::corrections::SplitAdjustment;
use lotledger::domain::error::LedgerError;
use lotledger::domain::transaction::{
    OptionSide, OptionStatus, OptionTransaction, StockSide, StockTransaction,
};
use lotledger::ports::correction_port::CorrectionPort;
use lotledger::ports::transaction_port::TransactionPort;
use std::collections::HashMap;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn stock_buy(ticker: &str, qty: f64, cost: f64, day: &str) -> StockTransaction {
    StockTransaction {
        ticker: ticker.to_string(),
        side: StockSide::Buy,
        quantity: qty,
        unit_cost: cost,
        occurred_at: date(day),
        tag: "individual".into(),
    }
}

pub fn stock_sell(ticker: &str, qty: f64, price: f64, day: &str) -> StockTransaction {
    StockTransaction {
        ticker: ticker.to_string(),
        side: StockSide::Sell,
        quantity: qty,
        unit_cost: price,
        occurred_at: date(day),
        tag: "individual".into(),
    }
}

pub fn option_txn(
    ticker: &str,
    side: OptionSide,
    contracts: f64,
    strike: f64,
    premium: f64,
    day: &str,
    expiry: &str,
    status: OptionStatus,
) -> OptionTransaction {
    OptionTransaction {
        ticker: ticker.to_string(),
        side,
        quantity: contracts,
        strike_price: strike,
        unit_cost: premium,
        occurred_at: date(day),
        expiration_date: date(expiry),
        status,
        tag: "options".into(),
    }
}

pub struct MockTransactionPort {
    pub stocks: Vec<StockTransaction>,
    pub options: Vec<OptionTransaction>,
    pub fail: Option<String>,
}

impl MockTransactionPort {
    pub fn new() -> Self {
        Self {
            stocks: Vec::new(),
            options: Vec::new(),
            fail: None,
        }
    }

    pub fn with_stock(mut self, txn: StockTransaction) -> Self {
        self.stocks.push(txn);
        self
    }

    pub fn with_option(mut self, txn: OptionTransaction) -> Self {
        self.options.push(txn);
        self
    }

    pub fn with_failure(mut self, reason: &str) -> Self {
        self.fail = Some(reason.to_string());
        self
    }
}

impl TransactionPort for MockTransactionPort {
    fn fetch_stock_transactions(&self) -> Result<Vec<StockTransaction>, LedgerError> {
        match &self.fail {
            Some(reason) => Err(LedgerError::Fetch {
                reason: reason.clone(),
            }),
            None => Ok(self.stocks.clone()),
        }
    }

    fn fetch_option_transactions(&self) -> Result<Vec<OptionTransaction>, LedgerError> {
        match &self.fail {
            Some(reason) => Err(LedgerError::Fetch {
                reason: reason.clone(),
            }),
            None => Ok(self.options.clone()),
        }
    }
}

pub struct MockCorrectionPort {
    pub renames: HashMap<String, String>,
    pub splits: HashMap<String, Vec<SplitAdjustment>>,
    pub fail_splits: bool,
}

impl MockCorrectionPort {
    pub fn new() -> Self {
        Self {
            renames: HashMap::new(),
            splits: HashMap::new(),
            fail_splits: false,
        }
    }

    pub fn with_rename(mut self, from: &str, to: &str) -> Self {
        self.renames.insert(from.to_string(), to.to_string());
        self
    }

    pub fn with_split(mut self, symbol: &str, day: &str, numerator: u32, denominator: u32) -> Self {
        self.splits
            .entry(symbol.to_string())
            .or_default()
            .push(SplitAdjustment {
                effective_date: date(day),
                numerator,
                denominator,
            });
        self
    }

    pub fn with_split_failure(mut self) -> Self {
        self.fail_splits = true;
        self
    }
}

impl CorrectionPort for MockCorrectionPort {
    fn resolve_symbol(&self, symbol: &str) -> Result<String, LedgerError> {
        Ok(self
            .renames
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| symbol.to_string()))
    }

    fn fetch_splits(&self, symbol: &str) -> Result<Vec<SplitAdjustment>, LedgerError> {
        if self.fail_splits {
            return Err(LedgerError::CorrectionLookup {
                symbol: symbol.to_string(),
                reason: "split service unreachable".into(),
            });
        }
        Ok(self.splits.get(symbol).cloned().unwrap_or_default())
    }
}
