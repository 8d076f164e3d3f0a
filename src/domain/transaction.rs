//! Raw brokerage transaction records, as delivered by a transaction source.

use chrono::NaiveDate;

/// Direction of a stock trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockSide {
    Buy,
    Sell,
}

impl StockSide {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Some(StockSide::Buy),
            "sell" => Some(StockSide::Sell),
            _ => None,
        }
    }
}

/// Direction of an option trade, brokerage shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSide {
    /// Buy to open.
    Bto,
    /// Sell to open.
    Sto,
    /// Buy to close.
    Btc,
    /// Sell to close.
    Stc,
}

impl OptionSide {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BTO" => Some(OptionSide::Bto),
            "STO" => Some(OptionSide::Sto),
            "BTC" => Some(OptionSide::Btc),
            "STC" => Some(OptionSide::Stc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Bto => "BTO",
            OptionSide::Sto => "STO",
            OptionSide::Btc => "BTC",
            OptionSide::Stc => "STC",
        }
    }

    /// True when the premium was collected rather than paid.
    pub fn collects_premium(&self) -> bool {
        matches!(self, OptionSide::Sto | OptionSide::Stc)
    }
}

/// Resolution state of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStatus {
    Open,
    Assigned,
    Expired,
}

impl OptionStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Some(OptionStatus::Open),
            "assigned" => Some(OptionStatus::Assigned),
            "expired" => Some(OptionStatus::Expired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockTransaction {
    pub ticker: String,
    pub side: StockSide,
    pub quantity: f64,
    pub unit_cost: f64,
    pub occurred_at: NaiveDate,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionTransaction {
    pub ticker: String,
    pub side: OptionSide,
    /// Number of contracts, not shares.
    pub quantity: f64,
    pub strike_price: f64,
    /// Premium per share.
    pub unit_cost: f64,
    pub occurred_at: NaiveDate,
    pub expiration_date: NaiveDate,
    pub status: OptionStatus,
    pub tag: String,
}
