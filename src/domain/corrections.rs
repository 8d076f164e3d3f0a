//! Symbol-rename and stock-split correction, memoized per run.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::error::LedgerError;
use super::transaction::{OptionTransaction, StockTransaction};
use crate::ports::correction_port::CorrectionPort;

/// One historical stock split.
///
/// Irregular encoding carried over from the upstream split feed: a
/// `numerator != 1` is a forward split (quantity × numerator, price ÷
/// numerator); a `numerator == 1` signals a reverse split (quantity ÷
/// denominator, price × denominator). This is not standard split-ratio
/// notation, so keep the two fields together and interpret them only through
/// [`split_multipliers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAdjustment {
    pub effective_date: NaiveDate,
    pub numerator: u32,
    pub denominator: u32,
}

/// Cumulative (quantity, price) multipliers bringing a trade dated `date`
/// into present-day share terms: every split effective strictly after the
/// trade rescales it, trades on or after a split are already post-split.
/// Splits compose multiplicatively; each one scales quantity and price
/// inversely, so application order does not matter.
pub fn split_multipliers(splits: &[SplitAdjustment], date: NaiveDate) -> (f64, f64) {
    let mut qty_multiplier = 1.0;
    let mut price_multiplier = 1.0;
    for split in splits {
        if date < split.effective_date {
            if split.numerator != 1 {
                qty_multiplier *= split.numerator as f64;
                price_multiplier /= split.numerator as f64;
            } else {
                qty_multiplier /= split.denominator as f64;
                price_multiplier *= split.denominator as f64;
            }
        }
    }
    (qty_multiplier, price_multiplier)
}

/// Correction service with explicit, caller-owned caches.
///
/// Both lookups memoize per symbol for the lifetime of one `Corrections`
/// value: the first call hits the port, every later call is a pure cache
/// read. Construct a fresh value per run so runs and tests cannot
/// contaminate each other.
pub struct Corrections<'a> {
    port: &'a dyn CorrectionPort,
    symbol_cache: HashMap<String, String>,
    split_cache: HashMap<String, Vec<SplitAdjustment>>,
}

impl<'a> Corrections<'a> {
    pub fn new(port: &'a dyn CorrectionPort) -> Self {
        Corrections {
            port,
            symbol_cache: HashMap::new(),
            split_cache: HashMap::new(),
        }
    }

    /// Canonical ticker for a possibly renamed or delisted symbol.
    ///
    /// Never fails the caller: a lookup error caches the raw symbol as its
    /// own canonical form, so one unresolved symbol cannot abort the run. A
    /// stale name only mislabels output, it does not corrupt the matching
    /// arithmetic.
    pub fn resolve_ticker(&mut self, symbol: &str) -> String {
        if let Some(canonical) = self.symbol_cache.get(symbol) {
            return canonical.clone();
        }
        let canonical = self
            .port
            .resolve_symbol(symbol)
            .unwrap_or_else(|_| symbol.to_string());
        self.symbol_cache
            .insert(symbol.to_string(), canonical.clone());
        canonical
    }

    /// Split-corrected (quantity, price) for a trade in `symbol` on `date`.
    ///
    /// A failed split fetch aborts the whole run: uncorrected cost basis
    /// silently corrupts every downstream gain computation, so there is no
    /// best-effort mode here.
    pub fn split_adjusted(
        &mut self,
        symbol: &str,
        date: NaiveDate,
        quantity: f64,
        price: f64,
    ) -> Result<(f64, f64), LedgerError> {
        if !self.split_cache.contains_key(symbol) {
            let splits = self.port.fetch_splits(symbol)?;
            self.split_cache.insert(symbol.to_string(), splits);
        }
        let (qty_multiplier, price_multiplier) =
            split_multipliers(&self.split_cache[symbol], date);
        Ok((quantity * qty_multiplier, price * price_multiplier))
    }
}

/// Apply corrections to both raw streams ahead of the merge.
///
/// Stock trades get the full treatment: canonical ticker plus split-corrected
/// quantity and price. Option trades get the ticker rename only; strike and
/// premium arrive already contract-adjusted from the brokerage.
pub fn correct_transactions(
    corrections: &mut Corrections,
    stocks: Vec<StockTransaction>,
    options: Vec<OptionTransaction>,
) -> Result<(Vec<StockTransaction>, Vec<OptionTransaction>), LedgerError> {
    let mut corrected_stocks = Vec::with_capacity(stocks.len());
    for mut txn in stocks {
        let canonical = corrections.resolve_ticker(&txn.ticker);
        let (quantity, unit_cost) =
            corrections.split_adjusted(&canonical, txn.occurred_at, txn.quantity, txn.unit_cost)?;
        txn.ticker = canonical;
        txn.quantity = quantity;
        txn.unit_cost = unit_cost;
        corrected_stocks.push(txn);
    }

    let mut corrected_options = Vec::with_capacity(options.len());
    for mut txn in options {
        txn.ticker = corrections.resolve_ticker(&txn.ticker);
        corrected_options.push(txn);
    }

    Ok((corrected_stocks, corrected_options))
}
