//! Transaction source port trait.

use crate::domain::error::LedgerError;
use crate::domain::transaction::{OptionTransaction, StockTransaction};

/// Supplies the two raw trade collections. No ordering guarantee: the core
/// sorts each stream before merging.
pub trait TransactionPort {
    fn fetch_stock_transactions(&self) -> Result<Vec<StockTransaction>, LedgerError>;

    fn fetch_option_transactions(&self) -> Result<Vec<OptionTransaction>, LedgerError>;
}
