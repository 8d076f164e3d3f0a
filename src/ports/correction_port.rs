//! Correction service port trait.

use crate::domain::corrections::SplitAdjustment;
use crate::domain::error::LedgerError;

/// External lookups for symbol renames and split history. Callers go through
/// [`crate::domain::corrections::Corrections`], which memoizes both lookups
/// and applies the failure policy: a rename failure degrades to the raw
/// symbol, a split failure aborts the run.
pub trait CorrectionPort {
    fn resolve_symbol(&self, symbol: &str) -> Result<String, LedgerError>;

    fn fetch_splits(&self, symbol: &str) -> Result<Vec<SplitAdjustment>, LedgerError>;
}
