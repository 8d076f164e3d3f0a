//! No-network correction adapter: symbols resolve to themselves and no
//! splits apply. Used for offline runs and builds without the `fetch`
//! feature.

use crate::domain::corrections::SplitAdjustment;
use crate::domain::error::LedgerError;
use crate::ports::correction_port::CorrectionPort;

#[derive(Debug, Default)]
pub struct IdentityCorrectionAdapter;

impl IdentityCorrectionAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl CorrectionPort for IdentityCorrectionAdapter {
    fn resolve_symbol(&self, symbol: &str) -> Result<String, LedgerError> {
        Ok(symbol.to_string())
    }

    fn fetch_splits(&self, _symbol: &str) -> Result<Vec<SplitAdjustment>, LedgerError> {
        Ok(Vec::new())
    }
}
