//! Domain error types.

/// Top-level error type for lotledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to fetch transactions: {reason}")]
    Fetch { reason: String },

    #[error("correction lookup failed for {symbol}: {reason}")]
    CorrectionLookup { symbol: String, reason: String },

    #[error("bad transaction record for {ticker}: {detail}")]
    DataIntegrity { ticker: String, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&LedgerError> for std::process::ExitCode {
    fn from(err: &LedgerError) -> Self {
        let code: u8 = match err {
            LedgerError::Io(_) => 1,
            LedgerError::ConfigParse { .. }
            | LedgerError::ConfigMissing { .. }
            | LedgerError::ConfigInvalid { .. } => 2,
            LedgerError::Fetch { .. } => 3,
            LedgerError::CorrectionLookup { .. } => 4,
            LedgerError::DataIntegrity { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
