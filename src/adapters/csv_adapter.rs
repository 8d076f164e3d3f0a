//! CSV file transaction source adapter.
//!
//! Reads exported trade history from two files: a stock file with columns
//! `ticker,side,quantity,unit_cost,date,tag` and an option file with columns
//! `ticker,side,quantity,strike_price,unit_cost,date,expiration_date,status,tag`.
//! Dates are `YYYY-MM-DD`. Row order does not matter; the core sorts.

use crate::domain::error::LedgerError;
use crate::domain::transaction::{
    OptionSide, OptionStatus, OptionTransaction, StockSide, StockTransaction,
};
use crate::ports::transaction_port::TransactionPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    stocks_path: PathBuf,
    options_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(stocks_path: PathBuf, options_path: PathBuf) -> Self {
        Self {
            stocks_path,
            options_path,
        }
    }
}

fn field<'r>(record: &'r StringRecord, index: usize, name: &str, ticker: &str) -> Result<&'r str, LedgerError> {
    record.get(index).ok_or_else(|| LedgerError::DataIntegrity {
        ticker: ticker.to_string(),
        detail: format!("missing {} column", name),
    })
}

fn parse_number(raw: &str, name: &str, ticker: &str) -> Result<f64, LedgerError> {
    raw.trim().parse().map_err(|_| LedgerError::DataIntegrity {
        ticker: ticker.to_string(),
        detail: format!("invalid {} '{}'", name, raw),
    })
}

fn parse_positive(raw: &str, name: &str, ticker: &str) -> Result<f64, LedgerError> {
    let value = parse_number(raw, name, ticker)?;
    if value <= 0.0 {
        return Err(LedgerError::DataIntegrity {
            ticker: ticker.to_string(),
            detail: format!("non-positive {} '{}'", name, raw),
        });
    }
    Ok(value)
}

fn parse_date(raw: &str, name: &str, ticker: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| LedgerError::DataIntegrity {
        ticker: ticker.to_string(),
        detail: format!("unparsable {} '{}'", name, raw),
    })
}

impl TransactionPort for CsvAdapter {
    fn fetch_stock_transactions(&self) -> Result<Vec<StockTransaction>, LedgerError> {
        let content = fs::read_to_string(&self.stocks_path).map_err(|e| LedgerError::Fetch {
            reason: format!("failed to read {}: {}", self.stocks_path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut transactions = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| LedgerError::Fetch {
                reason: format!("CSV parse error: {}", e),
            })?;

            let ticker = field(&record, 0, "ticker", "")?.trim().to_string();
            let side_raw = field(&record, 1, "side", &ticker)?;
            let side = StockSide::parse(side_raw).ok_or_else(|| LedgerError::DataIntegrity {
                ticker: ticker.clone(),
                detail: format!("unknown stock side '{}'", side_raw),
            })?;
            let quantity = parse_positive(field(&record, 2, "quantity", &ticker)?, "quantity", &ticker)?;
            let unit_cost = parse_number(field(&record, 3, "unit_cost", &ticker)?, "unit_cost", &ticker)?;
            let occurred_at = parse_date(field(&record, 4, "date", &ticker)?, "date", &ticker)?;
            let tag = record.get(5).unwrap_or("").trim().to_string();

            transactions.push(StockTransaction {
                ticker,
                side,
                quantity,
                unit_cost,
                occurred_at,
                tag,
            });
        }
        Ok(transactions)
    }

    fn fetch_option_transactions(&self) -> Result<Vec<OptionTransaction>, LedgerError> {
        let content = fs::read_to_string(&self.options_path).map_err(|e| LedgerError::Fetch {
            reason: format!("failed to read {}: {}", self.options_path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut transactions = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| LedgerError::Fetch {
                reason: format!("CSV parse error: {}", e),
            })?;

            let ticker = field(&record, 0, "ticker", "")?.trim().to_string();
            let side_raw = field(&record, 1, "side", &ticker)?;
            let side = OptionSide::parse(side_raw).ok_or_else(|| LedgerError::DataIntegrity {
                ticker: ticker.clone(),
                detail: format!("unknown option side '{}'", side_raw),
            })?;
            let quantity = parse_positive(field(&record, 2, "quantity", &ticker)?, "quantity", &ticker)?;
            let strike_price =
                parse_number(field(&record, 3, "strike_price", &ticker)?, "strike_price", &ticker)?;
            let unit_cost = parse_number(field(&record, 4, "unit_cost", &ticker)?, "unit_cost", &ticker)?;
            let occurred_at = parse_date(field(&record, 5, "date", &ticker)?, "date", &ticker)?;
            let expiration_date = parse_date(
                field(&record, 6, "expiration_date", &ticker)?,
                "expiration_date",
                &ticker,
            )?;
            let status_raw = field(&record, 7, "status", &ticker)?;
            let status =
                OptionStatus::parse(status_raw).ok_or_else(|| LedgerError::DataIntegrity {
                    ticker: ticker.clone(),
                    detail: format!("unknown option status '{}'", status_raw),
                })?;
            let tag = record.get(8).unwrap_or("").trim().to_string();

            transactions.push(OptionTransaction {
                ticker,
                side,
                quantity,
                strike_price,
                unit_cost,
                occurred_at,
                expiration_date,
                status,
                tag,
            });
        }
        Ok(transactions)
    }
}
