//! Network correction adapter: split history from the Yahoo Finance chart
//! endpoint, symbol renames from archived Bloomberg quote pages via the
//! web.archive.org CDX index.

use crate::domain::corrections::SplitAdjustment;
use crate::domain::error::LedgerError;
use crate::ports::correction_port::CorrectionPort;
use chrono::DateTime;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

const YAHOO_BASE: &str = "https://query2.finance.yahoo.com";
const ARCHIVE_BASE: &str = "http://web.archive.org";

/// Bloomberg renders "this ticker now trades as X:Y:Z" messages under these
/// class names, depending on page vintage.
static TICKER_MESSAGE_RE: OnceLock<Regex> = OnceLock::new();

fn ticker_message_re() -> &'static Regex {
    TICKER_MESSAGE_RE.get_or_init(|| {
        Regex::new(
            r#"(?:detailMessage__f82c6a6079|TickerStatusMessage_tickerMessage__A8272)[^>]*>([^<]+)<"#,
        )
        .expect("ticker message regex")
    })
}

pub struct HttpCorrectionAdapter {
    client: reqwest::blocking::Client,
    yahoo_base: String,
    archive_base: String,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    events: Option<ChartEvents>,
}

#[derive(Debug, Deserialize)]
struct ChartEvents {
    #[serde(default)]
    splits: Option<HashMap<String, SplitEvent>>,
}

#[derive(Debug, Deserialize)]
struct SplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

impl HttpCorrectionAdapter {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_endpoints(YAHOO_BASE, ARCHIVE_BASE)
    }

    pub fn with_endpoints(yahoo_base: &str, archive_base: &str) -> Result<Self, LedgerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LedgerError::Fetch {
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            yahoo_base: yahoo_base.trim_end_matches('/').to_string(),
            archive_base: archive_base.trim_end_matches('/').to_string(),
        })
    }

    fn get_text(&self, url: &str, symbol: &str) -> Result<String, LedgerError> {
        self.client
            .get(url)
            .send()
            .and_then(|resp| resp.text())
            .map_err(|e| LedgerError::CorrectionLookup {
                symbol: symbol.to_string(),
                reason: format!("{}: {}", url, e),
            })
    }
}

/// Parse the chart-endpoint body into the split list. Yahoo keys each split
/// by its Unix timestamp under `chart.result[].events.splits`.
fn parse_splits(body: &str, symbol: &str) -> Result<Vec<SplitAdjustment>, LedgerError> {
    if body == "Will be right back" {
        return Err(LedgerError::CorrectionLookup {
            symbol: symbol.to_string(),
            reason: "split service is down".into(),
        });
    }

    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| LedgerError::CorrectionLookup {
            symbol: symbol.to_string(),
            reason: format!("malformed split response: {}", e),
        })?;

    let mut splits = Vec::new();
    for result in response.chart.result.unwrap_or_default() {
        let Some(events) = result.events else { continue };
        for event in events.splits.unwrap_or_default().into_values() {
            let Some(datetime) = DateTime::from_timestamp(event.date, 0) else {
                continue;
            };
            splits.push(SplitAdjustment {
                effective_date: datetime.date_naive(),
                numerator: event.numerator as u32,
                denominator: event.denominator as u32,
            });
        }
    }
    splits.sort_by_key(|s| s.effective_date);
    Ok(splits)
}

/// Pull the replacement symbol out of an archived Bloomberg quote page.
/// The message text reads like "… now trades as <exchange>:<country>:<symbol>".
fn extract_renamed_symbol(html: &str) -> Option<String> {
    for capture in ticker_message_re().captures_iter(html) {
        let text = &capture[1];
        let parts: Vec<&str> = text.split(':').collect();
        // The symbol is the last segment of the exchange:country:symbol triple.
        if parts.len() >= 3 {
            let symbol = parts[parts.len() - 1].trim();
            if !symbol.is_empty() {
                return Some(symbol.to_string());
            }
        }
    }
    None
}

impl CorrectionPort for HttpCorrectionAdapter {
    /// Latest-capture lookup: ask the CDX index for captures of the Bloomberg
    /// quote page, fetch the newest one, and scan it for a ticker-change
    /// message. An intact page with no message means the symbol is current.
    fn resolve_symbol(&self, symbol: &str) -> Result<String, LedgerError> {
        let cdx_url = format!(
            "{}/cdx/search/cdx?url=https://www.bloomberg.com/quote/{}:US&output=json&limit=10",
            self.archive_base, symbol
        );
        let body = self.get_text(&cdx_url, symbol)?;

        let captures: Vec<Vec<String>> =
            serde_json::from_str(&body).map_err(|e| LedgerError::CorrectionLookup {
                symbol: symbol.to_string(),
                reason: format!("malformed CDX response: {}", e),
            })?;
        // First row is the CDX field names, so two rows means one capture.
        if captures.len() < 2 || captures[captures.len() - 1].len() < 3 {
            return Err(LedgerError::CorrectionLookup {
                symbol: symbol.to_string(),
                reason: "no archived captures".into(),
            });
        }
        let capture = &captures[captures.len() - 1];

        let snapshot_url = format!("{}/web/{}/{}", self.archive_base, capture[1], capture[2]);
        let html = self.get_text(&snapshot_url, symbol)?;

        match extract_renamed_symbol(&html) {
            Some(renamed) => Ok(renamed),
            None if html.contains("Ticker Change") => Err(LedgerError::CorrectionLookup {
                symbol: symbol.to_string(),
                reason: format!("unrecognized ticker-change page: {}", snapshot_url),
            }),
            None => Ok(symbol.to_string()),
        }
    }

    fn fetch_splits(&self, symbol: &str) -> Result<Vec<SplitAdjustment>, LedgerError> {
        let url = format!(
            "{}/v8/finance/chart/{}?period1=0&period2=9999999999&interval=3mo&events=split",
            self.yahoo_base, symbol
        );
        let body = self.get_text(&url, symbol)?;
        parse_splits(&body, symbol)
    }
}
