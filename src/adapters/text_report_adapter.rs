//! Plain-text report adapter: the console dashboard.

use crate::domain::report::LedgerReport;
use crate::ports::report_port::ReportPort;
use std::fmt::Write;

#[derive(Debug, Default)]
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &LedgerReport) -> String {
        let mut out = String::new();

        writeln!(out, "=== Realized Gains by Year ===").unwrap();
        if report.by_year.is_empty() {
            writeln!(out, "  (none)").unwrap();
        }
        for row in &report.by_year {
            writeln!(out, "  {}  {:>14.2}", row.year, row.amount).unwrap();
        }
        writeln!(out, "  Total {:>12.2}", report.total_realized).unwrap();

        if !report.by_year_tag.is_empty() {
            writeln!(out, "\n=== Realized Gains by Year and Tag ===").unwrap();
            for row in &report.by_year_tag {
                writeln!(out, "  {}  {:<16} {:>14.2}", row.year, row.tag, row.amount).unwrap();
            }
        }

        if !report.by_ticker.is_empty() {
            writeln!(out, "\n=== Realized Gains by Ticker ===").unwrap();
            for row in &report.by_ticker {
                writeln!(out, "  {:<8} {:>14.2}", row.ticker, row.amount).unwrap();
            }
        }

        if !report.open_lots.is_empty() {
            writeln!(out, "\n=== Open Lots ===").unwrap();
            let mut basis_total = 0.0;
            for lot in &report.open_lots {
                basis_total += lot.cost_basis();
                writeln!(
                    out,
                    "  {:<8} {:>10.2} @ {:>10.2}  acquired {}  [{}]",
                    lot.ticker, lot.quantity, lot.unit_cost, lot.acquired_at, lot.tag
                )
                .unwrap();
            }
            writeln!(out, "  Cost basis {:>12.2}", basis_total).unwrap();
        }

        out
    }
}
