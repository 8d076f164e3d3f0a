//! Report output port trait.

use crate::domain::error::LedgerError;
use crate::domain::report::LedgerReport;
use std::path::Path;

/// Port for rendering a computed ledger report.
pub trait ReportPort {
    /// Render the report to a string.
    fn render(&self, report: &LedgerReport) -> String;

    /// Default implementation: render and write to `output_path`.
    fn write(&self, report: &LedgerReport, output_path: &Path) -> Result<(), LedgerError> {
        std::fs::write(output_path, self.render(report))?;
        Ok(())
    }
}
