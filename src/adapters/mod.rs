//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod identity_corrections;
pub mod text_report_adapter;
#[cfg(feature = "fetch")]
pub mod fetch_corrections;
