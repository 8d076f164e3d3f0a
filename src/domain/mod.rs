//! Core domain types and logic.

pub mod transaction;
pub mod lot;
pub mod profit;
pub mod corrections;
pub mod merge;
pub mod matcher;
pub mod report;
pub mod error;
