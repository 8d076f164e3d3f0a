//! Port traits between the domain and the outside world.

pub mod transaction_port;
pub mod correction_port;
pub mod config_port;
pub mod report_port;
