//! Port traits for external collaborators (data, config, reporting).

pub mod config_port;
pub mod data_port;
pub mod report_port;
