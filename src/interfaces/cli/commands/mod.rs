//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_management;
mod reports;

pub use config_management::{config_generate, config_show};
pub use reports::{print_campaigns, print_kpis, print_trends};
