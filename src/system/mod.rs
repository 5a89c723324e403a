//! System-level modules
//!
//! - Logging initialization
//! - Panic handling per run mode

pub mod logging;
pub mod panic_handler;
