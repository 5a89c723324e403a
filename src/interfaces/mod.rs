//! User interfaces
//!
//! HTTP 接口在 [`crate::api`]，这里只有命令行。

#[cfg(feature = "cli")]
pub mod cli;
