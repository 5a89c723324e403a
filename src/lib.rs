//! Surgedash - campaign analytics API for TikTok postings
//!
//! This library provides read-only analytics over postings, accounts and
//! clients (campaigns): time series, engagement rates, rankings,
//! distributions and per-campaign rollups, served as JSON over HTTP.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Report and config commands
//!
//! # Architecture
//! - `storage`: SeaORM data access (SQLite / MySQL / PostgreSQL)
//! - `analytics`: Pure aggregation functions over loaded records
//! - `services`: Fetch + aggregate, shared by HTTP and CLI
//! - `api`: HTTP handlers, response DTOs and middleware
//! - `interfaces`: Command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging and panic handling

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
