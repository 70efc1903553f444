//! superperformance-screener: growth move detection over daily price history
//!
//! This library provides the core components for:
//! - LOD candidate scanning and forward move tracking
//! - Drawdown, continuation and termination rules
//! - Growth / Superperformance classification by duration band
//! - Daily bar storage in Parquet
//! - Universe screening with volume filtering and overlap consolidation
//! - JSON backups, Parquet exports and console output
//! - Full observability stack

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod output;
pub mod screener;
pub mod telemetry;
