// Copyright 2026 WCL Importer Contributors
// SPDX-License-Identifier: MIT

//! WCL importer library: scrape Warcraft Logs statistics and snapshot
//! them into Azure Data Lake behind an HTTP trigger.
//!
//! This library crate exposes the core modules for integration testing.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod envelope;
pub mod error;
pub mod importer;
pub mod logging;
pub mod publish;
pub mod rest;
pub mod storage;

pub use error::{ConfigError, ImportError, ImportResult};
pub use importer::{ImportOutcome, Importer};
pub use publish::Publisher;
