//! Core domain + application logic for the homework review notifier.
//!
//! This crate is intentionally transport-agnostic. The review API (HTTP) and
//! Telegram live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod poller;
pub mod ports;
pub mod review;

pub use errors::{Error, Result};
