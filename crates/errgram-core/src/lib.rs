//! Core pipeline for request-error alerting: capture → format → overflow → notify.
//!
//! This crate is transport-agnostic. Telegram and Telegraph live behind ports
//! (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod hook;
pub mod logging;
pub mod ports;

pub use errors::{Error, Result};
