#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for gomod-corpus
//!
//! This library holds all functionality for the gomod-corpus tool, which builds a
//! ranked list of popular, recently pushed Go modules hosted on GitHub.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`search`]: GitHub repository search client and query construction
//! - [`crawl`]: Paginated crawl controller and per-record extraction
//! - [`ranking`]: Score ordering of collected modules
//! - [`reports`]: Report generation

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod crawl;

pub mod ranking;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub mod search;

pub use crate::commands::{Host, run};
