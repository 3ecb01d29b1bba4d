//! Command-line interface and orchestration for gomod-corpus
//!
//! This module implements the CLI commands and wires the search client, the crawl
//! controller, the ranker, and the report generators together. It handles argument
//! parsing, configuration management, and the high-level workflow.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **crawl**: Page through the repository search, collect eligible modules, rank
//!   them by score, and write the report
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file for syntax and out-of-range values
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. The crawl command:
//!
//! 1. Sets up logging and loads configuration, applying command-line overrides
//! 2. Crawls with a [`GitHubSearch`](crate::search::GitHubSearch) client
//! 3. Ranks the collected entries
//! 4. Writes the TSV report, and the JSON report when asked
//!
//! Nothing is written to the output when the crawl fails; a single error line goes
//! to the error stream and the host exits with status 1.

mod common;
mod config;
mod crawl;
mod host;
mod init;
mod progress_reporter;
mod run;
mod validate;

pub use crawl::{CrawlArgs, process_crawl};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
