//! Report generation for the ranked module list
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **TSV**: one header row (`module`, `version`, `source`, `score`) followed by
//!   one row per entry, written with the `csv` crate using a tab delimiter
//! - **JSON**: machine-readable `{"modules": [...]}` document
//!
//! Both generators write entries in the order given; ranking happens before
//! reporting.

mod json;
mod tsv;

pub use json::generate as generate_json;
pub use tsv::generate as generate_tsv;
