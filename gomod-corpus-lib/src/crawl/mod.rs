//! Paginated crawl over the capped repository search
//!
//! This module turns a stream of search pages into a list of eligible Go modules.
//!
//! # Implementation Model
//!
//! [`Crawler`] drives a [`SearchClient`](crate::search::SearchClient) strictly one page at a
//! time. Every candidate on a page passes through [`extract`], which either yields an [`Entry`]
//! or an [`Ineligible`] reason (no `go.mod` module path, no default branch, or no push to the
//! default branch inside the recency window). The crawl stops as soon as the target count is
//! reached.
//!
//! When a query runs out of pages the [`ExhaustionPolicy`] decides what happens next. With
//! [`ExhaustionPolicy::Restart`] the query is re-issued with a star ceiling equal to the star
//! count of the last candidate seen, which gets past the search endpoint's result cap. A
//! restart that cannot make progress is an error rather than a loop.
//!
//! Progress is reported through the [`Progress`] trait, and a [`CancelSignal`] is honored
//! before each query, while a query is in flight, and during the inter-page delay.

mod cancel;
mod controller;
mod entry;
mod extract;
mod module_path;
mod progress;

pub use cancel::CancelSignal;
pub use controller::{CrawlOptions, CrawlOutcome, Crawler, ExhaustionPolicy};
pub use entry::Entry;
pub use extract::{Ineligible, extract};
pub use module_path::module_path;
pub use progress::Progress;
