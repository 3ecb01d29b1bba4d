//! Repository search against the GitHub GraphQL API
//!
//! This module owns everything the crawl needs from the remote side: the
//! [`SearchClient`] seam the crawl controller drives, the production
//! [`GitHubSearch`] implementation, the [`Candidate`] records a page yields, and
//! [`SearchQuery`] which renders the search qualifiers for both the initial
//! query and the star-narrowed restart queries.
//!
//! GitHub caps every search at 1000 results no matter how many repositories
//! match. Callers that need more than that must re-issue the query with a
//! tighter popularity range, which is why [`SearchQuery`] can render a star
//! ceiling.

mod candidate;
mod client;
mod github;
mod query;

pub use candidate::{Candidate, HeadCommit};
pub use client::{RateLimitInfo, SearchClient, SearchPage};
pub use github::{DEFAULT_API_URL, GitHubSearch};
pub use query::SearchQuery;
