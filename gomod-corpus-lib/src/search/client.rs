use super::Candidate;
use crate::Result;
use chrono::{DateTime, Utc};

/// Rate limit state reported alongside a search page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub cost: u32,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

/// One page of search results
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub candidates: Vec<Candidate>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,

    /// Number of repositories matching the query, including the ones beyond the result cap
    pub total_matches: u64,
    pub rate_limit: Option<RateLimitInfo>,
}

impl SearchPage {
    /// Cursor to continue from, or `None` when the query has run out of pages
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page { self.end_cursor.as_deref() } else { None }
    }
}

/// Executes repository search queries one page at a time.
pub trait SearchClient: Send + Sync {
    /// Run `query`, resuming after `cursor` when one is given.
    fn search(&self, query: &str, cursor: Option<&str>) -> impl Future<Output = Result<SearchPage>> + Send;
}
