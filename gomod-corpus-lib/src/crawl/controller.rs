use super::{CancelSignal, Entry, Progress, extract};
use crate::Result;
use crate::search::{SearchClient, SearchPage, SearchQuery};
use chrono::{DateTime, Utc};
use core::fmt::{Debug, Formatter};
use core::time::Duration;
use ohno::{EnrichableExt, app_err, bail};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LOG_TARGET: &str = "     crawl";

/// Upper bound on the up-front reservation for collected entries
const MAX_RESERVED_ENTRIES: usize = 1000;

/// What to do when a query runs out of pages before the target count is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Re-issue the query limited to repositories with fewer stars than the last one seen
    #[default]
    Restart,

    /// Running out of pages is an error
    Fail,
}

/// Knobs for a single crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Number of entries to collect
    pub target_count: usize,

    /// Default branch pushes before this instant make a repository ineligible
    pub cutoff: DateTime<Utc>,

    pub exhaustion_policy: ExhaustionPolicy,

    /// Delay before every query after the first
    pub page_delay: Duration,

    /// Bound on each individual query
    pub page_timeout: Duration,

    /// Number of narrowed restarts allowed before giving up
    pub max_restarts: u32,
}

/// What a successful crawl produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Eligible entries in the order they were found
    pub entries: Vec<Entry>,
    pub pages: u32,
    pub restarts: u32,

    /// Candidates seen but found ineligible
    pub skipped: u64,
}

/// Mutable state of one crawl
#[derive(Debug)]
struct CrawlState {
    query: String,
    cursor: Option<String>,
    accumulated: Vec<Entry>,

    /// Star count of the last repository seen, eligible or not
    last_popularity: Option<u64>,

    /// Star ceiling of the current restart window
    ceiling: Option<u64>,
    page: u32,
    restarts: u32,
    skipped: u64,
}

impl CrawlState {
    fn new(query: String, target_count: usize) -> Self {
        Self {
            query,
            cursor: None,
            accumulated: Vec::with_capacity(target_count.min(MAX_RESERVED_ENTRIES)),
            last_popularity: None,
            ceiling: None,
            page: 0,
            restarts: 0,
            skipped: 0,
        }
    }

    fn into_outcome(self) -> CrawlOutcome {
        CrawlOutcome {
            entries: self.accumulated,
            pages: self.page,
            restarts: self.restarts,
            skipped: self.skipped,
        }
    }
}

/// How filtering a page left the crawl
#[derive(Debug, PartialEq, Eq)]
enum PageOutcome {
    TargetReached,
    NextPage(String),
    Exhausted,
}

/// Drives a [`SearchClient`] page by page until enough eligible modules are collected.
pub struct Crawler<C> {
    client: C,
    options: CrawlOptions,
    progress: Option<Arc<dyn Progress>>,
    cancel: CancelSignal,
}

impl<C: Debug> Debug for Crawler<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Crawler")
            .field("client", &self.client)
            .field("options", &self.options)
            .field("progress", &self.progress.as_ref().map(|_| "<Progress>"))
            .field("cancel", &self.cancel)
            .finish()
    }
}

impl<C: SearchClient> Crawler<C> {
    #[must_use]
    pub fn new(client: C, options: CrawlOptions) -> Self {
        Self {
            client,
            options,
            progress: None,
            cancel: CancelSignal::new(),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// Collect up to the target count of eligible entries for `query`.
    ///
    /// Entries come back in discovery order; ranking is up to the caller. On success the
    /// outcome holds exactly `target_count` entries.
    ///
    /// # Errors
    ///
    /// Fails if any query fails or times out, if the crawl is cancelled, or if the candidates
    /// run out before the target is reached (immediately under [`ExhaustionPolicy::Fail`],
    /// otherwise once a restart can no longer narrow the query).
    pub async fn crawl(&self, query: &SearchQuery) -> Result<CrawlOutcome> {
        let target = self.options.target_count;
        if target == 0 {
            bail!("the target count must be greater than zero");
        }

        let mut state = CrawlState::new(query.base(), target);
        if let Some(progress) = &self.progress {
            progress.set_phase("Crawling");
        }

        let result = self.crawl_pages(query, &mut state).await;

        if let Some(progress) = &self.progress {
            progress.done();
        }

        result?;

        log::info!(
            target: LOG_TARGET,
            "Collected {} modules from {} pages with {} restarts ({} candidates skipped)",
            state.accumulated.len(),
            state.page,
            state.restarts,
            state.skipped
        );

        Ok(state.into_outcome())
    }

    async fn crawl_pages(&self, query: &SearchQuery, state: &mut CrawlState) -> Result<()> {
        loop {
            state.page += 1;

            match &state.cursor {
                None => log::info!(target: LOG_TARGET, "Querying first page of results for '{}'", state.query),
                Some(cursor) => log::info!(
                    target: LOG_TARGET,
                    "{}/{} done; querying page {} with cursor {cursor}",
                    state.accumulated.len(),
                    self.options.target_count,
                    state.page
                ),
            }

            // the search API has a secondary rate limit on top of the hourly budget
            if state.page > 1 {
                self.pause().await?;
            }

            let page = self.fetch(state).await?;

            match self.filter_page(state, &page) {
                PageOutcome::TargetReached => return Ok(()),
                PageOutcome::NextPage(cursor) => state.cursor = Some(cursor),
                PageOutcome::Exhausted => self.restart(query, state)?,
            }
        }
    }

    async fn pause(&self) -> Result<()> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(app_err!("crawl cancelled")),
            () = tokio::time::sleep(self.options.page_delay) => Ok(()),
        }
    }

    /// Issue one query, bounded by the per-page timeout
    async fn fetch(&self, state: &CrawlState) -> Result<SearchPage> {
        if self.cancel.is_cancelled() {
            bail!("crawl cancelled");
        }

        let timeout = self.options.page_timeout;
        let request = tokio::time::timeout(timeout, self.client.search(&state.query, state.cursor.as_deref()));

        let page = tokio::select! {
            biased;
            () = self.cancel.cancelled() => bail!("crawl cancelled"),
            result = request => match result {
                Ok(Ok(page)) => page,
                Ok(Err(e)) => return Err(e.enrich_with(|| format!("querying page {} of '{}'", state.page, state.query))),
                Err(_elapsed) => bail!("page {} of '{}' timed out after {}s", state.page, state.query, timeout.as_secs_f64()),
            },
        };

        log::debug!(
            target: LOG_TARGET,
            "Page {} returned {} candidates of {} total matches",
            state.page,
            page.candidates.len(),
            page.total_matches
        );

        if let Some(rate_limit) = page.rate_limit {
            log::debug!(
                target: LOG_TARGET,
                "Rate limit: cost {}, {}/{} remaining, resets at {}",
                rate_limit.cost,
                rate_limit.remaining,
                rate_limit.limit,
                rate_limit.reset_at
            );
        }

        Ok(page)
    }

    fn filter_page(&self, state: &mut CrawlState, page: &SearchPage) -> PageOutcome {
        let target = self.options.target_count;

        for candidate in &page.candidates {
            // nodes that are not repositories carry no star count
            if !candidate.url.is_empty() {
                state.last_popularity = Some(candidate.stargazer_count);
            }

            match extract(candidate, self.options.cutoff) {
                Ok(entry) => {
                    state.accumulated.push(entry);

                    if let Some(progress) = &self.progress {
                        progress.set_progress(
                            state.accumulated.len() as u64,
                            target as u64,
                            &format!("page {}, {} restarts", state.page, state.restarts),
                        );
                    }

                    if state.accumulated.len() >= target {
                        state.accumulated.truncate(target);
                        return PageOutcome::TargetReached;
                    }
                }
                Err(reason) => {
                    state.skipped += 1;
                    log::debug!(target: LOG_TARGET, "Skipping {}: {reason}", candidate.url);
                }
            }
        }

        page.next_cursor()
            .map_or(PageOutcome::Exhausted, |cursor| PageOutcome::NextPage(cursor.to_string()))
    }

    /// Handle a query that ran out of pages before the target was reached
    fn restart(&self, query: &SearchQuery, state: &mut CrawlState) -> Result<()> {
        let collected = state.accumulated.len();
        let target = self.options.target_count;

        if self.options.exhaustion_policy == ExhaustionPolicy::Fail {
            bail!("ran out of candidates after {} pages with {collected}/{target} modules", state.page);
        }

        let Some(last) = state.last_popularity else {
            bail!("the search returned no candidates; collected {collected}/{target} modules");
        };

        if last == 0 {
            bail!("ran out of candidates at zero stars with {collected}/{target} modules");
        }

        // a narrowed query that returns nothing leaves the last star count where it was
        if let Some(ceiling) = state.ceiling
            && last >= ceiling
        {
            bail!("restart made no progress below {ceiling} stars; collected {collected}/{target} modules");
        }

        if let Some(floor) = query.min_stars()
            && last <= floor
        {
            bail!("ran out of candidates above the {floor} star floor with {collected}/{target} modules");
        }

        if state.restarts >= self.options.max_restarts {
            bail!("gave up after {} restarts with {collected}/{target} modules", state.restarts);
        }

        // GitHub's search is capped at 1000 results, so start over below the last star count seen
        log::warn!(
            target: LOG_TARGET,
            "Out of results at {} pages and {collected} modules; restarting at {last} stars",
            state.page
        );

        state.restarts += 1;
        state.ceiling = Some(last);
        state.cursor = None;
        state.query = query.below_stars(last);

        Ok(())
    }
}
