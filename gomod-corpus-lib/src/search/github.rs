//! GitHub GraphQL search client
//!
//! Minimal client that runs one repository search page per call and maps the
//! GraphQL response onto [`Candidate`] records.

use super::{Candidate, HeadCommit, RateLimitInfo, SearchClient, SearchPage};
use crate::Result;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use ohno::{IntoAppError, app_err, bail};
use serde::Deserialize;
use serde_json::json;

const LOG_TARGET: &str = "    search";

/// Base URL of the public GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page GitHub's search connection will return
const PAGE_SIZE: u8 = 100;

const SEARCH_QUERY: &str = r#"
query($query: String!, $cursor: String, $first: Int!) {
  search(first: $first, after: $cursor, type: REPOSITORY, query: $query) {
    repositoryCount
    pageInfo {
      endCursor
      hasNextPage
    }
    nodes {
      ... on Repository {
        url
        stargazerCount
        forkCount
        defaultBranchRef {
          target {
            ... on Commit {
              oid
              pushedDate
              committedDate
            }
          }
        }
        manifest: object(expression: "HEAD:go.mod") {
          ... on Blob {
            text
          }
        }
      }
    }
  }
  rateLimit {
    cost
    limit
    remaining
    resetAt
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<SearchData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
    search: SearchConnection,
    rate_limit: Option<WireRateLimit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchConnection {
    repository_count: u64,
    page_info: PageInfo,
    #[serde(default)]
    nodes: Vec<Option<RepositoryNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

/// A search result node. Non-repository nodes deserialize with every field missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    url: Option<String>,
    #[serde(default)]
    stargazer_count: u64,
    #[serde(default)]
    fork_count: u64,
    default_branch_ref: Option<BranchRef>,
    manifest: Option<ManifestBlob>,
}

#[derive(Debug, Deserialize)]
struct BranchRef {
    target: Option<CommitTarget>,
}

/// The branch target; only commits carry an `oid` here since other target kinds are not selected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitTarget {
    oid: Option<String>,
    pushed_date: Option<DateTime<Utc>>,
    committed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ManifestBlob {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRateLimit {
    cost: u32,
    limit: u32,
    remaining: u32,
    reset_at: DateTime<Utc>,
}

impl From<RepositoryNode> for Candidate {
    fn from(node: RepositoryNode) -> Self {
        let head = node.default_branch_ref.and_then(|branch| branch.target).and_then(|target| {
            target.oid.map(|oid| HeadCommit {
                oid,
                pushed_date: target.pushed_date,
                committed_date: target.committed_date,
            })
        });

        Self {
            url: node.url.unwrap_or_default(),
            stargazer_count: node.stargazer_count,
            fork_count: node.fork_count,
            head,
            manifest: node.manifest.and_then(|blob| blob.text),
        }
    }
}

impl From<WireRateLimit> for RateLimitInfo {
    fn from(rate_limit: WireRateLimit) -> Self {
        Self {
            cost: rate_limit.cost,
            limit: rate_limit.limit,
            remaining: rate_limit.remaining,
            reset_at: rate_limit.reset_at,
        }
    }
}

impl GraphQlResponse {
    fn into_page(self) -> Result<SearchPage> {
        if let Some(errors) = self.errors
            && !errors.is_empty()
        {
            let messages = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
            bail!("GitHub search failed: {messages}");
        }

        let data = self.data.ok_or_else(|| app_err!("GitHub search response contained no data"))?;
        let search = data.search;

        Ok(SearchPage {
            candidates: search
                .nodes
                .into_iter()
                .flatten()
                .filter(|node| node.url.is_some())
                .map(Into::into)
                .collect(),
            end_cursor: search.page_info.end_cursor,
            has_next_page: search.page_info.has_next_page,
            total_matches: search.repository_count,
            rate_limit: data.rate_limit.map(Into::into),
        })
    }
}

/// Repository search backed by the GitHub GraphQL API
#[derive(Debug, Clone)]
pub struct GitHubSearch {
    octocrab: Octocrab,
}

impl GitHubSearch {
    /// Create a search client with an optional personal access token against `api_url`
    pub fn new(token: Option<&str>, api_url: &str) -> Result<Self> {
        let mut builder = Octocrab::builder()
            .base_uri(api_url)
            .into_app_err_with(|| format!("invalid GitHub API URL '{api_url}'"))?;

        if let Some(t) = token {
            builder = builder.personal_token(t.to_string());
        } else {
            log::warn!(target: LOG_TARGET, "No GitHub token provided; the GraphQL API rejects anonymous requests");
        }

        Ok(Self {
            octocrab: builder.build()?,
        })
    }
}

impl SearchClient for GitHubSearch {
    async fn search(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage> {
        log::debug!(target: LOG_TARGET, "Searching '{query}' after cursor {cursor:?}");

        let body = json!({
            "query": SEARCH_QUERY,
            "variables": {
                "query": query,
                "cursor": cursor,
                "first": PAGE_SIZE,
            },
        });

        let response: GraphQlResponse = self
            .octocrab
            .post("/graphql", Some(&body))
            .await
            .into_app_err("querying GitHub repository search")?;

        response.into_page()
    }
}
