use chrono::{DateTime, Utc};

/// Head commit of a repository's default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCommit {
    pub oid: String,
    pub pushed_date: Option<DateTime<Utc>>,
    pub committed_date: Option<DateTime<Utc>>,
}

impl HeadCommit {
    /// When the commit reached the default branch.
    ///
    /// GitHub no longer fills in `pushedDate` for every commit, so the commit date stands in when it is missing.
    #[must_use]
    pub fn push_time(&self) -> Option<DateTime<Utc>> {
        self.pushed_date.or(self.committed_date)
    }
}

/// One repository returned by a search page.
///
/// Search results that are not repositories come back as an empty candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub head: Option<HeadCommit>,

    /// Text of the `go.mod` file at the repository root, if any
    pub manifest: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(ts, 0).unwrap()
    }

    #[test]
    fn test_push_time_prefers_pushed_date() {
        let head = HeadCommit {
            oid: "abc".into(),
            pushed_date: Some(at(2_000)),
            committed_date: Some(at(1_000)),
        };
        assert_eq!(head.push_time(), Some(at(2_000)));
    }

    #[test]
    fn test_push_time_falls_back_to_commit_date() {
        let head = HeadCommit {
            oid: "abc".into(),
            pushed_date: None,
            committed_date: Some(at(1_000)),
        };
        assert_eq!(head.push_time(), Some(at(1_000)));
    }

    #[test]
    fn test_push_time_unknown() {
        let head = HeadCommit {
            oid: "abc".into(),
            pushed_date: None,
            committed_date: None,
        };
        assert_eq!(head.push_time(), None);
    }
}
