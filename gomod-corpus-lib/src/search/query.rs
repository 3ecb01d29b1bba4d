use chrono::NaiveDate;

/// Repository search qualifiers for the corpus.
///
/// Renders the base query (public, unarchived repositories of one language pushed since a date,
/// sorted by stars) and the restart variants that additionally cap the star count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    language: String,
    pushed_since: NaiveDate,
    min_stars: Option<u64>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(language: impl Into<String>, pushed_since: NaiveDate, min_stars: Option<u64>) -> Self {
        Self {
            language: language.into(),
            pushed_since,
            min_stars,
        }
    }

    /// Optional popularity floor that every query carries
    #[must_use]
    pub const fn min_stars(&self) -> Option<u64> {
        self.min_stars
    }

    /// The query as first issued
    #[must_use]
    pub fn base(&self) -> String {
        self.render(None)
    }

    /// The query restricted to repositories with fewer than `ceiling` stars
    #[must_use]
    pub fn below_stars(&self, ceiling: u64) -> String {
        self.render(Some(ceiling))
    }

    fn render(&self, ceiling: Option<u64>) -> String {
        let stars = match (self.min_stars, ceiling) {
            (None, None) => String::new(),
            (Some(floor), None) => format!(" stars:>={floor}"),
            (None, Some(ceiling)) => format!(" stars:<{ceiling}"),
            (Some(floor), Some(ceiling)) => format!(" stars:{floor}..{}", ceiling.saturating_sub(1)),
        };

        format!(
            "archived:false is:public pushed:>={} language:{}{stars} sort:stars",
            self.pushed_since.format("%Y-%m-%d"),
            self.language
        )
    }
}
