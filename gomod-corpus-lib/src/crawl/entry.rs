use serde::Serialize;

/// An eligible Go module, ready for ranking and reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    module: String,
    version: String,
    source: String,
    score: u64,
}

impl Entry {
    #[must_use]
    pub fn new(module: impl Into<String>, version: impl Into<String>, source: impl Into<String>, score: u64) -> Self {
        Self {
            module: module.into(),
            version: version.into(),
            source: source.into(),
            score,
        }
    }

    /// Module path from the `go.mod` file
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Commit id of the default branch head
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Repository URL
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }
}
