/// A trait for reporting progress of a crawl.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Crawling").
    fn set_phase(&self, phase: &str);

    /// Report `current` out of `total` units of work done, with a short status message.
    fn set_progress(&self, current: u64, total: u64, message: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}
