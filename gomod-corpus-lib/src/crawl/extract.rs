use super::{Entry, module_path};
use crate::Result;
use crate::search::Candidate;
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter};

/// Why a candidate did not make it into the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    /// The repository has no `go.mod` at its root, or it declares no module path
    NoModuleDescriptor,

    /// The repository has no default branch head commit
    NoDefaultBranch,

    /// Neither a push date nor a commit date is known for the default branch head
    UnknownPushDate,

    /// The default branch was last pushed before the cutoff
    StalePush { pushed_at: DateTime<Utc> },
}

impl Display for Ineligible {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoModuleDescriptor => write!(f, "no module found"),
            Self::NoDefaultBranch => write!(f, "no default branch"),
            Self::UnknownPushDate => write!(f, "unknown push date"),
            Self::StalePush { pushed_at } => write!(f, "no recent pushes (last push {})", pushed_at.format("%Y-%m-%d")),
        }
    }
}

/// Turn a search candidate into a corpus entry.
///
/// The search endpoint's `pushed:` qualifier matches pushes to any branch, so the default
/// branch head is checked against `cutoff` here. A push exactly at `cutoff` is recent enough.
///
/// # Errors
///
/// Returns the reason the candidate is ineligible
pub fn extract(candidate: &Candidate, cutoff: DateTime<Utc>) -> Result<Entry, Ineligible> {
    let module = candidate
        .manifest
        .as_deref()
        .and_then(module_path)
        .ok_or(Ineligible::NoModuleDescriptor)?;

    let head = candidate.head.as_ref().ok_or(Ineligible::NoDefaultBranch)?;
    let pushed_at = head.push_time().ok_or(Ineligible::UnknownPushDate)?;
    if pushed_at < cutoff {
        return Err(Ineligible::StalePush { pushed_at });
    }

    // for now, the score is just stars plus forks
    let score = candidate.stargazer_count.saturating_add(candidate.fork_count);

    Ok(Entry::new(module, head.oid.clone(), candidate.url.clone(), score))
}
