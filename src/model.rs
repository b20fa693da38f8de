use chrono::{DateTime, Utc};
use serde::Serialize;

// -------------------------------------------------------------------------------------------------
// Commit
// -------------------------------------------------------------------------------------------------
/// A commit as reported by a hosting provider.
///
/// Identity is `id` alone: two records with the same id are the same commit, regardless of which
/// branch or provider produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub committer_timestamp: DateTime<Utc>,
    pub author: Option<String>,
}

// -------------------------------------------------------------------------------------------------
// Repository
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// The repository name (or slug) as used in API paths
    pub name: String,

    /// The owning user or workspace as used in API paths
    pub owner: String,

    /// A provider-specific identifier, e.g., a numeric id or a UUID
    pub opaque_id: String,
}

impl Repository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

// -------------------------------------------------------------------------------------------------
// Branch
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
}

// -------------------------------------------------------------------------------------------------
// Identity
// -------------------------------------------------------------------------------------------------
/// The authenticated account of a hosting provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub login: String,
    pub id: String,
}

// -------------------------------------------------------------------------------------------------
// ReadmeDocument
// -------------------------------------------------------------------------------------------------
/// A README as read from a repository.
///
/// `version_token` identifies the exact stored state of the file at read time; writing it back
/// with a stale token fails rather than overwriting a concurrent edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeDocument {
    /// The path of the README within its repository, e.g., `README.md`
    pub path: String,
    pub raw_text: String,
    pub version_token: String,
}

// -------------------------------------------------------------------------------------------------
// CommitIdentity
// -------------------------------------------------------------------------------------------------
/// The name and email recorded as committer and author of a README update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}
