use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::CommitIdentity;

// -------------------------------------------------------------------------------------------------
// User
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct User {
    pub login: String,
    pub id: i64,
}

// -------------------------------------------------------------------------------------------------
// Repository
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Deserialize)]
pub struct Owner {
    pub login: String,
}

// -------------------------------------------------------------------------------------------------
// Branch
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Branch {
    pub name: String,
}

// -------------------------------------------------------------------------------------------------
// Commit
// -------------------------------------------------------------------------------------------------
/// An entry of the commit listing endpoint
#[derive(Debug, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,

    /// The GitHub account linked to the commit author, if any
    pub author: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
}

#[derive(Debug, Deserialize)]
pub struct Signature {
    pub date: DateTime<Utc>,
}

impl Commit {
    /// The committer date, falling back to the author date.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.commit
            .committer
            .as_ref()
            .or(self.commit.author.as_ref())
            .map(|s| s.date)
    }
}

// -------------------------------------------------------------------------------------------------
// Readme
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Readme {
    pub path: String,
    pub sha: String,
    pub content: String,
    pub encoding: String,
}

// -------------------------------------------------------------------------------------------------
// FileUpdateRequest
// -------------------------------------------------------------------------------------------------
/// The body of a request to create or update file contents
#[derive(Debug, Serialize)]
pub struct FileUpdateRequest<'a> {
    pub message: &'a str,

    /// The new file contents, base64-encoded
    pub content: String,

    /// The blob SHA of the file being replaced
    pub sha: &'a str,
    pub committer: &'a CommitIdentity,
    pub author: &'a CommitIdentity,
}
