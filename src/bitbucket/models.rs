use chrono::{DateTime, Utc};
use serde::Deserialize;

// -------------------------------------------------------------------------------------------------
// Paginated
// -------------------------------------------------------------------------------------------------
/// One page of a Bitbucket collection
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

// -------------------------------------------------------------------------------------------------
// User
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct User {
    pub uuid: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
}

impl User {
    pub fn login(&self) -> &str {
        self.username
            .as_deref()
            .or(self.display_name.as_deref())
            .unwrap_or(&self.uuid)
    }
}

// -------------------------------------------------------------------------------------------------
// Workspace
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct WorkspacePermission {
    pub workspace: Workspace,
}

#[derive(Debug, Deserialize)]
pub struct Workspace {
    pub slug: String,
}

// -------------------------------------------------------------------------------------------------
// Repository
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct RepositoryPermission {
    pub repository: Repository,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub uuid: String,

    /// `{workspace}/{repo_slug}`
    pub full_name: String,
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
#[derive(Debug, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub date: DateTime<Utc>,
    pub author: Option<Author>,
}

#[derive(Debug, Deserialize)]
pub struct Author {
    /// The Bitbucket account matched to the commit author, if any
    pub user: Option<AuthorUser>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorUser {
    pub uuid: String,
}

impl Commit {
    pub fn author_uuid(&self) -> Option<&str> {
        self.author.as_ref()?.user.as_ref().map(|u| u.uuid.as_str())
    }
}
