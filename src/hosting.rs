//! The capability interface shared by hosting providers.
//!
//! Aggregation depends only on [`HostingClient`]; the concrete providers live in
//! [`crate::github`] and [`crate::bitbucket`].

use async_trait::async_trait;

mod endpoint;
mod error;
mod paginate;

pub use endpoint::{check_rate_limit, url_from_path_parts_and_params};
pub use error::{Error, Result};
pub use paginate::{paginate, MAX_PAGES, PAGE_SIZE};

use crate::model::{Branch, Commit, CommitIdentity, Identity, ReadmeDocument, Repository};

// -------------------------------------------------------------------------------------------------
// HostingClient
// -------------------------------------------------------------------------------------------------
/// A source of commits from one hosting provider.
///
/// Calls are made one at a time; implementations do not need to support concurrent use.
#[async_trait]
pub trait HostingClient: Send + Sync {
    /// A short name for the provider, used in log messages
    fn provider_name(&self) -> &'static str;

    /// Resolve the account the client is authenticated as.
    ///
    /// The result is cached for the lifetime of the client.
    async fn authenticate(&self) -> Result<Identity>;

    /// List the repositories in scope for the authenticated account.
    async fn list_repositories(&self) -> Result<Vec<Repository>>;

    /// List the branches of a repository.
    async fn list_branches(&self, repo: &Repository) -> Result<Vec<Branch>>;

    /// List every commit reachable from `branch`, following pagination to the end.
    ///
    /// Fails with [`Error::PaginationOverrun`] if the listing does not end within [`MAX_PAGES`]
    /// pages.
    async fn list_commits(&self, repo: &Repository, branch: &Branch) -> Result<Vec<Commit>>;
}

// -------------------------------------------------------------------------------------------------
// ReadmeStore
// -------------------------------------------------------------------------------------------------
/// Read and conditionally write a repository's README.
#[async_trait]
pub trait ReadmeStore: Send + Sync {
    async fn read_readme(&self, owner: &str, repo: &str) -> Result<ReadmeDocument>;

    /// Replace the contents of a file.
    ///
    /// Fails with [`Error::VersionConflict`] if the file no longer matches
    /// `update.version_token`; the file is never overwritten in that case.
    async fn write_file(&self, update: &FileUpdate<'_>) -> Result<()>;
}

/// A request to replace the contents of a file in a repository.
#[derive(Debug, Clone)]
pub struct FileUpdate<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub path: &'a str,
    pub content: &'a str,
    pub version_token: &'a str,
    pub message: &'a str,
    pub committer: &'a CommitIdentity,
}

#[cfg(test)]
pub(crate) mod fake;
