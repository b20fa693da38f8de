//! Folding the commits of one hosting provider into activity histograms.

use chrono::TimeZone;
use tracing::{debug, info, warn};

use crate::bucket::bucket_instant;
use crate::dedup::dedup_commits;
use crate::histogram::CommitHistograms;
use crate::hosting::{HostingClient, Result};
use crate::model::{Commit, Repository};

/// Count every distinct commit visible to `client` into a fresh pair of histograms, bucketing
/// commit times in time zone `tz`.
///
/// Repositories and branches are visited one at a time. Commits are deduplicated within each
/// repository, since branches of a repository share history; repositories are independent.
///
/// A repository whose branches cannot be listed, or a branch whose commits cannot be listed,
/// contributes nothing and is reported with a warning. A pagination overrun is not masked this
/// way and fails the whole aggregation.
pub async fn aggregate<Tz: TimeZone>(client: &dyn HostingClient, tz: &Tz) -> Result<CommitHistograms> {
    let provider = client.provider_name();
    let repos = client.list_repositories().await?;
    info!("Found {} {provider} repositories", repos.len());

    let mut histograms = CommitHistograms::new();
    for repo in &repos {
        let commits = collect_repo_commits(client, repo).await?;
        debug!("{provider} repository {}: {} distinct commits", repo.full_name(), commits.len());
        for commit in &commits {
            histograms.record(bucket_instant(&commit.committer_timestamp, tz));
        }
    }

    info!("Counted {} {provider} commits", histograms.total());
    Ok(histograms)
}

/// Gather the distinct commits of all branches of one repository.
async fn collect_repo_commits(client: &dyn HostingClient, repo: &Repository) -> Result<Vec<Commit>> {
    let provider = client.provider_name();
    let branches = match client.list_branches(repo).await {
        Ok(branches) => branches,
        Err(e) if e.is_pagination_overrun() => return Err(e),
        Err(e) => {
            warn!("Failed to list branches of {provider} repository {}: {e}", repo.full_name());
            Vec::new()
        }
    };

    let mut commits = Vec::new();
    for branch in &branches {
        match client.list_commits(repo, branch).await {
            Ok(found) => commits.extend(found),
            Err(e) if e.is_pagination_overrun() => return Err(e),
            Err(e) => {
                warn!(
                    "Failed to list commits of {provider} repository {} branch {}: {e}",
                    repo.full_name(),
                    branch.name
                );
            }
        }
    }
    Ok(dedup_commits(commits))
}
