use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::models;
use crate::hosting::{
    check_rate_limit, paginate, url_from_path_parts_and_params, Error, HostingClient, Result,
};
use crate::model::{Branch, Commit, Identity, Repository};

// -------------------------------------------------------------------------------------------------
// Client
// -------------------------------------------------------------------------------------------------
pub struct Client {
    pub(super) base_url: Url,
    pub(super) inner: reqwest::Client,
    pub(super) username: String,
    pub(super) password: SecretString,
    pub(super) identity: OnceLock<Identity>,
}

const MAX_PAGE_LEN: (&str, &str) = ("pagelen", "100");

impl Client {
    pub async fn get_user(&self) -> Result<models::User> {
        let response = self.get(&["user"], &[]).await?;
        Ok(response.json().await?)
    }

    pub async fn get_workspaces(&self) -> Result<Vec<models::Workspace>> {
        let path_parts: &[&str] = &["user", "permissions", "workspaces"];
        let permissions: Vec<models::WorkspacePermission> =
            paginate(|page| self.get_page(path_parts, &[], page)).await?;
        Ok(permissions.into_iter().map(|p| p.workspace).collect())
    }

    pub async fn get_workspace_repos(&self, workspace: &str) -> Result<Vec<models::Repository>> {
        let path_parts: &[&str] = &["workspaces", workspace, "permissions", "repositories"];
        let permissions: Vec<models::RepositoryPermission> =
            paginate(|page| self.get_page(path_parts, &[], page)).await?;
        Ok(permissions.into_iter().map(|p| p.repository).collect())
    }

    pub async fn get_branches(&self, workspace: &str, repo: &str) -> Result<Vec<models::Branch>> {
        let path_parts: &[&str] = &["repositories", workspace, repo, "refs", "branches"];
        paginate(|page| self.get_page(path_parts, &[], page)).await
    }

    pub async fn get_commits(
        &self,
        workspace: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<models::Commit>> {
        let path_parts: &[&str] = &["repositories", workspace, repo, "commits"];
        let params: &[(&str, &str)] = &[("include", branch)];
        paginate(|page| self.get_page(path_parts, params, page)).await
    }
}

// private implementation
impl Client {
    async fn get(&self, path_parts: &[&str], params: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = url_from_path_parts_and_params(self.base_url.clone(), path_parts, params)?;
        debug!("GET {url}");
        let response = self
            .inner
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await?;
        let response = check_rate_limit(response).await?;
        Ok(response.error_for_status()?)
    }

    async fn get_page<T>(
        &self,
        path_parts: &[&str],
        params: &[(&str, &str)],
        page: u32,
    ) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let page = page.to_string();
        let mut params = params.to_vec();
        params.push(MAX_PAGE_LEN);
        params.push(("page", &page));
        let response = self.get(path_parts, &params).await?;
        let body: models::Paginated<T> = response.json().await?;
        Ok(body.values)
    }
}

/// Split a `{workspace}/{repo_slug}` name into a `Repository`.
fn to_repository(repo: models::Repository) -> Result<Repository> {
    match repo.full_name.split_once('/') {
        Some((owner, name)) => Ok(Repository {
            name: name.to_string(),
            owner: owner.to_string(),
            opaque_id: repo.uuid,
        }),
        None => Err(Error::Decode(format!("malformed repository name {:?}", repo.full_name))),
    }
}

/// Convert a workspace's repositories, skipping any with a malformed name.
fn to_repositories(found: Vec<models::Repository>) -> Vec<Repository> {
    found
        .into_iter()
        .filter_map(|repo| match to_repository(repo) {
            Ok(repo) => Some(repo),
            Err(e) => {
                warn!("Skipping Bitbucket repository: {e}");
                None
            }
        })
        .collect()
}

/// Keep only the commits whose author is matched to the account `me`.
fn authored_by(commits: Vec<models::Commit>, me: &Identity) -> Vec<Commit> {
    commits
        .into_iter()
        .filter(|c| c.author_uuid() == Some(me.id.as_str()))
        .map(|c| Commit {
            id: c.hash,
            committer_timestamp: c.date,
            author: Some(me.login.clone()),
        })
        .collect()
}

#[async_trait]
impl HostingClient for Client {
    fn provider_name(&self) -> &'static str {
        "Bitbucket"
    }

    async fn authenticate(&self) -> Result<Identity> {
        if let Some(identity) = self.identity.get() {
            return Ok(identity.clone());
        }
        let user = self.get_user().await?;
        debug!("Authenticated to Bitbucket as {}", user.login());
        let identity = Identity {
            login: user.login().to_string(),
            id: user.uuid,
        };
        Ok(self.identity.get_or_init(|| identity).clone())
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let mut repos = Vec::new();
        for workspace in self.get_workspaces().await? {
            match self.get_workspace_repos(&workspace.slug).await {
                Ok(found) => repos.extend(to_repositories(found)),
                Err(e) => {
                    warn!("Failed to list repositories of Bitbucket workspace {}: {e}", workspace.slug);
                }
            }
        }
        Ok(repos)
    }

    async fn list_branches(&self, repo: &Repository) -> Result<Vec<Branch>> {
        let branches = self.get_branches(&repo.owner, &repo.name).await?;
        Ok(branches.into_iter().map(|b| Branch { name: b.name }).collect())
    }

    async fn list_commits(&self, repo: &Repository, branch: &Branch) -> Result<Vec<Commit>> {
        let me = self.authenticate().await?;
        let commits = self.get_commits(&repo.owner, &repo.name, &branch.name).await?;
        Ok(authored_by(commits, &me))
    }
}
