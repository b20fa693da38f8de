use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use std::sync::OnceLock;
use tracing::debug;

use super::models;
use crate::hosting::{
    check_rate_limit, paginate, url_from_path_parts_and_params, Error, FileUpdate, HostingClient,
    ReadmeStore, Result,
};
use crate::model::{Branch, Commit, Identity, ReadmeDocument, Repository};

// -------------------------------------------------------------------------------------------------
// Client
// -------------------------------------------------------------------------------------------------
pub struct Client {
    pub(super) base_url: Url,
    pub(super) inner: reqwest::Client,
    pub(super) token: SecretString,
    pub(super) identity: OnceLock<Identity>,
}

const MAX_PER_PAGE: (&str, &str) = ("per_page", "100");

impl Client {
    pub async fn get_authenticated_user(&self) -> Result<models::User> {
        let response = self.get(&["user"], &[]).await?;
        Ok(response.json().await?)
    }

    /// List the private repositories of the authenticated user.
    pub async fn get_private_repos(&self) -> Result<Vec<models::Repository>> {
        let path_parts: &[&str] = &["user", "repos"];
        let params: &[(&str, &str)] = &[("type", "private")];
        paginate(|page| self.get_page(path_parts, params, page)).await
    }

    pub async fn get_branches(&self, owner: &str, repo: &str) -> Result<Vec<models::Branch>> {
        let path_parts: &[&str] = &["repos", owner, repo, "branches"];
        paginate(|page| self.get_page(path_parts, &[], page)).await
    }

    pub async fn get_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<models::Commit>> {
        let path_parts: &[&str] = &["repos", owner, repo, "commits"];
        let params: &[(&str, &str)] = &[("sha", branch)];
        paginate(|page| self.get_page(path_parts, params, page)).await
    }

    pub async fn get_readme(&self, owner: &str, repo: &str) -> Result<models::Readme> {
        let response = self.get(&["repos", owner, repo, "readme"], &[]).await?;
        Ok(response.json().await?)
    }
}

// private implementation
impl Client {
    /// Construct a `Url` from the given path parts and query parameters.
    fn make_url(&self, path_parts: &[&str], params: &[(&str, &str)]) -> Result<Url> {
        url_from_path_parts_and_params(self.base_url.clone(), path_parts, params)
    }

    /// Add the headers every request carries, including authentication.
    fn prepare(&self, request_builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request_builder
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(self.token.expose_secret())
    }

    async fn get(&self, path_parts: &[&str], params: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = self.make_url(path_parts, params)?;
        debug!("GET {url}");
        let response = self.prepare(self.inner.get(url)).send().await?;
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
        params.push(MAX_PER_PAGE);
        params.push(("page", &page));
        let response = self.get(path_parts, &params).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl HostingClient for Client {
    fn provider_name(&self) -> &'static str {
        "GitHub"
    }

    async fn authenticate(&self) -> Result<Identity> {
        if let Some(identity) = self.identity.get() {
            return Ok(identity.clone());
        }
        let user = self.get_authenticated_user().await?;
        debug!("Authenticated to GitHub as {}", user.login);
        let identity = Identity {
            login: user.login,
            id: user.id.to_string(),
        };
        Ok(self.identity.get_or_init(|| identity).clone())
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let repos = self.get_private_repos().await?;
        Ok(repos
            .into_iter()
            .map(|r| Repository {
                name: r.name,
                owner: r.owner.login,
                opaque_id: r.id.to_string(),
            })
            .collect())
    }

    async fn list_branches(&self, repo: &Repository) -> Result<Vec<Branch>> {
        let branches = self.get_branches(&repo.owner, &repo.name).await?;
        Ok(branches.into_iter().map(|b| Branch { name: b.name }).collect())
    }

    async fn list_commits(&self, repo: &Repository, branch: &Branch) -> Result<Vec<Commit>> {
        let commits = self.get_commits(&repo.owner, &repo.name, &branch.name).await?;
        Ok(commits
            .into_iter()
            .filter_map(|c| {
                let Some(committer_timestamp) = c.timestamp() else {
                    debug!("Skipping commit {} in {} without a date", c.sha, repo.full_name());
                    return None;
                };
                Some(Commit {
                    id: c.sha,
                    committer_timestamp,
                    author: c.author.map(|a| a.login),
                })
            })
            .collect())
    }
}

#[async_trait]
impl ReadmeStore for Client {
    async fn read_readme(&self, owner: &str, repo: &str) -> Result<ReadmeDocument> {
        let readme = self.get_readme(owner, repo).await?;
        if readme.encoding != "base64" {
            return Err(Error::Decode(format!(
                "unexpected README encoding {:?}",
                readme.encoding
            )));
        }
        Ok(ReadmeDocument {
            raw_text: decode_content(&readme.content)?,
            path: readme.path,
            version_token: readme.sha,
        })
    }

    async fn write_file(&self, update: &FileUpdate<'_>) -> Result<()> {
        let mut path_parts = vec!["repos", update.owner, update.repo, "contents"];
        path_parts.extend(update.path.split('/'));
        let url = self.make_url(&path_parts, &[])?;

        let body = models::FileUpdateRequest {
            message: update.message,
            content: STANDARD.encode(update.content),
            sha: update.version_token,
            committer: update.committer,
            author: update.committer,
        };

        debug!("PUT {url}");
        let response = self.prepare(self.inner.put(url)).json(&body).send().await?;
        if let Some(e) = write_conflict(response.status(), update.path) {
            return Err(e);
        }
        let response = check_rate_limit(response).await?;
        response.error_for_status()?;
        Ok(())
    }
}

/// The error for a contents write rejected because the file changed since it was read.
fn write_conflict(status: StatusCode, path: &str) -> Option<Error> {
    match status {
        StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => Some(Error::VersionConflict {
            path: path.to_string(),
        }),
        _ => None,
    }
}

/// Decode base64 file content as returned by the contents API, which wraps lines.
fn decode_content(content: &str) -> Result<String> {
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| Error::Decode(format!("invalid base64 content: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::Decode(format!("content is not UTF-8: {e}")))
}
