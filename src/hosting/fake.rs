//! An in-memory hosting provider for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

use super::{Error, FileUpdate, HostingClient, ReadmeStore, Result, MAX_PAGES};
use crate::model::{Branch, Commit, Identity, ReadmeDocument, Repository};

pub enum Listing {
    Commits(Vec<Commit>),
    Fails,
    Overruns,
}

pub struct FakeRepo {
    repo: Repository,
    branches: Option<Vec<(Branch, Listing)>>,
}

pub struct FakeClient {
    identity: Option<Identity>,
    repos: Option<Vec<FakeRepo>>,
    readme: Mutex<ReadmeDocument>,
    conflict_on_write: bool,
    pub writes: Mutex<Vec<(String, String)>>,
    pub requests: Mutex<Vec<String>>,
}

pub fn commit(id: &str, timestamp: &str) -> Commit {
    Commit {
        id: id.to_string(),
        committer_timestamp: DateTime::parse_from_rfc3339(timestamp)
            .unwrap()
            .with_timezone(&Utc),
        author: None,
    }
}

fn simulated() -> Error {
    Error::Decode("simulated failure".to_string())
}

impl FakeClient {
    pub fn new(login: &str) -> Self {
        FakeClient {
            identity: Some(Identity {
                login: login.to_string(),
                id: format!("{{{login}}}"),
            }),
            repos: Some(Vec::new()),
            readme: Mutex::new(ReadmeDocument {
                path: "README.md".to_string(),
                raw_text: String::new(),
                version_token: "v1".to_string(),
            }),
            conflict_on_write: false,
            writes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_auth(mut self) -> Self {
        self.identity = None;
        self
    }

    pub fn failing_repo_listing(mut self) -> Self {
        self.repos = None;
        self
    }

    pub fn with_repo(mut self, name: &str, branches: Vec<(&str, Listing)>) -> Self {
        let owner = self.login();
        let repo = FakeRepo {
            repo: Repository {
                name: name.to_string(),
                owner,
                opaque_id: name.to_string(),
            },
            branches: Some(
                branches
                    .into_iter()
                    .map(|(b, l)| (Branch { name: b.to_string() }, l))
                    .collect(),
            ),
        };
        self.repos.get_or_insert_with(Vec::new).push(repo);
        self
    }

    pub fn with_branchless_repo(mut self, name: &str) -> Self {
        let owner = self.login();
        self.repos.get_or_insert_with(Vec::new).push(FakeRepo {
            repo: Repository {
                name: name.to_string(),
                owner,
                opaque_id: name.to_string(),
            },
            branches: None,
        });
        self
    }

    pub fn with_readme(self, text: &str) -> Self {
        self.readme.lock().unwrap().raw_text = text.to_string();
        self
    }

    pub fn conflicting_writes(mut self) -> Self {
        self.conflict_on_write = true;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn login(&self) -> String {
        self.identity
            .as_ref()
            .map(|i| i.login.clone())
            .unwrap_or_default()
    }

    fn log(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }

    fn find(&self, repo: &Repository) -> Option<&FakeRepo> {
        self.repos.as_ref()?.iter().find(|r| r.repo == *repo)
    }
}

#[async_trait]
impl HostingClient for FakeClient {
    fn provider_name(&self) -> &'static str {
        "Fake"
    }

    async fn authenticate(&self) -> Result<Identity> {
        self.log("authenticate".to_string());
        self.identity.clone().ok_or_else(simulated)
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        self.log("list_repositories".to_string());
        let repos = self.repos.as_ref().ok_or_else(simulated)?;
        Ok(repos.iter().map(|r| r.repo.clone()).collect())
    }

    async fn list_branches(&self, repo: &Repository) -> Result<Vec<Branch>> {
        self.log(format!("list_branches {}", repo.name));
        let branches = self
            .find(repo)
            .and_then(|r| r.branches.as_ref())
            .ok_or_else(simulated)?;
        Ok(branches.iter().map(|(b, _)| b.clone()).collect())
    }

    async fn list_commits(&self, repo: &Repository, branch: &Branch) -> Result<Vec<Commit>> {
        self.log(format!("list_commits {} {}", repo.name, branch.name));
        let listing = self
            .find(repo)
            .and_then(|r| r.branches.as_ref())
            .and_then(|bs| bs.iter().find(|(b, _)| b == branch))
            .map(|(_, l)| l)
            .ok_or_else(simulated)?;
        match listing {
            Listing::Commits(commits) => Ok(commits.clone()),
            Listing::Fails => Err(simulated()),
            Listing::Overruns => Err(Error::PaginationOverrun { max_pages: MAX_PAGES }),
        }
    }
}

#[async_trait]
impl ReadmeStore for FakeClient {
    async fn read_readme(&self, owner: &str, repo: &str) -> Result<ReadmeDocument> {
        self.log(format!("read_readme {owner}/{repo}"));
        Ok(self.readme.lock().unwrap().clone())
    }

    async fn write_file(&self, update: &FileUpdate<'_>) -> Result<()> {
        self.log(format!("write_file {}/{} {}", update.owner, update.repo, update.path));
        let mut readme = self.readme.lock().unwrap();
        if self.conflict_on_write || update.version_token != readme.version_token {
            return Err(Error::VersionConflict {
                path: update.path.to_string(),
            });
        }
        readme.raw_text = update.content.to_string();
        readme.version_token = format!("{}+", readme.version_token);
        self.writes
            .lock()
            .unwrap()
            .push((update.path.to_string(), update.content.to_string()));
        Ok(())
    }
}
