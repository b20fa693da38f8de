//! The configuration of a run, built once at process start.

use chrono_tz::Tz;
use secrecy::SecretString;
use url::Url;

use crate::model::CommitIdentity;
use crate::readme_patch::DEFAULT_SECTION_KEY;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com/";
pub const DEFAULT_BITBUCKET_API_URL: &str = "https://api.bitbucket.org/2.0/";
pub const DEFAULT_TIME_ZONE: &str = "Pacific/Auckland";
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: Added README.md programatically";

// -------------------------------------------------------------------------------------------------
// Config
// -------------------------------------------------------------------------------------------------
pub struct Config {
    pub github: GitHubConfig,

    /// Present only when both Bitbucket credentials were supplied
    pub bitbucket: Option<BitbucketConfig>,

    /// The zone in which commit times are bucketed, regardless of provider
    pub time_zone: Tz,

    pub readme: ReadmeConfig,

    /// Render and patch, but do not write the README back
    pub dry_run: bool,
}

pub struct GitHubConfig {
    pub api_url: Url,
    pub token: SecretString,
}

pub struct BitbucketConfig {
    pub api_url: Url,
    pub username: String,
    pub password: SecretString,
}

pub struct ReadmeConfig {
    pub section_key: String,
    pub commit_message: String,

    /// Recorded as both committer and author of the README update
    pub committer: CommitIdentity,

    /// Wrap each rendered graph in `<pre>`
    pub preformatted: bool,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        ReadmeConfig {
            section_key: DEFAULT_SECTION_KEY.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            committer: CommitIdentity {
                name: "readme-stats".to_string(),
                email: "readme-stats@users.noreply.github.com".to_string(),
            },
            preformatted: true,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// ConfigError
// -------------------------------------------------------------------------------------------------
#[derive(Debug)]
pub enum ConfigError {
    MissingGitHubToken,
    UnknownTimeZone(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingGitHubToken => write!(f, "Auth Token not provided"),
            ConfigError::UnknownTimeZone(name) => write!(f, "unknown time zone {name:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolve the secondary provider's settings: enabled only when both credentials are given.
pub fn bitbucket_config(
    api_url: Url,
    username: Option<String>,
    password: Option<String>,
) -> Option<BitbucketConfig> {
    match (username, password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Some(BitbucketConfig {
                api_url,
                username,
                password: SecretString::from(password),
            })
        }
        _ => None,
    }
}

/// Require the primary provider's token.
pub fn github_config(api_url: Url, token: Option<String>) -> Result<GitHubConfig, ConfigError> {
    match token {
        Some(token) if !token.is_empty() => Ok(GitHubConfig {
            api_url,
            token: SecretString::from(token),
        }),
        _ => Err(ConfigError::MissingGitHubToken),
    }
}

pub fn parse_time_zone(name: &str) -> Result<Tz, ConfigError> {
    name.parse()
        .map_err(|_| ConfigError::UnknownTimeZone(name.to_string()))
}
