use reqwest::{IntoUrl, Url};
use secrecy::SecretString;
use std::sync::OnceLock;

use super::Client;
use crate::hosting::Result;

// -------------------------------------------------------------------------------------------------
// ClientBuilder
// -------------------------------------------------------------------------------------------------
pub struct ClientBuilder {
    base_url: reqwest::Url,
    token: SecretString,
}

impl ClientBuilder {
    /// The user agent string sent when accessing the GitHub REST API
    const USER_AGENT: &'static str = "readme-stats";

    /// Create a new `ClientBuilder` that authenticates to <https://api.github.com> with the given
    /// personal access token.
    pub fn new(token: SecretString) -> Self {
        ClientBuilder {
            base_url: Url::parse("https://api.github.com").expect("default base URL should parse"),
            token,
        }
    }

    /// Use the specified base URL.
    pub fn base_url<T: IntoUrl>(mut self, url: T) -> Result<Self> {
        self.base_url = url.into_url()?;
        Ok(self)
    }

    /// Build a `Client` from this `ClientBuilder`.
    pub fn build(self) -> Result<Client> {
        let inner = reqwest::ClientBuilder::new()
            .user_agent(Self::USER_AGENT)
            .build()?;
        Ok(Client {
            base_url: self.base_url,
            inner,
            token: self.token,
            identity: OnceLock::new(),
        })
    }
}
