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
    username: String,
    password: SecretString,
}

impl ClientBuilder {
    const USER_AGENT: &'static str = "readme-stats";

    /// Create a new `ClientBuilder` that uses basic authentication against
    /// <https://api.bitbucket.org/2.0>.
    pub fn new(username: String, password: SecretString) -> Self {
        ClientBuilder {
            base_url: Url::parse("https://api.bitbucket.org/2.0/")
                .expect("default base URL should parse"),
            username,
            password,
        }
    }

    /// Use the specified base URL.
    pub fn base_url<T: IntoUrl>(mut self, url: T) -> Result<Self> {
        self.base_url = url.into_url()?;
        Ok(self)
    }

    pub fn build(self) -> Result<Client> {
        let inner = reqwest::ClientBuilder::new()
            .user_agent(Self::USER_AGENT)
            .build()?;
        Ok(Client {
            base_url: self.base_url,
            inner,
            username: self.username,
            password: self.password,
            identity: OnceLock::new(),
        })
    }
}
