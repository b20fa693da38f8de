//! The secondary hosting provider: the Bitbucket Cloud REST API.
//!
//! Bitbucket has no notion of "my commits", so commit listings are filtered down to those authored
//! by the authenticated account.

mod client;
mod client_builder;
mod models;

pub use client::Client;
pub use client_builder::ClientBuilder;
