//! The primary hosting provider: the GitHub REST API.

mod client;
mod client_builder;
mod models;

pub use client::Client;
pub use client_builder::ClientBuilder;
