pub mod aggregate;
pub mod bitbucket;
pub mod bucket;
pub mod config;
pub mod dedup;
pub mod github;
pub mod histogram;
pub mod hosting;
pub mod model;
pub mod orchestrator;
pub mod readme_patch;
pub mod render;
