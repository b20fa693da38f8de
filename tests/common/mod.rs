//! Integration Test Utilities and Common Code

#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates::prelude::*;
pub use predicates::str::{contains, is_empty};
pub use std::process::Command;

/// Environment variables that would otherwise leak configuration into a test run
const CONFIG_ENV_VARS: &[&str] = &[
    "GH_ACCESS_TOKEN",
    "BITBUCKET_USERNAME",
    "BITBUCKET_PASSWORD",
    "README_STATS_LOG",
];

/// An API base URL on which nothing is listening
pub const UNREACHABLE_API_URL: &str = "http://127.0.0.1:1/";

/// Build a `Command` for the `readme-stats` crate binary with variadic command-line arguments.
///
/// The arguments can be anything that is allowed by `Command::arg`.
#[macro_export]
macro_rules! readme_stats {
    ( $( $arg:expr ),* ) => {
        {
            let mut cmd = readme_stats_cmd();
            $(
                cmd.arg($arg);
            )*
            cmd
        }
    }
}

/// Build an `assert_cmd::assert::Assert` by calling `readme_stats!(args).assert().success()`.
#[macro_export]
macro_rules! readme_stats_success {
    ( $( $arg:expr ),* ) => { readme_stats!($( $arg ),*).assert().success() }
}

/// Build an `assert_cmd::assert::Assert` by calling `readme_stats!(args).assert().failure()`.
#[macro_export]
macro_rules! readme_stats_failure {
    ( $( $arg:expr ),* ) => { readme_stats!($( $arg ),*).assert().failure() }
}

// make macros easily visible to other modules
pub use {readme_stats, readme_stats_failure, readme_stats_success};

/// Build a `Command` for the `readme-stats` binary with none of its configuration variables set.
pub fn readme_stats_cmd() -> Command {
    let mut cmd = Command::cargo_bin("readme-stats").expect("readme-stats should be available");
    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}
