use clap::{crate_description, crate_version, ArgAction, Args, Parser, ValueEnum};
use url::Url;

use readme_stats::config::{
    DEFAULT_BITBUCKET_API_URL, DEFAULT_COMMIT_MESSAGE, DEFAULT_GITHUB_API_URL, DEFAULT_TIME_ZONE,
};
use readme_stats::readme_patch::DEFAULT_SECTION_KEY;

// -----------------------------------------------------------------------------
// command-line args
// -----------------------------------------------------------------------------
#[derive(Parser, Debug)]
#[command(
    author,   // retrieved from Cargo.toml `authors`
    version,  // retrieved from Cargo.toml `version`
    about,    // retrieved from Cargo.toml `description`

    long_version = concat!(
        crate_version!(),
    ),

    long_about = concat!(
        crate_description!(),
        "\n\n",
        "Commits are gathered from every branch of every private repository of the GitHub account ",
        "that owns the access token, and optionally from every Bitbucket repository the given ",
        "Bitbucket account can access. The rendered graphs replace the region between ",
        "`<!-- GITHUB STATS START -->` and `<!-- GITHUB STATS END -->` in the README of the ",
        "account's profile repository.",
    ),
)]
#[deny(missing_docs)]
/// Write commit activity graphs into a GitHub profile README
pub struct CommandLineArgs {
    #[command(flatten)]
    pub github: GitHubArgs,

    #[command(flatten)]
    pub bitbucket: BitbucketArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let mut s = Self::parse();

        // If `NO_COLOR` is set in the environment, disable colored output
        //
        // https://no-color.org/
        if std::env::var("NO_COLOR").is_ok() {
            s.global_args.color = Mode::Never
        }

        s
    }
}

// -----------------------------------------------------------------------------
// providers
// -----------------------------------------------------------------------------
#[derive(Args, Debug)]
#[command(next_help_heading = "GitHub Options")]
pub struct GitHubArgs {
    /// Personal access token of the GitHub account whose commits are counted
    ///
    /// The token needs read access to the account's private repositories and write access to the
    /// account's profile repository.
    #[arg(long, env = "GH_ACCESS_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_GITHUB_API_URL, value_name = "URL")]
    pub github_api_url: Url,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Bitbucket Options")]
pub struct BitbucketArgs {
    /// Bitbucket username
    ///
    /// Bitbucket commits are included only when both a username and a password are given.
    #[arg(long, env = "BITBUCKET_USERNAME", value_name = "NAME")]
    pub bitbucket_username: Option<String>,

    /// Bitbucket app password
    #[arg(long, env = "BITBUCKET_PASSWORD", hide_env_values = true, value_name = "PASSWORD")]
    pub bitbucket_password: Option<String>,

    /// Base URL of the Bitbucket REST API
    #[arg(long, default_value = DEFAULT_BITBUCKET_API_URL, value_name = "URL")]
    pub bitbucket_api_url: Url,
}

// -----------------------------------------------------------------------------
// output
// -----------------------------------------------------------------------------
#[derive(Args, Debug)]
#[command(next_help_heading = "Output Options")]
pub struct OutputArgs {
    /// IANA time zone in which commit times are bucketed
    #[arg(long, default_value = DEFAULT_TIME_ZONE, value_name = "ZONE")]
    pub time_zone: String,

    /// Key of the README marker comments delimiting the region to replace
    #[arg(long, default_value = DEFAULT_SECTION_KEY, value_name = "KEY")]
    pub section_key: String,

    /// Message of the commit that updates the README
    #[arg(long, default_value = DEFAULT_COMMIT_MESSAGE, value_name = "MESSAGE")]
    pub commit_message: String,

    /// Name recorded as committer and author of the README update
    #[arg(long, default_value = "readme-stats", value_name = "NAME")]
    pub committer_name: String,

    /// Email recorded as committer and author of the README update
    #[arg(long, default_value = "readme-stats@users.noreply.github.com", value_name = "EMAIL")]
    pub committer_email: String,

    /// Do not wrap the rendered graphs in `<pre>` tags
    #[arg(long)]
    pub no_pre: bool,

    /// Print the updated README to stdout instead of writing it back
    #[arg(long)]
    pub dry_run: bool,
}

// -----------------------------------------------------------------------------
// global options
// -----------------------------------------------------------------------------
#[derive(Args, Debug)]
#[command(next_help_heading = "Global Options")]
pub struct GlobalArgs {
    /// Enable verbose output
    ///
    /// This can be repeated up to 3 times to enable successively more output.
    #[arg(long, short, action=ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error feedback messages
    ///
    /// This silences warnings about recovered errors, such as a failing Bitbucket account.
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable or disable colored output
    ///
    /// When this is "auto", colors are enabled when stderr is a tty.
    ///
    /// If the `NO_COLOR` environment variable is set, it takes precedence and is equivalent to `--color=never`.
    #[arg(long, default_value_t=Mode::Auto, value_name="MODE")]
    pub color: Mode,
}

impl GlobalArgs {
    pub fn use_color(&self) -> bool {
        match self.color {
            Mode::Never => false,
            Mode::Always => true,
            Mode::Auto => console::user_attended_stderr(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Mode {
    Auto,
    Never,
    Always,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Auto => "auto",
            Mode::Never => "never",
            Mode::Always => "always",
        };
        write!(f, "{s}")
    }
}
