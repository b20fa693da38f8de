use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use readme_stats::config::{self, Config, ReadmeConfig};
use readme_stats::hosting::HostingClient;
use readme_stats::model::CommitIdentity;
use readme_stats::orchestrator::{self, ReadmeOutcome, RunOutcome, SecondaryStatus};
use readme_stats::{bitbucket, github};

mod args;

/// Environment variable that overrides the log filter derived from `-q`/`-v`
const LOG_ENV_VAR: &str = "README_STATS_LOG";

fn configure_tracing(global_args: &args::GlobalArgs) -> Result<()> {
    use tracing_log::LogTracer;
    use tracing_subscriber::{filter::LevelFilter, EnvFilter};

    let level = if global_args.quiet {
        LevelFilter::ERROR
    } else {
        match global_args.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    LogTracer::init()?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env()
        .with_context(|| format!("Invalid {LOG_ENV_VAR} filter"))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(global_args.use_color())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Resolve the run configuration from the command line and environment.
fn build_config(args: &args::CommandLineArgs) -> Result<Config> {
    let github = config::github_config(
        args.github.github_api_url.clone(),
        args.github.github_token.clone(),
    )?;
    let bitbucket = config::bitbucket_config(
        args.bitbucket.bitbucket_api_url.clone(),
        args.bitbucket.bitbucket_username.clone(),
        args.bitbucket.bitbucket_password.clone(),
    );
    if bitbucket.is_none() {
        debug!("No Bitbucket credentials provided; counting GitHub commits only");
    }
    let time_zone = config::parse_time_zone(&args.output.time_zone)?;

    Ok(Config {
        github,
        bitbucket,
        time_zone,
        readme: ReadmeConfig {
            section_key: args.output.section_key.clone(),
            commit_message: args.output.commit_message.clone(),
            committer: CommitIdentity {
                name: args.output.committer_name.clone(),
                email: args.output.committer_email.clone(),
            },
            preformatted: !args.output.no_pre,
        },
        dry_run: args.output.dry_run,
    })
}

fn run(config: &Config) -> Result<RunOutcome> {
    let github = github::ClientBuilder::new(config.github.token.clone())
        .base_url(config.github.api_url.clone())?
        .build()
        .context("Failed to initialize GitHub client")?;

    let bitbucket = match &config.bitbucket {
        None => None,
        Some(bb) => Some(
            bitbucket::ClientBuilder::new(bb.username.clone(), bb.password.clone())
                .base_url(bb.api_url.clone())?
                .build()
                .context("Failed to initialize Bitbucket client")?,
        ),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to initialize async runtime")?;

    runtime.block_on(orchestrator::run(
        config,
        &github,
        bitbucket.as_ref().map(|c| c as &dyn HostingClient),
    ))
}

fn report(outcome: &RunOutcome) {
    match &outcome.secondary {
        SecondaryStatus::Skipped => {}
        SecondaryStatus::Included { commits } => {
            eprintln!("Included {commits} Bitbucket commits");
        }
        SecondaryStatus::Failed => {
            eprintln!("{}", style("Bitbucket commits were not included").yellow());
        }
    }

    match &outcome.readme {
        ReadmeOutcome::Written { .. } => println!("{}", style("Readme updated").green()),
        ReadmeOutcome::Unchanged { path } => println!("{path} is already up to date"),
        ReadmeOutcome::NoMarkers { path } => {
            println!("{}", style(format!("{path} has no stats region; nothing written")).yellow())
        }
        ReadmeOutcome::DryRun { text, .. } => print!("{text}"),
    }
}

fn try_main(args: &args::CommandLineArgs) -> Result<()> {
    let use_color = args.global_args.use_color();
    console::set_colors_enabled(use_color);
    console::set_colors_enabled_stderr(use_color);

    configure_tracing(&args.global_args).context("Failed to initialize logging")?;

    let config = build_config(args)?;
    let outcome = run(&config)?;
    report(&outcome);
    Ok(())
}

fn main() {
    let args = args::CommandLineArgs::parse_args();
    if let Err(e) = try_main(&args) {
        if args.global_args.verbose >= 2 {
            eprintln!("Error: {e:?}");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(2);
    }
}
