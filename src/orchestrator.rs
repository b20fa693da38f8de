//! Running the whole job: aggregate, render, patch, and write back.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::histogram::CommitHistograms;
use crate::hosting::{self, FileUpdate, HostingClient, ReadmeStore};
use crate::readme_patch::MarkerRegion;
use crate::render::render_readme_section;

// -------------------------------------------------------------------------------------------------
// Stage
// -------------------------------------------------------------------------------------------------
/// The steps of a run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AuthenticatePrimary,
    AggregatePrimary,
    AuthenticateSecondary,
    AggregateSecondary,
    Render,
    FetchReadme,
    Patch,
    WriteReadme,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::AuthenticatePrimary => "authenticate primary",
            Stage::AggregatePrimary => "aggregate primary",
            Stage::AuthenticateSecondary => "authenticate secondary",
            Stage::AggregateSecondary => "aggregate secondary",
            Stage::Render => "render",
            Stage::FetchReadme => "fetch README",
            Stage::Patch => "patch",
            Stage::WriteReadme => "write README",
        };
        f.write_str(s)
    }
}

fn enter(stage: Stage) {
    debug!("Stage: {stage}");
}

// -------------------------------------------------------------------------------------------------
// RunOutcome
// -------------------------------------------------------------------------------------------------
#[derive(Debug)]
pub struct RunOutcome {
    /// The combined histograms of all providers that contributed
    pub histograms: CommitHistograms,
    pub secondary: SecondaryStatus,
    pub readme: ReadmeOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecondaryStatus {
    /// No secondary provider was configured
    Skipped,

    /// The secondary provider contributed this many commits
    Included { commits: u64 },

    /// The secondary provider failed; only primary data was used
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeOutcome {
    /// The patched README was written back
    Written { path: String },

    /// The README has no marker region, so there was nothing to patch
    NoMarkers { path: String },

    /// Patching produced the README's current text, so nothing was written
    Unchanged { path: String },

    /// The patched README text, not written because of a dry run
    DryRun { path: String, text: String },
}

/// Run the job against the given providers.
///
/// The README is read from and written to the primary provider's profile repository, i.e., the
/// repository named after the authenticated account. The write is conditional on the README not
/// having changed since it was read; a conflicting change fails the run and is not retried.
///
/// Secondary provider failures of any kind are logged and the run continues with primary data only.
pub async fn run<P>(
    config: &Config,
    primary: &P,
    secondary: Option<&dyn HostingClient>,
) -> Result<RunOutcome>
where
    P: HostingClient + ReadmeStore,
{
    let provider = primary.provider_name();

    enter(Stage::AuthenticatePrimary);
    let me = primary
        .authenticate()
        .await
        .with_context(|| format!("Failed to authenticate to {provider}"))?;
    info!("Authenticated to {provider} as {}", me.login);

    enter(Stage::AggregatePrimary);
    let mut histograms = aggregate(primary, &config.time_zone)
        .await
        .with_context(|| format!("Failed to collect {provider} commits"))?;

    let secondary = match secondary {
        None => SecondaryStatus::Skipped,
        Some(client) => match aggregate_secondary(client, &config.time_zone).await {
            Ok(contribution) => {
                histograms.merge(&contribution);
                SecondaryStatus::Included {
                    commits: contribution.total(),
                }
            }
            Err(e) => {
                warn!("Failed to get {} commits: {e}", client.provider_name());
                SecondaryStatus::Failed
            }
        },
    };
    info!("Counted {} commits in total", histograms.total());

    enter(Stage::Render);
    let content = render_readme_section(&histograms, config.readme.preformatted);

    enter(Stage::FetchReadme);
    let readme = primary
        .read_readme(&me.login, &me.login)
        .await
        .with_context(|| format!("Failed to read README of {0}/{0}", me.login))?;

    enter(Stage::Patch);
    let region = MarkerRegion::new(&config.readme.section_key)
        .with_context(|| format!("Invalid section key {:?}", config.readme.section_key))?;
    let path = readme.path.clone();
    let outcome = if !region.is_present(&readme.raw_text) {
        warn!("{path} has no {:?} marker region; nothing to update", region.key());
        ReadmeOutcome::NoMarkers { path }
    } else {
        let patched = region.patch(&readme.raw_text, &content);
        if patched == readme.raw_text {
            info!("{path} is already up to date");
            ReadmeOutcome::Unchanged { path }
        } else if config.dry_run {
            ReadmeOutcome::DryRun {
                path,
                text: patched.into_owned(),
            }
        } else {
            enter(Stage::WriteReadme);
            primary
                .write_file(&FileUpdate {
                    owner: &me.login,
                    repo: &me.login,
                    path: &path,
                    content: &patched,
                    version_token: &readme.version_token,
                    message: &config.readme.commit_message,
                    committer: &config.readme.committer,
                })
                .await
                .with_context(|| format!("Failed to write {path}"))?;
            ReadmeOutcome::Written { path }
        }
    };

    Ok(RunOutcome {
        histograms,
        secondary,
        readme: outcome,
    })
}

/// Authenticate to and aggregate the secondary provider.
async fn aggregate_secondary(
    client: &dyn HostingClient,
    tz: &chrono_tz::Tz,
) -> hosting::Result<CommitHistograms> {
    enter(Stage::AuthenticateSecondary);
    let me = client.authenticate().await?;
    info!("Authenticated to {} as {}", client.provider_name(), me.login);

    enter(Stage::AggregateSecondary);
    aggregate(client, tz).await
}
