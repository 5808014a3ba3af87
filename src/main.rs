//! Deactivate a pending ACME authorization.
//!
//! Silent on success. On failure prints a single line and exits non-zero; an authorization
//! that stays pending counts as a failure.

use std::process::ExitCode;

use acmecancel::{Deactivator, Directory, DirectoryUrl};
use clap::Parser;
use eyre::WrapErr as _;

#[derive(Parser, Debug)]
#[command(name = "acmecancel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Authorization URL to deactivate
    url: String,

    /// Use the Let's Encrypt staging server
    #[arg(long = "staging")]
    staging: bool,

    /// Custom ACME directory URL (overrides --staging)
    #[arg(long = "directory", value_name = "URL")]
    directory: Option<String>,

    /// Let's Encrypt registration key (JSON with X, Y and D)
    #[arg(long = "key", env = "LE_KEY", hide_env_values = true)]
    key: String,

    /// Account URL; when set requests are signed with it instead of the embedded public key
    #[arg(long = "account-url", env = "LE_ACCOUNT_URL")]
    account_url: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Cli {
    fn directory_url(&self) -> DirectoryUrl {
        match &self.directory {
            Some(url) => DirectoryUrl::Other(url.clone()),
            None => DirectoryUrl::letsencrypt(self.staging),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("acmecancel: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> eyre::Result<()> {
    let dir = Directory::new(cli.directory_url())?;
    log::debug!("Using directory {}", dir.url().to_url());

    let mut deactivator = Deactivator::new(&cli.key, dir)
        .wrap_err("could not parse Let's Encrypt registration key")?;

    if let Some(account_url) = cli.account_url {
        deactivator = deactivator.with_key_id(account_url);
    }

    let status = deactivator
        .deactivate(&cli.url)
        .await
        .and_then(|outcome| outcome.into_result())
        .wrap_err("could not disable authz")?;

    log::info!("Authorization {} now reports {status:?}", cli.url);

    Ok(())
}
