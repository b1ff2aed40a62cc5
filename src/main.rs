mod actions;
mod build_info;
mod cli;
mod command;
mod config;
mod duration;
mod env;
mod error;
mod fs;
mod install;
mod plugin;
mod runner;
mod sources;
mod version;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::build_info::BuildInfo;
use crate::cli::Cli;
use crate::command::TERRAFORM_BIN;
use crate::fs::OsFs;
use crate::install::Installer;
use crate::plugin::Runtime;
use crate::runner::ProcessRunner;

/// Terraform release baked into the plugin image.
const DEFAULT_VERSION_ENV: &str = "PLUGIN_TERRAFORM_VERSION";

#[tokio::main]
async fn main() {
    let matches = sources::with_fallbacks(Cli::command(), &sources::System).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli::log_filter(&cli.log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run(cli).await {
        tracing::error!("{err:#}");
        let code = err.downcast_ref::<error::Error>().map_or(1, error::Error::exit_code);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    println!("{}", BuildInfo::new().to_pretty_json()?);

    tracing::info!(
        code = "https://github.com/go-vela/vela-terraform",
        docs = "https://go-vela.github.io/docs/plugins/registry/terraform",
        registry = "https://hub.docker.com/r/target/vela-terraform",
        "Vela Terraform Plugin"
    );

    let image_default = std::env::var(DEFAULT_VERSION_ENV).ok().filter(|v| !v.is_empty());
    let version = cli.resolve_version(image_default.as_deref())?;

    if let Some(requested) = cli.terraform_version.as_deref().filter(|v| !v.is_empty()) {
        Installer::new(&OsFs, TERRAFORM_BIN)
            .install(requested, image_default.as_deref().unwrap_or_default())
            .await?;
    }

    let mut plugin = cli.into_plugin(version);
    plugin.validate()?;

    let rt = Runtime {
        runner: &ProcessRunner,
        fs: &OsFs,
        netrc: config::netrc_path(),
        env: env::snapshot(),
    };
    plugin.exec(&rt).await?;
    Ok(())
}
