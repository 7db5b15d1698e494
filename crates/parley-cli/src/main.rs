//! Parley terminal chat entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, sets up logging, then runs the chat plugin.

mod cli;

use anyhow::Context as _;
use clap::Parser;
use tracing::debug;

use parley_infra::config::config_path;
use parley_infra::filesystem::resolve_data_dir;
use parley_observe::tracing_setup::{init_tracing, verbosity_filter};

use cli::chat::session::ConfigBackendFactory;
use cli::plugin::{ChatPlugin, CommandPlugin};
use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir();
    let log_file = (!cli.log_stderr).then(|| data_dir.join("parley.log"));
    init_tracing(verbosity_filter(cli.verbose, cli.quiet), log_file.as_deref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")?;

    let config_file = cli.config.unwrap_or_else(|| config_path(&data_dir));
    debug!(config = %config_file.display(), "starting chat");

    let plugin = ChatPlugin::new(ConfigBackendFactory::new(config_file, cli.vendor, cli.model));
    plugin
        .run()
        .await
        .context("chat session failed")
}
