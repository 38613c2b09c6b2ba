use crate::prelude::*;
use clap::Parser;

mod config;
mod error;
mod limiter;
mod prelude;
mod providers;
mod search;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search Google Books and Open Library and print normalized book metadata"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "BOOKMETA_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Search a book-metadata provider by title
    Search(crate::search::SearchOptions),

    /// Show configured providers, endpoints and rate limits
    Providers(crate::config::ProvidersOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    let config = crate::config::from_env().wrap_err("Failed to load provider configuration")?;

    match app.command {
        SubCommands::Search(options) => crate::search::run(options, &config, app.global).await,
        SubCommands::Providers(options) => crate::config::run(options, &config),
    }
}
