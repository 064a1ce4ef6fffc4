//! sheltermap - resolve homeless-shelter directory records to map coordinates

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod directory;
mod error;
mod models;
mod output;
mod resolver;

use cli::args::GlobalOptions;
use cli::{CacheCommands, Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `warn` by default, `debug` with --debug; RUST_LOG wins over both.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts).await,
        Commands::Version => {
            println!("sheltermap version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Shelters => cli::shelters::run(&opts).await,
        Commands::Resolve { refresh } => cli::resolve::run(&opts, refresh).await,
        Commands::Geocode { address, refresh } => {
            cli::geocode::run(&opts, &address, refresh).await
        }
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(&opts),
            CacheCommands::List => cli::cache::list(&opts),
            CacheCommands::Clear => cli::cache::clear(&opts),
            CacheCommands::Path => cli::cache::path(&opts),
            CacheCommands::Prune => cli::cache::prune(&opts).await,
        },
        Commands::Completion { shell } => cli::completions::run(shell),
    }
}
