pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use clap::Parser;
use cli::console::Console;
use cli::{Cli, Commands, Session};
pub use config::Config;
use db::ConnectionManager;
use services::{SeaOrmCatalogService, SeaOrmSearchLogService};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        return cli::cmd_init(cli.config.as_deref());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    config.validate()?;

    init_tracing(&config.general.log_level);

    match cli.command {
        Some(Commands::Config) => cli::cmd_show_config(&config),
        Some(Commands::Init) | None => run_interactive(&config).await,
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout belongs to the interactive UI
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

async fn run_interactive(config: &Config) -> anyhow::Result<()> {
    let catalog = SeaOrmCatalogService::new(ConnectionManager::catalog(&config.catalog));
    let search_log =
        SeaOrmSearchLogService::new(ConnectionManager::search_log(&config.search_log));

    let console = Console::new(std::io::stdin().lock(), std::io::stdout());
    let mut session = Session::new(&catalog, &search_log, config.general.page_size, console);

    cli::cmd_interactive(&mut session).await
}
