use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use roost::app::AppContext;
use roost::cli::{commands, Cli, Commands};
use roost::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    let ctx = AppContext::new(config, cli.token)?;

    let result = match cli.command {
        Commands::Listings => commands::list_listings(&ctx).await,
        Commands::Search { query } => commands::search(&ctx, &query).await,
        Commands::Show { id } => commands::show_listing(&ctx, &id).await,
        Commands::Favorites => commands::list_favorites(&ctx).await,
        Commands::Toggle { ids } => commands::toggle_favorites(&ctx, &ids).await,
    };

    if let Err(e) = &result {
        tracing::error!("{}", e);
    }
    result?;

    Ok(())
}
