use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use reqwest::Client;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use appsearch::infrastructure::{
    AppConfig, CliArgs, FetchCoordinator, HttpResourceTransport, ItunesCatalogClient,
    MemoryResourceCache, StorageManager,
};
use appsearch::presentation::{App, Console};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = appsearch::VERSION, "Starting {}", appsearch::NAME);

    let client = Client::builder()
        .user_agent(config.network.user_agent.as_str())
        .timeout(config.network.timeout())
        .build()?;

    let cache = Arc::new(MemoryResourceCache::new(config.cache.capacity));
    let coordinator = Arc::new(FetchCoordinator::new(
        cache.clone(),
        Arc::new(HttpResourceTransport::with_client(client.clone())),
        config.network.max_concurrent_fetches,
    ));
    let catalog = Arc::new(ItunesCatalogClient::with_client(
        client,
        &config.catalog.base_url,
        &config.catalog.entity,
    ));

    let mut app = App::new(catalog, coordinator);
    let mut console = Console::new(std::io::stdout());

    let result = app
        .run(BufReader::new(tokio::io::stdin()), &mut console, args.query)
        .await;

    info!(stats = %cache.stats(), "Shutting down");

    Ok(result?)
}
