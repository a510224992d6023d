use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_lookup_server::{Config, HistoryStore, WeatherServer, WeatherService};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_lookup_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting weather lookup server");

    let config = Config::from_env()?;
    tracing::info!("API base URL: {}", config.api.base_url);

    let history = HistoryStore::new(config.history_path.clone());
    history.ensure_exists().await?;

    let weather = WeatherService::new(config.api)?;
    let server = WeatherServer::new(history, weather)
        .serve(rmcp::transport::stdio())
        .await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
