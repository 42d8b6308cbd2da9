use anyhow::Context;
use std::sync::Arc;

use goldcatalog::api::{self, AppState};
use goldcatalog::catalog::JsonFileCatalog;
use goldcatalog::config::AppConfig;
use goldcatalog::logging;
use goldcatalog::oracle::PriceOracle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::init(config.logging.json);
    config.validate()?;

    tracing::info!(
        config = %config,
        "Starting GoldCatalog v{}",
        env!("CARGO_PKG_VERSION")
    );

    let oracle =
        PriceOracle::from_config(&config.oracle).context("Failed to build gold feed client")?;
    let catalog = JsonFileCatalog::new(&config.catalog.path);

    let state = AppState::new(Arc::new(oracle), Arc::new(catalog));
    api::start_server(state, &config.server, &config.cors).await
}
