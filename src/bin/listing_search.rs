use std::sync::Arc;

use listing_search::db::{CatalogStore, InMemoryCatalog, RestCatalog};
use listing_search::http::serve;
use listing_search::{SearchEngine, SearchLimits, SearchTables, ServiceConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("listing_search=info".parse()?))
        .init();

    let config = ServiceConfig::load()?;
    let tables = Arc::new(SearchTables::load(config.tables_path.as_deref())?);

    let store: Arc<dyn CatalogStore> = match &config.fixtures_path {
        Some(path) => Arc::new(InMemoryCatalog::from_json_file(path)?),
        None => Arc::new(RestCatalog::from_config(&config)?),
    };
    info!("Using '{}' catalog", store.store_name());

    let engine = Arc::new(
        SearchEngine::new(store, tables, SearchLimits::from(&config))?
            .with_weights(config.score_weights),
    );
    serve(&config, engine).await?;

    Ok(())
}
