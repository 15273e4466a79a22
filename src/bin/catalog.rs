//! Catalog service
//!
//! JSON API over an in-memory item catalog seeded at startup.

use evesg::config::CatalogConfig;
use evesg::server;
use evesg::state::Catalog;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();

    let config = CatalogConfig::from_env();
    info!("Configuration loaded: {:?}", config);

    let catalog = Catalog::seeded();
    info!("Catalog seeded with {} items", catalog.len());

    let app = server::catalog_router(catalog.into_shared(), config.item_lookup);
    server::serve(&config.server.addr(), app).await
}
