//! Wiki service
//!
//! Serves `/view/:name`, `/edit/:name` and `/save/:name` over `<name>.txt`
//! files in the data directory.

use evesg::config::WikiConfig;
use evesg::server;
use evesg::services::PageStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();

    let config = WikiConfig::from_env();
    info!("Configuration loaded: {:?}", config);

    let pages = Arc::new(PageStore::new(config.data_dir.clone()));
    info!("Serving pages from {}", pages.root().display());

    let app = server::wiki_router(pages);
    server::serve(&config.server.addr(), app).await
}
