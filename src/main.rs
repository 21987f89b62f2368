use std::net::SocketAddr;

use anyhow::Context;
use tower_http::trace::TraceLayer;

use activity_hub::{
    auth::bootstrap::build_providers,
    config::AppConfig,
    db::connection,
    logging::init_tracing,
    page_cache::PageCache,
    routes::app,
    services::{ServiceContext, pokedex_service::PokedexClient},
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.logging);

    let db = connection::connect(&cfg.database).await?;
    let pages = PageCache::new();
    let services = ServiceContext::with_pages(&db, pages.clone());
    let providers = build_providers(cfg.auth()?, &services)?;
    let pokedex = PokedexClient::new(&cfg.pokedex)?;

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .context("invalid host/port")?;

    let state = AppState::new(cfg, db, providers, pages, pokedex);
    let app = app(state).layer(TraceLayer::new_for_http());

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
