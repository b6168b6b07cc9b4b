use std::sync::Arc;

use anyhow::Context;
use pixelpet_server::{
    create_app, spawn_decay_ticker, FileStore, ServerConfig, ServerState, TokenKeys, UserStore,
};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pixelpet_server=info".into()),
        )
        .with_target(false)
        .with_max_level(Level::INFO)
        .init();

    let config = ServerConfig::from_env().context("reading configuration")?;
    if config.uses_dev_secret() {
        log::warn!("PIXELPET_JWT_SECRET not set; using the built-in dev secret (dev only)");
    }

    let store: Arc<dyn UserStore> = Arc::new(
        FileStore::open(&config.data_dir)
            .with_context(|| format!("opening user store at {:?}", config.data_dir))?,
    );
    let tokens = TokenKeys::new(config.jwt_secret.as_bytes(), config.token_ttl);
    let state = ServerState::new(store.clone(), tokens);

    let ticker = spawn_decay_ticker(store, config.decay_interval);
    let app = create_app(state, config.static_dir.as_deref());

    let bind = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    log::info!(
        "pixelpet listening on {bind} (data {:?}, decay every {}s)",
        config.data_dir,
        config.decay_interval.as_secs()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("shutting down");
        })
        .await?;

    ticker.abort();
    Ok(())
}
