use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod app;
mod auth;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rota_gateway=info,tower_http=debug".into()),
        )
        .init();

    // load config: explicit path via ROTA_CONFIG env > ~/.rota/rota.toml
    let config_path = std::env::var("ROTA_CONFIG").ok();
    let config = rota_core::RotaConfig::load(config_path.as_deref())?;

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let db = rusqlite::Connection::open(db_path)?;
    db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    rota_roster::db::init_db(&db)?;
    info!("database migrations complete");

    let store = Arc::new(rota_roster::ShiftStore::new(db));
    let engine = rota_roster::RosterEngine::new(Arc::clone(&store));
    let sessions = rota_sessions::SessionStore::new(config.auth.session_ttl_secs);

    let state = Arc::new(app::AppState::new(config, store, engine, sessions));
    let router = app::build_router(state.clone());

    // sweep expired sessions once a minute until shutdown
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    let state_for_sweep = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    state_for_sweep.sessions.purge_expired();
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    });

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("rota gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    // signal the sweep loop to stop
    let _ = shutdown_tx.send(true);
    Ok(())
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
