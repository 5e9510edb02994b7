use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use roster::auth::password;
use roster::config::{Config, StoreBackend};
use roster::store::{MemoryStore, PgStore, ProjectStore, UserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `roster hash-password <password>` prints a hash for ROSTER_AUTH_PASSWORD_HASH
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, pw] = args.as_slice() {
        if command == "hash-password" {
            println!("{}", password::hash(pw)?);
            return Ok(());
        }
    }

    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting roster");

    let (users, projects): (Arc<dyn UserStore>, Arc<dyn ProjectStore>) = match config.store {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL is required for the postgres store")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations applied");

            let store = Arc::new(PgStore::new(pool));
            (store.clone() as Arc<dyn UserStore>, store as Arc<dyn ProjectStore>)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            let store = Arc::new(MemoryStore::new());
            (store.clone() as Arc<dyn UserStore>, store as Arc<dyn ProjectStore>)
        }
    };

    let addr = SocketAddr::new(config.host, config.port);
    let app = roster::build_app(users, projects, config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
