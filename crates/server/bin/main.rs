//! The todolist server binary.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

use query_engine_execution::store::TaskStore;
use todolist_server::routes;
use todolist_server::state::AppState;
use todolist_server::watcher::TaskEvents;

#[derive(Parser, Debug)]
#[command(name = "todolist", version, about = "Simple TODO list server")]
struct Args {
    /// Listen port for the HTTP API
    #[arg(long, default_value_t = 8080, env = "TODOLIST_PORT")]
    port: u16,

    /// Database host
    #[arg(long, env = "TODOLIST_DB_HOST")]
    db_host: String,

    /// Database port
    #[arg(long, default_value_t = 5432, env = "TODOLIST_DB_PORT")]
    db_port: u16,

    /// Database user
    #[arg(long, env = "TODOLIST_DB_USER")]
    db_user: String,

    /// Database password
    #[arg(long, default_value = "", env = "TODOLIST_DB_PASSWORD")]
    db_password: String,

    /// Database name
    #[arg(long, env = "TODOLIST_DB_NAME")]
    db_name: String,

    /// Require SSL on the database connection
    #[arg(long, env = "TODOLIST_DB_SSL")]
    db_ssl: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", env = "TODOLIST_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!(
        host = %args.db_host,
        port = args.db_port,
        database = %args.db_name,
        "connecting to database"
    );
    let options = PgConnectOptions::new()
        .host(&args.db_host)
        .port(args.db_port)
        .username(&args.db_user)
        .password(&args.db_password)
        .database(&args.db_name)
        .ssl_mode(if args.db_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        });
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    let store = TaskStore::new(pool);
    store
        .ensure_schema()
        .await
        .context("failed to prepare database schema")?;

    let state = AppState {
        store,
        events: TaskEvents::new(),
    };
    let app = routes::router(state);

    let address = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!(%address, "starting HTTP server");
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("server stopped");
    Ok(())
}

fn init_logging(level: &str) {
    let directives = format!(
        "todolist={level},todolist_server={level},query_engine_translation={level},query_engine_execution={level}"
    );
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
