//! Lingua Server

mod args;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use args::Args;
use lingua_server::db;
use lingua_server::session::{Gateways, SessionController};
use lingua_server::speech::GoogleSpeechClient;
use lingua_server::translation::GeminiTranslator;
use lingua_server::web::{self, AppState};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(args.debug);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "linguad starting");

    // Setup database
    let database = setup_db(args.database.clone()).await;

    // Setup external service gateways
    let gateways = setup_gateways(&args);
    let state = AppState::new(SessionController::new(&database, gateways));

    // Setup network
    let addr = SocketAddr::new(args.bind, args.port);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "listening");

    if let Err(e) = web::serve(listener, state, shutdown_signal()).await {
        tracing::error!(error = %e, "server error");
    }

    database.close().await;
    tracing::info!("linguad stopped");
}

/// Install the global subscriber; `RUST_LOG` overrides `--debug`
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Set secure permissions on a file (Unix only)
#[cfg(unix)]
fn set_secure_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(0o600);
    std::fs::set_permissions(path, permissions)
}

/// Setup database connection and run migrations
async fn setup_db(database_path: Option<PathBuf>) -> db::Database {
    // Determine database path (use provided path or platform default)
    let db_path = database_path.unwrap_or_else(|| match db::default_database_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::error!(error = %e, "cannot determine data directory");
            std::process::exit(1);
        }
    });

    let pool = match db::init_db(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(path = %db_path.display(), error = %e, "database initialization failed");
            std::process::exit(1);
        }
    };
    tracing::info!(path = %db_path.display(), "database ready");

    #[cfg(unix)]
    if let Err(e) = set_secure_permissions(&db_path) {
        tracing::error!(path = %db_path.display(), error = %e, "failed to set database permissions");
        std::process::exit(1);
    }

    db::Database::new(pool)
}

/// Build the translation and speech clients from configuration
fn setup_gateways(args: &Args) -> Gateways {
    let translator = match GeminiTranslator::new(args.translator_config()) {
        Ok(translator) => translator,
        Err(e) => {
            tracing::error!(error = %e, "failed to create translation client");
            std::process::exit(1);
        }
    };
    let speech = match GoogleSpeechClient::new(args.speech_config()) {
        Ok(speech) => Arc::new(speech),
        Err(e) => {
            tracing::error!(error = %e, "failed to create speech client");
            std::process::exit(1);
        }
    };

    Gateways {
        translator: Arc::new(translator),
        recognizer: speech.clone(),
        synthesizer: speech,
    }
}

/// Resolves on Ctrl-C (or SIGTERM on Unix)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => tracing::warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
