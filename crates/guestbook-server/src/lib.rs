//! HTTP server for the guestbook.
//!
//! This crate provides a native Rust HTTP server using axum, serving
//! server-rendered HTML pages:
//!
//! | Method | Path | Page |
//! |---|---|---|
//! | GET | `/` | Home page, counts a visit |
//! | GET | `/stats` | Visits per address |
//! | GET | `/fom` | Sign-up form |
//! | GET, POST | `/add` | Add a guest (`name` from the query or form body) |
//! | GET | `/list` | Guest list with delete links |
//! | GET | `/delete` | Delete a guest by `id` |
//! | GET | `/clear` | Empty the guest list |
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use guestbook_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         data_dir: PathBuf::from("data"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (guestbook-server)
//!                        │
//!                        ├─► handlers ──► render (HTML shell + escaping)
//!                        │       │
//!                        │       └─► spawn_blocking ──► GuestBook / Ledger (guestbook-core)
//!                        │                                   │
//!                        │                                   └─► DocumentStore (guestbook-storage)
//!                        │
//!                        └─► middleware (headers, trace, panic recovery)
//! ```

mod app;
mod client_addr;
mod error;
mod handlers;
mod middleware;
mod params;
mod render;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use guestbook_storage::FsStorage;

pub use app::create_router;
pub use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the JSON documents.
    pub data_dir: PathBuf,
    /// Guest list document name.
    pub guests_file: String,
    /// Visit ledger document name.
    pub visits_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            data_dir: PathBuf::from("."),
            guests_file: "guests.json".to_owned(),
            visits_file: "visits.json".to_owned(),
        }
    }
}

/// Run the server.
///
/// Creates missing documents, then serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the documents can't be initialized or the server
/// fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Arc::new(FsStorage::new(config.data_dir.clone()));
    let state = AppState::from_storage(storage, &config.guests_file, &config.visits_file);
    state.init()?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from guestbook config.
#[must_use]
pub fn server_config_from_config(config: &guestbook_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.storage_resolved.data_dir.clone(),
        guests_file: config.storage_resolved.guests_file.clone(),
        visits_file: config.storage_resolved.visits_file.clone(),
    }
}
