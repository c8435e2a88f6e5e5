//! `guestbook serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use guestbook_config::{CliSettings, Config};
use guestbook_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover guestbook.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "GUESTBOOK_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "GUESTBOOK_PORT")]
    port: Option<u16>,

    /// Directory holding the guest list and visit ledger (overrides config).
    #[arg(short, long, env = "GUESTBOOK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose output (request and storage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!(
            "Guestbook on http://{}:{}",
            config.server.host, config.server.port
        ));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config file: {}", path.display()));
        }
        output.info(&format!(
            "Guest list: {}",
            config.storage_resolved.guests_path().display()
        ));
        output.info(&format!(
            "Visit ledger: {}",
            config.storage_resolved.visits_path().display()
        ));

        run_server(server_config_from_config(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Collect overrides from the command line.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            data_dir: self.data_dir.clone(),
        }
    }
}
