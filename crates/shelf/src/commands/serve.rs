//! `shelf serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use shelf_config::{CliSettings, Config};
use shelf_server::{run_server, server_config_from_shelf_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover shelf.toml).
    #[arg(short, long, env = "SHELF_CONFIG")]
    config: Option<PathBuf>,

    /// Corpus JSON file (overrides config).
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Public base URL used in links instead of the request Host header.
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose output (request and corpus logs).
    #[arg(long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            base_url: self.base_url,
            corpus_path: self.corpus,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Corpus: {}",
            config.corpus_resolved.path.display()
        ));
        if let Some(base_url) = &config.server.base_url {
            output.info(&format!("Base URL: {base_url}"));
        }

        let server_config = server_config_from_shelf_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
