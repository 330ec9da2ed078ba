//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::tools::{Toolbox, CATALOG};
use crate::topdesk::TopdeskClient;
use crate::types::Backend;
use crate::zenya::ZenyaClient;
use serde_json::{json, Value};
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Tools => self.tools(),
            Commands::Call { tool, args } => self.call(tool, args.as_deref()).await,
            Commands::Check => self.check().await,
        }
    }

    /// Settings from the config file, or from the environment
    fn load_settings(&self) -> Result<Settings> {
        match &self.cli.config {
            Some(path) => Settings::from_file(path),
            None => Settings::from_env(),
        }
    }

    /// Print the catalog
    fn tools(&self) -> Result<()> {
        self.output_message(&serde_json::to_value(CATALOG)?)
    }

    /// Dispatch one tool
    async fn call(&self, tool: &str, args: Option<&str>) -> Result<()> {
        let args: Value = match args {
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| Error::invalid_argument("args", format!("invalid JSON: {e}")))?,
            None => json!({}),
        };

        let settings = self.load_settings()?;
        let toolbox = Toolbox::from_settings(&settings).await?;

        let result = toolbox.dispatch(tool, args).await;
        self.output_message(&result)
    }

    /// Check token acquisition for each configured backend
    async fn check(&self) -> Result<()> {
        let settings = self.load_settings()?;

        if settings.topdesk.is_none() && settings.zenya.is_none() {
            return Err(Error::config(
                "No backend configured (set TOPDESK_API_URL or ZENYA_API_URL, or pass -C)",
            ));
        }

        if let Some(config) = &settings.topdesk {
            let result = match TopdeskClient::new(config) {
                Ok(client) => client.login().await,
                Err(e) => Err(e),
            };
            self.output_status(Backend::Topdesk, result)?;
        }

        if let Some(config) = &settings.zenya {
            let result = match ZenyaClient::new(config) {
                Ok(client) => client.login().await,
                Err(e) => Err(e),
            };
            self.output_status(Backend::Zenya, result)?;
        }

        Ok(())
    }

    fn output_status(&self, backend: Backend, result: Result<()>) -> Result<()> {
        let message = match result {
            Ok(()) => {
                info!(%backend, "Connection check succeeded");
                json!({
                    "backend": backend.name(),
                    "status": "SUCCEEDED",
                    "message": "Token acquired"
                })
            }
            Err(e) => json!({
                "backend": backend.name(),
                "status": "FAILED",
                "message": format!("Connection failed: {e}")
            }),
        };
        self.output_message(&message)
    }

    /// Write one JSON document to stdout
    fn output_message(&self, msg: &Value) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(std::io::stdout().lock(), "{rendered}")?;
        Ok(())
    }
}
