//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::collection::IteratorOptions;
use crate::config::{load_settings, ClientSettings};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::object::Object;
use futures::StreamExt;
use tracing::{debug, info};

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
            Commands::List {
                path,
                limit,
                batch_size,
                cursor,
                params,
                blocking,
            } => {
                let mut options = IteratorOptions::new().batch_size(*batch_size);
                options.limit = *limit;
                options.cursor = cursor.clone();
                options.params = params.iter().cloned().collect();

                self.list(path, options, *blocking).await
            }
        }
    }

    /// Resolve client settings from the settings file and flags
    fn settings(&self) -> Result<ClientSettings> {
        let mut settings = match (&self.cli.settings, &self.cli.base_url) {
            (Some(path), _) => load_settings(path)?,
            (None, Some(base_url)) => ClientSettings::new(base_url.clone()),
            (None, None) => {
                return Err(Error::config(
                    "No API location given (use --settings or --base-url)",
                ))
            }
        };

        if let Some(base_url) = &self.cli.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(api_key) = &self.cli.api_key {
            settings.api_key = Some(api_key.clone());
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Print every object of a collection, then report the resumption cursor
    async fn list(&self, path: &str, options: IteratorOptions, blocking: bool) -> Result<()> {
        let client = HttpClient::with_config(self.settings()?.into_http_config())?;
        let format = self.cli.format;
        debug!("Listing {} with {:?}", path, options);

        let cursor = if blocking {
            let path = path.to_string();
            tokio::task::spawn_blocking(move || list_blocking(&client, &path, options, format))
                .await
                .map_err(|e| Error::Other(format!("Blocking listing task failed: {e}")))??
        } else {
            let mut it = client.iterator(path, options)?;
            {
                let stream = it.stream();
                futures::pin_mut!(stream);
                while let Some(obj) = stream.next().await {
                    print_object(&obj?, format)?;
                }
            }
            it.cursor()
        };

        match cursor {
            Some(cursor) => info!("Resume with --cursor {cursor}"),
            None => info!("No resumption cursor available"),
        }
        Ok(())
    }
}

/// Drive the blocking iterator; must run off the async runtime
fn list_blocking(
    client: &HttpClient,
    path: &str,
    options: IteratorOptions,
    format: OutputFormat,
) -> Result<Option<String>> {
    let mut it = client.iterator(path, options)?;
    for obj in it.by_ref() {
        print_object(&obj?, format)?;
    }
    Ok(it.cursor())
}

fn print_object(obj: &Object, format: OutputFormat) -> Result<()> {
    let line = match format {
        OutputFormat::Json => serde_json::to_string(obj)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(obj)?,
    };
    println!("{line}");
    Ok(())
}
