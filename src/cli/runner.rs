//! CLI runner - executes commands

use crate::browse::{PageBrowser, PageView};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{AppConfig, HttpSettings};
use crate::endpoint::{EndpointDescriptor, RequestExecutor, RequestState};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpTransport, Transport};
use crate::types::{JsonValue, Method};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
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
            Commands::Fetch {
                method,
                url,
                body,
                query,
                header,
            } => {
                let descriptor = build_descriptor(*method, url, body.as_deref(), query, header)?;
                self.fetch(descriptor).await
            }
            Commands::Browse { pages } => self.browse(*pages).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load the config file named with -C
    fn load_config(&self) -> Result<AppConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -C flag)"))?;
        AppConfig::from_file(path)
    }

    /// Transport from the config file, or a default one without it
    fn transport(&self, settings: Option<&HttpSettings>) -> Result<Arc<dyn Transport>> {
        let transport = match settings {
            Some(settings) => HttpTransport::with_config(settings.to_client_config()?)?,
            None => HttpTransport::new()?,
        };
        Ok(Arc::new(transport))
    }

    async fn fetch(&self, descriptor: EndpointDescriptor) -> Result<()> {
        let settings = match self.cli.config {
            Some(_) => Some(self.load_config()?.http),
            None => None,
        };
        let transport = self.transport(settings.as_ref())?;

        let mut executor = RequestExecutor::<JsonValue>::new(transport);
        executor.execute(descriptor);
        let state = executor.settled().await;

        match self.cli.format {
            OutputFormat::Json => print_json(&state)?,
            OutputFormat::Pretty => print_state(&state)?,
        }
        Ok(())
    }

    async fn browse(&self, pages: Option<usize>) -> Result<()> {
        let config = self.load_config()?;
        let transport = self.transport(Some(&config.http))?;
        let mut browser = PageBrowser::new(transport, config.source, config.columns);

        match pages {
            Some(limit) => {
                for _ in 0..limit {
                    let view = browser.load().await?;
                    self.show(&view)?;
                    if !browser.next_page() {
                        break;
                    }
                }
                Ok(())
            }
            None => self.interactive(&mut browser).await,
        }
    }

    async fn interactive(&self, browser: &mut PageBrowser) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let view = browser.load().await?;
        self.show(&view)?;

        while let Some(line) = lines.next_line().await? {
            let moved = match line.trim() {
                "n" | "next" => browser.next_page(),
                "p" | "prev" => browser.prev_page(),
                "s" | "sort" => {
                    browser.toggle_sort();
                    true
                }
                "q" | "quit" => break,
                "" => continue,
                other => {
                    eprintln!("Unknown command '{other}' (n = next, p = previous, s = sort, q = quit)");
                    continue;
                }
            };

            if !moved {
                eprintln!("No page in that direction");
                continue;
            }
            let view = browser.load().await?;
            self.show(&view)?;
        }

        debug!("Browse session ended");
        Ok(())
    }

    fn show(&self, view: &PageView) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => print_json(view),
            OutputFormat::Pretty => {
                println!("Page {}", view.index + 1);
                if view.state.is_failure() {
                    println!("Error {}: {}", view.state.status, view.state.message);
                } else {
                    print!("{}", view.table);
                }
                Ok(())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        info!(
            "Config is valid: {} with {} column(s)",
            config.source.endpoint,
            config.columns.len()
        );
        println!("OK");
        Ok(())
    }
}

/// Assemble a descriptor from `fetch` arguments
fn build_descriptor(
    method: Method,
    url: &str,
    body: Option<&str>,
    query: &[(String, String)],
    header: &[(String, String)],
) -> Result<EndpointDescriptor> {
    let mut descriptor = EndpointDescriptor::new(method, url);
    if let Some(body) = body {
        let body: JsonValue = serde_json::from_str(body).context("Invalid --body")?;
        descriptor = descriptor.json(body);
    }
    for (key, value) in query {
        descriptor = descriptor.query(key.as_str(), value.as_str());
    }
    for (key, value) in header {
        descriptor = descriptor.header(key.as_str(), value.as_str());
    }
    Ok(descriptor)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn print_state(state: &RequestState<JsonValue>) -> Result<()> {
    if state.is_failure() {
        println!("Error {}: {}", state.status, state.message);
        return Ok(());
    }
    println!("Status {}", state.status);
    if let Some(ref data) = state.data {
        println!("{}", serde_json::to_string_pretty(data)?);
    }
    Ok(())
}
