use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use tracing::debug;
use weather_core::{Config, DisplayClient, ProxyClient, render::render_view};

/// Fetches quicker than this are shown without a separate loading frame.
const LOADING_NOTICE_AFTER: Duration = Duration::from_millis(150);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Proxy base URL; overrides the configured one.
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the proxy URL used by other commands.
    Configure,

    /// Show weather for a city once.
    Show {
        /// City name.
        city: String,
    },

    /// Prompt for cities repeatedly; Enter submits, Esc or Ctrl+C quits.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(self.server),
            Command::Show { city } => {
                let client = DisplayClient::new(proxy_client(self.server)?);
                print!("{}", submit(&client, &city).await);
                Ok(())
            }
            Command::Interactive => {
                let client = DisplayClient::new(proxy_client(self.server)?);
                interactive(&client).await
            }
        }
    }
}

fn proxy_client(server: Option<String>) -> anyhow::Result<ProxyClient> {
    let url = match server {
        Some(url) => url,
        None => Config::load()?.proxy_url_or_default().to_string(),
    };
    debug!(%url, "using weather proxy");
    Ok(ProxyClient::new(url))
}

fn configure(server: Option<String>) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let url = match server {
        Some(url) => url,
        None => Text::new("Weather proxy URL:")
            .with_default(cfg.proxy_url_or_default())
            .prompt()
            .context("Failed to read proxy URL")?,
    };

    cfg.set_proxy_url(url);
    cfg.save()?;

    println!(
        "Saved proxy URL {} to {}",
        cfg.proxy_url_or_default(),
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn interactive(client: &DisplayClient) -> anyhow::Result<()> {
    loop {
        let city = match Text::new("Enter city:").prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to read city"),
        };

        print!("{}", submit(client, &city).await);
        println!();
    }
}

/// Run one fetch for `city` and return the rendered result.
///
/// A loading frame is printed first when the proxy is slow to answer.
async fn submit(client: &DisplayClient, city: &str) -> String {
    client.set_city(city);

    let fetch = client.fetch_weather();
    tokio::pin!(fetch);

    if tokio::time::timeout(LOADING_NOTICE_AFTER, &mut fetch).await.is_err() {
        print!("{}", render_view(&client.snapshot(), &Local));
        fetch.await;
    }

    render_view(&client.snapshot(), &Local)
}
