pub mod storage;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::BlogConfig;

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "agility-blog")]
#[command(about = "Render a blog page from Agility CMS posts")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "AGILITY_GUID", hide_env_values = true)]
    pub guid: Option<String>,

    #[arg(long, global = true, env = "AGILITY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, help = "Content list reference name [default: posts]")]
    pub reference_name: Option<String>,

    #[arg(long, global = true, help = "Locale code [default: en-us]")]
    pub locale: Option<String>,

    #[arg(long, global = true, help = "Override the regional API host")]
    pub api_base_url: Option<String>,

    #[arg(long, global = true, help = "Fetch unpublished content (needs a preview key)")]
    pub preview: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render the page once, to stdout or <output-path>/index.html
    Render {
        #[arg(long)]
        output_path: Option<String>,
    },
    /// Serve the page over HTTP, fetching fresh content on every request
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        #[arg(long, help = "Emit logs as JSON lines")]
        json_logs: bool,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file (if any) and applies command line overrides.
    pub fn resolve(&self) -> Result<BlogConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                BlogConfig::from_file(path)?
            }
            None => BlogConfig::default(),
        };

        let agility = &mut config.agility;
        if let Some(guid) = &self.guid {
            agility.guid = guid.clone();
        }
        if let Some(api_key) = &self.api_key {
            agility.api_key = api_key.clone();
        }
        if let Some(reference_name) = &self.reference_name {
            agility.reference_name = reference_name.clone();
        }
        if let Some(locale) = &self.locale {
            agility.locale = locale.clone();
        }
        if let Some(url) = &self.api_base_url {
            agility.api_base_url = Some(url.clone());
        }
        if self.preview {
            agility.preview = true;
        }

        if let Command::Serve { host, port, .. } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        Ok(config)
    }
}
