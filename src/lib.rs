pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{storage::LocalStorage, toml_config::BlogConfig};
pub use core::{agility::AgilityClient, markup::MarkupTransform, page::BlogPage};
pub use utils::error::{BlogError, Result};
