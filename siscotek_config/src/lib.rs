use std::{
    collections::HashMap,
    ffi::OsString,
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use siscotek_models::theme::Theme;
use url::Url;

pub use crate::duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files override earlier ones.
pub const CONFIG_PATHS_ENV: &str = "SISCOTEK_CONFIG";

const ENV_PREFIX: &str = "SISCOTEK";
const ENV_SEPARATOR: &str = "__";

/// Loads the config files named by `SISCOTEK_CONFIG` (or the default config
/// file) and applies `SISCOTEK__SECTION__KEY` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = config_paths(std::env::var_os(CONFIG_PATHS_ENV));
    load_paths(&paths, None)
}

/// Loads the given config files in order.
///
/// Overrides are read from `env` if provided, otherwise from the process
/// environment.
pub fn load_paths(
    paths: &[impl AsRef<Path>],
    env: Option<HashMap<String, String>>,
) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn config_paths(var: Option<OsString>) -> Vec<PathBuf> {
    match var {
        Some(var) if !var.is_empty() => std::env::split_paths(&var).collect(),
        _ => vec![DEFAULT_CONFIG_PATH.into()],
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub delivery: DeliveryConfig,
    pub contact: ContactConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryConfig {
    pub service_id: String,
    pub template_id: String,
    pub account_id: String,
    pub access_token: Option<String>,
    /// Send messages to this endpoint instead of the public EmailJS api.
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub max_open_forms: usize,
    /// Forms that have not been touched for this long are discarded when
    /// another form is opened.
    pub form_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ThemeConfig {
    pub default: Theme,
}
