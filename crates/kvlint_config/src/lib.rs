//! Configuration file support.

use dirs_next::config_dir;
use kvlint_core::FieldOrder;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error;

/// The name of the config file to search for.
pub const CONFIG_NAME: &str = "kvlintrc.toml";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config `{}`: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config `{}`: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReportConfig {
    /// How fields sharing a position are ordered within one line.
    pub field_order: FieldOrder,
    /// The directory relative file names in the validation results are resolved against.
    pub base_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new config by first searching for a config in the current
    /// dir and all of it ancestors, and if `no_global_config` is `false`,
    /// look in the systems config directory.
    ///
    /// # Returns
    ///
    /// The default config if no file was found, or an `Err` if the file found
    /// is unreadable or not a valid config.
    pub fn new(no_global_config: bool) -> Result<Self, Error> {
        match Self::find_config(!no_global_config) {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("no {} found, using the default config", CONFIG_NAME);
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        debug!("loading config from `{}`", path.display());
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut config: Self = toml::from_str(&source).map_err(|source| Error::Toml {
            path: path.to_owned(),
            source,
        })?;

        // a relative base dir is relative to the config, not to wherever we were invoked
        if let (Some(base), Some(parent)) = (config.report.base_dir.as_mut(), path.parent()) {
            if base.is_relative() {
                *base = parent.join(&*base);
            }
        }
        Ok(config)
    }

    fn find_config(global_config: bool) -> Option<PathBuf> {
        let path = env::current_dir().ok()?;
        for path in path.ancestors() {
            let path = path.join(CONFIG_NAME);
            if path.exists() {
                return Some(path);
            }
        }

        let path = config_dir()?.join(CONFIG_NAME);
        if global_config && path.exists() {
            return Some(path);
        }

        None
    }
}
