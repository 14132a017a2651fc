//! Configuration loading utilities
//!
//! Ties the parser and the applier together: read a configuration file
//! (the system one by default), then push it onto a settings backend.

use crate::backend::SettingsBackend;
use crate::config::PacmanConfig;
use crate::parser::{Parser, DEFAULT_MAX_INCLUDE_DEPTH};
use crate::{apply, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Entry configuration file
    path: PathBuf,
    /// How deeply `Include =` may nest
    max_include_depth: usize,
}

impl ConfigLoader {
    /// Create a loader for a specific file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    /// Create a loader for the system configuration file
    pub fn system() -> Self {
        Self::new(get_config_file())
    }

    /// Set how deeply includes may nest
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Get the entry configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the configuration without applying it
    pub fn parse(&self) -> Result<PacmanConfig> {
        let mut config = PacmanConfig::new();
        Parser::new()
            .max_include_depth(self.max_include_depth)
            .parse_file(&mut config, &self.path)?;
        Ok(config)
    }

    /// Parse the configuration and apply it to `backend`
    ///
    /// Values set here override anything previously configured on the
    /// backend, except lists the file leaves empty.
    pub fn configure<B>(&self, backend: &mut B) -> Result<()>
    where
        B: SettingsBackend + ?Sized,
    {
        let config = self.parse()?;
        info!(
            "Loaded {} with {} repositories",
            self.path.display(),
            config.repos.len()
        );
        apply(config, backend)
    }
}

/// Compiled-in default locations
pub mod paths {
    /// System configuration file
    pub const CONFIG_FILE: &str = "/etc/pacman.conf";
    /// Root filesystem
    pub const ROOT_PATH: &str = "/";
    /// Package databases
    pub const DATABASE_PATH: &str = "/var/lib/pacman/";
    /// Log file
    pub const LOG_FILE: &str = "/var/log/pacman.log";
    /// Downloaded packages
    pub const CACHE_PATH: &str = "/var/cache/pacman/pkg/";

    /// Place a compiled-in absolute path under `root`
    pub fn under_root(root: &str, default: &str) -> String {
        let relative = default.trim_start_matches('/');
        if root.ends_with('/') {
            format!("{}{}", root, relative)
        } else {
            format!("{}/{}", root, relative)
        }
    }
}

/// Environment variable names used by the configuration system
pub mod env_vars {
    /// Override for the system configuration file
    pub const CONFIG_FILE: &str = "PACMAN_CONFIG";
}

/// Get the system configuration file from the environment or default
pub fn get_config_file() -> PathBuf {
    std::env::var_os(env_vars::CONFIG_FILE)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(paths::CONFIG_FILE))
}

/// Read `path` (or the system configuration) and apply it to `backend`
pub fn configure<B>(backend: &mut B, path: Option<&Path>) -> Result<()>
where
    B: SettingsBackend + ?Sized,
{
    let loader = match path {
        Some(path) => ConfigLoader::new(path),
        None => ConfigLoader::system(),
    };
    loader.configure(backend)
}
