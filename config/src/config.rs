//! Accumulated pacman.conf settings
//!
//! [`PacmanConfig`] holds raw values exactly as the configuration files
//! gave them. Nothing is defaulted here; unset paths stay `None` until
//! [`crate::apply::apply`] resolves them against the backend.

use crate::options::BoolOption;
use crate::repos::RepoRegistry;
use serde::Serialize;

/// Everything read from one configuration file and its includes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PacmanConfig {
    // === Boolean options ===
    pub i_love_candy: bool,
    pub no_passive_ftp: bool,
    pub show_size: bool,
    pub total_download: bool,
    pub use_delta: bool,
    pub use_syslog: bool,

    // === Scalar options ===
    /// CleanMethod; the backend keeps its own default when unset
    pub clean_method: Option<String>,
    /// DBPath
    pub database_path: Option<String>,
    /// LogFile
    pub log_file: Option<String>,
    /// RootDir
    pub root_path: Option<String>,
    /// XferCommand; unset means download internally
    pub transfer_command: Option<String>,

    // === List options ===
    /// CacheDir, one entry per directive
    pub cache_paths: Vec<String>,
    pub hold_packages: Vec<String>,
    pub ignore_groups: Vec<String>,
    pub ignore_packages: Vec<String>,
    pub no_extracts: Vec<String>,
    pub no_upgrades: Vec<String>,
    pub sync_firsts: Vec<String>,

    /// Repository sections and their servers
    pub repos: RepoRegistry,
}

impl PacmanConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a boolean option
    pub fn flag(&self, flag: BoolOption) -> bool {
        match flag {
            BoolOption::ILoveCandy => self.i_love_candy,
            BoolOption::NoPassiveFtp => self.no_passive_ftp,
            BoolOption::ShowSize => self.show_size,
            BoolOption::TotalDownload => self.total_download,
            BoolOption::UseDelta => self.use_delta,
            BoolOption::UseSyslog => self.use_syslog,
        }
    }

    /// Number of list entries accumulated across all list options
    pub fn list_entries(&self) -> usize {
        [
            &self.cache_paths,
            &self.hold_packages,
            &self.ignore_groups,
            &self.ignore_packages,
            &self.no_extracts,
            &self.no_upgrades,
            &self.sync_firsts,
        ]
        .iter()
        .map(|list| list.len())
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let config = PacmanConfig::new();
        assert!(!config.i_love_candy);
        assert!(config.root_path.is_none());
        assert!(config.clean_method.is_none());
        assert!(config.repos.is_empty());
        assert_eq!(config.list_entries(), 0);
    }

    #[test]
    fn test_list_entries() {
        let mut config = PacmanConfig::new();
        config.ignore_packages.push("linux".to_string());
        config.hold_packages.push("pacman".to_string());
        config.hold_packages.push("glibc".to_string());
        assert_eq!(config.list_entries(), 3);
    }
}
