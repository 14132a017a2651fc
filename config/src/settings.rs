//! In-memory package manager settings
//!
//! [`Settings`] is a self-contained [`SettingsBackend`]: it starts from the
//! same compiled-in defaults as the package manager, validates paths the way
//! the package manager does, and keeps a table of registered repositories.

use crate::backend::{BackendResult, SettingsBackend};
use crate::error::{BackendError, ConfigError};
use crate::options::BoolOption;
use crate::paths;
use crate::transfer::TransferCommand;
use indexmap::IndexMap;
use serde::Serialize;
use std::str::FromStr;

/// How the package cache is cleaned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CleanMethod {
    /// Keep packages that are currently installed
    #[default]
    KeepInstalled,
    /// Keep packages that are not outdated
    KeepCurrent,
}

impl CleanMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanMethod::KeepInstalled => "KeepInstalled",
            CleanMethod::KeepCurrent => "KeepCurrent",
        }
    }
}

impl FromStr for CleanMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "KeepInstalled" => Ok(CleanMethod::KeepInstalled),
            "KeepCurrent" => Ok(CleanMethod::KeepCurrent),
            _ => Err(ConfigError::UnknownCleanMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for CleanMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package manager settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    root_path: String,
    database_path: String,
    log_file: String,
    cache_paths: Vec<String>,

    i_love_candy: bool,
    no_passive_ftp: bool,
    show_size: bool,
    total_download: bool,
    use_delta: bool,
    use_syslog: bool,

    clean_method: String,
    transfer_command: Option<TransferCommand>,

    hold_packages: Vec<String>,
    sync_firsts: Vec<String>,
    ignore_groups: Vec<String>,
    ignore_packages: Vec<String>,
    no_extracts: Vec<String>,
    no_upgrades: Vec<String>,

    local_repository: bool,
    repositories: IndexMap<String, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_path: paths::ROOT_PATH.to_string(),
            database_path: paths::DATABASE_PATH.to_string(),
            log_file: paths::LOG_FILE.to_string(),
            cache_paths: Vec::new(),
            i_love_candy: false,
            no_passive_ftp: false,
            show_size: false,
            total_download: false,
            use_delta: false,
            use_syslog: false,
            clean_method: CleanMethod::default().as_str().to_string(),
            transfer_command: None,
            hold_packages: Vec::new(),
            sync_firsts: Vec::new(),
            ignore_groups: Vec::new(),
            ignore_packages: Vec::new(),
            no_extracts: Vec::new(),
            no_upgrades: Vec::new(),
            local_repository: false,
            repositories: IndexMap::new(),
        }
    }
}

/// Absolute directory path with exactly one trailing slash
fn normalize_dir(path: &str) -> Option<String> {
    if !path.starts_with('/') {
        return None;
    }
    let trimmed = path.trim_end_matches('/');
    Some(format!("{}/", trimmed))
}

/// Remove the first occurrence of `value`, reporting whether it was there
fn remove_first(list: &mut Vec<String>, value: &str) -> bool {
    match list.iter().position(|v| v == value) {
        Some(idx) => {
            list.remove(idx);
            true
        }
        None => false,
    }
}

impl Settings {
    /// Settings with the compiled-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database_path(&self) -> &str {
        &self.database_path
    }

    pub fn log_file(&self) -> &str {
        &self.log_file
    }

    pub fn cache_paths(&self) -> &[String] {
        &self.cache_paths
    }

    pub fn add_cache_path(&mut self, path: impl Into<String>) {
        self.cache_paths.push(path.into());
    }

    pub fn remove_cache_path(&mut self, path: &str) -> bool {
        remove_first(&mut self.cache_paths, path)
    }

    /// Current value of a boolean flag
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

    /// Clean method as configured, which may be a value this crate doesn't know
    pub fn clean_method(&self) -> &str {
        &self.clean_method
    }

    /// Clean method, when it is one of the known values
    pub fn clean_method_kind(&self) -> Option<CleanMethod> {
        self.clean_method.parse().ok()
    }

    pub fn transfer_command(&self) -> Option<&TransferCommand> {
        self.transfer_command.as_ref()
    }

    pub fn hold_packages(&self) -> &[String] {
        &self.hold_packages
    }

    pub fn add_hold_package(&mut self, package: impl Into<String>) {
        self.hold_packages.push(package.into());
    }

    pub fn remove_hold_package(&mut self, package: &str) -> bool {
        remove_first(&mut self.hold_packages, package)
    }

    pub fn sync_firsts(&self) -> &[String] {
        &self.sync_firsts
    }

    pub fn add_sync_first(&mut self, package: impl Into<String>) {
        self.sync_firsts.push(package.into());
    }

    pub fn remove_sync_first(&mut self, package: &str) -> bool {
        remove_first(&mut self.sync_firsts, package)
    }

    pub fn ignore_groups(&self) -> &[String] {
        &self.ignore_groups
    }

    pub fn add_ignore_group(&mut self, group: impl Into<String>) {
        self.ignore_groups.push(group.into());
    }

    pub fn remove_ignore_group(&mut self, group: &str) -> bool {
        remove_first(&mut self.ignore_groups, group)
    }

    pub fn ignore_packages(&self) -> &[String] {
        &self.ignore_packages
    }

    pub fn add_ignore_package(&mut self, package: impl Into<String>) {
        self.ignore_packages.push(package.into());
    }

    pub fn remove_ignore_package(&mut self, package: &str) -> bool {
        remove_first(&mut self.ignore_packages, package)
    }

    pub fn no_extracts(&self) -> &[String] {
        &self.no_extracts
    }

    pub fn add_no_extract(&mut self, file: impl Into<String>) {
        self.no_extracts.push(file.into());
    }

    pub fn remove_no_extract(&mut self, file: &str) -> bool {
        remove_first(&mut self.no_extracts, file)
    }

    pub fn no_upgrades(&self) -> &[String] {
        &self.no_upgrades
    }

    pub fn add_no_upgrade(&mut self, file: impl Into<String>) {
        self.no_upgrades.push(file.into());
    }

    pub fn remove_no_upgrade(&mut self, file: &str) -> bool {
        remove_first(&mut self.no_upgrades, file)
    }

    /// Whether the local repository is registered
    pub fn has_local_repository(&self) -> bool {
        self.local_repository
    }

    /// Servers of a registered sync repository
    pub fn find_repository(&self, name: &str) -> Option<&[String]> {
        self.repositories.get(name).map(|s| s.as_slice())
    }

    /// Sync repository names in registration order
    pub fn repository_names(&self) -> Vec<&str> {
        self.repositories.keys().map(|s| s.as_str()).collect()
    }

    /// Unregister one sync repository
    pub fn unregister_repository(&mut self, name: &str) -> bool {
        self.repositories.shift_remove(name).is_some()
    }
}

impl SettingsBackend for Settings {
    fn set_root_path(&mut self, path: &str) -> BackendResult {
        self.root_path = normalize_dir(path)
            .ok_or_else(|| BackendError::InvalidRootPath(format!("{} is not absolute", path)))?;
        Ok(())
    }

    fn root_path(&self) -> &str {
        &self.root_path
    }

    fn set_database_path(&mut self, path: &str) -> BackendResult {
        self.database_path = normalize_dir(path).ok_or_else(|| {
            BackendError::InvalidDatabasePath(format!("{} is not absolute", path))
        })?;
        Ok(())
    }

    fn set_log_file(&mut self, path: &str) {
        self.log_file = path.to_string();
    }

    fn set_cache_paths(&mut self, paths: &[String]) {
        self.cache_paths = paths.to_vec();
    }

    fn set_flag(&mut self, flag: BoolOption, value: bool) {
        let slot = match flag {
            BoolOption::ILoveCandy => &mut self.i_love_candy,
            BoolOption::NoPassiveFtp => &mut self.no_passive_ftp,
            BoolOption::ShowSize => &mut self.show_size,
            BoolOption::TotalDownload => &mut self.total_download,
            BoolOption::UseDelta => &mut self.use_delta,
            BoolOption::UseSyslog => &mut self.use_syslog,
        };
        *slot = value;
    }

    fn set_clean_method(&mut self, method: &str) {
        self.clean_method = method.to_string();
    }

    fn set_transfer_command(&mut self, command: Option<&str>) {
        self.transfer_command = command.map(TransferCommand::new);
    }

    fn set_hold_packages(&mut self, packages: &[String]) {
        self.hold_packages = packages.to_vec();
    }

    fn set_sync_firsts(&mut self, packages: &[String]) {
        self.sync_firsts = packages.to_vec();
    }

    fn set_ignore_groups(&mut self, groups: &[String]) {
        self.ignore_groups = groups.to_vec();
    }

    fn set_ignore_packages(&mut self, packages: &[String]) {
        self.ignore_packages = packages.to_vec();
    }

    fn set_no_extracts(&mut self, files: &[String]) {
        self.no_extracts = files.to_vec();
    }

    fn set_no_upgrades(&mut self, files: &[String]) {
        self.no_upgrades = files.to_vec();
    }

    fn unregister_all_repositories(&mut self) -> BackendResult {
        self.local_repository = false;
        self.repositories.clear();
        Ok(())
    }

    fn register_local_repository(&mut self) -> BackendResult {
        self.local_repository = true;
        Ok(())
    }

    fn register_repository(&mut self, name: &str) -> BackendResult {
        if name.is_empty() || name.contains('/') {
            return Err(BackendError::RegisterFailed {
                name: name.to_string(),
                reason: "invalid repository name".to_string(),
            });
        }
        self.repositories.entry(name.to_string()).or_default();
        Ok(())
    }

    fn repository_add_server(&mut self, repo: &str, url: &str) {
        match self.repositories.get_mut(repo) {
            Some(servers) => servers.push(url.to_string()),
            None => tracing::warn!("Ignoring server {} for unregistered repository {}", url, repo),
        }
    }
}
