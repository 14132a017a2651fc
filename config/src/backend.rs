//! Settings backend interface
//!
//! The package manager owns the settings object that configuration is
//! pushed into. [`crate::apply::apply`] only talks to it through this
//! trait, so the real backend and [`crate::Settings`] are interchangeable.

use crate::error::BackendError;
use crate::options::BoolOption;

/// Result of a backend operation that can be refused
pub type BackendResult<T = ()> = std::result::Result<T, BackendError>;

/// Operations the configuration engine needs from the package manager
pub trait SettingsBackend {
    /// Set the root filesystem; may be rejected
    fn set_root_path(&mut self, path: &str) -> BackendResult;

    /// Root filesystem as the backend resolved it
    fn root_path(&self) -> &str;

    /// Set the database directory; may be rejected
    fn set_database_path(&mut self, path: &str) -> BackendResult;

    fn set_log_file(&mut self, path: &str);

    fn set_cache_paths(&mut self, paths: &[String]);

    /// Set one of the boolean flags
    fn set_flag(&mut self, flag: BoolOption, value: bool);

    fn set_clean_method(&mut self, method: &str);

    /// `None` means files are downloaded internally
    fn set_transfer_command(&mut self, command: Option<&str>);

    fn set_hold_packages(&mut self, packages: &[String]);
    fn set_sync_firsts(&mut self, packages: &[String]);
    fn set_ignore_groups(&mut self, groups: &[String]);
    fn set_ignore_packages(&mut self, packages: &[String]);
    fn set_no_extracts(&mut self, files: &[String]);
    fn set_no_upgrades(&mut self, files: &[String]);

    /// Drop every registered repository, local included
    fn unregister_all_repositories(&mut self) -> BackendResult;

    fn register_local_repository(&mut self) -> BackendResult;

    /// Register a sync repository
    fn register_repository(&mut self, name: &str) -> BackendResult;

    /// Append a server to a registered sync repository
    fn repository_add_server(&mut self, repo: &str, url: &str);
}
