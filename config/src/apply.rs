//! Pushing parsed configuration onto the package manager
//!
//! Defaults are resolved here, not while parsing, because the database,
//! log and cache paths all derive from the root path the backend ends up
//! with. A failure part way through leaves the steps already applied in
//! place.

use crate::backend::SettingsBackend;
use crate::config::PacmanConfig;
use crate::error::Result;
use crate::options::BOOLEAN_OPTIONS;
use crate::paths;
use tracing::{debug, info};

/// Apply `config` to `backend`
pub fn apply<B>(config: PacmanConfig, backend: &mut B) -> Result<()>
where
    B: SettingsBackend + ?Sized,
{
    configure_paths(&config, backend)?;

    for (_, flag) in BOOLEAN_OPTIONS {
        backend.set_flag(*flag, config.flag(*flag));
    }

    if let Some(method) = &config.clean_method {
        backend.set_clean_method(method);
    }
    backend.set_transfer_command(config.transfer_command.as_deref());

    // Empty lists leave whatever the backend already has
    if !config.hold_packages.is_empty() {
        backend.set_hold_packages(&config.hold_packages);
    }
    if !config.sync_firsts.is_empty() {
        backend.set_sync_firsts(&config.sync_firsts);
    }
    if !config.ignore_groups.is_empty() {
        backend.set_ignore_groups(&config.ignore_groups);
    }
    if !config.ignore_packages.is_empty() {
        backend.set_ignore_packages(&config.ignore_packages);
    }
    if !config.no_extracts.is_empty() {
        backend.set_no_extracts(&config.no_extracts);
    }
    if !config.no_upgrades.is_empty() {
        backend.set_no_upgrades(&config.no_upgrades);
    }

    configure_repositories(&config, backend)
}

fn configure_paths<B>(config: &PacmanConfig, backend: &mut B) -> Result<()>
where
    B: SettingsBackend + ?Sized,
{
    let root = config.root_path.as_deref().unwrap_or(paths::ROOT_PATH);
    backend.set_root_path(root)?;
    debug!("Root path set to {}", backend.root_path());

    let database_path = match &config.database_path {
        Some(path) => path.clone(),
        None => paths::under_root(backend.root_path(), paths::DATABASE_PATH),
    };
    backend.set_database_path(&database_path)?;

    let log_file = match &config.log_file {
        Some(path) => path.clone(),
        None => paths::under_root(backend.root_path(), paths::LOG_FILE),
    };
    backend.set_log_file(&log_file);

    if config.cache_paths.is_empty() {
        let cache = paths::under_root(backend.root_path(), paths::CACHE_PATH);
        backend.set_cache_paths(&[cache]);
    } else {
        backend.set_cache_paths(&config.cache_paths);
    }

    Ok(())
}

fn configure_repositories<B>(config: &PacmanConfig, backend: &mut B) -> Result<()>
where
    B: SettingsBackend + ?Sized,
{
    if config.repos.is_empty() {
        return Ok(());
    }

    backend.unregister_all_repositories()?;
    backend.register_local_repository()?;

    for (name, servers) in config.repos.iter() {
        backend.register_repository(name)?;
        for url in servers {
            backend.repository_add_server(name, url);
        }
        info!("Registered repository [{}] with {} server(s)", name, servers.len());
    }

    Ok(())
}
