//! Package Manager Configuration
//!
//! This crate reads pacman.conf style configuration and applies it to the
//! package manager's settings.
//!
//! # Overview
//!
//! - [`line`]: Line normalization and classification
//! - [`section`]: Section tracking (`[options]` vs repository sections)
//! - [`options`]: The closed vocabulary of `[options]` directives
//! - [`repos`]: Repository servers and `$repo` expansion
//! - [`config`]: The accumulated, not yet defaulted configuration
//! - [`parser`]: Recursive file parsing with `Include =` support
//! - [`apply`]: Resolving defaults and pushing values onto a backend
//! - [`backend`]: The settings interface the package manager provides
//! - [`settings`]: An in-memory settings backend
//! - [`transfer`]: `XferCommand` templates
//! - [`loader`]: Configuration loading utilities
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pacman_config::{ConfigLoader, Settings, SettingsBackend};
//!
//! let mut settings = Settings::new();
//! ConfigLoader::new("/etc/pacman.conf")
//!     .configure(&mut settings)
//!     .unwrap();
//!
//! println!("Root: {}", settings.root_path());
//! println!("Repositories: {:?}", settings.repository_names());
//! ```
//!
//! # File Format
//!
//! ```text
//! [options]
//! RootDir   = /
//! HoldPkg   = pacman glibc
//! ShowSize
//!
//! [core]
//! Server = http://mirror.example/$repo/os/x86_64
//! Include = /etc/pacman.d/mirrorlist
//! ```

pub mod apply;
pub mod backend;
pub mod config;
pub mod error;
pub mod line;
pub mod loader;
pub mod options;
pub mod parser;
pub mod repos;
pub mod section;
pub mod settings;
pub mod transfer;

pub use apply::apply;
pub use backend::{BackendResult, SettingsBackend};
pub use config::PacmanConfig;
pub use error::{BackendError, ConfigError, Result};
pub use loader::{configure, env_vars, get_config_file, paths, ConfigLoader};
pub use options::{known_options, BoolOption, ListOption, OptionKind, ScalarOption};
pub use parser::{parse_file, Parser, DEFAULT_MAX_INCLUDE_DEPTH};
pub use repos::{RepoMacro, RepoRegistry};
pub use section::Section;
pub use settings::{CleanMethod, Settings};
pub use transfer::{PreparedTransfer, TransferCommand};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        apply, configure, ConfigError, ConfigLoader, PacmanConfig, Parser, Result, Settings,
        SettingsBackend,
    };
}
