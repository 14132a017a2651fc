//! Known `[options]` directives
//!
//! Three closed tables map directive names to setters on [`PacmanConfig`]:
//! flags that are set by their mere presence, scalars that take the rest of
//! the line, and lists whose space-separated values accumulate across lines.

use crate::config::PacmanConfig;
use std::fmt;

/// Flags set by a bare `Key` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOption {
    ILoveCandy,
    NoPassiveFtp,
    ShowSize,
    TotalDownload,
    UseDelta,
    UseSyslog,
}

/// Keep this in alphabetical order
pub const BOOLEAN_OPTIONS: &[(&str, BoolOption)] = &[
    ("ILoveCandy", BoolOption::ILoveCandy),
    ("NoPassiveFtp", BoolOption::NoPassiveFtp),
    ("ShowSize", BoolOption::ShowSize),
    ("TotalDownload", BoolOption::TotalDownload),
    ("UseDelta", BoolOption::UseDelta),
    ("UseSyslog", BoolOption::UseSyslog),
];

impl BoolOption {
    pub fn lookup(key: &str) -> Option<Self> {
        BOOLEAN_OPTIONS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, option)| *option)
    }

    /// Turn the flag on
    pub fn apply(self, config: &mut PacmanConfig) {
        let flag = match self {
            BoolOption::ILoveCandy => &mut config.i_love_candy,
            BoolOption::NoPassiveFtp => &mut config.no_passive_ftp,
            BoolOption::ShowSize => &mut config.show_size,
            BoolOption::TotalDownload => &mut config.total_download,
            BoolOption::UseDelta => &mut config.use_delta,
            BoolOption::UseSyslog => &mut config.use_syslog,
        };
        *flag = true;
    }
}

/// Options taking a single `Key = value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarOption {
    /// Appends rather than replaces
    CacheDir,
    CleanMethod,
    DbPath,
    LogFile,
    RootDir,
    XferCommand,
}

/// Keep this in alphabetical order
pub const SCALAR_OPTIONS: &[(&str, ScalarOption)] = &[
    ("CacheDir", ScalarOption::CacheDir),
    ("CleanMethod", ScalarOption::CleanMethod),
    ("DBPath", ScalarOption::DbPath),
    ("LogFile", ScalarOption::LogFile),
    ("RootDir", ScalarOption::RootDir),
    ("XferCommand", ScalarOption::XferCommand),
];

impl ScalarOption {
    pub fn lookup(key: &str) -> Option<Self> {
        SCALAR_OPTIONS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, option)| *option)
    }

    /// Store `value`, replacing any earlier one
    pub fn apply(self, config: &mut PacmanConfig, value: &str) {
        let slot = match self {
            ScalarOption::CacheDir => {
                config.cache_paths.push(value.to_string());
                return;
            }
            ScalarOption::CleanMethod => &mut config.clean_method,
            ScalarOption::DbPath => &mut config.database_path,
            ScalarOption::LogFile => &mut config.log_file,
            ScalarOption::RootDir => &mut config.root_path,
            ScalarOption::XferCommand => &mut config.transfer_command,
        };
        *slot = Some(value.to_string());
    }
}

/// Options whose values are space-separated and repeatable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOption {
    HoldPkg,
    IgnoreGroup,
    IgnorePkg,
    NoExtract,
    NoUpgrade,
    SyncFirst,
}

/// Keep this in alphabetical order
pub const LIST_OPTIONS: &[(&str, ListOption)] = &[
    ("HoldPkg", ListOption::HoldPkg),
    ("IgnoreGroup", ListOption::IgnoreGroup),
    ("IgnorePkg", ListOption::IgnorePkg),
    ("NoExtract", ListOption::NoExtract),
    ("NoUpgrade", ListOption::NoUpgrade),
    ("SyncFirst", ListOption::SyncFirst),
];

impl ListOption {
    pub fn lookup(key: &str) -> Option<Self> {
        LIST_OPTIONS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, option)| *option)
    }

    /// Append each whitespace-separated token of `value`
    pub fn apply(self, config: &mut PacmanConfig, value: &str) {
        let list = match self {
            ListOption::HoldPkg => &mut config.hold_packages,
            ListOption::IgnoreGroup => &mut config.ignore_groups,
            ListOption::IgnorePkg => &mut config.ignore_packages,
            ListOption::NoExtract => &mut config.no_extracts,
            ListOption::NoUpgrade => &mut config.no_upgrades,
            ListOption::SyncFirst => &mut config.sync_firsts,
        };
        list.extend(value.split_whitespace().map(str::to_string));
    }
}

/// Which table a directive name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    Scalar,
    List,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Boolean => "boolean",
            OptionKind::Scalar => "scalar",
            OptionKind::List => "list",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every recognised `[options]` directive name with its kind
pub fn known_options() -> impl Iterator<Item = (&'static str, OptionKind)> {
    let booleans = BOOLEAN_OPTIONS
        .iter()
        .map(|(name, _)| (*name, OptionKind::Boolean));
    let scalars = SCALAR_OPTIONS
        .iter()
        .map(|(name, _)| (*name, OptionKind::Scalar));
    let lists = LIST_OPTIONS
        .iter()
        .map(|(name, _)| (*name, OptionKind::List));
    booleans.chain(scalars).chain(lists)
}
