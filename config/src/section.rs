//! Section tracking
//!
//! The parser is always in one of three states: before any header, inside
//! the reserved `[options]` section, or inside a repository section.

use std::fmt;

/// Name of the reserved global section
pub const OPTIONS_SECTION: &str = "options";

/// The section the parser is currently in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Section {
    /// No header seen yet
    #[default]
    None,
    /// `[options]`
    Options,
    /// Any other `[name]`
    Repo(String),
}

impl Section {
    /// Section state for a header name
    pub fn from_name(name: &str) -> Self {
        if name == OPTIONS_SECTION {
            Section::Options
        } else {
            Section::Repo(name.to_string())
        }
    }

    /// Seed state from a section name passed down by an includer
    pub fn inherited(name: Option<&str>) -> Self {
        name.map(Self::from_name).unwrap_or_default()
    }

    /// Current section name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Section::None => None,
            Section::Options => Some(OPTIONS_SECTION),
            Section::Repo(name) => Some(name),
        }
    }

    /// Repository name, when inside a repository section
    pub fn repo(&self) -> Option<&str> {
        match self {
            Section::Repo(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_options(&self) -> bool {
        matches!(self, Section::Options)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "[{}]", name),
            None => write!(f, "<no section>"),
        }
    }
}
