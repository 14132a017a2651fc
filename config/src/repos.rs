//! Repository configuration
//!
//! Every non-`options` section of pacman.conf names a repository. Each
//! repository carries an ordered list of server URLs, with `$repo` in a
//! `Server =` line replaced by the section name.

use crate::Result;
use indexmap::IndexMap;
use regex::{NoExpand, Regex};
use serde::Serialize;

/// Placeholder replaced by the repository name in server URLs
pub const REPO_MACRO: &str = "$repo";

/// Repositories in the order they were first declared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RepoRegistry {
    repos: IndexMap<String, Vec<String>>,
}

impl RepoRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repository; a name seen before keeps its position and servers
    pub fn register(&mut self, name: &str) {
        if !self.repos.contains_key(name) {
            self.repos.insert(name.to_string(), Vec::new());
        }
    }

    /// Append a server URL to a repository, registering it if needed
    pub fn add_server(&mut self, name: &str, url: impl Into<String>) {
        self.repos
            .entry(name.to_string())
            .or_default()
            .push(url.into());
    }

    /// Servers of a repository
    pub fn servers(&self, name: &str) -> Option<&[String]> {
        self.repos.get(name).map(|s| s.as_slice())
    }

    /// Check if a repository exists
    pub fn has_repo(&self, name: &str) -> bool {
        self.repos.contains_key(name)
    }

    /// Get repository names in declaration order
    pub fn repo_names(&self) -> Vec<&str> {
        self.repos.keys().map(|s| s.as_str()).collect()
    }

    /// Iterate repositories and their servers in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.repos.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

/// Compiled `$repo` substitution
#[derive(Debug, Clone)]
pub struct RepoMacro {
    pattern: Regex,
}

impl RepoMacro {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(&regex::escape(REPO_MACRO))?,
        })
    }

    /// Replace every `$repo` in `url` with `repo`, literally
    pub fn expand(&self, url: &str, repo: &str) -> String {
        self.pattern.replace_all(url, NoExpand(repo)).into_owned()
    }
}
