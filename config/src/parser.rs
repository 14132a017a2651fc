//! pacman.conf parser
//!
//! Reads a configuration file line by line into a [`PacmanConfig`],
//! following `Include =` directives recursively. Included files continue in
//! the section that was current at the point of inclusion, and the first
//! error anywhere in the include tree aborts the whole parse with the file
//! and line where it happened.

use crate::config::PacmanConfig;
use crate::error::{ConfigError, Result};
use crate::line::{classify, Line};
use crate::options::{BoolOption, ListOption, ScalarOption};
use crate::repos::RepoMacro;
use crate::section::Section;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Directive that pulls in another file
pub const INCLUDE_DIRECTIVE: &str = "Include";
/// Directive that adds a server to the current repository
pub const SERVER_DIRECTIVE: &str = "Server";

/// How many `Include =` levels may nest before parsing gives up
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Recursive configuration parser
#[derive(Debug)]
pub struct Parser {
    max_include_depth: usize,
    /// Compiled on the first `Server =` line
    repo_macro: Option<RepoMacro>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a directive came from
struct Location<'a> {
    file: &'a Path,
    line: usize,
    depth: usize,
}

impl Location<'_> {
    fn unrecognised(&self, key: &str) -> ConfigError {
        ConfigError::UnrecognisedDirective {
            key: key.to_string(),
            file: self.file.to_path_buf(),
            line: self.line,
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            repo_macro: None,
        }
    }

    /// Set how deeply includes may nest
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Parse `path` and everything it includes into `config`
    pub fn parse_file(&mut self, config: &mut PacmanConfig, path: &Path) -> Result<()> {
        self.parse_at_depth(config, path, None, 0)
    }

    /// Parse in-memory content as if it were the file `name`
    ///
    /// `Include =` directives in `content` still read from disk.
    pub fn parse_str(&mut self, config: &mut PacmanConfig, content: &str, name: &Path) -> Result<()> {
        self.parse_lines(config, content.as_bytes(), name, None, 0)
    }

    fn parse_at_depth(
        &mut self,
        config: &mut PacmanConfig,
        path: &Path,
        section: Option<&str>,
        depth: usize,
    ) -> Result<()> {
        let file = File::open(path).map_err(|source| ConfigError::FileOpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Parsing {} (depth {})", path.display(), depth);
        self.parse_lines(config, BufReader::new(file), path, section, depth)
    }

    fn parse_lines(
        &mut self,
        config: &mut PacmanConfig,
        reader: impl BufRead,
        file: &Path,
        inherited: Option<&str>,
        depth: usize,
    ) -> Result<()> {
        let mut section = Section::inherited(inherited);

        for (idx, line) in reader.lines().enumerate() {
            let location = Location {
                file,
                line: idx + 1,
                depth,
            };
            let raw = line.map_err(|source| ConfigError::ReadFailed {
                path: file.to_path_buf(),
                line: location.line,
                source,
            })?;

            match classify(&raw) {
                Line::Blank => continue,
                Line::Section(name) => {
                    if name.is_empty() {
                        return Err(ConfigError::EmptySectionName {
                            file: file.to_path_buf(),
                            line: location.line,
                        });
                    }

                    section = Section::from_name(name);
                    trace!("Entering section {}", section);
                    if let Some(repo) = section.repo() {
                        config.repos.register(repo);
                    }
                }
                Line::Directive { key, value } => {
                    self.dispatch(config, &section, key, value, &location)?;
                }
            }
        }

        Ok(())
    }

    fn dispatch(
        &mut self,
        config: &mut PacmanConfig,
        section: &Section,
        key: &str,
        value: Option<&str>,
        location: &Location<'_>,
    ) -> Result<()> {
        let Some(section_name) = section.name() else {
            return Err(ConfigError::DirectiveOutsideSection {
                file: location.file.to_path_buf(),
                line: location.line,
            });
        };

        let Some(value) = value else {
            return match BoolOption::lookup(key) {
                Some(option) if section.is_options() => {
                    option.apply(config);
                    Ok(())
                }
                _ => Err(location.unrecognised(key)),
            };
        };

        if key == INCLUDE_DIRECTIVE {
            return self.include(config, value, section_name, location);
        }

        match section {
            Section::Options => {
                if let Some(option) = ScalarOption::lookup(key) {
                    option.apply(config, value);
                } else if let Some(option) = ListOption::lookup(key) {
                    option.apply(config, value);
                } else {
                    return Err(location.unrecognised(key));
                }
            }
            Section::Repo(repo) if key == SERVER_DIRECTIVE => {
                let server = self.repo_macro()?.expand(value, repo);
                trace!("Adding server {} to [{}]", server, repo);
                config.repos.add_server(repo, server);
            }
            _ => return Err(location.unrecognised(key)),
        }

        Ok(())
    }

    fn include(
        &mut self,
        config: &mut PacmanConfig,
        target: &str,
        section: &str,
        location: &Location<'_>,
    ) -> Result<()> {
        if location.depth >= self.max_include_depth {
            return Err(ConfigError::IncludeDepthExceeded {
                file: location.file.to_path_buf(),
                line: location.line,
                depth: self.max_include_depth,
            });
        }

        debug!(
            "Including {} from {} line {}",
            target,
            location.file.display(),
            location.line
        );
        self.parse_at_depth(config, Path::new(target), Some(section), location.depth + 1)
    }

    fn repo_macro(&mut self) -> Result<&RepoMacro> {
        match self.repo_macro {
            Some(ref expander) => Ok(expander),
            None => Ok(self.repo_macro.insert(RepoMacro::new()?)),
        }
    }
}

/// Parse a configuration file with default settings
pub fn parse_file(path: &Path) -> Result<PacmanConfig> {
    let mut config = PacmanConfig::new();
    Parser::new().parse_file(&mut config, path)?;
    Ok(config)
}
