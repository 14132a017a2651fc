//! External download command templates
//!
//! `XferCommand` hands downloads to an external program. In the template
//! `%u` stands for the URL and `%o` for the partial output file; when `%o`
//! is absent the command is expected to write the final file itself.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Placeholder for the URL being fetched
pub const URL_PLACEHOLDER: &str = "%u";
/// Placeholder for the partial output file
pub const OUTPUT_PLACEHOLDER: &str = "%o";

/// Suffix of the file written while a download is in progress
const PART_SUFFIX: &str = ".part";

/// An `XferCommand` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransferCommand {
    template: String,
}

/// A template filled in for one download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransfer {
    /// Command line to run
    pub command: String,
    /// File the command writes to, when it differs from `final_file`
    pub part_file: Option<PathBuf>,
    /// Where the download ends up
    pub final_file: PathBuf,
}

impl TransferCommand {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the command writes to a `.part` file that must be renamed
    pub fn uses_part_file(&self) -> bool {
        self.template.contains(OUTPUT_PLACEHOLDER)
    }

    /// Fill in the template for downloading `url` into `dest_dir`
    pub fn prepare(&self, url: &str, dest_dir: &Path) -> PreparedTransfer {
        let basename = url_basename(url);
        let final_file = dest_dir.join(basename);
        let part_file = dest_dir.join(format!("{}{}", basename, PART_SUFFIX));

        // %o first so a URL containing "%o" is left untouched
        let command = self
            .template
            .replace(OUTPUT_PLACEHOLDER, &part_file.to_string_lossy())
            .replace(URL_PLACEHOLDER, url);

        PreparedTransfer {
            command,
            part_file: self.uses_part_file().then_some(part_file),
            final_file,
        }
    }
}

impl std::fmt::Display for TransferCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.template)
    }
}

/// Last path segment of a URL, ignoring trailing slashes
fn url_basename(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_with_part_file() {
        let cmd = TransferCommand::new("/usr/bin/wget --passive-ftp -c -O %o %u");
        let prepared = cmd.prepare(
            "http://mirror.example/core/os/x86_64/core.db",
            Path::new("/var/lib/pacman/sync"),
        );

        assert_eq!(
            prepared.command,
            "/usr/bin/wget --passive-ftp -c -O /var/lib/pacman/sync/core.db.part \
             http://mirror.example/core/os/x86_64/core.db"
        );
        assert_eq!(
            prepared.part_file,
            Some(PathBuf::from("/var/lib/pacman/sync/core.db.part"))
        );
        assert_eq!(
            prepared.final_file,
            PathBuf::from("/var/lib/pacman/sync/core.db")
        );
    }

    #[test]
    fn test_prepare_without_output_placeholder() {
        let cmd = TransferCommand::new("/usr/bin/curl -O %u");
        assert!(!cmd.uses_part_file());

        let prepared = cmd.prepare("ftp://example/extra.db", Path::new("/tmp"));
        assert_eq!(prepared.command, "/usr/bin/curl -O ftp://example/extra.db");
        assert_eq!(prepared.part_file, None);
        assert_eq!(prepared.final_file, PathBuf::from("/tmp/extra.db"));
    }

    #[test]
    fn test_url_basename() {
        assert_eq!(url_basename("http://a/b/c.pkg.tar.xz"), "c.pkg.tar.xz");
        assert_eq!(url_basename("http://a/b/"), "b");
        assert_eq!(url_basename("plain"), "plain");
    }
}
