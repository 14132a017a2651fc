//! Tests for loading configuration files from disk and applying them

use assert_matches::assert_matches;
use pacman_config::{
    configure, parse_file, BackendError, BoolOption, ConfigError, ConfigLoader, Settings,
    SettingsBackend,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `name` inside `dir`, returning the full path
fn write_conf(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// A typical pacman.conf with a mirrorlist include
fn create_test_tree() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mirrorlist = write_conf(
        temp_dir.path(),
        "mirrorlist",
        "# Mirrors\nServer = http://mirror-a.example/$repo/os/x86_64\nServer = http://mirror-b.example/$repo/os/x86_64\n",
    );

    let main = write_conf(
        temp_dir.path(),
        "pacman.conf",
        &format!(
            r#"#
# pacman.conf
#
[options]
RootDir     = /mnt/root
HoldPkg     = pacman glibc
SyncFirst   = pacman
IgnorePkg   = linux
IgnorePkg   = linux-headers nvidia
NoUpgrade   = etc/passwd etc/group
NoExtract   = usr/share/doc/*
ShowSize
TotalDownload

[core]
Server = http://primary.example/$repo/os/x86_64
Include = {mirrorlist}

[extra]
Include = {mirrorlist}

[community]
"#,
            mirrorlist = mirrorlist.display()
        ),
    );

    (main, temp_dir)
}

mod parsing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_tree() {
        let (main, _temp_dir) = create_test_tree();
        let config = parse_file(&main).unwrap();

        assert_eq!(config.root_path.as_deref(), Some("/mnt/root"));
        assert_eq!(config.hold_packages, vec!["pacman", "glibc"]);
        assert_eq!(
            config.ignore_packages,
            vec!["linux", "linux-headers", "nvidia"]
        );
        assert_eq!(config.no_upgrades, vec!["etc/passwd", "etc/group"]);
        assert_eq!(config.no_extracts, vec!["usr/share/doc/*"]);
        assert!(config.show_size);
        assert!(config.total_download);
        assert!(!config.use_delta);

        assert_eq!(
            config.repos.repo_names(),
            vec!["core", "extra", "community"]
        );
        assert!(config.repos.servers("community").unwrap().is_empty());
    }

    #[test]
    fn test_included_servers_join_including_section() {
        let (main, _temp_dir) = create_test_tree();
        let config = parse_file(&main).unwrap();

        assert_eq!(
            config.repos.servers("core").unwrap(),
            &[
                "http://primary.example/core/os/x86_64".to_string(),
                "http://mirror-a.example/core/os/x86_64".to_string(),
                "http://mirror-b.example/core/os/x86_64".to_string(),
            ]
        );
        assert_eq!(
            config.repos.servers("extra").unwrap(),
            &[
                "http://mirror-a.example/extra/os/x86_64".to_string(),
                "http://mirror-b.example/extra/os/x86_64".to_string(),
            ]
        );
    }

    #[test]
    fn test_include_inherits_options_section() {
        let temp_dir = TempDir::new().unwrap();
        let extra = write_conf(temp_dir.path(), "options.conf", "UseDelta\nIgnoreGroup = kde\n");
        let main = write_conf(
            temp_dir.path(),
            "pacman.conf",
            &format!("[options]\nInclude = {}\nIgnoreGroup = gnome\n", extra.display()),
        );

        let config = parse_file(&main).unwrap();
        assert!(config.use_delta);
        assert_eq!(config.ignore_groups, vec!["kde", "gnome"]);
    }

    #[test]
    fn test_section_change_in_include_stays_local() {
        let temp_dir = TempDir::new().unwrap();
        let extra = write_conf(
            temp_dir.path(),
            "repos.conf",
            "[testing]\nServer = http://t/$repo\n",
        );
        let main = write_conf(
            temp_dir.path(),
            "pacman.conf",
            &format!("[options]\nInclude = {}\nShowSize\n", extra.display()),
        );

        let config = parse_file(&main).unwrap();
        assert!(config.show_size);
        assert_eq!(
            config.repos.servers("testing").unwrap(),
            &["http://t/testing".to_string()]
        );
    }

    #[test]
    fn test_include_outside_section_fails() {
        let temp_dir = TempDir::new().unwrap();
        let extra = write_conf(temp_dir.path(), "stray.conf", "ShowSize\n");
        let main = write_conf(
            temp_dir.path(),
            "pacman.conf",
            &format!("Include = {}\n", extra.display()),
        );

        let err = parse_file(&main).unwrap_err();
        assert_matches!(err, ConfigError::DirectiveOutsideSection { line: 1, .. });
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_in_include_reports_included_file() {
        let temp_dir = TempDir::new().unwrap();
        let broken = write_conf(
            temp_dir.path(),
            "broken.conf",
            "Server = http://ok/$repo\n\nFoo = bar\n",
        );
        let main = write_conf(
            temp_dir.path(),
            "pacman.conf",
            &format!("[options]\nShowSize\n[core]\nInclude = {}\n", broken.display()),
        );

        let err = parse_file(&main).unwrap_err();
        assert_matches!(
            err,
            ConfigError::UnrecognisedDirective { ref key, ref file, line: 3 }
                if key == "Foo" && *file == broken
        );
        assert_eq!(
            err.to_string(),
            format!("Unrecognised directive Foo in {} on line 3", broken.display())
        );
    }

    #[test]
    fn test_include_cycle_hits_depth_limit() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.conf");
        let b = temp_dir.path().join("b.conf");
        fs::write(&a, format!("[core]\nInclude = {}\n", b.display())).unwrap();
        fs::write(&b, format!("Include = {}\n", a.display())).unwrap();

        let err = ConfigLoader::new(&a)
            .max_include_depth(8)
            .parse()
            .unwrap_err();
        assert_matches!(err, ConfigError::IncludeDepthExceeded { depth: 8, .. });
    }

    #[test]
    fn test_include_depth_within_limit() {
        let temp_dir = TempDir::new().unwrap();
        let leaf = write_conf(temp_dir.path(), "leaf.conf", "Server = http://leaf/$repo\n");
        let middle = write_conf(
            temp_dir.path(),
            "middle.conf",
            &format!("Include = {}\n", leaf.display()),
        );
        let main = write_conf(
            temp_dir.path(),
            "pacman.conf",
            &format!("[core]\nInclude = {}\n", middle.display()),
        );

        let config = ConfigLoader::new(&main)
            .max_include_depth(2)
            .parse()
            .unwrap();
        assert_eq!(
            config.repos.servers("core").unwrap(),
            &["http://leaf/core".to_string()]
        );

        let err = ConfigLoader::new(&main)
            .max_include_depth(1)
            .parse()
            .unwrap_err();
        assert_matches!(err, ConfigError::IncludeDepthExceeded { line: 1, .. });
    }

    #[test]
    fn test_missing_config_file() {
        let mut settings = Settings::new();
        let err = configure(&mut settings, Some(Path::new("/nonexistent/pacman.conf")))
            .unwrap_err();
        assert_matches!(err, ConfigError::FileOpenFailed { .. });
        // Nothing was applied
        assert_eq!(settings, Settings::new());
    }

    #[test]
    fn test_backend_rejection_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let main = write_conf(
            temp_dir.path(),
            "pacman.conf",
            "[options]\nRootDir = relative/root\n",
        );

        let mut settings = Settings::new();
        let err = ConfigLoader::new(&main).configure(&mut settings).unwrap_err();
        assert_matches!(
            err,
            ConfigError::BackendRejected(BackendError::InvalidRootPath(_))
        );
    }
}

mod applying {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_configure_full_tree() {
        let (main, _temp_dir) = create_test_tree();
        let mut settings = Settings::new();
        configure(&mut settings, Some(main.as_path())).unwrap();

        assert_eq!(settings.root_path(), "/mnt/root/");
        assert_eq!(settings.database_path(), "/mnt/root/var/lib/pacman/");
        assert_eq!(settings.log_file(), "/mnt/root/var/log/pacman.log");
        assert_eq!(
            settings.cache_paths(),
            &["/mnt/root/var/cache/pacman/pkg/".to_string()]
        );
        assert!(settings.flag(BoolOption::ShowSize));
        assert!(settings.flag(BoolOption::TotalDownload));
        assert_eq!(settings.clean_method(), "KeepInstalled");
        assert!(settings.has_local_repository());
        assert_eq!(
            settings.repository_names(),
            vec!["core", "extra", "community"]
        );
        assert_eq!(settings.find_repository("core").unwrap().len(), 3);
        assert_eq!(settings.sync_firsts(), &["pacman".to_string()]);
    }

    #[test]
    fn test_options_only_file_keeps_repositories() {
        let temp_dir = TempDir::new().unwrap();
        let main = write_conf(
            temp_dir.path(),
            "pacman.conf",
            "[options]\nCleanMethod = KeepCurrent\nUseSyslog\n",
        );

        let mut settings = Settings::new();
        settings.register_local_repository().unwrap();
        settings.register_repository("custom").unwrap();
        settings.repository_add_server("custom", "file:///srv/custom");

        configure(&mut settings, Some(main.as_path())).unwrap();

        assert_eq!(settings.repository_names(), vec!["custom"]);
        assert_eq!(
            settings.find_repository("custom").unwrap(),
            &["file:///srv/custom".to_string()]
        );
        assert_eq!(settings.clean_method(), "KeepCurrent");
        assert!(settings.flag(BoolOption::UseSyslog));
    }

    #[test]
    fn test_configure_is_idempotent() {
        let (main, _temp_dir) = create_test_tree();

        let mut first = Settings::new();
        let mut second = Settings::new();
        configure(&mut first, Some(main.as_path())).unwrap();
        configure(&mut second, Some(main.as_path())).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_transfer_command_reaches_backend() {
        let temp_dir = TempDir::new().unwrap();
        let main = write_conf(
            temp_dir.path(),
            "pacman.conf",
            "[options]\nXferCommand = /usr/bin/wget --passive-ftp -c -O %o %u\n",
        );

        let mut settings = Settings::new();
        configure(&mut settings, Some(main.as_path())).unwrap();

        let command = settings.transfer_command().unwrap();
        let prepared = command.prepare(
            "http://mirror.example/core/os/x86_64/core.db",
            Path::new("/var/lib/pacman/sync"),
        );
        assert_eq!(
            prepared.part_file,
            Some(PathBuf::from("/var/lib/pacman/sync/core.db.part"))
        );
    }
}
