use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_yearshelf_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("YEARSHELF_CONFIG_PATH", "/tmp/yearshelf-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/yearshelf-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("yearshelf")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("yearshelf")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_sequential_copy_if_absent() {
    let s = Settings::default();
    assert!(!s.organize.overwrite);
    assert!(!s.organize.unknown_year_folder);
    assert!(!s.organize.update_newer);
    assert_eq!(s.organize.workers, 1);
    assert_eq!(s.organize.year_count, YearCountSetting::OnCopy);
    assert_eq!(s.resolver.min_year, 1900);
    assert!(s.resolver.max_year.is_none());
    assert!(s.library.extensions.iter().any(|e| e == "flac"));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_count_policy_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[organize]
overwrite = true
unknown_year_folder = true
workers = 4
queue_capacity = 8
year_count = "resolved"

[library]
extensions = ["mp3", "opus"]
include_hidden = false
follow_links = true
max_depth = 3

[resolver]
tag_names = ["year"]
min_year = 1950
max_year = 2030
use_path = false

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("YEARSHELF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("YEARSHELF__ORGANIZE__WORKERS");

    let s = Settings::load().unwrap();
    assert!(s.organize.overwrite);
    assert!(s.organize.unknown_year_folder);
    assert_eq!(s.organize.workers, 4);
    assert_eq!(s.organize.queue_capacity, 8);
    assert_eq!(s.organize.year_count, YearCountSetting::OnResolve);
    assert!(s.organize.preserve_mtime);
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "opus".to_string()]);
    assert!(!s.library.include_hidden);
    assert!(s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert_eq!(s.resolver.tag_names, vec!["year".to_string()]);
    assert_eq!(s.resolver.min_year, 1950);
    assert_eq!(s.resolver.max_year, Some(2030));
    assert!(s.resolver.use_filename);
    assert!(!s.resolver.use_path);
    assert_eq!(s.logging.level, "debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[organize]
workers = 2
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("YEARSHELF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("YEARSHELF__ORGANIZE__WORKERS", "6");

    let s = Settings::load().unwrap();
    assert_eq!(s.organize.workers, 6);
}

#[test]
fn validate_rejects_inverted_year_range_and_empty_extensions() {
    let mut s = Settings::default();
    s.resolver.min_year = 2000;
    s.resolver.max_year = Some(1990);
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec![" . ".to_string(), String::new()];
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.organize.queue_capacity = 0;
    assert!(s.validate().is_err());
}
