//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// `~/.nxtools/config`
pub fn default_config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".nxtools").join("config")
}

/// Expand a leading `~` against `home_dir`.
///
/// Only `~` and `~/...` are expanded; `~user` forms are left untouched.
pub fn expand_tilde(raw: &str, home_dir: &Path) -> PathBuf {
    if raw == "~" {
        return home_dir.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home_dir.join(rest),
        None => PathBuf::from(raw),
    }
}
