//! Deployment configuration
//!
//! The configuration is resolved once per run: an explicit set of defaults
//! is built for the current home directory, then any keys present in
//! `~/.nxtools/config` replace the matching defaults. Nothing mutates the
//! result afterwards.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

use std::path::{Path, PathBuf};

pub use parser::{parse_config_file, parse_config_str};
pub use paths::{default_config_path, expand_tilde};
pub use schema::{ConfigFile, InstallSection};
pub use store::ConfigStore;

use crate::install::InstallPlan;

pub const DEFAULT_NEXUS_HOME: &str = "~/apps/nexus";
pub const DEFAULT_NEXUS_BIN: &str = "~/apps/nexus/current/bin/jsw/macosx-universal-32";
pub const DEFAULT_MAVEN_GOALS: &str = "clean install";
pub const DEFAULT_PLUGINS: &[&str] = &["nexus-autonx-plugin"];
pub const DEFAULT_PLUGIN_VERSION: &str = "1.0-SNAPSHOT";

/// Resolved deployment parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    /// Nexus installation home
    pub home_dir: PathBuf,
    /// Directory containing the `nexus` wrapper script
    pub bin_dir: PathBuf,
    pub use_sudo: bool,
    /// Maven goals used by `deploy`
    pub build_goals: String,
    pub plugins: Vec<String>,
    pub plugin_version: String,
    pub install: InstallPlan,
}

impl DeploymentConfig {
    /// The full default set, with `~` expanded against `home`.
    pub fn defaults(home: &Path) -> Self {
        Self {
            home_dir: expand_tilde(DEFAULT_NEXUS_HOME, home),
            bin_dir: expand_tilde(DEFAULT_NEXUS_BIN, home),
            use_sudo: false,
            build_goals: DEFAULT_MAVEN_GOALS.to_string(),
            plugins: DEFAULT_PLUGINS.iter().map(|p| p.to_string()).collect(),
            plugin_version: DEFAULT_PLUGIN_VERSION.to_string(),
            install: InstallPlan::defaults(home),
        }
    }

    /// Overlay the keys present in `file`; absent keys keep their current value.
    pub fn merge(self, file: ConfigFile, home: &Path) -> Self {
        Self {
            home_dir: file
                .nexus_home
                .map(|raw| expand_tilde(&raw, home))
                .unwrap_or(self.home_dir),
            bin_dir: file
                .nexus_bin
                .map(|raw| expand_tilde(&raw, home))
                .unwrap_or(self.bin_dir),
            use_sudo: file.use_sudo.unwrap_or(self.use_sudo),
            build_goals: file.maven_goals.unwrap_or(self.build_goals),
            plugins: file.plugins.unwrap_or(self.plugins),
            plugin_version: file.plugin_version.unwrap_or(self.plugin_version),
            install: match file.install {
                Some(section) => self.install.merge(section, home),
                None => self.install,
            },
        }
    }

    /// Maven goals as separate arguments.
    pub fn goals(&self) -> Vec<String> {
        self.build_goals
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// `{nexus-home}/sonatype-work/nexus/plugin-repository`
    pub fn plugin_repository(&self) -> PathBuf {
        self.home_dir
            .join("sonatype-work")
            .join("nexus")
            .join("plugin-repository")
    }

    /// `{nexus-home}/current/logs/wrapper.log`
    pub fn wrapper_log(&self) -> PathBuf {
        self.home_dir.join("current").join("logs").join("wrapper.log")
    }
}
