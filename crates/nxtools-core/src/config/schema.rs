//! Configuration schema for ~/.nxtools/config
//!
//! The file is YAML and every key is optional. Key names are shared with
//! configs written for the older deployment scripts and must stay stable.

use serde::Deserialize;

/// Root structure of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Nexus installation home (`~` is expanded)
    #[serde(default)]
    pub nexus_home: Option<String>,

    /// Directory holding the `nexus` wrapper script
    #[serde(default)]
    pub nexus_bin: Option<String>,

    /// Prefix wrapper invocations with `sudo`
    #[serde(default)]
    pub use_sudo: Option<bool>,

    /// Maven goals for `deploy`, whitespace separated
    #[serde(default)]
    pub maven_goals: Option<String>,

    /// Plugin module directories deployed into Nexus
    #[serde(default)]
    pub plugins: Option<Vec<String>>,

    /// Version of the deployed plugin bundles
    #[serde(default)]
    pub plugin_version: Option<String>,

    /// Xaven installer overrides
    #[serde(default)]
    pub install: Option<InstallSection>,
}

/// `install:` section overriding the Xaven installer plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstallSection {
    #[serde(default)]
    pub target_root: Option<String>,

    #[serde(default)]
    pub main_module: Option<String>,

    #[serde(default)]
    pub libraries: Option<Vec<String>>,

    #[serde(default)]
    pub stale_versions: Option<Vec<String>>,

    #[serde(default)]
    pub version_references: Option<Vec<String>>,

    /// Ordered argument vectors; `%file`, `%dir` and `%name` are substituted
    #[serde(default)]
    pub unpack_steps: Option<Vec<Vec<String>>>,

    #[serde(default)]
    pub build_command: Option<Vec<String>>,
}

impl ConfigFile {
    /// Reject values that parse but cannot be executed.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(goals) = &self.maven_goals {
            if goals.split_whitespace().next().is_none() {
                return Err("'maven-goals' must name at least one goal".to_string());
            }
        }

        let Some(install) = &self.install else {
            return Ok(());
        };

        if let Some(steps) = &install.unpack_steps {
            if let Some(index) = steps.iter().position(|step| step.is_empty()) {
                return Err(format!("'install.unpack-steps' entry {} is empty", index + 1));
            }
        }

        if let Some(build) = &install.build_command {
            if build.is_empty() {
                return Err("'install.build-command' must not be empty".to_string());
            }
        }

        Ok(())
    }
}
