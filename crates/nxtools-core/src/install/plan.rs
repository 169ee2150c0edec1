//! The Xaven install plan: where things come from and where they go.

use std::path::{Path, PathBuf};

use crate::config::{InstallSection, expand_tilde};
use crate::process::CommandTemplate;

pub const DEFAULT_TARGET_ROOT: &str = "~/apps/xaven";
pub const DEFAULT_MAIN_MODULE: &str = "distro/maven3";
pub const DEFAULT_LIBRARIES: &[&str] = &[
    "events/api",
    "events/m3-resolver-events",
    "integration/autonx-m3-resolver",
    "examples/resolution-logger",
];
pub const DEFAULT_STALE_VERSIONS: &[&str] = &["1.0-SNAPSHOT"];
pub const DEFAULT_VERSION_REFERENCES: &[&str] = &["~/bin/xvn", "~/bin/xvnDebug"];
pub const DEFAULT_BUILD_COMMAND: &[&str] = &["mvn", "clean", "install"];
pub const DEFAULT_UNPACK_STEP: &[&str] = &["tar", "-xzf", "%file", "-C", "%dir"];

pub const EXTENSION_DIR: &str = "ext";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// Directory the distribution is unpacked into
    pub target_root: PathBuf,
    /// Module producing the distribution archive, relative to the workspace
    pub main_module: PathBuf,
    /// Library modules installed when no explicit module list is given
    pub libraries: Vec<PathBuf>,
    pub stale_versions: Vec<String>,
    /// Files whose stale version markers are rewritten after a full install
    pub version_references: Vec<PathBuf>,
    pub unpack_steps: Vec<CommandTemplate>,
    pub build_command: Vec<String>,
}

impl InstallPlan {
    pub fn defaults(home: &Path) -> Self {
        Self {
            target_root: expand_tilde(DEFAULT_TARGET_ROOT, home),
            main_module: PathBuf::from(DEFAULT_MAIN_MODULE),
            libraries: DEFAULT_LIBRARIES.iter().map(PathBuf::from).collect(),
            stale_versions: to_strings(DEFAULT_STALE_VERSIONS),
            version_references: DEFAULT_VERSION_REFERENCES
                .iter()
                .map(|raw| expand_tilde(raw, home))
                .collect(),
            unpack_steps: vec![CommandTemplate::new(DEFAULT_UNPACK_STEP.iter().copied())],
            build_command: to_strings(DEFAULT_BUILD_COMMAND),
        }
    }

    /// Overlay the keys present in an `install:` config section.
    pub fn merge(self, section: InstallSection, home: &Path) -> Self {
        Self {
            target_root: section
                .target_root
                .map(|raw| expand_tilde(&raw, home))
                .unwrap_or(self.target_root),
            main_module: section
                .main_module
                .map(PathBuf::from)
                .unwrap_or(self.main_module),
            libraries: section
                .libraries
                .map(|libs| libs.into_iter().map(PathBuf::from).collect())
                .unwrap_or(self.libraries),
            stale_versions: section.stale_versions.unwrap_or(self.stale_versions),
            version_references: section
                .version_references
                .map(|refs| refs.iter().map(|raw| expand_tilde(raw, home)).collect())
                .unwrap_or(self.version_references),
            unpack_steps: section
                .unpack_steps
                .map(|steps| steps.into_iter().map(CommandTemplate::new).collect())
                .unwrap_or(self.unpack_steps),
            build_command: section.build_command.unwrap_or(self.build_command),
        }
    }

    pub fn target(&self, distro_name: &str) -> InstallTarget {
        InstallTarget {
            root: self.target_root.clone(),
            distro_name: distro_name.to_string(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Install root plus the name of the distribution unpacked into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub root: PathBuf,
    pub distro_name: String,
}

impl InstallTarget {
    /// `{root}/{distro_name}`
    pub fn distro_dir(&self) -> PathBuf {
        self.root.join(&self.distro_name)
    }

    /// `{root}/{distro_name}/ext`
    pub fn ext_dir(&self) -> PathBuf {
        self.distro_dir().join(EXTENSION_DIR)
    }
}
