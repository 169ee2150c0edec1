//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use crate::config::{ConfigStore, DeploymentConfig, default_config_path};
use crate::deploy::PluginDeployer;
use crate::error::Result;
use crate::install::Installer;
use crate::process::CommandRunner;

/// Paths shared by every command.
///
/// Frontends create this once and pass it to commands.
#[derive(Debug, Clone)]
pub struct AppContext {
    home_dir: PathBuf,
    workspace_root: PathBuf,
    config_path: PathBuf,
}

impl AppContext {
    /// Context using the default config location under `home_dir`.
    pub fn new(home_dir: PathBuf, workspace_root: PathBuf) -> Self {
        let config_path = default_config_path(&home_dir);
        Self::with_config_path(home_dir, workspace_root, config_path)
    }

    pub fn with_config_path(
        home_dir: PathBuf,
        workspace_root: PathBuf,
        config_path: PathBuf,
    ) -> Self {
        Self {
            home_dir,
            workspace_root,
            config_path,
        }
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::from_paths(self.config_path.clone(), self.home_dir.clone())
    }

    pub fn load_config(&self) -> Result<DeploymentConfig> {
        self.config_store().load()
    }

    pub fn installer<'a>(
        &self,
        config: &'a DeploymentConfig,
        runner: &'a dyn CommandRunner,
    ) -> Installer<'a> {
        Installer::new(&config.install, self.workspace_root.clone(), runner)
    }

    pub fn deployer<'a>(
        &self,
        config: &'a DeploymentConfig,
        runner: &'a dyn CommandRunner,
    ) -> PluginDeployer<'a> {
        PluginDeployer::new(config, self.workspace_root.clone(), runner)
    }
}
