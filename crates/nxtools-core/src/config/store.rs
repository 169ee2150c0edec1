//! Config store for loading ~/.nxtools/config.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{DeploymentConfig, parser, paths::default_config_path};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
    home_dir: PathBuf,
}

impl ConfigStore {
    /// Store for the default location under `home_dir`.
    pub fn for_home(home_dir: PathBuf) -> Self {
        let config_path = default_config_path(&home_dir);
        Self::from_paths(config_path, home_dir)
    }

    pub fn from_paths(config_path: PathBuf, home_dir: PathBuf) -> Self {
        Self {
            config_path,
            home_dir,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Resolve the deployment configuration.
    ///
    /// A missing file is the normal case and yields the defaults. Only a file
    /// that exists but cannot be read or parsed is an error.
    pub fn load(&self) -> Result<DeploymentConfig> {
        info!(
            "attempting to read configuration from: {}",
            self.config_path.display()
        );

        let defaults = DeploymentConfig::defaults(&self.home_dir);

        if !self.config_path.exists() {
            info!("default configuration: {:#?}", defaults);
            return Ok(defaults);
        }

        let file = parser::parse_config_file(&self.config_path)?;
        let config = defaults.merge(file, &self.home_dir);
        info!("read configuration: {:#?}", config);
        Ok(config)
    }
}
