//! Execute a plugin deployment against a local Nexus.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::DeploymentConfig;
use crate::deploy::bundle::extract_bundle;
use crate::descriptor::{ArtifactDescriptor, PLUGIN_BUNDLE_SUFFIX};
use crate::error::{FailureSite, NxError, Result};
use crate::fs::remove_path_if_exists;
use crate::process::{CommandRunner, CommandSpec, run_checked};
use crate::service::{ServiceAction, ServiceControl};

pub const MAVEN: &str = "mvn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    /// Previously installed plugin directories that were removed
    pub removed: Vec<PathBuf>,
    /// Bundles unpacked into the plugin repository
    pub bundles: Vec<PathBuf>,
}

pub struct PluginDeployer<'a> {
    config: &'a DeploymentConfig,
    workspace: PathBuf,
    runner: &'a dyn CommandRunner,
}

impl<'a> PluginDeployer<'a> {
    pub fn new(
        config: &'a DeploymentConfig,
        workspace: PathBuf,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            config,
            workspace,
            runner,
        }
    }

    pub fn deploy(&self) -> Result<DeployReport> {
        // Nexus may need to be up for the build, so stop it only afterwards.
        let build = CommandSpec::new(MAVEN)
            .args(self.config.goals())
            .current_dir(&self.workspace);
        run_checked(self.runner, &build, FailureSite::DeployBuild)?;

        let service = ServiceControl::from_config(self.config);
        info!("Stopping Nexus...");
        service.run(self.runner, ServiceAction::Stop)?;

        let repository = self.config.plugin_repository();

        let mut removed = Vec::new();
        for plugin in &self.config.plugins {
            let installed = repository.join(format!("{}-{}", plugin, self.config.plugin_version));
            let existed = remove_path_if_exists(&installed).map_err(|source| {
                NxError::RemoveFailed {
                    path: installed.clone(),
                    source,
                }
            })?;
            if existed {
                info!("Removed {}", installed.display());
                removed.push(installed);
            }
        }

        let mut bundles = Vec::new();
        for plugin in &self.config.plugins {
            let bundle = self.bundle_path(plugin);
            info!("Unpacking {} into {}...", bundle.display(), repository.display());
            extract_bundle(&bundle, &repository)?;
            bundles.push(bundle);
        }

        info!("Starting Nexus...");
        service.run(self.runner, ServiceAction::Start)?;
        info!("Nexus log: {}", self.config.wrapper_log().display());

        Ok(DeployReport { removed, bundles })
    }

    /// `{plugin}/target/{plugin}-{version}-bundle.zip`
    pub fn bundle_path(&self, plugin: &str) -> PathBuf {
        ArtifactDescriptor::from_coordinates(
            &self.workspace.join(plugin),
            plugin,
            &self.config.plugin_version,
            PLUGIN_BUNDLE_SUFFIX,
        )
        .output_path
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }
}
