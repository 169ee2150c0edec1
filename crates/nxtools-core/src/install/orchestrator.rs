//! Staged Xaven install.
//!
//! Stages run strictly in order and the first failure ends the run. Nothing
//! is rolled back: a failure in a later stage leaves earlier stages applied.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::descriptor::{ArtifactDescriptor, DISTRIBUTION_SUFFIX, LIBRARY_SUFFIX};
use crate::error::{FailureSite, NxError, Result};
use crate::fs::{copy_into_dir, remove_path_if_exists};
use crate::install::plan::{InstallPlan, InstallTarget};
use crate::install::versions::adjust_versions;
use crate::process::{CommandRunner, CommandSpec, Placeholders, run_checked};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Version of the main distribution
    pub version: String,
    pub distro_name: String,
    /// Module directories rebuilt; the workspace root for a full rebuild
    pub built: Vec<PathBuf>,
    /// Whether the distribution was removed and unpacked again
    pub distro_installed: bool,
    /// Library artifacts copied into the extension directory
    pub libraries: Vec<PathBuf>,
    /// Reference files whose version markers were rewritten
    pub adjusted: Vec<PathBuf>,
}

/// Descriptors resolved before any work starts.
#[derive(Debug)]
struct ResolvedModules {
    distro: ArtifactDescriptor,
    libraries: Vec<ArtifactDescriptor>,
}

pub struct Installer<'a> {
    plan: &'a InstallPlan,
    workspace: PathBuf,
    runner: &'a dyn CommandRunner,
}

impl<'a> Installer<'a> {
    /// `workspace` is the source tree root that module paths are relative to.
    pub fn new(plan: &'a InstallPlan, workspace: PathBuf, runner: &'a dyn CommandRunner) -> Self {
        let workspace = std::path::absolute(&workspace).unwrap_or(workspace);
        Self {
            plan,
            workspace,
            runner,
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Install everything (`modules` empty) or just the listed library modules.
    pub fn install(&self, modules: &[PathBuf]) -> Result<InstallReport> {
        let full = modules.is_empty();
        let resolved = self.resolve(modules)?;
        let target = self.plan.target(&resolved.distro.name);

        let built = self.build(modules)?;

        if full {
            self.install_distro(&resolved.distro, &target)?;
        }

        let libraries = self.install_libs(&resolved.libraries, &target)?;

        let adjusted = if full {
            adjust_versions(
                &self.plan.version_references,
                &self.plan.stale_versions,
                &resolved.distro.version,
            )?
        } else {
            Vec::new()
        };

        Ok(InstallReport {
            version: resolved.distro.version,
            distro_name: resolved.distro.name,
            built,
            distro_installed: full,
            libraries,
            adjusted,
        })
    }

    /// Read every descriptor the run needs so a bad POM fails before any work.
    fn resolve(&self, modules: &[PathBuf]) -> Result<ResolvedModules> {
        let distro = ArtifactDescriptor::read(
            &self.module_dir(&self.plan.main_module),
            DISTRIBUTION_SUFFIX,
        )?;

        let libs = if modules.is_empty() {
            self.plan.libraries.as_slice()
        } else {
            modules
        };
        let libraries = libs
            .iter()
            .map(|lib| ArtifactDescriptor::read(&self.module_dir(lib), LIBRARY_SUFFIX))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedModules { distro, libraries })
    }

    fn build(&self, modules: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let dirs = if modules.is_empty() {
            info!("Rebuilding everything...");
            vec![self.workspace.clone()]
        } else {
            modules.iter().map(|m| self.module_dir(m)).collect()
        };

        for dir in &dirs {
            if !modules.is_empty() {
                info!("Rebuilding {}...", dir.display());
            }
            let command = self.build_command()?.current_dir(dir);
            run_checked(self.runner, &command, FailureSite::InstallBuild)?;
        }

        Ok(dirs)
    }

    fn install_distro(&self, distro: &ArtifactDescriptor, target: &InstallTarget) -> Result<()> {
        let distro_dir = target.distro_dir();
        info!("Removing old copy of {}...", distro.name);
        remove_path_if_exists(&distro_dir).map_err(|source| NxError::RemoveFailed {
            path: distro_dir.clone(),
            source,
        })?;

        info!("Unpacking new copy...");
        let values = Placeholders {
            file: &distro.output_path,
            dir: &target.root,
            name: &distro.name,
        };
        for template in &self.plan.unpack_steps {
            let command = template.render(&values).ok_or(NxError::EmptyCommand {
                site: FailureSite::Unpack,
            })?;
            run_checked(self.runner, &command, FailureSite::Unpack)?;
        }

        Ok(())
    }

    fn install_libs(
        &self,
        libraries: &[ArtifactDescriptor],
        target: &InstallTarget,
    ) -> Result<Vec<PathBuf>> {
        let ext_dir = target.ext_dir();
        let mut installed = Vec::with_capacity(libraries.len());
        for lib in libraries {
            info!("Installing {} to {}...", lib.name, ext_dir.display());
            let dest = copy_into_dir(&lib.output_path, &ext_dir).map_err(|source| {
                NxError::CopyFailed {
                    from: lib.output_path.clone(),
                    to: ext_dir.clone(),
                    source,
                }
            })?;
            installed.push(dest);
        }
        Ok(installed)
    }

    fn module_dir(&self, module: &Path) -> PathBuf {
        self.workspace.join(module)
    }

    fn build_command(&self) -> Result<CommandSpec> {
        CommandSpec::from_argv(&self.plan.build_command).ok_or(NxError::EmptyCommand {
            site: FailureSite::InstallBuild,
        })
    }
}
