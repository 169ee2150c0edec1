//! Nexus service control through the `nexus` wrapper script.

use std::path::PathBuf;

use tracing::info;

use crate::config::DeploymentConfig;
use crate::error::{FailureSite, Result};
use crate::process::{CommandRunner, CommandSpec, run_checked};

pub const WRAPPER_SCRIPT: &str = "nexus";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

impl ServiceAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
        }
    }

    fn failure_site(self) -> FailureSite {
        match self {
            ServiceAction::Stop => FailureSite::StopService,
            ServiceAction::Start | ServiceAction::Restart => FailureSite::StartService,
        }
    }
}

/// Builds and runs `[sudo] {nexus-bin}/nexus <action>`.
#[derive(Debug, Clone)]
pub struct ServiceControl {
    script: PathBuf,
    use_sudo: bool,
}

impl ServiceControl {
    pub fn new(script: PathBuf, use_sudo: bool) -> Self {
        Self { script, use_sudo }
    }

    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self::new(config.bin_dir.join(WRAPPER_SCRIPT), config.use_sudo)
    }

    pub fn command(&self, action: ServiceAction) -> CommandSpec {
        let script = self.script.to_string_lossy().to_string();
        if self.use_sudo {
            CommandSpec::new("sudo").arg(script).arg(action.as_str())
        } else {
            CommandSpec::new(script).arg(action.as_str())
        }
    }

    pub fn run(&self, runner: &dyn CommandRunner, action: ServiceAction) -> Result<()> {
        run_checked(runner, &self.command(action), action.failure_site())
    }
}

/// Restart Nexus.
pub fn restart(config: &DeploymentConfig, runner: &dyn CommandRunner) -> Result<()> {
    info!("Restarting Nexus...");
    ServiceControl::from_config(config).run(runner, ServiceAction::Restart)?;
    info!("Nexus log: {}", config.wrapper_log().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_without_sudo_runs_script_directly() {
        let control = ServiceControl::new(PathBuf::from("/opt/nexus/bin/nexus"), false);
        let spec = control.command(ServiceAction::Stop);
        assert_eq!(spec.program, "/opt/nexus/bin/nexus");
        assert_eq!(spec.args, vec!["stop"]);
    }

    #[test]
    fn command_with_sudo_prefixes_script() {
        let control = ServiceControl::new(PathBuf::from("/opt/nexus/bin/nexus"), true);
        let spec = control.command(ServiceAction::Start);
        assert_eq!(spec.program, "sudo");
        assert_eq!(spec.args, vec!["/opt/nexus/bin/nexus", "start"]);
    }

    #[test]
    fn restart_failures_report_as_start_failures() {
        assert_eq!(ServiceAction::Restart.failure_site().exit_code(), 4);
        assert_eq!(ServiceAction::Start.failure_site().exit_code(), 4);
        assert_eq!(ServiceAction::Stop.failure_site().exit_code(), 5);
    }
}
