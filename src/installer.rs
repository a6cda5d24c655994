//! Dependency installation for the generated project.

use crate::error::{Error, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Debug, Default, Clone, Copy)]
pub struct InstallOptions {
    pub skip_install: bool,
    pub skip_message: bool,
}

/// Installs the generated project's dependencies.
pub trait Installer {
    fn install(&self, project_root: &Path, options: InstallOptions) -> Result<()>;
}

/// Runs package manager commands in the project root.
pub struct CommandInstaller {
    npm: PathBuf,
    bower: PathBuf,
}

impl Default for CommandInstaller {
    fn default() -> Self {
        Self::new("npm", "bower")
    }
}

impl CommandInstaller {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(npm: P, bower: Q) -> Self {
        Self { npm: npm.into(), bower: bower.into() }
    }

    /// Package manager commands this project needs, in run order.
    pub fn commands(&self, project_root: &Path) -> Vec<&Path> {
        let mut commands = Vec::new();
        if project_root.join("package.json").is_file() {
            commands.push(self.npm.as_path());
        }
        if project_root.join("bower.json").is_file() {
            commands.push(self.bower.as_path());
        }
        commands
    }
}

/// Hint printed when installation is skipped.
pub fn manual_install_message(commands: &[&Path]) -> Option<String> {
    if commands.is_empty() {
        return None;
    }
    let steps: Vec<String> = commands
        .iter()
        .map(|c| format!("{} install", c.display()))
        .collect();
    Some(format!(
        "I'm all done. Just run {} to install the required dependencies.",
        steps.join(" & ")
    ))
}

impl Installer for CommandInstaller {
    fn install(&self, project_root: &Path, options: InstallOptions) -> Result<()> {
        let commands = self.commands(project_root);
        if options.skip_install {
            debug!("Skipping dependency installation");
            if !options.skip_message {
                if let Some(message) = manual_install_message(&commands) {
                    println!("\n{}", message);
                }
            }
            return Ok(());
        }

        for command in commands {
            info!("Running {} install", command.display());
            let status = Command::new(command)
                .arg("install")
                .current_dir(project_root)
                .stdin(Stdio::null())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| {
                    Error::InstallError(format!("failed to run {}: {}", command.display(), e))
                })?;

            if !status.success() {
                return Err(Error::InstallError(format!(
                    "{} install failed with status: {}",
                    command.display(),
                    status
                )));
            }
        }
        Ok(())
    }
}
