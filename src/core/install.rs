//! Package installation after files are written.

use std::path::Path;

use crate::error::{Error, InstallFailedDetails, Result};
use crate::utils::command;

#[cfg(windows)]
const NPM: &str = "npm.cmd";
#[cfg(not(windows))]
const NPM: &str = "npm";

/// Run `npm install` in the project root.
pub fn npm_install(project_root: &Path) -> Result<()> {
    run_installer(project_root, NPM, &["install"])
}

pub(crate) fn run_installer(project_root: &Path, program: &str, args: &[&str]) -> Result<()> {
    let display = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    log_status!("install", "Running {} in {}", display, project_root.display());

    let output = command::output_in(project_root, program, args, &display)?;
    if !output.status.success() {
        return Err(Error::install_failed(InstallFailedDetails {
            command: display,
            exit_code: output.status.code(),
            output: command::error_text(&output),
        }));
    }

    Ok(())
}
