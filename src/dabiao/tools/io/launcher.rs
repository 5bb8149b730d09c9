use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use crate::dabiao::tools::error::{Result, ToolError};

/// Opens `path` with the platform's default application and waits for the
/// launcher to return.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn open_in_default_app(path: &Path) -> Result<()> {
    let mut command = launcher_command(path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    debug!(?command, "spawning launcher");
    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(ToolError::Launch {
            path: path.to_path_buf(),
            status: status.to_string(),
        })
    }
}

#[cfg(target_os = "windows")]
fn launcher_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    // The empty argument is the window title expected by `start`.
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(target_os = "macos")]
fn launcher_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn launcher_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
