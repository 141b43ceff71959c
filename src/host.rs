use std::io;
use std::path::Path;
use std::process::Command;

/// Side effects on the machine running the listing service.
pub trait HostActions: Send + Sync {
    /// Opens `path` with the desktop's default application.
    fn open(&self, path: &Path) -> io::Result<()>;
    /// Moves `path` to the trash.
    fn trash(&self, path: &Path) -> io::Result<()>;
}

/// The real desktop: platform opener plus the system trash.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostActions for SystemHost {
    fn open(&self, path: &Path) -> io::Result<()> {
        let status = opener_command(path).status()?;
        if !status.success() {
            return Err(io::Error::other(format!("opener exited with {}", status)));
        }
        Ok(())
    }

    fn trash(&self, path: &Path) -> io::Result<()> {
        trash::delete(path).map_err(|e| io::Error::other(e.to_string()))
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(windows)]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(all(unix, not(target_os = "macos")))]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
