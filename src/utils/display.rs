use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Whether a graphical session is likely to be able to show a window
pub fn display_available() -> bool {
    display_available_with(|key| std::env::var(key).ok())
}

/// Display detection against an arbitrary variable lookup
pub fn display_available_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|key| lookup(key).map_or(false, |v| !v.trim().is_empty()))
}

/// Hand the image to the platform's default viewer without waiting for it
pub fn open_in_viewer(path: &Path) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    let child = command.arg(path).spawn()?;
    debug!("Opened {} in viewer (pid {})", path.display(), child.id());
    Ok(())
}
