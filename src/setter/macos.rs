use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Tell the Finder to use the image as the desktop picture.
pub fn apply_wallpaper(path: &Path) -> Result<()> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve wallpaper path {}", path.display()))?;
    run_osascript("osascript", &finder_script(&absolute))
}

fn finder_script(absolute: &Path) -> String {
    format!(
        r#"tell application "Finder" to set desktop picture to POSIX file "{}""#,
        absolute.display()
    )
}

fn run_osascript(program: &str, script: &str) -> Result<()> {
    let output = Command::new(program)
        .args(["-e", script])
        .output()
        .with_context(|| format!("Failed to execute {program}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("osascript failed: {}", stderr.trim());
    }
    Ok(())
}
