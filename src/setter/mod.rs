//! Applying a cached image as the desktop background.
//!
//! One backend per platform. Failures here are reported and swallowed
//! rather than raised, so a run that already produced a usable image on
//! disk still counts for the caller.

mod gnome;
mod macos;
#[cfg(windows)]
mod windows;

use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::platform::Platform;

/// Set `image_path` as the desktop background for `platform`.
///
/// Returns whether the platform mechanism reported success. A missing image
/// or an unrecognized platform fails fast without invoking anything.
pub fn apply(platform: Platform, image_path: &Path) -> bool {
    if !image_path.is_file() {
        eprintln!(
            "{}",
            format!("Wallpaper image {} does not exist", image_path.display()).red()
        );
        return false;
    }

    let result = match platform {
        Platform::Linux => gnome::apply_wallpaper(image_path),
        Platform::MacOs => macos::apply_wallpaper(image_path),
        Platform::Windows => apply_windows(image_path),
        Platform::Unknown => {
            eprintln!(
                "{}",
                "Cannot set a wallpaper on an unrecognized platform".red()
            );
            return false;
        }
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{}", format!("Failed to set wallpaper: {e:#}").red());
            false
        }
    }
}

#[cfg(windows)]
fn apply_windows(image_path: &Path) -> Result<()> {
    windows::apply_wallpaper(image_path)
}

#[cfg(not(windows))]
fn apply_windows(_image_path: &Path) -> Result<()> {
    anyhow::bail!("this build was compiled without Windows wallpaper support")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_images_are_rejected_before_any_desktop_call() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");
        assert!(!apply(Platform::Linux, &missing));
        assert!(!apply(Platform::Unknown, &missing));
    }

    #[test]
    fn unknown_platforms_never_apply() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("present.jpg");
        std::fs::write(&image, b"jpeg").unwrap();
        assert!(!apply(Platform::Unknown, &image));
    }
}
