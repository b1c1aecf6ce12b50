use std::ffi::c_void;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use anyhow::{Context, Result};
use windows::Win32::UI::WindowsAndMessaging::{
    SPI_SETDESKWALLPAPER, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SystemParametersInfoW,
};

/// Point the desktop at the image through the Win32 system parameter call.
///
/// `SPIF_UPDATEINIFILE` persists the choice across sessions and
/// `SPIF_SENDCHANGE` broadcasts it so the desktop repaints immediately.
pub fn apply_wallpaper(path: &Path) -> Result<()> {
    // canonicalize would produce a \\?\ path, which the SPI call rejects
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve wallpaper path {}", path.display()))?;
    let mut wide: Vec<u16> = absolute.as_os_str().encode_wide().chain(Some(0)).collect();

    unsafe {
        SystemParametersInfoW(
            SPI_SETDESKWALLPAPER,
            0,
            Some(wide.as_mut_ptr() as *mut c_void),
            SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
        )
    }
    .context("SystemParametersInfoW rejected the wallpaper")
}
