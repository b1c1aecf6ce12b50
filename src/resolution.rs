//! Screen resolution detection.
//!
//! Each platform gets an ordered list of probes; the first one that reports
//! a usable size wins. Probe failures are absorbed, and when the whole list
//! comes up empty the fixed default is used so the archive request can still
//! be made.

use std::fmt;
use std::process::Command;

use colored::*;
use regex::Regex;

use crate::platform::Platform;

/// Size requested from the wallpaper service when every probe fails.
pub const FALLBACK: Resolution = Resolution {
    width: 1920,
    height: 1080,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Detect the current display resolution for the given platform.
pub fn detect(platform: Platform) -> Resolution {
    let probes: &[fn() -> Option<Resolution>] = match platform {
        Platform::Linux => &[probe_wayland_outputs, probe_xrandr],
        Platform::MacOs => &[probe_system_profiler],
        #[cfg(windows)]
        Platform::Windows => &[probe_win32_metrics],
        #[cfg(not(windows))]
        Platform::Windows => &[],
        Platform::Unknown => &[],
    };

    for probe in probes {
        if let Some(resolution) = probe() {
            return resolution;
        }
    }

    eprintln!(
        "{}",
        format!("Could not detect screen resolution, assuming {FALLBACK}").yellow()
    );
    FALLBACK
}

/// Ask a sway-compatible Wayland compositor for the active output size.
fn probe_wayland_outputs() -> Option<Resolution> {
    if std::env::var("WAYLAND_DISPLAY").is_err() || which::which("swaymsg").is_err() {
        return None;
    }

    let output = Command::new("swaymsg")
        .args(["-t", "get_outputs"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    parse_sway_outputs(&String::from_utf8_lossy(&output.stdout))
}

fn parse_sway_outputs(json: &str) -> Option<Resolution> {
    let outputs: serde_json::Value = serde_json::from_str(json).ok()?;
    for output in outputs.as_array()? {
        if output["active"].as_bool().unwrap_or(false)
            && let (Some(width), Some(height)) = (
                output["rect"]["width"].as_u64(),
                output["rect"]["height"].as_u64(),
            )
        {
            return Some(Resolution {
                width: width as u32,
                height: height as u32,
            });
        }
    }
    None
}

/// Read the virtual screen size from the xrandr summary line.
fn probe_xrandr() -> Option<Resolution> {
    if which::which("xrandr").is_err() {
        return None;
    }

    let output = Command::new("xrandr").args(["-q", "-d", ":0"]).output().ok()?;
    if !output.status.success() {
        return None;
    }

    parse_xrandr_screen(&String::from_utf8_lossy(&output.stdout))
}

fn parse_xrandr_screen(stdout: &str) -> Option<Resolution> {
    let re = Regex::new(r"current\s+(\d+)\s*x\s*(\d+)").ok()?;
    let caps = re.captures(stdout)?;
    Some(Resolution {
        width: caps[1].parse().ok()?,
        height: caps[2].parse().ok()?,
    })
}

/// Parse display info out of `system_profiler SPDisplaysDataType`.
fn probe_system_profiler() -> Option<Resolution> {
    let output = Command::new("system_profiler")
        .arg("SPDisplaysDataType")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    parse_system_profiler(&String::from_utf8_lossy(&output.stdout))
}

fn parse_system_profiler(stdout: &str) -> Option<Resolution> {
    let re = Regex::new(r"Resolution:\s*(\d+)\s*x\s*(\d+)").ok()?;
    let caps = re.captures(stdout)?;
    Some(Resolution {
        width: caps[1].parse().ok()?,
        height: caps[2].parse().ok()?,
    })
}

#[cfg(windows)]
fn probe_win32_metrics() -> Option<Resolution> {
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };
    if width > 0 && height > 0 {
        Some(Resolution {
            width: width as u32,
            height: height as u32,
        })
    } else {
        None
    }
}
