use std::env;

/// Operating systems the tool knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    /// Anything else. Resolution detection falls back to the default and no
    /// wallpaper mechanism is attempted.
    Unknown,
}

impl Platform {
    /// Detect the platform the process is running on.
    pub fn detect() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Map a `std::env::consts::OS` identifier to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            _ => Platform::Unknown,
        }
    }

    /// Human-readable name for status output.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::MacOs => "macOS",
            Platform::Unknown => "unknown",
        }
    }
}
