use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort the run before a usable wallpaper exists on disk.
///
/// Applying the wallpaper is deliberately not represented here; the setter
/// reports success as a plain `bool` so a failed desktop call still leaves
/// the downloaded image behind.
#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed wallpaper archive: {0}")]
    Parse(String),

    #[error("downloading {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_names_the_path() {
        let err = WallpaperError::Filesystem {
            path: PathBuf::from("/tmp/images"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/images"));
    }

    #[test]
    fn parse_error_carries_the_reason() {
        let err = WallpaperError::Parse("missing field `images`".to_string());
        assert_eq!(
            err.to_string(),
            "malformed wallpaper archive: missing field `images`"
        );
    }
}
