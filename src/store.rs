//! Local image cache.
//!
//! Images land in a flat directory next to a `<stem>.json` sidecar holding
//! the service record they were downloaded from. An image that is already
//! present is reused without touching the network.

use std::path::{Path, PathBuf};

use colored::*;
use tokio::fs;

use crate::bing::{BingClient, ImageArchive, ImageDescriptor};
use crate::error::WallpaperError;

/// Cache directory, relative to the working directory.
pub const DEFAULT_DIR: &str = "images";

pub struct WallpaperStore {
    dir: PathBuf,
}

impl WallpaperStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Return the cached image for the requested day, downloading it and
    /// writing its sidecar record first when it is missing or when
    /// `overwrite` is set.
    pub async fn get_or_download<'a>(
        &self,
        client: &BingClient,
        archive: &'a ImageArchive,
        days_ago: usize,
        overwrite: bool,
    ) -> Result<(PathBuf, &'a ImageDescriptor), WallpaperError> {
        let descriptor = archive.select(days_ago).ok_or_else(|| {
            WallpaperError::Parse("the wallpaper archive contains no images".to_string())
        })?;

        let dir = self.ensure_dir().await?;
        let image_path = dir.join(descriptor.filename());

        if image_path.is_file() && !overwrite {
            return Ok((image_path, descriptor));
        }

        eprintln!("Downloading: {}", descriptor.url.cyan());
        client.download_image(descriptor, &image_path).await?;
        self.write_sidecar(&image_path, descriptor).await?;

        Ok((image_path, descriptor))
    }

    /// Create the cache directory if needed and resolve it to an absolute
    /// path, so the setter hands the desktop a stable location.
    async fn ensure_dir(&self) -> Result<PathBuf, WallpaperError> {
        let filesystem_error = |source| WallpaperError::Filesystem {
            path: self.dir.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).await.map_err(filesystem_error)?;
        fs::canonicalize(&self.dir).await.map_err(filesystem_error)
    }

    async fn write_sidecar(
        &self,
        image_path: &Path,
        descriptor: &ImageDescriptor,
    ) -> Result<(), WallpaperError> {
        let path = sidecar_path(image_path);
        let record = serde_json::to_string(descriptor)
            .map_err(|e| WallpaperError::Parse(format!("sidecar record: {e}")))?;
        fs::write(&path, record)
            .await
            .map_err(|source| WallpaperError::Filesystem { path, source })
    }
}

/// Sidecar record path for an image: same stem, `.json` extension.
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("json")
}
