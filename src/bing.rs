//! Client for the Bing image-of-the-day archive.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::WallpaperError;
use crate::resolution::Resolution;

/// Forwarding link the Bing wallpaper app resolves its archive through.
pub const ARCHIVE_ENDPOINT: &str = "https://go.microsoft.com/fwlink/?linkid=2151983";

/// Environment override for the archive endpoint.
pub const ENDPOINT_ENV: &str = "BINGWALL_ENDPOINT";

/// Day-ordered list of wallpaper records, most recent first.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageArchive {
    pub images: Vec<ImageDescriptor>,
}

impl ImageArchive {
    /// Select the image from `days_ago` days back, index 0 being today.
    ///
    /// The service keeps a limited history, so requests past the end are
    /// clamped to the oldest entry. `None` only when the archive is empty.
    pub fn select(&self, days_ago: usize) -> Option<&ImageDescriptor> {
        let last = self.images.len().checked_sub(1)?;
        self.images.get(days_ago.min(last))
    }
}

/// One day's wallpaper record.
///
/// Known fields are typed; everything else the service sends rides along in
/// `extra` so the sidecar file preserves the record verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ImageDescriptor {
    /// Local filename for this image, derived from the download URL.
    ///
    /// Bing serves images through a query parameter
    /// (`…/th?id=OHR.Example_EN-US123.jpg`), so the `id` value is preferred
    /// over the literal path segment.
    pub fn filename(&self) -> String {
        let tail = self.url.rsplit('/').next().unwrap_or(&self.url);
        let name = match tail.split_once('?') {
            Some((segment, query)) => query
                .split('&')
                .find_map(|pair| pair.strip_prefix("id="))
                .unwrap_or(segment),
            None => tail,
        };
        if name.is_empty() {
            "wallpaper.jpg".to_string()
        } else {
            name.to_string()
        }
    }
}

pub struct BingClient {
    client: reqwest::Client,
    endpoint: String,
}

impl BingClient {
    /// Client against the live service, honoring the endpoint override from
    /// the environment when set.
    pub fn new() -> Result<Self, WallpaperError> {
        let endpoint = env::var(ENDPOINT_ENV).unwrap_or_else(|_| ARCHIVE_ENDPOINT.to_string());
        Self::with_endpoint(endpoint)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, WallpaperError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("bingwall/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Fetch the wallpaper archive sized for the given screen.
    pub async fn fetch_archive(
        &self,
        resolution: Resolution,
    ) -> Result<ImageArchive, WallpaperError> {
        let url = format!(
            "{}&screenWidth={}&screenHeight={}&env=live",
            self.endpoint, resolution.width, resolution.height
        );

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())?
            .text()
            .await?;

        serde_json::from_str(&body).map_err(|e| WallpaperError::Parse(e.to_string()))
    }

    /// Download the descriptor's image into `dest`.
    pub async fn download_image(
        &self,
        descriptor: &ImageDescriptor,
        dest: &Path,
    ) -> Result<(), WallpaperError> {
        let download_error = |source| WallpaperError::Download {
            url: descriptor.url.clone(),
            source,
        };
        let bytes = self
            .client
            .get(&descriptor.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(download_error)?
            .bytes()
            .await
            .map_err(download_error)?;

        let filesystem_error = |source| WallpaperError::Filesystem {
            path: dest.to_path_buf(),
            source,
        };
        let mut file = File::create(dest).await.map_err(filesystem_error)?;
        file.write_all(&bytes).await.map_err(filesystem_error)?;
        Ok(())
    }
}
