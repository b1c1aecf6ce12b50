//! The fetch, cache, apply pipeline behind the default command.

use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::bing::BingClient;
use crate::platform::Platform;
use crate::resolution;
use crate::setter;
use crate::store::{DEFAULT_DIR, WallpaperStore};

/// Run the wallpaper pipeline.
///
/// `days_ago` is already clamped by the CLI layer. Status output goes to
/// stderr so `--metadata` leaves nothing but the JSON record on stdout.
pub async fn run(days_ago: usize, show_metadata: bool, overwrite: bool, debug: bool) -> Result<()> {
    let platform = Platform::detect();
    let resolution = resolution::detect(platform);
    if debug {
        eprintln!("Platform: {}", platform.name().cyan());
        eprintln!("Screen resolution: {}", resolution.to_string().cyan());
        eprintln!("Requested day: {}", days_ago.to_string().cyan());
    }

    let client = BingClient::new()?;

    let pb = spinner("Fetching wallpaper archive...");
    let fetched = client.fetch_archive(resolution).await;
    pb.finish_and_clear();
    let archive = fetched.context("Could not fetch the wallpaper archive")?;
    if debug {
        eprintln!(
            "Archive holds {} image(s)",
            archive.images.len().to_string().cyan()
        );
    }

    let store = WallpaperStore::new(DEFAULT_DIR);
    let (image_path, descriptor) = store
        .get_or_download(&client, &archive, days_ago, overwrite)
        .await?;
    eprintln!("{} {}", "Wallpaper ready:".green(), image_path.display());

    if show_metadata {
        println!("{}", serde_json::to_string_pretty(descriptor)?);
    }

    if setter::apply(platform, &image_path) {
        eprintln!("{}", "Wallpaper applied".green());
    } else {
        eprintln!("{}", "Wallpaper downloaded but not applied".yellow());
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
