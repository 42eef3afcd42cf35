//! Image loading: startup prefetch of remote images and texture cache

use super::schedule::LoadLatch;
use crate::constants::{FETCH_CONNECT_TIMEOUT, FETCH_TIMEOUT, PREFETCH_CONCURRENCY, PREFETCH_DEADLINE};
use crate::types::ImageRef;
use eframe::egui;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct ImageCache {
    textures: HashMap<ImageRef, Option<egui::TextureHandle>>,
    cache_dir: PathBuf,
    assets_dir: PathBuf,
}

impl ImageCache {
    pub fn new(data_dir: &Path) -> Self {
        let cache_dir = data_dir.join("cache").join("images");
        std::fs::create_dir_all(&cache_dir).ok();
        Self {
            textures: HashMap::new(),
            cache_dir,
            assets_dir: data_dir.join("assets"),
        }
    }

    /// Where an image lives on disk: the download cache for remote images,
    /// the assets dir for everything else.
    pub fn local_path(&self, image: &ImageRef) -> PathBuf {
        if image.is_remote() {
            self.cache_dir.join(image.cache_key())
        } else {
            self.assets_dir.join(image.as_str())
        }
    }

    /// Download every remote image that isn't cached yet, then set `latch`.
    /// With nothing to fetch the latch is set before returning. Downloads
    /// still running after `PREFETCH_DEADLINE` no longer hold the latch.
    pub fn start_prefetch(
        &self,
        runtime: &tokio::runtime::Runtime,
        ctx: &egui::Context,
        images: Vec<ImageRef>,
        latch: LoadLatch,
    ) {
        self.start_prefetch_within(runtime, ctx, images, latch, PREFETCH_DEADLINE);
    }

    /// Remote images without a complete cache file, with their cache path
    fn missing_remote(&self, images: &[ImageRef]) -> Vec<(String, PathBuf)> {
        images
            .iter()
            .filter(|image| image.is_remote())
            .map(|image| (image.as_str().to_string(), self.local_path(image)))
            .filter(|(_, path)| !path.exists())
            .collect()
    }

    fn start_prefetch_within(
        &self,
        runtime: &tokio::runtime::Runtime,
        ctx: &egui::Context,
        images: Vec<ImageRef>,
        latch: LoadLatch,
        deadline: Duration,
    ) {
        let missing = self.missing_remote(&images);

        if missing.is_empty() {
            debug!("All startup images cached");
            latch.set();
            return;
        }

        debug!(count = missing.len(), "Starting image prefetch");
        let ctx = ctx.clone();

        runtime.spawn(async move {
            let client = reqwest::Client::builder()
                .connect_timeout(FETCH_CONNECT_TIMEOUT)
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_else(|e| {
                    warn!(error = %e, "Failed to build HTTP client, using defaults");
                    reqwest::Client::new()
                });
            let semaphore = Arc::new(tokio::sync::Semaphore::new(PREFETCH_CONCURRENCY));
            let total = missing.len();

            let tasks = missing.into_iter().map(|(url, path)| {
                let sem = semaphore.clone();
                let client = client.clone();
                tokio::spawn(async move {
                    let _permit = sem.acquire().await.ok();
                    fetch_to_file(&client, &url, &path).await
                })
            });

            match tokio::time::timeout(deadline, futures::future::join_all(tasks)).await {
                Ok(results) => {
                    let fetched = results
                        .into_iter()
                        .filter(|result| matches!(result, Ok(true)))
                        .count();
                    info!(fetched, total, "Image prefetch finished");
                }
                Err(_) => {
                    warn!(total, deadline_ms = deadline.as_millis() as u64, "Image prefetch timed out");
                }
            }
            latch.set();
            ctx.request_repaint();
        });
    }

    /// Texture for `image`, decoding it on first use. `None` while the file
    /// is missing (it may still be downloading) or when it can't be decoded.
    pub fn texture(&mut self, ctx: &egui::Context, image: &ImageRef) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.get(image) {
            return cached.clone();
        }

        let path = self.local_path(image);
        if !path.exists() {
            return None;
        }

        let texture = match decode_file(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                Some(ctx.load_texture(
                    image.as_str(),
                    egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to decode image");
                None
            }
        };
        self.textures.insert(image.clone(), texture.clone());
        texture
    }
}

/// Cache files carry no extension, so the format comes from the bytes
fn decode_file(path: &Path) -> image::ImageResult<image::DynamicImage> {
    image::ImageReader::open(path)?.with_guessed_format()?.decode()
}

async fn fetch_to_file(client: &reqwest::Client, url: &str, path: &Path) -> bool {
    let response = match client.get(url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            debug!(url, status = %response.status(), "Image request failed");
            return false;
        }
        Err(e) => {
            debug!(url, error = %e, "Image request failed");
            return false;
        }
    };
    match response.bytes().await {
        Ok(bytes) => match write_cache_file(path, &bytes).await {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to cache image");
                false
            }
        },
        Err(e) => {
            debug!(url, error = %e, "Image download interrupted");
            false
        }
    }
}

/// Write next to `path`, then rename into place. A cache entry either
/// exists complete or not at all.
async fn write_cache_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);
    tokio::fs::write(&partial, bytes).await?;
    if let Err(e) = tokio::fs::rename(&partial, path).await {
        tokio::fs::remove_file(&partial).await.ok();
        return Err(e);
    }
    Ok(())
}
