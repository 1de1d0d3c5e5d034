//! Background image loading.
//!
//! Images are decoded and shrunk on the blocking pool so the UI never
//! waits on disk or codecs.  Results come back over a channel and land in
//! an [`ImageStore`] on the main loop.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use tokio::sync::mpsc;

/// Longest edge kept after decoding.  Half-block cells are 1×2 pixels, so
/// this comfortably covers a full-screen modal.
pub const MAX_EDGE: u32 = 320;

#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(Arc<RgbaImage>),
    Missing,
}

/// One decoded (or failed) image.
#[derive(Debug)]
pub struct ImageLoaded {
    pub path: &'static str,
    pub image: Option<RgbaImage>,
}

#[derive(Debug, Default)]
pub struct ImageStore {
    slots: HashMap<&'static str, ImageSlot>,
}

impl ImageStore {
    /// Mark every path as loading.
    pub fn expect(&mut self, paths: &[&'static str]) {
        for path in paths {
            self.slots.entry(*path).or_insert(ImageSlot::Loading);
        }
    }

    pub fn insert(&mut self, loaded: ImageLoaded) {
        let slot = match loaded.image {
            Some(img) => ImageSlot::Ready(Arc::new(img)),
            None => ImageSlot::Missing,
        };
        self.slots.insert(loaded.path, slot);
    }

    pub fn slot(&self, path: &str) -> Option<&ImageSlot> {
        self.slots.get(path)
    }
}

/// Decode every path under `root` in the background.
pub fn spawn_image_loader(
    root: PathBuf,
    paths: Vec<&'static str>,
) -> mpsc::UnboundedReceiver<ImageLoaded> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for path in paths {
            let full = root.join(path);
            let image = tokio::task::spawn_blocking(move || load_thumbnail(&full))
                .await
                .unwrap_or_else(|err| {
                    tracing::debug!(%err, "image task panicked");
                    None
                });
            if tx.send(ImageLoaded { path, image }).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}

/// Decode and shrink one file.  Failures are logged and reported as `None`
/// so the page shows a placeholder.
pub fn load_thumbnail(path: &Path) -> Option<RgbaImage> {
    let t0 = std::time::Instant::now();
    match image::open(path) {
        Ok(img) => {
            let thumb = img.thumbnail(MAX_EDGE, MAX_EDGE).to_rgba8();
            tracing::debug!(
                path = %path.display(),
                w = thumb.width(),
                h = thumb.height(),
                "decoded in {:.2?}",
                t0.elapsed()
            );
            Some(thumb)
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "image unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn store_tracks_slots() {
        let mut store = ImageStore::default();
        store.expect(&["a.png", "b.png"]);
        assert!(matches!(store.slot("a.png"), Some(ImageSlot::Loading)));

        store.insert(ImageLoaded {
            path: "a.png",
            image: Some(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))),
        });
        store.insert(ImageLoaded {
            path: "b.png",
            image: None,
        });
        assert!(matches!(store.slot("a.png"), Some(ImageSlot::Ready(_))));
        assert!(matches!(store.slot("b.png"), Some(ImageSlot::Missing)));
        assert!(store.slot("c.png").is_none());
    }

    #[test]
    fn missing_file_is_none() {
        assert!(load_thumbnail(Path::new("/definitely/not/here.png")).is_none());
    }

    #[test]
    fn thumbnails_are_bounded() {
        let dir = std::env::temp_dir().join(format!("folio-thumb-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("big.png");
        RgbaImage::from_pixel(1000, 500, Rgba([9, 9, 9, 255]))
            .save(&path)
            .unwrap();

        let thumb = load_thumbnail(&path).unwrap();
        assert_eq!(thumb.width(), MAX_EDGE);
        assert_eq!(thumb.height(), MAX_EDGE / 2);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn loader_reports_every_path() {
        let mut rx = spawn_image_loader(PathBuf::from("/nowhere"), vec!["x.png", "y.jpg"]);
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!((first.path, second.path), ("x.png", "y.jpg"));
        assert!(first.image.is_none());
    }
}
