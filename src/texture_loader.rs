//! Finding image files and fetching their bytes off the render thread.
//!
//! Decoding into GPU textures has to happen on the thread that owns the
//! graphics context, so the worker here only reads files and their EXIF
//! orientation. The window host turns the bytes into textures.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use exif::{In, Reader, Tag};
use tracing::{debug, error};

use crate::error::{ConfigError, LoadError};
use crate::slide::SlideId;
use crate::slider::LoadRequest;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Lowercased extension of `path`, or an empty string.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_image_path(path: &Path) -> bool {
    IMAGE_EXTENSIONS.contains(&extension(path).as_str())
}

/// Image files directly inside `dir_path`, sorted by file name.
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let read_err = |source| ConfigError::Read {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        Err(ConfigError::NoImages(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

/// Rotation to apply so the image shows upright. Flipped orientations are
/// treated as their unflipped rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    Rotate180,
    Rotate90Cw,
    Rotate90Ccw,
}

impl Orientation {
    /// Map an EXIF orientation tag value.
    pub fn from_exif(value: u32) -> Self {
        match value {
            3 | 4 => Orientation::Rotate180,
            6 | 5 => Orientation::Rotate90Cw,
            8 | 7 => Orientation::Rotate90Ccw,
            _ => Orientation::Normal,
        }
    }

    /// Whether width and height swap once the rotation is applied.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Orientation::Rotate90Cw | Orientation::Rotate90Ccw)
    }
}

/// EXIF orientation of a JPEG; anything else is left as is.
pub fn read_orientation(path: &Path, bytes: &[u8]) -> Orientation {
    let ext = extension(path);
    if ext != "jpg" && ext != "jpeg" {
        return Orientation::Normal;
    }

    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from_exif)
            .unwrap_or_default(),
        Err(e) => {
            debug!("No EXIF data for {}: {}", path.display(), e);
            Orientation::Normal
        }
    }
}

/// Raw bytes of one slide image, ready to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub source: String,
    pub extension: String,
    pub bytes: Vec<u8>,
    pub orientation: Orientation,
}

pub type FetchResult = (SlideId, Result<FetchedImage, LoadError>);

pub fn fetch(request: &LoadRequest) -> Result<FetchedImage, LoadError> {
    let path = Path::new(&request.source);
    let bytes = fs::read(path).map_err(|e| LoadError::Read {
        path: request.source.clone(),
        reason: e.to_string(),
    })?;
    let orientation = read_orientation(path, &bytes);
    Ok(FetchedImage {
        source: request.source.clone(),
        extension: extension(path),
        bytes,
        orientation,
    })
}

/// A background thread that reads requested images one at a time.
pub struct ImageFetcher {
    requests: Option<Sender<LoadRequest>>,
    results: Receiver<FetchResult>,
    worker: Option<JoinHandle<()>>,
}

impl ImageFetcher {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<LoadRequest>();
        let (result_tx, result_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("image-fetcher".into())
            .spawn(move || {
                for request in request_rx {
                    let result = fetch(&request);
                    if result_tx.send((request.id, result)).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| error!("Failed to spawn image fetcher: {}", e))
            .ok();

        Self {
            requests: Some(request_tx),
            results: result_rx,
            worker,
        }
    }

    /// Queue a load. If the worker is gone the failure comes back as a result.
    pub fn request(&self, request: LoadRequest) -> Option<FetchResult> {
        let sender = self.requests.as_ref()?;
        match sender.send(request) {
            Ok(()) => None,
            Err(mpsc::SendError(request)) => Some((
                request.id,
                Err(LoadError::Read {
                    path: request.source,
                    reason: "image fetcher is not running".into(),
                }),
            )),
        }
    }

    pub fn try_recv(&self) -> Option<FetchResult> {
        self.results.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchResult> {
        match self.results.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for ImageFetcher {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.requests = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("focal-slider-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn lists_only_images_sorted_by_name() {
        let dir = scratch_dir("listing");
        for name in ["b.JPG", "a.png", "notes.txt", "c.gif"] {
            fs::write(dir.join(name), b"x").unwrap();
        }
        fs::create_dir(dir.join("d.png")).unwrap();

        let paths = load_sorted_image_paths(&dir).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.png", "b.JPG", "c.gif"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = scratch_dir("empty");
        assert!(matches!(load_sorted_image_paths(&dir), Err(ConfigError::NoImages(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn orientation_values() {
        assert_eq!(Orientation::from_exif(1), Orientation::Normal);
        assert_eq!(Orientation::from_exif(3), Orientation::Rotate180);
        assert_eq!(Orientation::from_exif(6), Orientation::Rotate90Cw);
        assert_eq!(Orientation::from_exif(8), Orientation::Rotate90Ccw);
        assert!(Orientation::Rotate90Cw.swaps_axes());
        assert!(!Orientation::Rotate180.swaps_axes());
    }

    #[test]
    fn non_jpeg_or_garbage_is_upright() {
        assert_eq!(read_orientation(Path::new("a.png"), b"\x89PNG"), Orientation::Normal);
        assert_eq!(read_orientation(Path::new("a.jpg"), b"not a jpeg"), Orientation::Normal);
    }

    #[test]
    fn fetcher_reads_in_request_order() {
        let dir = scratch_dir("fetch");
        let good = dir.join("one.png");
        fs::write(&good, b"pixels").unwrap();

        let fetcher = ImageFetcher::spawn();
        let missing = LoadRequest {
            id: SlideId(0),
            index: 0,
            source: dir.join("missing.png").to_string_lossy().into_owned(),
        };
        let present = LoadRequest {
            id: SlideId(1),
            index: 1,
            source: good.to_string_lossy().into_owned(),
        };
        assert!(fetcher.request(missing).is_none());
        assert!(fetcher.request(present).is_none());

        let (id, result) = fetcher.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(id, SlideId(0));
        assert!(matches!(result, Err(LoadError::Read { .. })));

        let (id, result) = fetcher.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(id, SlideId(1));
        let image = result.unwrap();
        assert_eq!(image.bytes, b"pixels");
        assert_eq!(image.extension, "png");
        assert_eq!(image.orientation, Orientation::Normal);

        drop(fetcher);
        fs::remove_dir_all(&dir).unwrap();
    }
}
