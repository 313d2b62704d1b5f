use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or validating a slider configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The container name is missing or blank.
    #[error("invalid container: {0:?}")]
    InvalidContainer(String),

    /// A focal point token did not name one of the nine anchors.
    #[error("unknown focal point token: {0:?}")]
    UnknownFocalPoint(String),

    /// The slide duration must be at least one millisecond.
    #[error("slide duration must be positive")]
    ZeroSlideDuration,

    /// Reading the config file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A slide directory holds no supported images.
    #[error("no image files found in {0}")]
    NoImages(PathBuf),

    /// The config is not valid JSON or does not match the expected shape.
    #[error("failed to parse slider config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors returned by slider operations that address a specific slide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliderError {
    #[error("slide index {index} out of range (have {len} slides)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no slide with id {0}")]
    UnknownSlide(u64),

    #[error("slide {0} failed to load and cannot be shown")]
    SlideFailed(usize),

    #[error("slide {0} is part of the running transition")]
    SlideInTransition(usize),

    #[error("no slide is currently displayed")]
    NoCurrentSlide,
}

/// Why a single image could not be turned into a slide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}
