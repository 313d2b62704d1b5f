//! Focal Slider - a cover-fit image slideshow that keeps each image's focal
//! point in view and cross-fades between slides.
//!
//! The core ([`placement`], [`slider`]) knows nothing about windows or GPUs;
//! the `window` feature adds a raylib host that drives it.

pub mod config;
pub mod constants;
pub mod error;
pub mod focal;
pub mod navigation;
pub mod placement;
pub mod slide;
pub mod slider;
pub mod state;
pub mod surface;
pub mod texture_loader;
pub mod timer;
pub mod transition;

#[cfg(feature = "window")]
pub mod window;

pub use config::{Cli, SliderConfig, SliderOptions};
pub use error::{ConfigError, LoadError, SliderError};
pub use focal::FocalPoint;
pub use placement::{compute_placement, Rect, Size};
pub use slide::{SlideId, SlideSpec};
pub use slider::{LoadRequest, Navigation, SlideLoaded, SlideTarget, Slider};
pub use state::SliderState;
pub use surface::{SlideImage, Surface};
