//! Configuration for the slider.
//!
//! Two layers feed the same [`SliderConfig`]:
//! - a JSON config file (`container`, `slides`, `autoPlay`, `slideDuration`,
//!   `hideArrows`), or a plain image directory
//! - command-line flags, which override whatever the file says
//!
//! # Example
//!
//! ```json
//! {
//!   "container": "Gallery",
//!   "slides": [
//!     { "src": "beach.jpg", "focus": "bottom-left" },
//!     { "src": "tower.jpg", "focus": "TOP_MIDDLE" }
//!   ],
//!   "slideDuration": 4000
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SLIDE_DURATION_MS, FPS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::ConfigError;
use crate::focal::FocalPoint;
use crate::slide::SlideSpec;

/// Default container name, used as the window title.
pub const DEFAULT_CONTAINER: &str = "Focal Slider";

// =============================================================================
// Slider options
// =============================================================================

/// Playback options held by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderOptions {
    pub auto_play: bool,
    pub slide_duration: Duration,
    pub hide_arrows: bool,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            auto_play: true,
            slide_duration: Duration::from_millis(DEFAULT_SLIDE_DURATION_MS),
            hide_arrows: false,
        }
    }
}

// =============================================================================
// Config file
// =============================================================================

fn default_auto_play() -> bool {
    true
}

fn default_slide_duration() -> u64 {
    DEFAULT_SLIDE_DURATION_MS
}

/// The slider configuration as written in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderConfig {
    pub container: String,
    pub slides: Vec<SlideSpec>,
    #[serde(default = "default_auto_play")]
    pub auto_play: bool,
    /// Milliseconds each slide stays on screen during autoplay.
    #[serde(default = "default_slide_duration")]
    pub slide_duration: u64,
    #[serde(default)]
    pub hide_arrows: bool,
}

impl SliderConfig {
    pub fn new(container: impl Into<String>, slides: Vec<SlideSpec>) -> Self {
        Self {
            container: container.into(),
            slides,
            auto_play: default_auto_play(),
            slide_duration: default_slide_duration(),
            hide_arrows: false,
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SliderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. Relative slide sources are resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&json)?;
        if let Some(base) = path.parent() {
            config.resolve_sources(base);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.container.trim().is_empty() {
            return Err(ConfigError::InvalidContainer(self.container.clone()));
        }
        if self.slide_duration == 0 {
            return Err(ConfigError::ZeroSlideDuration);
        }
        Ok(())
    }

    pub fn options(&self) -> SliderOptions {
        SliderOptions {
            auto_play: self.auto_play,
            slide_duration: Duration::from_millis(self.slide_duration),
            hide_arrows: self.hide_arrows,
        }
    }

    fn resolve_sources(&mut self, base: &Path) {
        for slide in self.slides.iter_mut() {
            let src = Path::new(&slide.src);
            if src.is_relative() {
                slide.src = base.join(src).to_string_lossy().into_owned();
            }
        }
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Focal Slider - a cover-fit image slideshow that keeps each image's subject
/// in view.
#[derive(Parser, Debug, Clone)]
#[command(name = "focal-slider")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON slider config, or a directory of images.
    pub source: PathBuf,

    /// Focal point for every image when SOURCE is a directory.
    #[arg(long, default_value_t = FocalPoint::Middle)]
    pub focus: FocalPoint,

    /// Autoplay interval in milliseconds (overrides the config).
    #[arg(long)]
    pub slide_duration: Option<u64>,

    /// Disable autoplay.
    #[arg(long)]
    pub no_autoplay: bool,

    /// Do not draw the navigation arrows.
    #[arg(long)]
    pub hide_arrows: bool,

    /// Shuffle the slide order.
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for --shuffle, for a reproducible order.
    #[arg(long, requires = "shuffle")]
    pub seed: Option<u64>,

    /// Initial window width.
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    /// Initial window height.
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    /// Target frame rate when vsync is unavailable.
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a config read from disk.
    pub fn apply(&self, config: &mut SliderConfig) {
        if let Some(ms) = self.slide_duration {
            config.slide_duration = ms;
        }
        if self.no_autoplay {
            config.auto_play = false;
        }
        if self.hide_arrows {
            config.hide_arrows = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = SliderConfig::from_json(
            r##"{
                "container": "#slider",
                "slides": [
                    {"src": "a.jpg", "focus": "top-left"},
                    {"src": "b.jpg", "focus": "BOTTOM_RIGHT"}
                ],
                "autoPlay": false,
                "slideDuration": 2500,
                "hideArrows": true
            }"##,
        )
        .unwrap();

        assert_eq!(config.container, "#slider");
        assert_eq!(config.slides[0].focus, FocalPoint::TopLeft);
        assert_eq!(config.slides[1].focus, FocalPoint::BottomRight);
        let options = config.options();
        assert!(!options.auto_play);
        assert!(options.hide_arrows);
        assert_eq!(options.slide_duration, Duration::from_millis(2500));
    }

    #[test]
    fn applies_defaults() {
        let config =
            SliderConfig::from_json(r#"{"container": "main", "slides": []}"#).unwrap();
        assert_eq!(config.options(), SliderOptions::default());
    }

    #[test]
    fn rejects_invalid_focus_token() {
        let err = SliderConfig::from_json(
            r#"{"container": "main", "slides": [{"src": "a.jpg", "focus": "upper-left"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("upper-left"));
    }

    #[test]
    fn rejects_slide_without_focus() {
        let err = SliderConfig::from_json(r#"{"container": "x", "slides": [{"src": "a.jpg"}]}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("focus"));
    }

    #[test]
    fn rejects_blank_container() {
        let err = SliderConfig::from_json(r#"{"container": "  ", "slides": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidContainer(_)));
    }

    #[test]
    fn rejects_missing_container() {
        let err = SliderConfig::from_json(r#"{"slides": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_duration() {
        let err = SliderConfig::from_json(r#"{"container": "x", "slides": [], "slideDuration": 0}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSlideDuration));
    }

    #[test]
    fn load_resolves_relative_sources() {
        let dir = std::env::temp_dir().join(format!("focal-slider-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("slider.json");
        fs::write(
            &path,
            r#"{"container": "x", "slides": [
                {"src": "a.jpg", "focus": "middle"},
                {"src": "/abs/b.jpg", "focus": "top-left"}
            ]}"#,
        )
        .unwrap();

        let config = SliderConfig::load(&path).unwrap();
        assert_eq!(Path::new(&config.slides[0].src), dir.join("a.jpg"));
        assert_eq!(config.slides[1].src, "/abs/b.jpg");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SliderConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from([
            "focal-slider",
            "slides.json",
            "--slide-duration",
            "1200",
            "--no-autoplay",
            "--hide-arrows",
        ]);
        let mut config = SliderConfig::new("x", Vec::new());
        cli.apply(&mut config);
        assert_eq!(config.slide_duration, 1200);
        assert!(!config.auto_play);
        assert!(config.hide_arrows);
    }

    #[test]
    fn cli_parses_focus_token() {
        let cli = Cli::parse_from(["focal-slider", "photos", "--focus", "bottom-left"]);
        assert_eq!(cli.focus, FocalPoint::BottomLeft);
    }
}
