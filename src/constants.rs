pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Nominal frame rate when vsync is unavailable

pub const FADE_STEP: u32 = 4;                 // Fade progress added per frame
pub const FADE_COMPLETE: u32 = 100;           // Fade ends once progress exceeds this

pub const DEFAULT_SLIDE_DURATION_MS: u64 = 5000; // Autoplay interval (milliseconds)
pub const ARROW_ZONE_WIDTH: f32 = 64.0;       // Width of the left/right click zones (pixels)
