//! raylib host: owns the window, the framebuffer and the image fetcher, and
//! feeds input, time and frames to a [`Slider`].

mod surface;

use std::time::Duration;

use anyhow::{anyhow, Result};
use raylib::prelude::*;
use tracing::{debug, info};

use crate::config::SliderConfig;
use crate::navigation::{HitZones, NavigationZone};
use crate::placement::Size;
use crate::slider::{LoadRequest, Navigation, Slider};
use crate::texture_loader::{FetchResult, ImageFetcher};

pub use surface::{decode_texture, draw_arrows, RaylibSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSettings {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
}

fn new_framebuffer(rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<(RenderTexture2D, Size)> {
    let width = rl.get_screen_width().max(1);
    let height = rl.get_screen_height().max(1);
    let framebuffer = rl
        .load_render_texture(thread, width as u32, height as u32)
        .map_err(|e| anyhow!("Failed to create render texture: {}", e))?;
    Ok((framebuffer, Size::new(width as f32, height as f32)))
}

fn submit(fetcher: &ImageFetcher, request: Option<LoadRequest>, backlog: &mut Vec<FetchResult>) {
    if let Some(request) = request {
        if let Some(failed) = fetcher.request(request) {
            backlog.push(failed);
        }
    }
}

fn log_navigation(source: &str, navigation: Navigation) {
    debug!("{} -> {:?}", source, navigation);
}

/// Open the window and run the slideshow until it is closed.
pub fn run(config: &SliderConfig, settings: WindowSettings) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(settings.width, settings.height)
        .title(&config.container)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(settings.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let (mut framebuffer, mut surface_size) = new_framebuffer(&mut rl, &thread)?;

    let mut slider: Slider<Texture2D> = Slider::new(config.slides.iter().cloned(), config.options());
    slider.on_slide_loaded(|event| debug!("Slide {} finished: {:?}", event.index, event.outcome));
    let hide_arrows = slider.options().hide_arrows;
    let zones = HitZones::default();

    let fetcher = ImageFetcher::spawn();
    let mut backlog = Vec::new();
    submit(&fetcher, slider.initialize(), &mut backlog);

    // --- Main Loop ---
    while !rl.window_should_close() {
        // 1. Apply finished loads, one at a time and in order
        while let Some(result) = fetcher.try_recv() {
            backlog.push(result);
        }
        for (id, fetched) in std::mem::take(&mut backlog) {
            let decoded = fetched.and_then(|image| decode_texture(&mut rl, &thread, &image));
            let next = slider.load_finished(id, decoded);
            submit(&fetcher, next, &mut backlog);
        }

        // 2. Window state
        slider.set_visible(!rl.is_window_minimized() && !rl.is_window_hidden());

        if rl.is_window_resized() {
            let (fb, size) = new_framebuffer(&mut rl, &thread)?;
            framebuffer = fb;
            surface_size = size;
            if !slider.surface_resized() {
                debug!("Resize during transition, redraw deferred");
            }
        }

        // 3. Input
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let pos = rl.get_mouse_position();
            match zones.hit(pos.x, pos.y, surface_size) {
                Some(NavigationZone::Previous) => log_navigation("click previous", slider.previous()),
                Some(NavigationZone::Next) => log_navigation("click next", slider.next()),
                None => {}
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            log_navigation("key next", slider.next());
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            log_navigation("key previous", slider.previous());
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            if slider.is_autoplaying() {
                slider.stop();
            } else {
                slider.start(None);
            }
        }

        // 4. Autoplay clock
        let dt = Duration::from_secs_f32(rl.get_frame_time().max(0.0));
        if let Some(navigation) = slider.advance_clock(dt) {
            log_navigation("autoplay", navigation);
        }

        // 5. Render slides into the framebuffer only when something changed
        if slider.frame() {
            let mut d = rl.begin_texture_mode(&thread, &mut framebuffer);
            let mut surface = RaylibSurface::new(&mut d, surface_size);
            slider.render(&mut surface);
        }

        // 6. Present, flipping the render texture the right way up
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, surface_size.width, -surface_size.height),
            Rectangle::new(0.0, 0.0, surface_size.width, surface_size.height),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        if !hide_arrows && slider.len() > 1 {
            draw_arrows(&mut d, &zones, surface_size);
        }
    }

    info!("Window closed");
    Ok(())
}
