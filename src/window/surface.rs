use raylib::prelude::*;

use crate::error::LoadError;
use crate::navigation::{HitZones, NavigationZone};
use crate::placement::{Rect, Size};
use crate::surface::{SlideImage, Surface};
use crate::texture_loader::{FetchedImage, Orientation};

const ARROW_COLOR: Color = Color::new(255, 255, 255, 170);
const ARROW_HALF_HEIGHT: f32 = 16.0;
const ARROW_INSET: f32 = 20.0;
const ARROW_DEPTH: f32 = 24.0;

impl SlideImage for Texture2D {
    fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }
}

fn tint(alpha: f32) -> Color {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::new(255, 255, 255, a)
}

/// Any raylib draw target (screen or render texture) as a slider surface.
pub struct RaylibSurface<'a, D: RaylibDraw> {
    draw: &'a mut D,
    size: Size,
}

impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
    pub fn new(draw: &'a mut D, size: Size) -> Self {
        Self { draw, size }
    }
}

impl<D: RaylibDraw> Surface for RaylibSurface<'_, D> {
    type Image = Texture2D;

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.draw.clear_background(Color::BLACK);
    }

    fn draw_image(&mut self, image: &Texture2D, rect: Rect, alpha: f32) {
        self.draw.draw_texture_pro(
            image,
            Rectangle::new(0.0, 0.0, image.width() as f32, image.height() as f32),
            Rectangle::new(rect.x, rect.y, rect.width, rect.height),
            Vector2::new(0.0, 0.0),
            0.0,
            tint(alpha),
        );
    }
}

/// Draw the previous/next arrows inside their hit zones.
pub fn draw_arrows<D: RaylibDraw>(d: &mut D, zones: &HitZones, size: Size) {
    let cy = size.height / 2.0;

    let prev = zones.rect(NavigationZone::Previous, size);
    let tip = prev.x + ARROW_INSET;
    d.draw_triangle(
        Vector2::new(tip + ARROW_DEPTH, cy - ARROW_HALF_HEIGHT),
        Vector2::new(tip, cy),
        Vector2::new(tip + ARROW_DEPTH, cy + ARROW_HALF_HEIGHT),
        ARROW_COLOR,
    );

    let next = zones.rect(NavigationZone::Next, size);
    let tip = next.x + next.width - ARROW_INSET;
    d.draw_triangle(
        Vector2::new(tip - ARROW_DEPTH, cy - ARROW_HALF_HEIGHT),
        Vector2::new(tip - ARROW_DEPTH, cy + ARROW_HALF_HEIGHT),
        Vector2::new(tip, cy),
        ARROW_COLOR,
    );
}

/// Decode fetched bytes, bake in the EXIF rotation and upload a texture.
pub fn decode_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    fetched: &FetchedImage,
) -> Result<Texture2D, LoadError> {
    let decode_err = |reason: String| LoadError::Decode {
        path: fetched.source.clone(),
        reason,
    };

    let mut image = Image::load_image_from_mem(&format!(".{}", fetched.extension), &fetched.bytes)
        .map_err(|e| decode_err(e.to_string()))?;

    match fetched.orientation {
        Orientation::Rotate180 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        Orientation::Rotate90Cw => image.rotate_cw(),
        Orientation::Rotate90Ccw => image.rotate_ccw(),
        Orientation::Normal => {}
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| decode_err(e.to_string()))
}
