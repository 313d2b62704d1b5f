use crate::placement::{Rect, Size};

/// A decoded image the slider can place.
pub trait SlideImage {
    /// Pixel dimensions of the image.
    fn size(&self) -> Size;
}

/// A 2D raster target the slider draws into.
///
/// The slider never owns the surface; the host hands it over for each draw.
pub trait Surface {
    type Image: SlideImage;

    fn size(&self) -> Size;
    fn clear(&mut self);
    /// Draw `image` scaled into `rect` with opacity `alpha` in `[0, 1]`.
    fn draw_image(&mut self, image: &Self::Image, rect: Rect, alpha: f32);
}
