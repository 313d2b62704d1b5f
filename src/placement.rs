//! Cover-fit placement of an image on a drawing surface.
//!
//! The image is scaled so that it covers the whole surface with no empty
//! space, which makes exactly one axis overflow (or none when the aspect
//! ratios match). The overflowing axis is then shifted so that the image's
//! focal point stays on screen.

use crate::focal::{FocalPoint, Horizontal, Vertical};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Destination rectangle in surface pixels. `x`/`y` may be negative when the
/// image is shifted past the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Where to draw `image` on `canvas` so it covers it while keeping `focus`
/// visible.
///
/// Degenerate sizes produce an empty rect at the origin.
pub fn compute_placement(image: Size, canvas: Size, focus: FocalPoint) -> Rect {
    if !image.is_drawable() || !canvas.is_drawable() {
        return Rect::default();
    }

    let image_ratio = image.width / image.height;
    let canvas_ratio = canvas.width / canvas.height;

    let (width, height) = if canvas_ratio < image_ratio {
        (image.width * canvas.height / image.height, canvas.height)
    } else {
        (canvas.width, image.height * canvas.width / image.width)
    };

    let mut x = 0.0;
    if width > canvas.width {
        x = match focus.horizontal() {
            Horizontal::Left => 0.0,
            Horizontal::Middle => (canvas.width - width) / 2.0,
            Horizontal::Right => canvas.width - width,
        };
    }

    let mut y = 0.0;
    if height > canvas.height {
        y = match focus.vertical() {
            Vertical::Top => 0.0,
            Vertical::Middle => (canvas.height - height) / 2.0,
            Vertical::Bottom => canvas.height - height,
        };
    }

    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn shapes() -> Vec<(Size, Size)> {
        let images = [
            Size::new(1000.0, 500.0),
            Size::new(500.0, 1000.0),
            Size::new(640.0, 480.0),
            Size::new(300.0, 300.0),
            Size::new(4000.0, 3000.0),
            Size::new(37.0, 91.0),
        ];
        let canvases = [
            Size::new(800.0, 600.0),
            Size::new(600.0, 800.0),
            Size::new(1920.0, 1080.0),
            Size::new(500.0, 500.0),
            Size::new(333.0, 71.0),
        ];
        images
            .iter()
            .flat_map(|i| canvases.iter().map(move |c| (*i, *c)))
            .collect()
    }

    #[test]
    fn worked_example_bottom_right() {
        let rect = compute_placement(
            Size::new(1000.0, 500.0),
            Size::new(800.0, 600.0),
            FocalPoint::BottomRight,
        );
        assert_eq!(rect, Rect { x: -400.0, y: 0.0, width: 1200.0, height: 600.0 });
    }

    #[test]
    fn always_covers_the_canvas_with_one_tight_axis() {
        for (image, canvas) in shapes() {
            for focus in FocalPoint::ALL {
                let r = compute_placement(image, canvas, focus);
                assert!(r.width >= canvas.width - EPS, "{image:?} on {canvas:?}");
                assert!(r.height >= canvas.height - EPS, "{image:?} on {canvas:?}");
                let tight = (r.width - canvas.width).abs() < EPS
                    || (r.height - canvas.height).abs() < EPS;
                assert!(tight, "{image:?} on {canvas:?} -> {r:?}");
                // Scaled image keeps its aspect ratio.
                let ratio = image.width / image.height;
                assert!((r.width / r.height - ratio).abs() < 1e-3);
                // The image still covers every corner of the canvas.
                assert!(r.x <= EPS && r.y <= EPS);
                assert!(r.x + r.width >= canvas.width - EPS);
                assert!(r.y + r.height >= canvas.height - EPS);
            }
        }
    }

    #[test]
    fn offsets_follow_the_focal_family() {
        for (image, canvas) in shapes() {
            for focus in FocalPoint::ALL {
                let r = compute_placement(image, canvas, focus);
                let overflow_x = canvas.width - r.width;
                let overflow_y = canvas.height - r.height;

                let expected_x = if r.width > canvas.width {
                    match focus.horizontal() {
                        Horizontal::Left => 0.0,
                        Horizontal::Middle => overflow_x / 2.0,
                        Horizontal::Right => overflow_x,
                    }
                } else {
                    0.0
                };
                let expected_y = if r.height > canvas.height {
                    match focus.vertical() {
                        Vertical::Top => 0.0,
                        Vertical::Middle => overflow_y / 2.0,
                        Vertical::Bottom => overflow_y,
                    }
                } else {
                    0.0
                };

                assert!((r.x - expected_x).abs() < EPS, "{focus:?} {image:?} {canvas:?}");
                assert!((r.y - expected_y).abs() < EPS, "{focus:?} {image:?} {canvas:?}");
            }
        }
    }

    #[test]
    fn tall_image_shifts_vertically_only() {
        let canvas = Size::new(800.0, 600.0);
        let image = Size::new(500.0, 1000.0);

        let top = compute_placement(image, canvas, FocalPoint::TopRight);
        assert_eq!(top, Rect { x: 0.0, y: 0.0, width: 800.0, height: 1600.0 });

        let middle = compute_placement(image, canvas, FocalPoint::MiddleLeft);
        assert_eq!(middle.y, -500.0);
        assert_eq!(middle.x, 0.0);

        let bottom = compute_placement(image, canvas, FocalPoint::BottomMiddle);
        assert_eq!(bottom.y, -1000.0);
        assert_eq!(bottom.x, 0.0);
    }

    #[test]
    fn matching_ratio_needs_no_offset() {
        for focus in FocalPoint::ALL {
            let r = compute_placement(Size::new(400.0, 300.0), Size::new(800.0, 600.0), focus);
            assert_eq!(r, Rect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 });
        }
    }

    #[test]
    fn same_inputs_same_output() {
        let a = compute_placement(Size::new(123.0, 45.0), Size::new(67.0, 89.0), FocalPoint::Middle);
        let b = compute_placement(Size::new(123.0, 45.0), Size::new(67.0, 89.0), FocalPoint::Middle);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_sizes_produce_empty_rect() {
        let r = compute_placement(Size::new(0.0, 10.0), Size::new(800.0, 600.0), FocalPoint::Middle);
        assert!(r.is_empty());
        let r = compute_placement(Size::new(10.0, 10.0), Size::new(800.0, 0.0), FocalPoint::Middle);
        assert!(r.is_empty());
        let r = compute_placement(Size::new(f32::NAN, 10.0), Size::new(8.0, 6.0), FocalPoint::TopLeft);
        assert!(r.is_empty());
    }
}
