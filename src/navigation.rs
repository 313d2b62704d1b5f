use crate::constants::ARROW_ZONE_WIDTH;
use crate::placement::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationZone {
    Previous,
    Next,
}

/// Fixed-width click zones along the left and right edges of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitZones {
    pub width: f32,
}

impl Default for HitZones {
    fn default() -> Self {
        Self {
            width: ARROW_ZONE_WIDTH,
        }
    }
}

impl HitZones {
    /// Classify a click at `(x, y)`, relative to the surface's top-left
    /// corner.
    pub fn hit(&self, x: f32, y: f32, surface: Size) -> Option<NavigationZone> {
        if x < 0.0 || y < 0.0 || x >= surface.width || y >= surface.height {
            return None;
        }
        if x < self.width {
            Some(NavigationZone::Previous)
        } else if x >= surface.width - self.width {
            Some(NavigationZone::Next)
        } else {
            None
        }
    }

    /// Screen rectangle of a zone, for drawing its arrow.
    pub fn rect(&self, zone: NavigationZone, surface: Size) -> Rect {
        let width = self.width.min(surface.width);
        let x = match zone {
            NavigationZone::Previous => 0.0,
            NavigationZone::Next => surface.width - width,
        };
        Rect {
            x,
            y: 0.0,
            width,
            height: surface.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_map_to_zones() {
        let zones = HitZones::default();
        let surface = Size::new(800.0, 600.0);
        assert_eq!(zones.hit(0.0, 300.0, surface), Some(NavigationZone::Previous));
        assert_eq!(zones.hit(63.9, 10.0, surface), Some(NavigationZone::Previous));
        assert_eq!(zones.hit(64.0, 10.0, surface), None);
        assert_eq!(zones.hit(400.0, 300.0, surface), None);
        assert_eq!(zones.hit(736.0, 300.0, surface), Some(NavigationZone::Next));
        assert_eq!(zones.hit(799.0, 599.0, surface), Some(NavigationZone::Next));
    }

    #[test]
    fn clicks_outside_the_surface_are_ignored() {
        let zones = HitZones::default();
        let surface = Size::new(800.0, 600.0);
        assert_eq!(zones.hit(-1.0, 300.0, surface), None);
        assert_eq!(zones.hit(800.0, 300.0, surface), None);
        assert_eq!(zones.hit(10.0, 600.0, surface), None);
    }

    #[test]
    fn zone_rects_hug_the_edges() {
        let zones = HitZones::default();
        let surface = Size::new(800.0, 600.0);
        let next = zones.rect(NavigationZone::Next, surface);
        assert_eq!(next, Rect { x: 736.0, y: 0.0, width: 64.0, height: 600.0 });
        let prev = zones.rect(NavigationZone::Previous, surface);
        assert_eq!(prev.x, 0.0);
    }
}
