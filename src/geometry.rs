// =============================================================================
// geometry.rs - Screen points, rectangles and preview bitmaps
// =============================================================================

use crate::color::Color;

/// Point in global screen coordinates, origin at the top-left of the main
/// display (Quartz convention), in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `size` whose center pixel is the one containing `point`
    pub fn centered_on(point: Point, size: f64) -> Self {
        let half = (size / 2.0).floor();
        Self::new(point.x.floor() - half, point.y.floor() - half, size, size)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Empty (zero-sized) when the rectangles do not overlap
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        if max_x <= x || max_y <= y {
            return Rect::default();
        }
        Rect::new(x, y, max_x - x, max_y - y)
    }

    /// Smallest rectangle containing both; empty rectangles are ignored
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.max_x().max(other.max_x()) - x, self.max_y().max(other.max_y()) - y)
    }
}

/// Image RGBA 8 bits, ligne par ligne depuis le haut
/// 8-bit RGBA image, row by row from the top
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

impl PreviewImage {
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        let (r, g, b) = color.to_rgb8();
        Self {
            width,
            height,
            pixels: vec![[r, g, b, color.alpha8()]; width * height],
        }
    }

    pub fn black(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    /// Returns `None` when `pixels` does not hold exactly `width * height`
    /// entries
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<[u8; 4]>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[y * self.width + x];
        Some(Color::from_rgba8(r, g, b, a))
    }

    /// Center pixel; black for an empty image
    pub fn center(&self) -> Color {
        self.pixel(self.width / 2, self.height / 2).unwrap_or_default()
    }

    /// Copies `other` with its top-left corner at (`left`, `top`), clipping
    /// whatever falls outside
    pub fn paste(&mut self, other: &PreviewImage, left: usize, top: usize) {
        for y in 0..other.height {
            let ty = top + y;
            if ty >= self.height {
                break;
            }
            for x in 0..other.width {
                let tx = left + x;
                if tx >= self.width {
                    break;
                }
                self.pixels[ty * self.width + tx] = other.pixels[y * other.width + x];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_on_puts_point_in_center_pixel() {
        let rect = Rect::centered_on(Point::new(50.7, 20.2), 28.0);
        assert_eq!(rect, Rect::new(36.0, 6.0, 28.0, 28.0));
    }

    #[test]
    fn test_intersection_and_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Rect::new(5.0, 0.0, 5.0, 5.0));
        assert!(a.intersection(&Rect::new(20.0, 20.0, 1.0, 1.0)).is_empty());
        assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 15.0, 15.0));
        assert_eq!(Rect::default().union(&a), a);
    }

    #[test]
    fn test_paste_clips() {
        let mut base = PreviewImage::black(4, 4);
        let white = PreviewImage::filled(3, 3, Color::WHITE);
        base.paste(&white, 2, 2);

        assert_eq!(base.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(base.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(base.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(base.pixel(4, 4), None);
    }

    #[test]
    fn test_from_pixels_checks_size() {
        assert!(PreviewImage::from_pixels(2, 2, vec![[0; 4]; 3]).is_none());
        let image = PreviewImage::from_pixels(1, 1, vec![[255, 0, 0, 255]]).unwrap();
        assert_eq!(image.center(), Color::rgb(1.0, 0.0, 0.0));
    }
}
