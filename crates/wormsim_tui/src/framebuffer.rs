//! Software rasterizer for display lists.
//!
//! Terminal cells are split into two square-ish pixels (upper and lower half
//! block), so a `w x h` cell area becomes a `w x 2h` pixel buffer. Shapes are
//! scaled uniformly from canvas units and letterboxed inside that buffer.

use wormsim_data::{Overlay, Point, Rgba, Shape};

/// Pixels narrower than this are still drawn one pixel wide.
const MIN_HALF_WIDTH: f64 = 0.5;

/// Maps canvas coordinates to framebuffer pixels and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub world_width: f64,
    pub world_height: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    /// Fits a `world_width x world_height` canvas into the pixel buffer,
    /// centered, keeping its aspect ratio.
    #[must_use]
    pub fn fit(pixel_width: usize, pixel_height: usize, world_width: f64, world_height: f64) -> Self {
        let scale = if world_width > 0.0 && world_height > 0.0 {
            (pixel_width as f64 / world_width).min(pixel_height as f64 / world_height)
        } else {
            0.0
        };
        Self {
            pixel_width,
            pixel_height,
            world_width,
            world_height,
            scale,
            offset_x: (pixel_width as f64 - world_width * scale) / 2.0,
            offset_y: (pixel_height as f64 - world_height * scale) / 2.0,
        }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn to_pixel(&self, p: Point) -> Point {
        Point::new(self.offset_x + p.x * self.scale, self.offset_y + p.y * self.scale)
    }

    /// Canvas point under the center of pixel `(px, py)`, if it falls on the
    /// canvas rather than the letterbox.
    #[must_use]
    pub fn to_world(&self, px: usize, py: usize) -> Option<Point> {
        if self.scale <= 0.0 {
            return None;
        }
        let x = (px as f64 + 0.5 - self.offset_x) / self.scale;
        let y = (py as f64 + 0.5 - self.offset_y) / self.scale;
        ((0.0..self.world_width).contains(&x) && (0.0..self.world_height).contains(&y))
            .then(|| Point::new(x, y))
    }

    /// Pixel rectangle covered by the canvas, as `(x0, y0, x1, y1)` exclusive.
    fn canvas_bounds(&self) -> (usize, usize, usize, usize) {
        let x0 = self.offset_x.max(0.0).floor() as usize;
        let y0 = self.offset_y.max(0.0).floor() as usize;
        let x1 = ((self.offset_x + self.world_width * self.scale).ceil() as usize)
            .min(self.pixel_width);
        let y1 = ((self.offset_y + self.world_height * self.scale).ceil() as usize)
            .min(self.pixel_height);
        (x0, y0, x1, y1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Framebuffer {
    #[must_use]
    pub fn new(width: usize, height: usize, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// A buffer for `viewport` with the canvas painted `canvas` and the
    /// letterbox around it painted `border`.
    #[must_use]
    pub fn for_viewport(viewport: &Viewport, canvas: Rgba, border: Rgba) -> Self {
        let mut fb = Self::new(viewport.pixel_width, viewport.pixel_height, border);
        let (x0, y0, x1, y1) = viewport.canvas_bounds();
        for y in y0..y1 {
            for x in x0..x1 {
                fb.set(x, y, canvas);
            }
        }
        fb
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    fn set(&mut self, x: usize, y: usize, color: Rgba) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Source-over blend of `color` onto one pixel.
    pub fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        if let Some(dst) = self.get(x, y) {
            self.set(x, y, blend(dst, color));
        }
    }

    /// Copies `other` in place when the sizes match.
    pub fn copy_from(&mut self, other: &Framebuffer) {
        if self.width == other.width && self.height == other.height {
            self.pixels.copy_from_slice(&other.pixels);
        } else {
            self.clone_from(other);
        }
    }

    /// Rasterizes every shape of `overlay` in order, clipped to the canvas.
    pub fn draw_overlay(&mut self, overlay: &Overlay, viewport: &Viewport) {
        let clip = viewport.canvas_bounds();
        let scale = viewport.scale();
        for shape in overlay {
            match shape {
                Shape::Circle {
                    center,
                    radius,
                    color,
                } => self.fill_circle(viewport.to_pixel(*center), radius * scale, *color, clip),
                Shape::Line {
                    from,
                    to,
                    color,
                    thickness,
                } => {
                    let points = [viewport.to_pixel(*from), viewport.to_pixel(*to)];
                    self.stroke(&points, thickness * scale / 2.0, *color, clip);
                }
                Shape::Polyline {
                    points,
                    color,
                    thickness,
                } => {
                    let points: Vec<Point> = points.iter().map(|p| viewport.to_pixel(*p)).collect();
                    self.stroke(&points, thickness * scale / 2.0, *color, clip);
                }
            }
        }
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Rgba,
        clip: (usize, usize, usize, usize),
    ) {
        let radius = radius.max(MIN_HALF_WIDTH);
        let bounds = Bounds::around(&[center], radius, clip);
        for y in bounds.y0..bounds.y1 {
            for x in bounds.x0..bounds.x1 {
                let pixel = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if pixel.distance(&center) <= radius {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Each covered pixel is blended once, even where segments overlap.
    fn stroke(
        &mut self,
        points: &[Point],
        half_width: f64,
        color: Rgba,
        clip: (usize, usize, usize, usize),
    ) {
        if points.is_empty() {
            return;
        }
        let half_width = half_width.max(MIN_HALF_WIDTH);
        let bounds = Bounds::around(points, half_width, clip);
        for y in bounds.y0..bounds.y1 {
            for x in bounds.x0..bounds.x1 {
                let pixel = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let hit = if points.len() == 1 {
                    pixel.distance(&points[0]) <= half_width
                } else {
                    points
                        .windows(2)
                        .any(|seg| distance_to_segment(pixel, seg[0], seg[1]) <= half_width)
                };
                if hit {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

struct Bounds {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl Bounds {
    fn around(points: &[Point], margin: f64, clip: (usize, usize, usize, usize)) -> Self {
        let (cx0, cy0, cx1, cy1) = clip;
        let finite = points.iter().filter(|p| p.is_finite());
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in finite {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if min_x > max_x {
            return Self {
                x0: 0,
                y0: 0,
                x1: 0,
                y1: 0,
            };
        }
        let clamp = |v: f64, lo: usize, hi: usize| (v.max(lo as f64) as usize).clamp(lo, hi);
        Self {
            x0: clamp((min_x - margin).floor(), cx0, cx1),
            y0: clamp((min_y - margin).floor(), cy0, cy1),
            x1: clamp((max_x + margin).ceil() + 1.0, cx0, cx1),
            y1: clamp((max_y + margin).ceil() + 1.0, cy0, cy1),
        }
    }
}

/// Straight-alpha source-over, rounded to the nearest channel value.
#[must_use]
pub fn blend(dst: Rgba, src: Rgba) -> Rgba {
    let a = u32::from(src.a);
    let mix = |s: u8, d: u8| ((u32::from(s) * a + u32::from(d) * (255 - a) + 127) / 255) as u8;
    Rgba::rgb(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b))
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(&Point::new(a.x + t * dx, a.y + t * dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    fn square_viewport(pixels: usize) -> Viewport {
        Viewport::fit(pixels, pixels, pixels as f64, pixels as f64)
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(Rgba::BLACK, RED), RED);
        assert_eq!(blend(RED, Rgba::TRANSPARENT), RED);
        assert_eq!(
            blend(Rgba::BLACK, Rgba::gray(200, 128)),
            Rgba::rgb(100, 100, 100)
        );
    }

    #[test]
    fn test_viewport_letterboxes_wide_canvas() {
        let viewport = Viewport::fit(100, 100, 200.0, 100.0);
        assert_eq!(viewport.scale(), 0.5);
        assert_eq!(viewport.to_pixel(Point::ORIGIN), Point::new(0.0, 25.0));
        assert!(viewport.to_world(50, 10).is_none());
        let p = viewport.to_world(50, 50).unwrap();
        assert!((p.x - 101.0).abs() < 1e-9);
        assert!((p.y - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_covers_center_only() {
        let viewport = square_viewport(20);
        let mut fb = Framebuffer::for_viewport(&viewport, Rgba::BLACK, Rgba::BLACK);
        let mut overlay = Overlay::new();
        overlay.circle(Point::new(10.0, 10.0), 3.0, RED);
        fb.draw_overlay(&overlay, &viewport);

        assert_eq!(fb.get(10, 10), Some(RED));
        assert_eq!(fb.get(9, 9), Some(RED));
        assert_eq!(fb.get(15, 10), Some(Rgba::BLACK));
        assert_eq!(fb.get(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_translucent_circle_blends_once() {
        let viewport = square_viewport(10);
        let mut fb = Framebuffer::for_viewport(&viewport, Rgba::BLACK, Rgba::BLACK);
        let mut overlay = Overlay::new();
        overlay.circle(Point::new(5.0, 5.0), 2.0, Rgba::gray(200, 128));
        fb.draw_overlay(&overlay, &viewport);
        assert_eq!(fb.get(5, 5), Some(Rgba::rgb(100, 100, 100)));
    }

    #[test]
    fn test_overlapping_polyline_blends_once() {
        let viewport = square_viewport(20);
        let mut fb = Framebuffer::for_viewport(&viewport, Rgba::BLACK, Rgba::BLACK);
        let mut overlay = Overlay::new();
        let points = vec![
            Point::new(2.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(18.0, 10.0),
        ];
        overlay.polyline(points, Rgba::gray(200, 128), 2.0);
        fb.draw_overlay(&overlay, &viewport);
        assert_eq!(fb.get(10, 10), Some(Rgba::rgb(100, 100, 100)));
        assert_eq!(fb.get(10, 15), Some(Rgba::BLACK));
    }

    #[test]
    fn test_thin_line_still_visible() {
        let viewport = Viewport::fit(10, 10, 100.0, 100.0);
        let mut fb = Framebuffer::for_viewport(&viewport, Rgba::BLACK, Rgba::BLACK);
        let mut overlay = Overlay::new();
        overlay.line(Point::new(5.0, 55.0), Point::new(95.0, 55.0), RED, 1.0);
        fb.draw_overlay(&overlay, &viewport);
        assert!((0..10).all(|x| fb.get(x, 5) == Some(RED)));
    }

    #[test]
    fn test_shapes_clipped_to_canvas() {
        let viewport = Viewport::fit(20, 10, 10.0, 10.0);
        let mut fb = Framebuffer::for_viewport(&viewport, Rgba::BLACK, Rgba::gray(30, 255));
        let mut overlay = Overlay::new();
        overlay.circle(Point::new(0.0, 5.0), 4.0, RED);
        fb.draw_overlay(&overlay, &viewport);

        assert_eq!(fb.get(4, 5), Some(Rgba::gray(30, 255)));
        assert_eq!(fb.get(5, 5), Some(RED));
    }

    #[test]
    fn test_copy_from_resizes() {
        let mut small = Framebuffer::new(2, 2, Rgba::BLACK);
        let big = Framebuffer::new(4, 3, RED);
        small.copy_from(&big);
        assert_eq!(small, big);
    }
}
