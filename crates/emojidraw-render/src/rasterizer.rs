//! CPU stroke rasterizer.
//!
//! Flattens sealed strokes into a fixed-size opaque bitmap. Each stroke is
//! one continuous polyline with round caps and joins; paint order is stroke
//! insertion order. Rendering is coverage-based: per pixel, the distance to
//! the nearest segment is turned into an alpha value with a one-pixel
//! feather at the edge.

use emojidraw_core::stroke::Stroke;
use image::{Rgba, RgbaImage};
use kurbo::{Point, Size};
use peniko::Color;
use thiserror::Error;

/// Largest accepted edge length of the target surface, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Rasterizer errors.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("invalid target surface: {0}")]
    InvalidSurface(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("could not decode inline image: {0}")]
    Decode(String),
}

/// Stroke rendering options.
///
/// Defaults match the drawing surface: 3px black strokes over an opaque
/// white background.
#[derive(Debug, Clone)]
pub struct StrokeRasterizer {
    stroke_width: f64,
    stroke_color: Color,
    background: Color,
}

impl Default for StrokeRasterizer {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            stroke_color: Color::from_rgba8(0, 0, 0, 255),
            background: Color::from_rgba8(255, 255, 255, 255),
        }
    }
}

impl StrokeRasterizer {
    /// Create a rasterizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stroke width (in unscaled coordinate units).
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set the stroke color.
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Render the given strokes onto a `size * scale` bitmap.
    ///
    /// An empty stroke list produces a plain background image. A
    /// single-point stroke is rendered as a filled dot of the stroke width,
    /// matching the round-cap treatment of longer strokes.
    ///
    /// Fails only when the target surface cannot be allocated: zero-sized,
    /// non-finite, or beyond [`MAX_DIMENSION`].
    pub fn rasterize(
        &self,
        strokes: &[Stroke],
        size: Size,
        scale: f64,
    ) -> Result<RgbaImage, RasterError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RasterError::InvalidSurface(format!("scale {}", scale)));
        }
        let width = (size.width * scale).round();
        let height = (size.height * scale).round();
        if !width.is_finite()
            || !height.is_finite()
            || width < 1.0
            || height < 1.0
            || width > MAX_DIMENSION as f64
            || height > MAX_DIMENSION as f64
        {
            return Err(RasterError::InvalidSurface(format!(
                "{}x{} at scale {}",
                size.width, size.height, scale
            )));
        }

        let mut image = RgbaImage::from_pixel(width as u32, height as u32, to_rgba(self.background));
        let radius = (self.stroke_width * scale) / 2.0;

        for stroke in strokes {
            self.paint_stroke(&mut image, stroke, scale, radius);
        }

        Ok(image)
    }

    fn paint_stroke(&self, image: &mut RgbaImage, stroke: &Stroke, scale: f64, radius: f64) {
        let points = &stroke.points;
        match points.len() {
            0 => {}
            1 => {
                let p = scaled(points[0], scale);
                paint_capsule(image, p, p, radius, self.stroke_color);
            }
            _ => {
                for window in points.windows(2) {
                    let a = scaled(window[0], scale);
                    let b = scaled(window[1], scale);
                    paint_capsule(image, a, b, radius, self.stroke_color);
                }
            }
        }
    }
}

fn scaled(p: Point, scale: f64) -> Point {
    Point::new(p.x * scale, p.y * scale)
}

fn to_rgba(color: Color) -> Rgba<u8> {
    let rgba = color.to_rgba8();
    Rgba([rgba.r, rgba.g, rgba.b, rgba.a])
}

/// Paint the capsule around segment `a`..`b` (a disc when `a == b`).
fn paint_capsule(image: &mut RgbaImage, a: Point, b: Point, radius: f64, color: Color) {
    let reach = radius + 1.0;
    let x0 = (a.x.min(b.x) - reach).floor().max(0.0) as u32;
    let y0 = (a.y.min(b.y) - reach).floor().max(0.0) as u32;
    let x1 = (a.x.max(b.x) + reach).ceil().min((image.width() - 1) as f64);
    let y1 = (a.y.max(b.y) + reach).ceil().min((image.height() - 1) as f64);
    if x1 < 0.0 || y1 < 0.0 {
        return;
    }
    let (x1, y1) = (x1 as u32, y1 as u32);

    let src = color.to_rgba8();
    for y in y0..=y1 {
        for x in x0..=x1 {
            // Sample at the pixel center.
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let coverage = (radius + 0.5 - segment_distance(p, a, b)).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let alpha = coverage * (src.a as f64 / 255.0);
                blend(image.get_pixel_mut(x, y), src.r, src.g, src.b, alpha);
            }
        }
    }
}

/// Distance from `point` to the segment `start`..`end`.
fn segment_distance(point: Point, start: Point, end: Point) -> f64 {
    let line = kurbo::Vec2::new(end.x - start.x, end.y - start.y);
    let to_point = kurbo::Vec2::new(point.x - start.x, point.y - start.y);

    let line_len_sq = line.hypot2();
    if line_len_sq < f64::EPSILON {
        return to_point.hypot();
    }

    let t = (to_point.dot(line) / line_len_sq).clamp(0.0, 1.0);
    let projection = Point::new(start.x + t * line.x, start.y + t * line.y);
    ((point.x - projection.x).powi(2) + (point.y - projection.y).powi(2)).sqrt()
}

/// Source-over blend with the given alpha.
fn blend(dst: &mut Rgba<u8>, r: u8, g: u8, b: u8, alpha: f64) {
    let mix = |src: u8, dst: u8| -> u8 {
        (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8
    };
    dst[0] = mix(r, dst[0]);
    dst[1] = mix(g, dst[1]);
    dst[2] = mix(b, dst[2]);
    dst[3] = (255.0 * alpha + dst[3] as f64 * (1.0 - alpha)).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use emojidraw_core::canvas::DrawingCanvas;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn size(w: f64, h: f64) -> Size {
        Size::new(w, h)
    }

    #[test]
    fn test_empty_canvas_is_plain_background() {
        let image = StrokeRasterizer::new()
            .rasterize(&[], size(40.0, 30.0), 1.0)
            .unwrap();

        assert_eq!(image.dimensions(), (40, 30));
        assert!(image.pixels().all(|&p| p == WHITE));
    }

    #[test]
    fn test_clear_then_rasterize_matches_blank() {
        let mut canvas = DrawingCanvas::new();
        canvas.begin_stroke();
        canvas.append_point(Point::new(5.0, 5.0));
        canvas.append_point(Point::new(20.0, 20.0));
        canvas.end_stroke();
        canvas.clear();

        let rasterizer = StrokeRasterizer::new();
        let image = rasterizer
            .rasterize(canvas.strokes(), size(32.0, 32.0), 1.0)
            .unwrap();
        let blank = rasterizer.rasterize(&[], size(32.0, 32.0), 1.0).unwrap();
        assert_eq!(image.as_raw(), blank.as_raw());
    }

    #[test]
    fn test_line_marks_pixels_on_segment_only() {
        let stroke = Stroke::from_points(vec![Point::new(4.0, 16.0), Point::new(28.0, 16.0)]);
        let image = StrokeRasterizer::new()
            .rasterize(&[stroke], size(32.0, 32.0), 1.0)
            .unwrap();

        // On the segment: fully covered, solid stroke color.
        assert_eq!(*image.get_pixel(16, 16), Rgba([0, 0, 0, 255]));
        // Far from the segment: untouched background.
        assert_eq!(*image.get_pixel(16, 2), WHITE);
        assert_eq!(*image.get_pixel(1, 30), WHITE);
    }

    #[test]
    fn test_single_point_stroke_renders_a_dot() {
        let stroke = Stroke::from_points(vec![Point::new(16.0, 16.0)]);
        let image = StrokeRasterizer::new()
            .with_stroke_width(4.0)
            .rasterize(&[stroke], size(32.0, 32.0), 1.0)
            .unwrap();

        assert_eq!(*image.get_pixel(16, 16), Rgba([0, 0, 0, 255]));
        // Outside the dot radius the background survives.
        assert_eq!(*image.get_pixel(25, 16), WHITE);
    }

    #[test]
    fn test_in_progress_stroke_is_not_rendered() {
        let mut canvas = DrawingCanvas::new();
        canvas.begin_stroke();
        canvas.append_point(Point::new(8.0, 8.0));
        canvas.append_point(Point::new(24.0, 24.0));
        // Gesture still active: nothing sealed, nothing to rasterize.

        let image = StrokeRasterizer::new()
            .rasterize(canvas.strokes(), size(32.0, 32.0), 1.0)
            .unwrap();
        assert!(image.pixels().all(|&p| p == WHITE));
    }

    #[test]
    fn test_scale_multiplies_dimensions() {
        let image = StrokeRasterizer::new()
            .rasterize(&[], size(100.0, 50.0), 2.0)
            .unwrap();
        assert_eq!(image.dimensions(), (200, 100));
    }

    #[test]
    fn test_scaled_stroke_lands_on_scaled_coordinates() {
        let stroke = Stroke::from_points(vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0)]);
        let image = StrokeRasterizer::new()
            .rasterize(&[stroke], size(40.0, 40.0), 2.0)
            .unwrap();

        assert_eq!(*image.get_pixel(30, 20), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(30, 40), WHITE);
    }

    #[test]
    fn test_invalid_surface_is_a_hard_error() {
        let rasterizer = StrokeRasterizer::new();
        assert!(rasterizer.rasterize(&[], size(0.0, 32.0), 1.0).is_err());
        assert!(rasterizer.rasterize(&[], size(32.0, 32.0), 0.0).is_err());
        assert!(rasterizer.rasterize(&[], size(32.0, 32.0), -1.0).is_err());
        assert!(rasterizer
            .rasterize(&[], size(f64::INFINITY, 32.0), 1.0)
            .is_err());
        assert!(rasterizer
            .rasterize(&[], size(MAX_DIMENSION as f64 + 1.0, 32.0), 1.0)
            .is_err());
    }

    #[test]
    fn test_strokes_outside_surface_are_clipped() {
        let stroke = Stroke::from_points(vec![Point::new(-50.0, -50.0), Point::new(-10.0, -10.0)]);
        let image = StrokeRasterizer::new()
            .rasterize(&[stroke], size(32.0, 32.0), 1.0)
            .unwrap();
        assert!(image.pixels().all(|&p| p == WHITE));
    }
}
