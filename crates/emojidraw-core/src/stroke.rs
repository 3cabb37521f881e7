//! Freehand stroke data model.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// One continuous freehand line, captured as an ordered point sequence.
///
/// Points are in view coordinates and are appended in capture order. The id
/// exists only for rendering-list stability; it carries no equality or merge
/// semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    /// Points in capture order.
    pub points: Vec<Point>,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
        }
    }

    /// Get the stroke id.
    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Append a point. Duplicate and near-duplicate points are accepted.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the bounding box of the stroke, or `Rect::ZERO` if empty.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_creation() {
        let stroke = Stroke::new();
        assert!(stroke.is_empty());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut stroke = Stroke::new();
        stroke.push(Point::new(1.0, 2.0));
        stroke.push(Point::new(3.0, 4.0));
        stroke.push(Point::new(3.0, 4.0));

        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.points[0], Point::new(1.0, 2.0));
        assert_eq!(stroke.points[1], Point::new(3.0, 4.0));
        assert_eq!(stroke.points[2], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_bounds() {
        let stroke = Stroke::from_points(vec![
            Point::new(10.0, 20.0),
            Point::new(110.0, 5.0),
            Point::new(60.0, 90.0),
        ]);

        let bounds = stroke.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(Stroke::new().bounds(), Rect::ZERO);
    }
}
