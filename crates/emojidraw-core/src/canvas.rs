//! Drawing canvas state for stroke capture.
//!
//! Accumulates pointer-drag input into discrete strokes. The in-progress
//! stroke is kept separate from the sealed list so the live preview can be
//! redrawn per frame without touching finished data; the export path only
//! ever reads sealed strokes.

use crate::stroke::{Stroke, StrokeId};
use kurbo::Point;

/// Canvas state: the ordered list of sealed strokes plus at most one
/// in-progress stroke.
///
/// Sealed strokes are immutable; insertion order is z-order is render order.
/// Individual removal or reordering is not supported, only wholesale
/// [`clear`](DrawingCanvas::clear).
#[derive(Debug, Clone, Default)]
pub struct DrawingCanvas {
    /// Sealed strokes in insertion order.
    strokes: Vec<Stroke>,
    /// The stroke currently being drawn, if a gesture is active.
    active: Option<Stroke>,
}

impl DrawingCanvas {
    /// Create a new empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new stroke. Called on gesture start.
    ///
    /// Any in-progress stroke from a gesture that never ended is discarded.
    pub fn begin_stroke(&mut self) {
        if let Some(ref active) = self.active {
            log::debug!(
                "begin_stroke while a {}-point stroke was active; discarding it",
                active.len()
            );
        }
        self.active = Some(Stroke::new());
    }

    /// Append a point to the in-progress stroke. Called once per input
    /// sample, in order. Zero or near-zero movement deltas are accepted.
    ///
    /// Ignored (with a debug log) when no gesture is active.
    pub fn append_point(&mut self, point: Point) {
        match self.active {
            Some(ref mut stroke) => stroke.push(point),
            None => log::debug!("append_point with no active stroke; ignoring"),
        }
    }

    /// Seal the in-progress stroke and append it to the sealed list.
    ///
    /// A single-point stroke (a tap) is sealed like any other. A stroke with
    /// no points at all is discarded and `None` is returned; the capture
    /// threshold guarantees real gestures carry at least one sample.
    pub fn end_stroke(&mut self) -> Option<StrokeId> {
        let stroke = self.active.take()?;
        if stroke.is_empty() {
            log::debug!("end_stroke on an empty stroke; discarding");
            return None;
        }
        let id = stroke.id();
        self.strokes.push(stroke);
        Some(id)
    }

    /// Drop all sealed strokes and any in-progress stroke. Idempotent.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }

    /// Sealed strokes in z-order (back to front).
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The in-progress stroke, if a gesture is active.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    /// Check if a gesture is currently active.
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Check if there are no sealed strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Number of sealed strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }
}
