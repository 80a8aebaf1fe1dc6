//! View - Center and zoom of a map instance.
//!
//! The view is owned by the backend; the container only pushes new values
//! onto it. Setters report what actually changed so callers can skip no-ops.

use crate::types::{Coordinate, ViewChange};

/// Lowest zoom level a view accepts by default.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;

/// Highest zoom level a view accepts by default.
pub const DEFAULT_MAX_ZOOM: f64 = 28.0;

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    center: Coordinate,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl View {
    /// Create a view. Zoom is clamped to the default range; NaN becomes the minimum.
    pub fn new(center: Coordinate, zoom: f64) -> Self {
        let mut view = Self {
            center,
            zoom: DEFAULT_MIN_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        };
        view.set_zoom(zoom);
        view
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn set_center(&mut self, center: Coordinate) -> ViewChange {
        if self.center == center {
            return ViewChange::empty();
        }
        self.center = center;
        ViewChange::CENTER
    }

    /// Set the zoom level, clamped to `[min_zoom, max_zoom]`.
    ///
    /// NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> ViewChange {
        if zoom.is_nan() {
            tracing::warn!("ignoring NaN zoom");
            return ViewChange::empty();
        }
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if self.zoom == zoom {
            return ViewChange::empty();
        }
        self.zoom = zoom;
        ViewChange::ZOOM
    }

    /// Narrow or widen the allowed zoom range. The current zoom is re-clamped.
    ///
    /// Bounds are swapped if given in the wrong order. NaN bounds are ignored.
    pub fn set_zoom_range(&mut self, min: f64, max: f64) -> ViewChange {
        if min.is_nan() || max.is_nan() {
            tracing::warn!("ignoring NaN zoom range");
            return ViewChange::empty();
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut change = ViewChange::empty();
        if (self.min_zoom, self.max_zoom) != (min, max) {
            self.min_zoom = min;
            self.max_zoom = max;
            change |= ViewChange::ZOOM_RANGE;
        }
        change | self.set_zoom(self.zoom)
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(Coordinate::default(), DEFAULT_MIN_ZOOM)
    }
}
