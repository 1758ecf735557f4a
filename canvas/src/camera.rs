//! Camera: pan/zoom state, coordinate conversions, and view fitting.
//!
//! The camera maps world coordinates to surface (CSS pixel) coordinates as
//! `screen = world * zoom + pan`. Fitting is a pure function of the surface
//! size and a content bounding box; it is recomputed from scratch whenever
//! either input changes, never adjusted incrementally, so repeated fits of
//! the same inputs are bit-identical.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use catalog::tree::BoundingBox;

use crate::consts::VERTICAL_INSET_WORLD;

/// A point in either surface or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Surface dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Error returned by [`Camera::fit`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FitError {
    /// The surface or the content box has no usable area. Callers must not
    /// fit before the surface has a non-zero size.
    #[error(
        "degenerate extent: surface {surface_width}x{surface_height}, box {box_width}x{box_height}"
    )]
    DegenerateExtent {
        surface_width: f64,
        surface_height: f64,
        box_width: f64,
        box_height: f64,
    },
}

/// Camera state for pan/zoom over the composited map.
///
/// `pan_x` / `pan_y` are in CSS pixels. `zoom` is a scale factor
/// (1.0 = one world unit per pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Fit a content bounding box into a surface, preserving aspect ratio.
    ///
    /// The bottom [`VERTICAL_INSET_WORLD`] world units of the box are
    /// excluded from the fitted height, reserving room for chrome overlaid
    /// along the bottom edge. The more restrictive axis wins, so the whole
    /// box stays visible, centred on the surface.
    ///
    /// # Errors
    ///
    /// [`FitError::DegenerateExtent`] when either surface dimension is zero
    /// or negative, the box has no width, or the box is no taller than the
    /// inset.
    pub fn fit(surface: SurfaceSize, bbox: BoundingBox) -> Result<Self, FitError> {
        let effective_height = bbox.height() - VERTICAL_INSET_WORLD;
        if surface.width <= 0.0
            || surface.height <= 0.0
            || bbox.width() <= 0.0
            || effective_height <= 0.0
        {
            return Err(FitError::DegenerateExtent {
                surface_width: surface.width,
                surface_height: surface.height,
                box_width: bbox.width(),
                box_height: bbox.height(),
            });
        }

        let zoom = (surface.height / effective_height).min(surface.width / bbox.width());
        let center_x = bbox.left + bbox.width() / 2.0;
        let center_y = bbox.top + effective_height / 2.0;
        Ok(Self {
            zoom,
            pan_x: surface.width / 2.0 - center_x * zoom,
            pan_y: surface.height / 2.0 - center_y * zoom,
        })
    }

    /// Convert a surface-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to surface coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a surface-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }
}
