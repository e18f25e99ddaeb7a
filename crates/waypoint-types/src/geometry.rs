//! Viewport geometry.

use serde::{Deserialize, Serialize};

/// A position inside the viewport, in pixels.
///
/// Kept in floating point so slow cursor speeds still accumulate
/// sub-pixel movement between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Round to whole pixels for rendering.
    pub fn to_pixels(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// The visible content area the cursor lives in.
///
/// Valid positions are `0..=width` horizontally and `0..=height`
/// vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn max_x(&self) -> f32 {
        self.width as f32
    }

    pub fn max_y(&self) -> f32 {
        self.height as f32
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.max_x()).contains(&p.x) && (0.0..=self.max_y()).contains(&p.y)
    }

    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: p.x.clamp(0.0, self.max_x()),
            y: p.y.clamp(0.0, self.max_y()),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.max_x() / 2.0, self.max_y() / 2.0)
    }
}
