//! Function sampling
//!
//! Treats the expression on the stack as `y = f(symbol)` and samples it
//! across the columns of a view. Drawing is left to the front end.

use serde::{Deserialize, Serialize};

use crate::engine::ExpressionEngine;

pub const POINTS_PER_UNIT: f64 = 50.0;
pub const MIN_SCALE: f64 = 0.4;
pub const MAX_SCALE: f64 = 3.0;
/// Upper bound on the columns one `sample` call evaluates
pub const MAX_COLUMNS: usize = 8192;

/// Mapping between view points and graph coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub points_per_unit: f64,
    pub scale: f64,
    /// Position of the graph origin in view points
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            points_per_unit: POINTS_PER_UNIT,
            scale: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl Viewport {
    /// Viewport of a `width` x `height` view with the origin in its center
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            origin_x: width / 2.0,
            origin_y: height / 2.0,
            ..Self::default()
        }
    }

    fn effective_points_per_unit(&self) -> Option<f64> {
        let ppu = self.points_per_unit * self.scale;
        if ppu == 0.0 {
            None
        } else {
            Some(ppu)
        }
    }

    /// Graph x coordinate of a view column
    pub fn x_coordinate(&self, point_x: f64) -> Option<f64> {
        let ppu = self.effective_points_per_unit()?;
        Some((point_x - self.origin_x) / ppu)
    }

    /// View row of a graph y coordinate (view y grows downwards)
    pub fn y_point(&self, coordinate_y: f64) -> Option<f64> {
        let ppu = self.effective_points_per_unit()?;
        Some(self.origin_y - coordinate_y * ppu)
    }

    pub fn zoom(&mut self, factor: f64) {
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.origin_x += dx;
        self.origin_y += dy;
    }
}

/// A sampled point, in view points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Sample the stack as a function of `symbol` for every `step` view points
/// between `min_x` and `max_x`. Columns where the expression has no finite
/// value are skipped. Ranges needing more than `MAX_COLUMNS` columns yield
/// no points.
pub fn sample(
    engine: &ExpressionEngine,
    symbol: &str,
    viewport: &Viewport,
    min_x: f64,
    max_x: f64,
    step: f64,
) -> Vec<PlotPoint> {
    if !(step > 0.0) || max_x < min_x {
        return Vec::new();
    }

    let columns = ((max_x - min_x) / step).floor();
    if !columns.is_finite() || columns >= MAX_COLUMNS as f64 {
        return Vec::new();
    }
    let columns = columns as usize;
    (0..=columns)
        .filter_map(|i| {
            let point_x = min_x + i as f64 * step;
            let x = viewport.x_coordinate(point_x)?;
            let y = engine.evaluate_at(symbol, x).ok()?;
            if !y.is_finite() {
                return None;
            }
            let point_y = viewport.y_point(y)?;
            Some(PlotPoint {
                x: point_x,
                y: point_y,
            })
        })
        .collect()
}
