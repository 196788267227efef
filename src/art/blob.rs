use std::f64::consts::TAU;

use rand::Rng;
use serde::Serialize;

use super::ArtError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed polygon approximating a circle, each vertex pushed in or out by
/// up to `wobble / 2` of the radius.
///
/// `wobble` must lie in `[0, 1]` so every vertex keeps a positive radius and
/// the outline stays star-shaped around `center`.
pub fn blob<R: Rng + ?Sized>(
    rng: &mut R,
    center: Point,
    radius: f64,
    point_count: usize,
    wobble: f64,
) -> Result<Vec<Point>, ArtError> {
    if !wobble.is_finite() || !(0.0..=1.0).contains(&wobble) {
        return Err(ArtError::InvalidParameter(format!(
            "wobble must be within [0, 1], got {wobble}"
        )));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ArtError::InvalidParameter(format!(
            "radius must be positive, got {radius}"
        )));
    }
    if point_count < 3 {
        return Err(ArtError::InvalidParameter(format!(
            "a blob needs at least 3 points, got {point_count}"
        )));
    }

    let points = (0..point_count)
        .map(|i| {
            let theta = TAU * i as f64 / point_count as f64;
            let u: f64 = rng.gen();
            let r = radius * (1.0 + wobble * (u - 0.5));
            Point::new(center.x + r * theta.cos(), center.y + r * theta.sin())
        })
        .collect();

    Ok(points)
}
