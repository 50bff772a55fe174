//! Gradient-remapping easing curves.
//!
//! An easing function reshapes the normalized gradient before value
//! interpolation. A per-key easing overrides the track-level one.

use serde::{Deserialize, Serialize};

/// Closed set of easing curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Quadratic acceleration: t^2
    EaseIn,
    /// Quadratic deceleration: 1 - (1 - t)^2
    EaseOut,
    /// Quadratic acceleration then deceleration
    EaseInOut,
    /// Cubic bezier with control points (x1, y1) and (x2, y2)
    Bezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl EasingFunction {
    /// Remap a gradient through this curve
    pub fn ease(&self, gradient: f64) -> f64 {
        match self {
            EasingFunction::EaseIn => gradient * gradient,
            EasingFunction::EaseOut => 1.0 - (1.0 - gradient) * (1.0 - gradient),
            EasingFunction::EaseInOut => {
                if gradient < 0.5 {
                    2.0 * gradient * gradient
                } else {
                    1.0 - 2.0 * (1.0 - gradient) * (1.0 - gradient)
                }
            }
            EasingFunction::Bezier { x1, y1, x2, y2 } => {
                cubic_bezier(gradient.clamp(0.0, 1.0), &[*x1, *y1, *x2, *y2])
            }
        }
    }
}

fn cubic_bezier(t: f64, control_points: &[f64; 4]) -> f64 {
    let [x1, y1, x2, y2] = *control_points;

    // Binary search for the curve parameter whose x matches t
    let mut lower = 0.0;
    let mut upper = 1.0;
    let mut current_t = t;

    for _ in 0..10 {
        let current_x = cubic_bezier_value(current_t, 0.0, x1, x2, 1.0);

        if (current_x - t).abs() < 0.001 {
            break;
        }

        if current_x < t {
            lower = current_t;
        } else {
            upper = current_t;
        }

        current_t = (lower + upper) / 2.0;
    }

    cubic_bezier_value(current_t, 0.0, y1, y2, 1.0)
}

fn cubic_bezier_value(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let one_minus_t = 1.0 - t;
    let one_minus_t_squared = one_minus_t * one_minus_t;
    let one_minus_t_cubed = one_minus_t_squared * one_minus_t;
    let t_squared = t * t;
    let t_cubed = t_squared * t;

    one_minus_t_cubed * p0
        + 3.0 * one_minus_t_squared * t * p1
        + 3.0 * one_minus_t * t_squared * p2
        + t_cubed * p3
}
