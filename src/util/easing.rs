//! Easing curves for animation interpolation.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]` with `f(0) = 0` and `f(1) = 1`.
//! The camera reset animation uses [`EasingFunction::RationalInOut`] by
//! default; the others are selectable through the animation options.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Rational ease-in/ease-out: `2t² / (1 + t⁴)`.
    ///
    /// Monotonic on `[0, 1]` with zero slope at `t = 0` and `t = 1`.
    RationalInOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f32,
        /// Second control point.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default curve for the orientation reset animation.
    pub const DEFAULT: EasingFunction = EasingFunction::RationalInOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::RationalInOut => {
                let t2 = t * t;
                2.0 * t2 / (1.0 + t2 * t2)
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_rational_endpoints_and_midpoint() {
        let f = EasingFunction::RationalInOut;
        assert_eq!(f.evaluate(0.0), 0.0);
        assert_eq!(f.evaluate(1.0), 1.0);
        // 2 * 0.25 / (1 + 0.0625)
        assert!((f.evaluate(0.5) - 0.470_588_24).abs() < 1e-6);
    }

    #[test]
    fn test_rational_is_monotonic() {
        let f = EasingFunction::RationalInOut;
        let mut prev = f.evaluate(0.0);
        for i in 1..=1000 {
            let v = f.evaluate(i as f32 / 1000.0);
            assert!(v >= prev, "not monotonic at step {i}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn test_cubic_hermite_endpoints() {
        let hermite = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        assert_eq!(hermite.evaluate(0.0), 0.0);
        assert!((hermite.evaluate(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let rational = EasingFunction::RationalInOut;
        assert_eq!(rational.evaluate(-3.0), 0.0);
        assert_eq!(rational.evaluate(7.0), 1.0);
    }

    #[test]
    fn test_quadratic_curves() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EasingFunction::RationalInOut)
            .unwrap();
        assert_eq!(json, "\"rational_in_out\"");
        let parsed: EasingFunction =
            serde_json::from_str("\"quadratic_out\"").unwrap();
        assert_eq!(parsed, EasingFunction::QuadraticOut);
    }
}
