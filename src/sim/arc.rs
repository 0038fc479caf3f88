//! Circular arc geometry for curved segments
//!
//! A curved segment is the part of a circle between its two vertexes. The
//! circle is derived once at load time from the endpoints and a curvature
//! factor, then reused by every collision test.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Curve angles inside this open band (degrees) go through `cot(angle / 2)`
pub const CURVE_COT_MIN_DEGREES: f64 = 10.0;
pub const CURVE_COT_MAX_DEGREES: f64 = 170.0;

/// Curvature after resolving the map's `curve` / `curveF` fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curvature {
    /// Geometric factor: offset of the circle center from the chord midpoint,
    /// in units of half the chord length
    pub factor: f64,
    /// Vertex order must be swapped and bias negated
    pub reversed: bool,
}

impl Curvature {
    pub const STRAIGHT: Self = Self {
        factor: 0.0,
        reversed: false,
    };

    /// Resolve a curve angle in degrees or an explicit factor
    ///
    /// A non-zero `curve_f` wins and is used verbatim. Otherwise the angle is
    /// converted to radians; a negative angle reverses the segment. Angles
    /// strictly inside 10°..170° become `cot(angle / 2)`, anything else keeps
    /// the raw radian value.
    pub fn resolve(curve_degrees: f64, curve_f: f64) -> Self {
        if curve_f != 0.0 {
            return Self {
                factor: curve_f,
                reversed: false,
            };
        }

        let mut angle = curve_degrees * PI / 180.0;
        let reversed = angle < 0.0;
        if reversed {
            angle = -angle;
        }

        let lo = CURVE_COT_MIN_DEGREES * PI / 180.0;
        let hi = CURVE_COT_MAX_DEGREES * PI / 180.0;
        if lo < angle && angle < hi {
            angle = 1.0 / (angle / 2.0).tan();
        }

        Self {
            factor: angle,
            reversed,
        }
    }

    #[inline]
    pub fn is_curved(&self) -> bool {
        self.factor != 0.0
    }
}

/// Circle carrying a curved segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleArc {
    pub center: DVec2,
    pub radius: f64,
    /// Boundary directions of the arc's angular sweep (center-relative)
    pub tangent0: DVec2,
    pub tangent1: DVec2,
    /// Start angle (radians)
    pub start_angle: f64,
    /// End angle, unwrapped so that `end_angle >= start_angle`
    pub end_angle: f64,
}

impl CircleArc {
    /// Build the circle through `p0` and `p1` for a non-zero curvature factor
    pub fn from_endpoints(p0: DVec2, p1: DVec2, curve: f64) -> Self {
        let half = (p1 - p0) / 2.0;
        let center = p0 + half + DVec2::new(-half.y, half.x) * curve;
        let radius = (p1 - center).length();

        let r0 = p0 - center;
        let r1 = p1 - center;
        let mut tangent0 = DVec2::new(-r0.y, r0.x);
        let mut tangent1 = DVec2::new(r1.y, -r1.x);
        if curve < 0.0 {
            tangent0 = -tangent0;
            tangent1 = -tangent1;
        }

        let start_angle = r0.y.atan2(r0.x);
        let mut end_angle = r1.y.atan2(r1.x);
        while end_angle < start_angle {
            end_angle += TAU;
        }

        Self {
            center,
            radius,
            tangent0,
            tangent1,
            start_angle,
            end_angle,
        }
    }

    /// Angular extent of the arc
    pub fn angular_span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether a center-relative offset lies in the arc's collision sweep
    ///
    /// For negative curvature the test is inverted, so the sweep covers the
    /// complementary (major) arc.
    pub fn in_sweep(&self, offset: DVec2, curve: f64) -> bool {
        let inside = offset.dot(self.tangent0) > 0.0 && offset.dot(self.tangent1) > 0.0;
        inside != (curve < 0.0)
    }

    /// Point on the circle at `angle`
    pub fn point_at(&self, angle: f64) -> DVec2 {
        self.center + DVec2::new(angle.cos(), angle.sin()) * self.radius
    }
}
