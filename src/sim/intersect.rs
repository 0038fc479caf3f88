//! Segment crossing primitives
//!
//! Shared by goal detection and the goalkeeper bot.

use glam::DVec2;

use crate::cross;

/// Whether a disc moving from `prev` to `cur` crossed the segment `p0`-`p1`
///
/// Two sign tests on cross products: the goal posts lie on opposite sides of
/// the travel line (or on it), and the two positions lie on opposite sides of
/// the goal line (or on it). Touching counts, so a disc ending exactly on the
/// line or passing through a post is a crossing.
pub fn crosses_segment(prev: DVec2, cur: DVec2, p0: DVec2, p1: DVec2) -> bool {
    let travel = cur - prev;
    let line = p1 - p0;
    cross(cur - p0, travel) * cross(cur - p1, travel) <= 0.0
        && cross(prev - p0, line) * cross(cur - p0, line) <= 0.0
}

/// Intersection point of segments `a0`-`a1` and `b0`-`b1`
///
/// Parallel segments never intersect. The point must fall inside the
/// bounding box of both segments.
pub fn segment_intersection(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2) -> Option<DVec2> {
    let da = a0 - a1;
    let db = b0 - b1;
    let d = cross(da, db);
    if d == 0.0 {
        return None;
    }

    let ca = cross(a0, a1);
    let cb = cross(b0, b1);
    let point = DVec2::new(ca * db.x - da.x * cb, ca * db.y - da.y * cb) / d;

    let within = |p: DVec2, s0: DVec2, s1: DVec2| {
        p.x >= s0.x.min(s1.x) && p.x <= s0.x.max(s1.x) && p.y >= s0.y.min(s1.y) && p.y <= s0.y.max(s1.y)
    };
    (within(point, a0, a1) && within(point, b0, b1)).then_some(point)
}
