//! Collision detection and response
//!
//! Narrow phase only: discs against each other, then each movable disc
//! against planes, segments and vertexes. Every static body is immovable.
//! Responses mutate positions and velocities in place, in a fixed order, so
//! identical inputs produce bit-identical results.

use glam::DVec2;

use super::disc::Disc;
use super::flags::can_collide;
use super::geometry::{Plane, Segment, SegmentShape, Vertex};
use crate::stadium::Geometry;

/// Signed distance and surface normal of a disc center relative to a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Distance from the surface along `normal` (negative = behind it)
    pub dist: f64,
    /// Unit normal pointing toward the disc
    pub normal: DVec2,
}

/// Push two overlapping discs apart and exchange the normal impulse
///
/// Separation and impulse are split by inverse-mass share. Coincident centers
/// or two immovable discs are left untouched.
pub fn resolve_disc_disc(a: &mut Disc, b: &mut Disc) {
    let offset = a.position - b.position;
    let dist = offset.length();
    let radius_sum = a.radius + b.radius;
    if !(dist > 0.0 && dist <= radius_sum) {
        return;
    }
    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum == 0.0 {
        return;
    }

    let normal = offset / dist;
    let mass_factor = a.inv_mass / inv_mass_sum;
    let overlap = radius_sum - dist;
    a.position += normal * overlap * mass_factor;
    b.position -= normal * overlap * (1.0 - mass_factor);

    let normal_velocity = (a.velocity - b.velocity).dot(normal);
    if normal_velocity < 0.0 {
        let bounce = -(1.0 + a.b_coef * b.b_coef);
        a.velocity += normal * normal_velocity * bounce * mass_factor;
        b.velocity -= normal * normal_velocity * bounce * (1.0 - mass_factor);
    }
}

/// Push a disc out along `normal` by `depth` and reflect the approaching velocity
fn bounce_off_static(disc: &mut Disc, normal: DVec2, depth: f64, b_coef: f64) {
    disc.position += normal * depth;
    let normal_velocity = disc.velocity.dot(normal);
    if normal_velocity < 0.0 {
        let bounce = -(1.0 + disc.b_coef * b_coef);
        disc.velocity += normal * normal_velocity * bounce;
    }
}

pub fn resolve_disc_vertex(disc: &mut Disc, vertex: &Vertex) {
    let offset = disc.position - vertex.position;
    let dist = offset.length();
    if dist > 0.0 && dist <= disc.radius {
        bounce_off_static(disc, offset / dist, disc.radius - dist, vertex.b_coef);
    }
}

/// Raw contact of a point against a segment, before bias
///
/// Straight segments only report points whose projection falls strictly
/// between the endpoints. Curved segments report points inside the arc's
/// sweep; the distance is measured from the circle. A zero-length segment
/// never reports a contact.
pub fn segment_contact(point: DVec2, segment: &Segment) -> Option<Contact> {
    if segment.p0 == segment.p1 {
        return None;
    }
    match &segment.shape {
        SegmentShape::Straight => {
            let dir = segment.p1 - segment.p0;
            if !(dir.dot(point - segment.p0) > 0.0 && dir.dot(point - segment.p1) < 0.0) {
                return None;
            }
            let normal = DVec2::new(dir.y, -dir.x) / dir.length();
            Some(Contact {
                dist: normal.dot(point - segment.p1),
                normal,
            })
        }
        SegmentShape::Curved(arc) => {
            let offset = point - arc.center;
            if !arc.in_sweep(offset, segment.curve) {
                return None;
            }
            let len = offset.length();
            if len <= 0.0 {
                return None;
            }
            Some(Contact {
                dist: len - arc.radius,
                normal: offset / len,
            })
        }
    }
}

/// Apply a segment's bias to a raw contact
///
/// Zero bias collides from both sides. Negative bias collides from the back
/// side only. A contact further than `|bias|` behind the surface is dropped.
pub fn apply_bias(bias: f64, contact: Contact) -> Option<Contact> {
    let Contact {
        mut dist,
        mut normal,
    } = contact;
    let mut bias = bias;
    if bias == 0.0 {
        if dist < 0.0 {
            dist = -dist;
            normal = -normal;
        }
    } else if bias < 0.0 {
        bias = -bias;
        dist = -dist;
        normal = -normal;
    }

    if dist < -bias {
        return None;
    }
    Some(Contact { dist, normal })
}

pub fn resolve_disc_segment(disc: &mut Disc, segment: &Segment) {
    let Some(contact) = segment_contact(disc.position, segment) else {
        return;
    };
    let Some(Contact { dist, normal }) = apply_bias(segment.bias, contact) else {
        return;
    };
    if dist < disc.radius {
        bounce_off_static(disc, normal, disc.radius - dist, segment.b_coef);
    }
}

pub fn resolve_disc_plane(disc: &mut Disc, plane: &Plane) {
    let len = plane.normal.length();
    if len == 0.0 {
        return;
    }
    let normal = plane.normal / len;
    let depth = plane.dist - disc.position.dot(normal) + disc.radius;
    if depth > 0.0 {
        bounce_off_static(disc, normal, depth, plane.b_coef);
    }
}

/// Resolve one tick of collisions for every disc
///
/// For disc `i`: pairs `(i, j)` with `j > i`, then (if `i` is movable)
/// planes, segments and vertexes in map order.
pub fn resolve_collisions(discs: &mut [Disc], geometry: &Geometry) {
    for i in 0..discs.len() {
        let (head, tail) = discs.split_at_mut(i + 1);
        let a = &mut head[i];

        for b in tail.iter_mut() {
            if can_collide(a.c_group, a.c_mask, b.c_group, b.c_mask) {
                resolve_disc_disc(a, b);
            }
        }

        if !a.is_movable() {
            continue;
        }
        for plane in &geometry.planes {
            if can_collide(a.c_group, a.c_mask, plane.c_group, plane.c_mask) {
                resolve_disc_plane(a, plane);
            }
        }
        for segment in &geometry.segments {
            if can_collide(a.c_group, a.c_mask, segment.c_group, segment.c_mask) {
                resolve_disc_segment(a, segment);
            }
        }
        for vertex in &geometry.vertexes {
            if can_collide(a.c_group, a.c_mask, vertex.c_group, vertex.c_mask) {
                resolve_disc_vertex(a, vertex);
            }
        }
    }
}
