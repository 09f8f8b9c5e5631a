//! Narrow-phase collision detection and response
//!
//! Every routine does a positional correction (separate the shapes) followed
//! by a velocity correction along the contact normal. Each pair is resolved
//! once per tick; there is no iterative relaxation, so a ball pushed out of
//! one shape may end up overlapping another until the next tick.
//!
//! Static shapes are taken by shared reference: a routine only ever writes
//! to the ball(s) it is given.

use glam::Vec2;

use super::state::{Ball, Boundary, Bumper, Flipper};
use crate::{closest_point_on_segment, perpendicular};

/// Resolve contact between two balls
///
/// Overlap is split evenly between the two balls. The normal velocity uses
/// the 1-D restitution impulse with the smaller of the two restitutions;
/// tangential velocity is left alone (frictionless).
pub fn ball_ball(a: &mut Ball, b: &mut Ball) {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    if dist == 0.0 || dist > a.radius + b.radius {
        return;
    }
    let normal = delta / dist;

    let corr = (a.radius + b.radius - dist) / 2.0;
    a.pos -= normal * corr;
    b.pos += normal * corr;

    let rest = a.restitution.min(b.restitution);
    let (ma, mb) = (a.mass, b.mass);
    let v0a = a.vel.dot(normal);
    let v0b = b.vel.dot(normal);
    let v1a = (ma * v0a + mb * v0b - mb * (v0a - v0b) * rest) / (ma + mb);
    let v1b = (ma * v0a + mb * v0b - ma * (v0b - v0a) * rest) / (ma + mb);

    a.vel += normal * (v1a - v0a);
    b.vel += normal * (v1b - v0b);
}

/// Keep a ball inside the table polygon
///
/// Only the single nearest edge is considered. Its reference normal is the
/// perpendicular of the edge direction, so the result depends on winding.
/// The outgoing normal speed is `restitution * |v0|` directed along the
/// push-out direction, whatever the sign of the incoming normal speed.
pub fn ball_boundary(ball: &mut Ball, boundary: &Boundary) {
    // (squared distance, displacement from edge, edge reference normal)
    let mut nearest: Option<(f32, Vec2, Vec2)> = None;
    for (a, b) in boundary.edges() {
        let disp = ball.pos - closest_point_on_segment(ball.pos, a, b);
        let dist_sq = disp.length_squared();
        // Strict comparison: the first of equally near edges wins
        if nearest.is_none_or(|(best, _, _)| dist_sq < best) {
            nearest = Some((dist_sq, disp, perpendicular(b - a)));
        }
    }
    let Some((min_dist_sq, min_disp, n)) = nearest else {
        return;
    };

    let dist = min_dist_sq.sqrt();
    let mut d = if min_dist_sq == 0.0 {
        n / n.length()
    } else {
        min_disp / dist
    };

    let push = if d.dot(n) < 0.0 {
        // Center has crossed the edge: turn the normal back toward the inside
        d = -d;
        ball.radius + dist
    } else if dist > ball.radius {
        return;
    } else {
        ball.radius - dist
    };
    ball.pos += d * push;

    let v0 = ball.vel.dot(d);
    let v1 = v0.abs() * ball.restitution;
    ball.vel += d * (v1 - v0);
}

/// Kick a ball off a bumper
///
/// The bumper never moves. The ball leaves with normal speed exactly
/// `push_vel`, independent of how fast it arrived.
pub fn ball_bumper(ball: &mut Ball, bumper: &Bumper) {
    let delta = ball.pos - bumper.pos;
    let s = delta.length();
    if s == 0.0 || s > ball.radius + bumper.radius {
        return;
    }
    let normal = delta / s;

    ball.pos += normal * (ball.radius + bumper.radius - s);

    let corr = bumper.push_vel - ball.vel.dot(normal);
    ball.vel += normal * corr;
}

/// Resolve a ball against a flipper arm
///
/// The arm is the segment from pivot to tip, thickened by the cap radius.
/// The ball's normal velocity is set to the normal velocity of the moving
/// flipper surface at the contact point (fully inelastic along the normal).
/// An arm whose tip coincides with its pivot has no segment to hit.
pub fn ball_flipper(ball: &mut Ball, flipper: &Flipper) {
    let tip = flipper.tip();
    if tip == flipper.pivot {
        return;
    }
    let closest = closest_point_on_segment(ball.pos, flipper.pivot, tip);
    let delta = ball.pos - closest;
    let s = delta.length();
    if s == 0.0 || s > ball.radius + flipper.radius {
        return;
    }
    let dir = delta / s;

    ball.pos += dir * (ball.radius + flipper.radius - s);

    let contact = closest + dir * flipper.radius;
    let surface_vel = perpendicular((contact - flipper.pivot) * flipper.angular_velocity);
    let corr = surface_vel.dot(dir) - ball.vel.dot(dir);
    ball.vel += dir * corr;
}
