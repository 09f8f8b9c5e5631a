//! The reference table
//!
//! A fixed, compiled layout: two balls, an eight-sided boundary with an
//! outlane funnel, four bumpers and a mirrored pair of flippers.

use std::f32::consts::PI;

use glam::Vec2;

use crate::sim::{Ball, Boundary, Bumper, Flipper, World};

pub const BALL_RADIUS: f32 = 0.03;
pub const BALL_RESTITUTION: f32 = 0.2;
/// Mass proportional to the ball's disc area
pub const BALL_MASS: f32 = PI * BALL_RADIUS * BALL_RADIUS;

pub const BUMPER_PUSH_VEL: f32 = 2.0;

pub const FLIPPER_RADIUS: f32 = 0.03;
pub const FLIPPER_LENGTH: f32 = 0.2;
pub const FLIPPER_MAX_ROTATION: f32 = 1.0;
pub const FLIPPER_ANGULAR_SPEED: f32 = 10.0;

/// Boundary vertices, wound so each edge's perpendicular faces the playfield
pub const BOUNDARY: [Vec2; 8] = [
    Vec2::new(0.74, 0.25),
    Vec2::new(0.98, 0.4),
    Vec2::new(0.98, 1.68),
    Vec2::new(0.02, 1.68),
    Vec2::new(0.02, 0.4),
    Vec2::new(0.26, 0.25),
    Vec2::new(0.26, 0.02),
    Vec2::new(0.74, 0.02),
];

/// Two balls launched upward from the lower side lanes
pub fn balls() -> Vec<Ball> {
    vec![
        Ball::new(
            BALL_RADIUS,
            BALL_MASS,
            Vec2::new(0.92, 0.5),
            Vec2::new(-0.2, 3.5),
            BALL_RESTITUTION,
        ),
        Ball::new(
            BALL_RADIUS,
            BALL_MASS,
            Vec2::new(0.08, 0.5),
            Vec2::new(0.2, 3.5),
            BALL_RESTITUTION,
        ),
    ]
}

pub fn bumpers() -> Vec<Bumper> {
    vec![
        Bumper::new(0.1, Vec2::new(0.25, 0.6), BUMPER_PUSH_VEL),
        Bumper::new(0.1, Vec2::new(0.75, 0.5), BUMPER_PUSH_VEL),
        Bumper::new(0.12, Vec2::new(0.7, 1.0), BUMPER_PUSH_VEL),
        Bumper::new(0.1, Vec2::new(0.2, 1.2), BUMPER_PUSH_VEL),
    ]
}

/// Left flipper then right flipper; the right one mirrors the left
pub fn flippers() -> Vec<Flipper> {
    vec![
        Flipper::new(
            FLIPPER_RADIUS,
            Vec2::new(0.26, 0.22),
            FLIPPER_LENGTH,
            -0.5,
            FLIPPER_MAX_ROTATION,
            1.0,
            FLIPPER_ANGULAR_SPEED,
        ),
        Flipper::new(
            FLIPPER_RADIUS,
            Vec2::new(0.74, 0.22),
            FLIPPER_LENGTH,
            PI + 0.5,
            FLIPPER_MAX_ROTATION,
            -1.0,
            FLIPPER_ANGULAR_SPEED,
        ),
    ]
}

/// Build the reference table in its starting state
pub fn classic() -> World {
    classic_with_balls(balls())
}

/// The reference table with a caller-chosen set of balls
///
/// # Panics
/// If a ball has a non-positive radius or mass.
pub fn classic_with_balls(balls: Vec<Ball>) -> World {
    let boundary = match Boundary::new(BOUNDARY.to_vec()) {
        Ok(boundary) => boundary,
        Err(e) => unreachable!("compiled boundary is valid: {e}"),
    };
    match World::new(balls, boundary, bumpers(), flippers()) {
        Ok(world) => world,
        Err(e) => panic!("invalid ball for the classic table: {e}"),
    }
}
