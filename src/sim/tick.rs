//! Fixed timestep simulation tick
//!
//! Advances the world deterministically: flippers first, then each ball in
//! index order is integrated and resolved against balls, bumpers, flippers
//! and finally the boundary.

use glam::Vec2;

use super::collision::{ball_ball, ball_boundary, ball_bumper, ball_flipper};
use super::state::World;
use crate::consts::{GRAVITY, SIM_DT};

/// Advance the world by exactly one fixed timestep
pub fn tick(world: &mut World) {
    step(world, GRAVITY, SIM_DT);
}

/// Advance the world by `dt` under `gravity`
///
/// `tick` is the only caller in normal play; a custom `dt` exists for tests
/// and tools that need to run the step directly.
pub fn step(world: &mut World, gravity: Vec2, dt: f32) {
    let (balls, boundary, bumpers, flippers) = world.parts_mut();

    for flipper in flippers.iter_mut() {
        flipper.advance(dt);
    }

    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let ball = &mut head[i];

        ball.integrate(gravity, dt);
        for other in tail.iter_mut() {
            ball_ball(ball, other);
        }
        for bumper in bumpers {
            ball_bumper(ball, bumper);
        }
        for flipper in flippers.iter() {
            ball_flipper(ball, flipper);
        }
        ball_boundary(ball, boundary);
    }

    world.time_ticks += 1;
    log::trace!("tick {} done", world.time_ticks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, Boundary, Bumper, Flipper};
    use crate::table;
    use proptest::prelude::*;

    fn open_box() -> Boundary {
        Boundary::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ])
        .unwrap()
    }

    fn world_with(balls: Vec<Ball>) -> World {
        World::new(balls, open_box(), vec![], vec![]).unwrap()
    }

    #[test]
    fn test_free_fall_integration() {
        let p0 = Vec2::new(5.0, 5.0);
        let v0 = Vec2::new(0.5, 1.0);
        let mut world = world_with(vec![Ball::new(0.1, 1.0, p0, v0, 0.5)]);

        tick(&mut world);

        let ball = &world.balls()[0];
        let v1 = v0 + GRAVITY * SIM_DT;
        assert_eq!(ball.vel, v1);
        assert_eq!(ball.pos, p0 + v1 * SIM_DT);
        assert_eq!(world.time_ticks, 1);
    }

    #[test]
    fn test_resting_ball_without_gravity_is_untouched() {
        let mut world = world_with(vec![Ball::new(0.1, 1.0, Vec2::new(3.0, 7.0), Vec2::ZERO, 0.5)]);
        step(&mut world, Vec2::ZERO, SIM_DT);
        assert_eq!(world.balls()[0].pos, Vec2::new(3.0, 7.0));
        assert_eq!(world.balls()[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_ball_on_edge_pushed_out_after_tick() {
        let mut world = world_with(vec![Ball::new(
            0.1,
            1.0,
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, -1.0),
            0.5,
        )]);
        tick(&mut world);
        let ball = &world.balls()[0];
        assert!(ball.pos.y >= ball.radius - 1e-5);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_balls_collide_once_per_pair() {
        // Head-on along x, no gravity so only the pair interacts
        let a = Ball::new(0.1, 1.0, Vec2::new(4.95, 5.0), Vec2::new(1.0, 0.0), 1.0);
        let b = Ball::new(0.1, 1.0, Vec2::new(5.1, 5.0), Vec2::new(-1.0, 0.0), 1.0);
        let mut world = world_with(vec![a, b]);
        step(&mut world, Vec2::ZERO, SIM_DT);
        let (a, b) = (&world.balls()[0], &world.balls()[1]);
        // Equal masses, elastic: velocities swap
        assert!((a.vel.x - -1.0).abs() < 1e-5);
        assert!((b.vel.x - 1.0).abs() < 1e-5);
        let total = a.vel + b.vel;
        assert!(total.length() < 1e-5);
    }

    #[test]
    fn test_flippers_advance_before_balls() {
        let flipper = Flipper::new(0.05, Vec2::new(2.0, 2.0), 1.0, 0.0, 1.0, 1.0, 10.0);
        let mut world = World::new(vec![], open_box(), vec![], vec![flipper]).unwrap();
        world.press_flipper(0, 0);
        tick(&mut world);
        assert!(world.flippers()[0].rotation > 0.0);
        assert!(world.flippers()[0].angular_velocity < 0.0);
    }

    #[test]
    fn test_zero_length_flipper_leaves_ball_alone() {
        let flipper = Flipper::new(0.05, Vec2::new(5.0, 5.0), 0.0, 0.0, 1.0, 1.0, 10.0);
        let ball = Ball::new(0.1, 1.0, Vec2::new(5.02, 5.0), Vec2::ZERO, 0.5);
        let mut world = World::new(vec![ball], open_box(), vec![], vec![flipper]).unwrap();
        world.press_flipper(0, 0);
        for _ in 0..10 {
            step(&mut world, Vec2::ZERO, SIM_DT);
        }
        let ball = &world.balls()[0];
        assert_eq!(ball.pos, Vec2::new(5.02, 5.0));
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_bumper_kicks_during_tick() {
        let bumper = Bumper::new(0.5, Vec2::new(5.0, 5.0), 2.0);
        let ball = Ball::new(0.1, 1.0, Vec2::new(5.0, 5.55), Vec2::ZERO, 0.5);
        let mut world = World::new(vec![ball], open_box(), vec![bumper], vec![]).unwrap();
        step(&mut world, Vec2::ZERO, SIM_DT);
        let ball = &world.balls()[0];
        assert!((ball.vel.y - 2.0).abs() < 1e-5);
        assert!((ball.pos.y - 5.6).abs() < 1e-5);
    }

    #[test]
    fn test_determinism() {
        let mut w1 = table::classic();
        let mut w2 = table::classic();
        for i in 0..240 {
            for world in [&mut w1, &mut w2] {
                if i % 50 == 10 {
                    world.press_flipper(0, 0);
                } else if i % 50 == 30 {
                    world.release_flippers();
                }
                tick(world);
            }
        }
        assert_eq!(w1, w2);
    }

    proptest! {
        #[test]
        fn interior_ball_at_rest_stays_put(x in 1.0f32..9.0, y in 1.0f32..9.0, r in 0.05f32..0.9) {
            let mut world = world_with(vec![Ball::new(r, 1.0, Vec2::new(x, y), Vec2::ZERO, 0.5)]);
            step(&mut world, Vec2::ZERO, SIM_DT);
            prop_assert_eq!(world.balls()[0].pos, Vec2::new(x, y));
        }
    }
}
