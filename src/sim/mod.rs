//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{ball_ball, ball_boundary, ball_bumper, ball_flipper};
pub use state::{Ball, Boundary, Bumper, Flipper, RELEASED, World, WorldError};
pub use tick::{step, tick};
