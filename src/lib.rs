//! Pinball - a fixed-timestep 2D pinball table simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world state, flippers, collisions, tick)
//! - `table`: The compiled reference table layout
//! - `input`: Pointer events to flipper press state
//! - `clock`: Fixed-step accumulator for variable-rate host loops
//! - `renderer`: CPU-side geometry for drawing a frame
//! - `settings`: Host-side configuration

pub mod clock;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod table;

pub use clock::FixedClock;
pub use settings::{Settings, SettingsError};
pub use sim::{World, WorldError, tick};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec2;

    /// Ticks per simulated second
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Default cap on ticks run per host frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Constant acceleration applied to every ball
    pub const GRAVITY: Vec2 = Vec2::new(0.0, -3.0);

    /// Table extent in world units
    pub const TABLE_WIDTH: f32 = 1.0;
    pub const TABLE_HEIGHT: f32 = 1.7;
}

/// Rotate a vector 90° counter-clockwise
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Closest point to `p` on the segment `[a, b]`
///
/// The projection parameter is clamped to [0, 1], so the result always lies
/// on the segment. `a` and `b` must differ.
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let t = ((p.dot(ab) - a.dot(ab)) / ab.dot(ab)).clamp(0.0, 1.0);
    a + ab * t
}
