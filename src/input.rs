//! Pointer input to flipper press state
//!
//! The host translates raw pointer events through here; this is the only
//! path by which input touches the world.

use glam::Vec2;

use crate::consts::{TABLE_HEIGHT, TABLE_WIDTH};
use crate::sim::World;

/// Touch id recorded on flippers engaged by the primary pointer
pub const PRIMARY_POINTER: i32 = 0;

/// Convert viewport pixels (origin top-left, y down) to world coordinates
pub fn screen_to_world(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        x / width * TABLE_WIDTH,
        TABLE_HEIGHT - y / height * TABLE_HEIGHT,
    )
}

/// Engage every flipper whose pivot is within arm's reach of `point`
///
/// Returns the number of flippers engaged.
pub fn pointer_down(world: &mut World, point: Vec2, touch_id: i32) -> usize {
    let hits: Vec<usize> = world
        .flippers()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.within_reach(point))
        .map(|(i, _)| i)
        .collect();
    for &i in &hits {
        world.press_flipper(i, touch_id);
        log::debug!("Flipper {} pressed (touch {})", i, touch_id);
    }
    hits.len()
}

/// Release all flippers, whoever pressed them
pub fn pointer_up(world: &mut World) {
    world.release_flippers();
    log::debug!("Flippers released");
}
