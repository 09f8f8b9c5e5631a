//! Pinball headless host
//!
//! Runs the reference table through the fixed-step clock with a scripted,
//! seeded flipper player, builds frame geometry each frame, and prints the
//! final world as JSON.
//!
//! Usage: `pinball [settings.json]` (verbosity via `RUST_LOG`)

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pinball::consts::SIM_DT;
use pinball::input::{PRIMARY_POINTER, pointer_down, pointer_up, screen_to_world};
use pinball::renderer::world_mesh;
use pinball::sim::World;
use pinball::{FixedClock, Settings, table};

/// Frames a scripted press is held before letting go
const HOLD_FRAMES: u32 = 12;

/// Seeded stand-in for a player: flips when a ball drops near a flipper,
/// plus the occasional random tap
struct Autoplay {
    rng: Pcg32,
    held_frames: u32,
    /// Viewport size in pixels, for synthesizing taps
    viewport: (f32, f32),
}

impl Autoplay {
    fn new(seed: u64, width: u32, height: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held_frames: 0,
            viewport: (width.max(1) as f32, height.max(1) as f32),
        }
    }

    fn drive(&mut self, world: &mut World) {
        let targets: Vec<Vec2> = world
            .balls()
            .iter()
            .filter(|b| b.vel.y < 0.0)
            .map(|b| b.pos)
            .collect();

        let mut engaged = 0;
        for pos in targets {
            engaged += pointer_down(world, pos, PRIMARY_POINTER);
        }
        if engaged == 0 && self.rng.random_ratio(1, 90) {
            // Tap somewhere along the bottom of the screen
            let (w, h) = self.viewport;
            let x = self.rng.random_range(0.0..w);
            let y = self.rng.random_range(h * 0.85..h);
            engaged += pointer_down(world, screen_to_world(x, y, w, h), PRIMARY_POINTER);
        }

        if engaged > 0 {
            self.held_frames = 0;
        } else if world.flippers().iter().any(|f| f.is_pressed()) {
            self.held_frames += 1;
            if self.held_frames >= HOLD_FRAMES {
                pointer_up(world);
                self.held_frames = 0;
            }
        }
    }
}

fn log_snapshot(world: &World) {
    for (i, ball) in world.balls().iter().enumerate() {
        log::info!(
            "tick {:>5} ball {}: pos=({:.3}, {:.3}) vel=({:.3}, {:.3})",
            world.time_ticks,
            i,
            ball.pos.x,
            ball.pos.y,
            ball.vel.x,
            ball.vel.y
        );
    }
}

fn main() {
    env_logger::init();
    log::info!("Pinball (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut world = table::classic();
    let mut clock = FixedClock::new(settings.max_substeps);
    let mut player = Autoplay::new(settings.autoplay_seed, settings.width, settings.height);

    while clock.ticks < settings.ticks {
        player.drive(&mut world);
        let ran = clock.advance(&mut world, SIM_DT);
        if ran == 0 {
            continue;
        }

        let mesh = world_mesh(&world, settings.circle_segments);
        log::trace!(
            "frame at tick {}: {} vertices, {} bytes",
            world.time_ticks,
            mesh.vertex_count(),
            mesh.byte_len()
        );

        if settings.snapshot_every > 0 && world.time_ticks % settings.snapshot_every == 0 {
            log_snapshot(&world);
        }
    }

    log::info!("Ran {} ticks", clock.ticks);
    match serde_json::to_string_pretty(&world) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize world: {}", e);
            std::process::exit(1);
        }
    }
}
