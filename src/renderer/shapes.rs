//! Shape generation for 2D primitives
//!
//! Everything is emitted in clip space. Circles are triangle fans whose last
//! vertex lands back on the first; the boundary is a line loop.

use glam::{Mat2, Vec2};
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::consts::{TABLE_HEIGHT, TABLE_WIDTH};
use crate::sim::{Boundary, Flipper, World};

/// Fewest vertices a circle fan can have and still enclose area
pub const MIN_CIRCLE_SEGMENTS: usize = 4;

/// Map world coordinates onto the [-1, 1] clip square
#[inline]
pub fn world_to_clip(p: Vec2) -> Vec2 {
    Vec2::new(p.x * 2.0 / TABLE_WIDTH - 1.0, p.y * 2.0 / TABLE_HEIGHT - 1.0)
}

/// Triangle fan around `center`, starting at angle 0
pub fn circle_fan(center: Vec2, radius: f32, segments: usize, color: [f32; 4]) -> Vec<Vertex> {
    let segments = segments.max(MIN_CIRCLE_SEGMENTS);
    let step = TAU / (segments - 1) as f32;
    (0..segments)
        .map(|i| {
            let theta = i as f32 * step;
            let p = center + Vec2::new(theta.cos(), theta.sin()) * radius;
            Vertex::at(world_to_clip(p), color)
        })
        .collect()
}

/// Boundary polygon as a line loop
pub fn boundary_loop(boundary: &Boundary) -> Vec<Vertex> {
    boundary
        .vertices()
        .iter()
        .map(|&v| Vertex::at(world_to_clip(v), colors::BOUNDARY))
        .collect()
}

/// Geometry for one flipper: a fan per cap and a quad for the arm
#[derive(Debug, Clone)]
pub struct FlipperMesh {
    pub pivot_cap: Vec<Vertex>,
    pub tip_cap: Vec<Vertex>,
    /// Four corners, drawable as a fan
    pub body: Vec<Vertex>,
}

pub fn flipper_mesh(flipper: &Flipper, segments: usize) -> FlipperMesh {
    let color = if flipper.is_pressed() {
        colors::FLIPPER_PRESSED
    } else {
        colors::FLIPPER
    };
    let rot = Mat2::from_angle(flipper.angle());
    let (l, r) = (flipper.length, flipper.radius);
    let body = [
        Vec2::new(l, r),
        Vec2::new(0.0, r),
        Vec2::new(0.0, -r),
        Vec2::new(l, -r),
    ]
    .into_iter()
    .map(|corner| Vertex::at(world_to_clip(flipper.pivot + rot * corner), color))
    .collect();

    FlipperMesh {
        pivot_cap: circle_fan(flipper.pivot, r, segments, color),
        tip_cap: circle_fan(flipper.tip(), r, segments, color),
        body,
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Boundary line loop
    pub lines: Vec<Vertex>,
    /// One triangle fan per filled shape
    pub fans: Vec<Vec<Vertex>>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.lines.len() + self.fans.iter().map(Vec::len).sum::<usize>()
    }

    /// Bytes needed to upload every vertex of the frame
    pub fn byte_len(&self) -> usize {
        self.vertex_count() * Vertex::STRIDE
    }
}

/// Build the frame geometry from a completed tick
pub fn world_mesh(world: &World, segments: usize) -> Mesh {
    let mut fans = Vec::with_capacity(
        world.balls().len() + world.bumpers().len() + world.flippers().len() * 3,
    );
    for ball in world.balls() {
        fans.push(circle_fan(ball.pos, ball.radius, segments, colors::BALL));
    }
    for bumper in world.bumpers() {
        fans.push(circle_fan(bumper.pos, bumper.radius, segments, colors::BUMPER));
    }
    for flipper in world.flippers() {
        let mesh = flipper_mesh(flipper, segments);
        fans.push(mesh.pivot_cap);
        fans.push(mesh.tip_cap);
        fans.push(mesh.body);
    }
    Mesh {
        lines: boundary_loop(world.boundary()),
        fans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table;

    fn close(a: [f32; 2], b: Vec2) -> bool {
        (Vec2::from(a) - b).length() < 1e-5
    }

    #[test]
    fn test_world_to_clip_corners() {
        assert_eq!(world_to_clip(Vec2::ZERO), Vec2::new(-1.0, -1.0));
        let top = world_to_clip(Vec2::new(TABLE_WIDTH, TABLE_HEIGHT));
        assert!((top - Vec2::ONE).length() < 1e-6);
    }

    #[test]
    fn test_circle_fan_closes() {
        let fan = circle_fan(Vec2::new(0.5, 0.85), 0.1, 32, colors::BALL);
        assert_eq!(fan.len(), 32);
        assert!(close(fan[0].position, Vec2::from(fan[31].position)));
        // First vertex sits at angle 0
        assert!(close(fan[0].position, world_to_clip(Vec2::new(0.6, 0.85))));
    }

    #[test]
    fn test_circle_fan_minimum_segments() {
        assert_eq!(circle_fan(Vec2::ZERO, 1.0, 0, colors::BALL).len(), MIN_CIRCLE_SEGMENTS);
    }

    #[test]
    fn test_flipper_body_spans_arm() {
        let world = table::classic();
        let f = &world.flippers()[0];
        let mesh = flipper_mesh(f, 16);
        assert_eq!(mesh.body.len(), 4);
        // Midpoint of the far edge is the tip
        let far_mid = (Vec2::from(mesh.body[0].position) + Vec2::from(mesh.body[3].position)) / 2.0;
        assert!((far_mid - world_to_clip(f.tip())).length() < 1e-5);
        assert_eq!(mesh.body[0].color, colors::FLIPPER);
    }

    #[test]
    fn test_world_mesh_counts() {
        let world = table::classic();
        let mesh = world_mesh(&world, 16);
        assert_eq!(mesh.lines.len(), 8);
        // 2 balls + 4 bumpers + 2 flippers * (2 caps + body)
        assert_eq!(mesh.fans.len(), 12);
        assert_eq!(mesh.vertex_count(), 8 + 10 * 16 + 2 * 4);
        assert_eq!(mesh.byte_len(), mesh.vertex_count() * 24);
        let fan_bytes: usize = mesh
            .fans
            .iter()
            .map(|f| bytemuck::cast_slice::<Vertex, u8>(f).len())
            .sum();
        assert_eq!(
            mesh.byte_len(),
            bytemuck::cast_slice::<Vertex, u8>(&mesh.lines).len() + fan_bytes
        );
    }
}
