//! World state and core simulation types
//!
//! Everything the step mutates or reads lives in an owned [`World`]. Static
//! shapes are immutable after construction; balls and flipper motion change
//! every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Reasons a world configuration is rejected at construction
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// Ball radius must be strictly positive
    BallRadius { index: usize, radius: f32 },
    /// Ball mass must be strictly positive
    BallMass { index: usize, mass: f32 },
    /// A closed polygon needs at least three vertices
    TooFewBoundaryVertices(usize),
    /// Boundary edge `index` starts and ends on the same point
    DegenerateEdge { index: usize },
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BallRadius { index, radius } => {
                write!(f, "ball {index}: radius must be positive, got {radius}")
            }
            Self::BallMass { index, mass } => {
                write!(f, "ball {index}: mass must be positive, got {mass}")
            }
            Self::TooFewBoundaryVertices(n) => {
                write!(f, "boundary needs at least 3 vertices, got {n}")
            }
            Self::DegenerateEdge { index } => {
                write!(f, "boundary edge {index} has zero length")
            }
        }
    }
}

impl std::error::Error for WorldError {}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub radius: f32,
    pub mass: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Bounce energy retention, expected in [0, 1] (not clamped)
    pub restitution: f32,
}

impl Ball {
    pub fn new(radius: f32, mass: f32, pos: Vec2, vel: Vec2, restitution: f32) -> Self {
        Self {
            radius,
            mass,
            pos,
            vel,
            restitution,
        }
    }

    /// Semi-implicit Euler: velocity first, then position from the new velocity
    #[inline]
    pub fn integrate(&mut self, gravity: Vec2, dt: f32) {
        self.vel += gravity * dt;
        self.pos += self.vel * dt;
    }
}

/// Static circular kicker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bumper {
    pub radius: f32,
    pub pos: Vec2,
    /// Outward normal speed given to any ball that touches it
    pub push_vel: f32,
}

impl Bumper {
    pub fn new(radius: f32, pos: Vec2, push_vel: f32) -> Self {
        Self {
            radius,
            pos,
            push_vel,
        }
    }
}

/// Closed polygon that keeps the balls on the table
///
/// Edge `i` runs from vertex `i` to vertex `(i + 1) % len`. Winding matters:
/// the perpendicular of each edge direction is taken as the inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec2>", into = "Vec<Vec2>")]
pub struct Boundary {
    vertices: Vec<Vec2>,
}

impl Boundary {
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, WorldError> {
        if vertices.len() < 3 {
            return Err(WorldError::TooFewBoundaryVertices(vertices.len()));
        }
        let n = vertices.len();
        if let Some(index) = (0..n).find(|&i| vertices[i] == vertices[(i + 1) % n]) {
            return Err(WorldError::DegenerateEdge { index });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Edges as `(start, end)` pairs, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl TryFrom<Vec<Vec2>> for Boundary {
    type Error = WorldError;

    fn try_from(vertices: Vec<Vec2>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<Boundary> for Vec<Vec2> {
    fn from(boundary: Boundary) -> Self {
        boundary.vertices
    }
}

/// Touch id stored while a flipper is released
pub const RELEASED: i32 = -1;

/// A player-actuated paddle rotating about a fixed pivot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flipper {
    /// Cap radius at both ends of the arm
    pub radius: f32,
    pub pivot: Vec2,
    pub length: f32,
    /// Angle (radians) when fully released
    pub rest_angle: f32,
    /// Largest rotation offset reachable while pressed
    pub max_rotation: f32,
    /// +1 or -1, mirrors left and right flippers
    pub sign: f32,
    /// Rate of approach to the target offset (radians/s)
    pub angular_speed: f32,
    /// Current offset from the rest angle, always in [0, max_rotation]
    pub rotation: f32,
    /// Angular rate measured over the last tick
    pub angular_velocity: f32,
    /// Non-negative while pressed, negative while released
    pub touch_id: i32,
}

impl Flipper {
    pub fn new(
        radius: f32,
        pivot: Vec2,
        length: f32,
        rest_angle: f32,
        max_rotation: f32,
        sign: f32,
        angular_speed: f32,
    ) -> Self {
        Self {
            radius,
            pivot,
            length,
            rest_angle,
            max_rotation,
            sign,
            angular_speed,
            rotation: 0.0,
            angular_velocity: 0.0,
            touch_id: RELEASED,
        }
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.touch_id >= 0
    }

    /// Engage the flipper on behalf of a pointer. Negative ids release it.
    pub fn press(&mut self, touch_id: i32) {
        self.touch_id = touch_id;
    }

    pub fn release(&mut self) {
        self.touch_id = RELEASED;
    }

    /// World-space angle of the arm
    #[inline]
    pub fn angle(&self) -> f32 {
        -(self.rest_angle + self.sign * self.rotation)
    }

    /// Far end of the arm
    pub fn tip(&self) -> Vec2 {
        let angle = self.angle();
        self.pivot + Vec2::new(angle.cos(), angle.sin()) * self.length
    }

    /// Whether a world-space point is within arm's reach of the pivot
    pub fn within_reach(&self, point: Vec2) -> bool {
        self.pivot.distance_squared(point) < self.length * self.length
    }

    /// Move the rotation offset toward its target and measure the angular rate
    pub fn advance(&mut self, dt: f32) {
        let prev = self.rotation;
        self.rotation = if self.is_pressed() {
            (self.rotation + self.angular_speed * dt).min(self.max_rotation)
        } else {
            (self.rotation - self.angular_speed * dt).max(0.0)
        };
        self.angular_velocity = self.sign * (prev - self.rotation) / dt;
    }
}

/// The whole table: owned by the host for the lifetime of a run
///
/// Collection sizes are fixed at construction. The renderer only ever reads
/// from it; input only touches flipper press state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    balls: Vec<Ball>,
    boundary: Boundary,
    bumpers: Vec<Bumper>,
    flippers: Vec<Flipper>,
    /// Ticks completed since construction
    pub time_ticks: u64,
}

impl World {
    pub fn new(
        balls: Vec<Ball>,
        boundary: Boundary,
        bumpers: Vec<Bumper>,
        flippers: Vec<Flipper>,
    ) -> Result<Self, WorldError> {
        for (index, ball) in balls.iter().enumerate() {
            if !(ball.radius > 0.0) {
                return Err(WorldError::BallRadius {
                    index,
                    radius: ball.radius,
                });
            }
            if !(ball.mass > 0.0) {
                return Err(WorldError::BallMass {
                    index,
                    mass: ball.mass,
                });
            }
        }
        log::debug!(
            "World built: {} balls, {} boundary vertices, {} bumpers, {} flippers",
            balls.len(),
            boundary.vertices().len(),
            bumpers.len(),
            flippers.len()
        );
        Ok(Self {
            balls,
            boundary,
            bumpers,
            flippers,
            time_ticks: 0,
        })
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Move ball `index` to a new position and velocity
    ///
    /// Radius, mass and restitution stay as validated. Returns false for an
    /// unknown index.
    pub fn place_ball(&mut self, index: usize, pos: Vec2, vel: Vec2) -> bool {
        match self.balls.get_mut(index) {
            Some(ball) => {
                ball.pos = pos;
                ball.vel = vel;
                true
            }
            None => false,
        }
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn bumpers(&self) -> &[Bumper] {
        &self.bumpers
    }

    pub fn flippers(&self) -> &[Flipper] {
        &self.flippers
    }

    /// Engage flipper `index`; returns false for an unknown index
    pub fn press_flipper(&mut self, index: usize, touch_id: i32) -> bool {
        match self.flippers.get_mut(index) {
            Some(flipper) => {
                flipper.press(touch_id);
                true
            }
            None => false,
        }
    }

    pub fn release_flippers(&mut self) {
        for flipper in &mut self.flippers {
            flipper.release();
        }
    }

    /// Split borrow used by the step: mutable balls and flippers, shared statics
    pub(crate) fn parts_mut(&mut self) -> (&mut [Ball], &Boundary, &[Bumper], &mut [Flipper]) {
        (
            &mut self.balls,
            &self.boundary,
            &self.bumpers,
            &mut self.flippers,
        )
    }
}
