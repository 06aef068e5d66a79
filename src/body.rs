use bevy::prelude::*;
use std::collections::VecDeque;
use thiserror::Error;

/// Stable handle pairing a simulated body with its render entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub u64);

/// Preset categories a user can place. Carries the physical preset values;
/// the renderer owns the kind-to-color mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    FixedStar,
    Star,
    Planet,
    Moon,
    Asteroid,
}

impl BodyKind {
    pub const ALL: [BodyKind; 5] = [
        BodyKind::FixedStar,
        BodyKind::Star,
        BodyKind::Planet,
        BodyKind::Moon,
        BodyKind::Asteroid,
    ];

    pub fn mass(self) -> f32 {
        match self {
            BodyKind::FixedStar => 5000.0,
            BodyKind::Star => 2000.0,
            BodyKind::Planet => 200.0,
            BodyKind::Moon => 50.0,
            BodyKind::Asteroid => 10.0,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            BodyKind::FixedStar => 20.0,
            BodyKind::Star => 15.0,
            BodyKind::Planet => 8.0,
            BodyKind::Moon => 4.0,
            BodyKind::Asteroid => 2.0,
        }
    }

    /// Fixed bodies act as immovable anchors.
    pub fn is_fixed(self) -> bool {
        matches!(self, BodyKind::FixedStar)
    }

    pub fn label(self) -> &'static str {
        match self {
            BodyKind::FixedStar => "Fixed Star",
            BodyKind::Star => "Star",
            BodyKind::Planet => "Planet",
            BodyKind::Moon => "Moon",
            BodyKind::Asteroid => "Asteroid",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum BodyError {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f32),
    #[error("body radius must be positive, got {0}")]
    NonPositiveRadius(f32),
}

/// Bounded history of past positions, oldest evicted first. Display only,
/// never read by the physics.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A point mass in the sandbox.
///
/// Fixed bodies ignore every mutation: their velocity and acceleration stay
/// zero and their position never changes, no matter what forces are applied.
#[derive(Clone, Debug)]
pub struct Body {
    id: BodyId,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    mass: f32,
    radius: f32,
    fixed: bool,
    kind: BodyKind,
    trail: Trail,
}

impl Body {
    /// Creates a body at rest. Mass and radius must be positive; the force
    /// computation divides by mass, so a non-positive value is rejected here
    /// rather than surfacing later as inf/NaN trajectories.
    pub fn new(
        id: BodyId,
        position: Vec2,
        mass: f32,
        radius: f32,
        fixed: bool,
        kind: BodyKind,
        trail_capacity: usize,
    ) -> Result<Self, BodyError> {
        if mass <= 0.0 {
            return Err(BodyError::NonPositiveMass(mass));
        }
        if radius <= 0.0 {
            return Err(BodyError::NonPositiveRadius(radius));
        }
        Ok(Self {
            id,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass,
            radius,
            fixed,
            kind,
            trail: Trail::new(trail_capacity),
        })
    }

    /// Creates a body from a preset. Preset values are all positive, so this
    /// cannot fail.
    pub fn from_kind(
        id: BodyId,
        position: Vec2,
        kind: BodyKind,
        trail_capacity: usize,
    ) -> Result<Self, BodyError> {
        Self::new(
            id,
            position,
            kind.mass(),
            kind.radius(),
            kind.is_fixed(),
            kind,
            trail_capacity,
        )
    }

    /// Overwrites the acceleration with `force / mass`. This is an
    /// assignment, not an accumulation: the stepper sums all pairwise
    /// contributions first and hands over one grand total per step.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.fixed {
            return;
        }
        self.acceleration = force / self.mass;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        if self.fixed {
            return;
        }
        self.velocity = velocity;
    }

    /// Advances one timestep:
    /// `position += velocity*dt + 0.5*acceleration*dt²`, then
    /// `velocity += acceleration*dt`. The position half-step correction is
    /// kept as-is; trajectories depend on this exact formula. The current
    /// position is recorded in the trail even for fixed bodies.
    pub fn advance(&mut self, dt: f32) {
        if !self.fixed {
            self.position += self.velocity * dt + 0.5 * self.acceleration * dt * dt;
            self.velocity += self.acceleration * dt;
        }
        self.trail.push(self.position);
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }
}
