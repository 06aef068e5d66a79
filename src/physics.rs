use bevy::prelude::*;

use crate::body::Body;

/// Separations below this contribute zero force. Guards the division by
/// distance for near-coincident bodies; not a collision response.
pub const MIN_DISTANCE: f32 = 1e-10;

/// Advances the body collection under mutual Newtonian gravity.
///
/// Holds the gravitational constant for its whole lifetime; `G` is decided
/// once at startup and never overridden per call.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Stepper {
    g: f32,
}

impl Stepper {
    pub fn new(g: f32) -> Self {
        Self { g }
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    /// Gravitational force exerted on `on` by `from`: attraction along the
    /// unit vector from `on` toward `from`, magnitude `G*m1*m2/d²`. Zero
    /// inside the epsilon regime.
    pub fn gravity_force(&self, on: &Body, from: &Body) -> Vec2 {
        let r = from.position() - on.position();
        let distance = r.length();
        if distance < MIN_DISTANCE {
            return Vec2::ZERO;
        }
        let magnitude = self.g * on.mass() * from.mass() / (distance * distance);
        magnitude * (r / distance)
    }

    /// One simulation step: accumulate the total force on every body against
    /// the current position snapshot, then integrate every body.
    ///
    /// The two phases must not interleave. `Body::apply_force` overwrites the
    /// acceleration, so each body's total is summed in full before the single
    /// call, and no position moves until every force is in place.
    pub fn step(&self, bodies: &mut [Body], dt: f32) {
        for i in 0..bodies.len() {
            let mut total_force = Vec2::ZERO;
            for j in 0..bodies.len() {
                if i != j {
                    total_force += self.gravity_force(&bodies[i], &bodies[j]);
                }
            }
            bodies[i].apply_force(total_force);
        }

        for body in bodies.iter_mut() {
            body.advance(dt);
        }
    }
}

/// True iff the discs overlap. Utility for callers; the stepper itself never
/// resolves collisions and bodies pass through each other.
pub fn check_collision(a: &Body, b: &Body) -> bool {
    let distance = (b.position() - a.position()).length();
    distance < a.radius() + b.radius()
}
