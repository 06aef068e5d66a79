use bevy::prelude::*;

use crate::body::{Body, BodyId, BodyKind};

// --- Sandbox Defaults ---
/// Gravitational constant, reduced for on-screen scales.
pub const DEFAULT_G: f32 = 0.1;
/// Fixed physics timestep (roughly one 60 Hz frame).
pub const DEFAULT_DT: f32 = 0.016;
/// Maximum stored points per trail.
pub const TRAIL_CAPACITY: usize = 50;
/// Time-scale slider range.
pub const MIN_TIME_SCALE: f32 = 1.0;
pub const MAX_TIME_SCALE: f32 = 5000.0;
/// Drag pixels to launch velocity.
pub const DRAG_VELOCITY_SCALE: f32 = 0.02;
/// Window size.
pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 800;
/// Bodies placed around the anchor by the demo scene.
pub const DEMO_ORBITER_COUNT: usize = 8;

/// Immutable physics parameters, built once at startup.
#[derive(Resource, Clone, Copy)]
pub struct SimConfig {
    pub g: f32,
    pub dt: f32,
    pub trail_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            g: DEFAULT_G,
            dt: DEFAULT_DT,
            trail_capacity: TRAIL_CAPACITY,
        }
    }
}

/// User-facing toggles that drive pacing and rendering.
#[derive(Resource)]
pub struct SimSettings {
    pub time_scale: f32,
    pub paused: bool,
    pub enable_trails: bool,
    pub selected_kind: BodyKind,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            time_scale: MIN_TIME_SCALE,
            paused: false,
            enable_trails: true,
            selected_kind: BodyKind::Star,
        }
    }
}

/// The ordered body collection. Iteration order is stable, which keeps the
/// pairwise force summation deterministic within a step.
#[derive(Resource, Default)]
pub struct Simulation {
    bodies: Vec<Body>,
    next_id: u64,
}

impl Simulation {
    pub fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn push(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    /// First body whose disc contains `point`, used for click deletion.
    pub fn body_at(&self, point: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .find(|body| (body.position() - point).length() < body.radius())
            .map(|body| body.id())
    }

    pub fn remove(&mut self, id: BodyId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|body| body.id() != id);
        self.bodies.len() != before
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// A structural mutation requested by the UI. Commands accumulate during a
/// frame and are applied between steps, never while a step iterates the
/// collection.
#[derive(Clone, Copy, Debug)]
pub enum SandboxCommand {
    Spawn {
        kind: BodyKind,
        position: Vec2,
        velocity: Vec2,
    },
    RemoveAt(Vec2),
    Clear,
    SpawnDemo,
}

#[derive(Resource, Default)]
pub struct PendingCommands(pub Vec<SandboxCommand>);

/// In-progress launch gesture. `start` holds the anchor point of the drag
/// while the left button is down.
#[derive(Resource, Default)]
pub struct DragState {
    pub start: Option<Vec2>,
}
