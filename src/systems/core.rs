use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::body::{Body, BodyKind};
use crate::components::{BodyVisual, kind_color};
use crate::physics::Stepper;
use crate::resources::*;
use crate::systems::input::cursor_world_position;

/// Bundled system params used when applying sandbox commands.
#[derive(SystemParam)]
pub struct CommandParams<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub materials: ResMut<'w, Assets<ColorMaterial>>,
    pub sim: ResMut<'w, Simulation>,
    pub config: Res<'w, SimConfig>,
    pub stepper: Res<'w, Stepper>,
}

/// Sets up the camera. The sandbox starts with no bodies; everything on
/// screen is user-placed.
pub fn setup_scene(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("sandbox ready, drag to launch a body");
}

fn spawn_visual(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    body: &Body,
) {
    let mat = materials.add(ColorMaterial::from(kind_color(body.kind())));
    commands.spawn((
        Mesh2d(meshes.add(Circle::new(body.radius()))),
        MeshMaterial2d(mat),
        Transform::from_translation(body.position().extend(0.0)),
        BodyVisual(body.id()),
    ));
}

/// Drains the command queue accumulated since the last physics tick.
///
/// Runs before the step within the same `FixedUpdate` chain, so the body
/// collection never changes shape while a step iterates it.
pub fn apply_pending_commands(
    mut params: CommandParams,
    mut pending: ResMut<PendingCommands>,
    visuals: Query<(Entity, &BodyVisual)>,
) {
    for command in pending.0.drain(..) {
        match command {
            SandboxCommand::Spawn {
                kind,
                position,
                velocity,
            } => {
                let id = params.sim.allocate_id();
                match Body::from_kind(id, position, kind, params.config.trail_capacity) {
                    Ok(mut body) => {
                        body.set_velocity(velocity);
                        spawn_visual(
                            &mut params.commands,
                            &mut params.meshes,
                            &mut params.materials,
                            &body,
                        );
                        debug!("spawned {:?} at {position}", kind);
                        params.sim.push(body);
                    }
                    Err(err) => warn!("rejected body spawn: {err}"),
                }
            }
            SandboxCommand::RemoveAt(point) => {
                if let Some(id) = params.sim.body_at(point) {
                    params.sim.remove(id);
                    for (entity, visual) in visuals.iter() {
                        if visual.0 == id {
                            params.commands.entity(entity).despawn();
                        }
                    }
                }
            }
            SandboxCommand::Clear => {
                info!("clearing {} bodies", params.sim.len());
                params.sim.clear();
                for (entity, _) in visuals.iter() {
                    params.commands.entity(entity).despawn();
                }
            }
            SandboxCommand::SpawnDemo => {
                spawn_demo_scene(&mut params);
            }
        }
    }
}

/// Seeds a ready-made system: a fixed star at the origin and a handful of
/// orbiters launched at circular-orbit speed for their distance.
fn spawn_demo_scene(params: &mut CommandParams) {
    let mut rng = StdRng::from_os_rng();
    let trail_capacity = params.config.trail_capacity;

    let anchor_id = params.sim.allocate_id();
    if let Ok(anchor) = Body::from_kind(anchor_id, Vec2::ZERO, BodyKind::FixedStar, trail_capacity)
    {
        let anchor_mass = anchor.mass();
        spawn_visual(
            &mut params.commands,
            &mut params.meshes,
            &mut params.materials,
            &anchor,
        );
        params.sim.push(anchor);

        for _ in 0..DEMO_ORBITER_COUNT {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let dist = rng.random_range(120.0..350.0);
            let position = Vec2::new(angle.cos(), angle.sin()) * dist;

            let kind = match rng.random_range(0..3) {
                0 => BodyKind::Planet,
                1 => BodyKind::Moon,
                _ => BodyKind::Asteroid,
            };

            let velocity_mag = (params.stepper.g() * anchor_mass / dist).sqrt();
            let velocity = Vec2::new(-angle.sin(), angle.cos()) * velocity_mag;

            let id = params.sim.allocate_id();
            if let Ok(mut body) = Body::from_kind(id, position, kind, trail_capacity) {
                body.set_velocity(velocity);
                spawn_visual(
                    &mut params.commands,
                    &mut params.meshes,
                    &mut params.materials,
                    &body,
                );
                params.sim.push(body);
            }
        }
        info!("spawned demo scene with {} bodies", params.sim.len());
    }
}

/// Advances the physics by one fixed tick, scaled by the user time scale.
pub fn run_simulation(
    mut sim: ResMut<Simulation>,
    stepper: Res<Stepper>,
    config: Res<SimConfig>,
    settings: Res<SimSettings>,
) {
    if settings.paused {
        return;
    }
    let dt = config.dt * settings.time_scale;
    stepper.step(sim.bodies_mut(), dt);
}

/// Copies simulated positions onto the render transforms.
pub fn sync_body_visuals(
    sim: Res<Simulation>,
    mut query: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in query.iter_mut() {
        if let Some(body) = sim.body(visual.0) {
            transform.translation = body.position().extend(0.0);
        }
    }
}

/// Draws each body's trail as a fading polyline, oldest segments dimmest.
pub fn draw_trails(mut gizmos: Gizmos, sim: Res<Simulation>, settings: Res<SimSettings>) {
    if !settings.enable_trails {
        return;
    }

    for body in sim.bodies() {
        let len = body.trail().len();
        if len < 2 {
            continue;
        }
        let color = kind_color(body.kind());
        let points: Vec<Vec2> = body.trail().iter().collect();
        for (i, pair) in points.windows(2).enumerate() {
            let alpha = i as f32 / len as f32;
            gizmos.line_2d(pair[0], pair[1], color.with_alpha(alpha));
        }
    }
}

/// While a launch drag is in progress, draws the aim line from the anchor
/// point to the cursor.
pub fn draw_drag_indicator(
    mut gizmos: Gizmos,
    drag: Res<DragState>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
) {
    let Some(start) = drag.start else {
        return;
    };
    if let Some(cursor) = cursor_world_position(&windows, &camera_q) {
        gizmos.line_2d(start, cursor, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(Simulation::default());
        world.insert_resource(SimConfig::default());
        world.insert_resource(SimSettings::default());
        world.insert_resource(Stepper::new(DEFAULT_G));
        world.insert_resource(PendingCommands::default());
        world.insert_resource(Assets::<Mesh>::default());
        world.insert_resource(Assets::<ColorMaterial>::default());
        world
    }

    fn apply_commands(world: &mut World) {
        let mut system_state: SystemState<(
            CommandParams,
            ResMut<PendingCommands>,
            Query<(Entity, &BodyVisual)>,
        )> = SystemState::new(world);
        {
            let (params, pending, visuals) = system_state.get_mut(world);
            apply_pending_commands(params, pending, visuals);
        }
        system_state.apply(world);
    }

    fn visual_count(world: &mut World) -> usize {
        world.query::<&BodyVisual>().iter(world).count()
    }

    #[test]
    fn spawn_command_creates_body_and_visual() {
        let mut world = test_world();
        world
            .resource_mut::<PendingCommands>()
            .0
            .push(SandboxCommand::Spawn {
                kind: BodyKind::Planet,
                position: Vec2::new(40.0, -10.0),
                velocity: Vec2::new(2.0, 1.0),
            });

        apply_commands(&mut world);

        let sim = world.resource::<Simulation>();
        assert_eq!(sim.len(), 1);
        let body = &sim.bodies()[0];
        assert_eq!(body.position(), Vec2::new(40.0, -10.0));
        assert_eq!(body.velocity(), Vec2::new(2.0, 1.0));
        assert_eq!(body.kind(), BodyKind::Planet);

        assert_eq!(visual_count(&mut world), 1);
        assert!(world.resource::<PendingCommands>().0.is_empty());
    }

    #[test]
    fn fixed_spawn_ignores_launch_velocity() {
        let mut world = test_world();
        world
            .resource_mut::<PendingCommands>()
            .0
            .push(SandboxCommand::Spawn {
                kind: BodyKind::FixedStar,
                position: Vec2::ZERO,
                velocity: Vec2::new(9.0, 9.0),
            });

        apply_commands(&mut world);

        let sim = world.resource::<Simulation>();
        assert_eq!(sim.bodies()[0].velocity(), Vec2::ZERO);
    }

    #[test]
    fn remove_at_despawns_the_hit_body_only() {
        let mut world = test_world();
        {
            let mut pending = world.resource_mut::<PendingCommands>();
            pending.0.push(SandboxCommand::Spawn {
                kind: BodyKind::Star,
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
            });
            pending.0.push(SandboxCommand::Spawn {
                kind: BodyKind::Moon,
                position: Vec2::new(200.0, 0.0),
                velocity: Vec2::ZERO,
            });
        }
        apply_commands(&mut world);
        assert_eq!(world.resource::<Simulation>().len(), 2);

        // Star radius is 15; click just inside its disc.
        world
            .resource_mut::<PendingCommands>()
            .0
            .push(SandboxCommand::RemoveAt(Vec2::new(10.0, 0.0)));
        apply_commands(&mut world);

        let sim = world.resource::<Simulation>();
        assert_eq!(sim.len(), 1);
        assert_eq!(sim.bodies()[0].kind(), BodyKind::Moon);
        assert_eq!(visual_count(&mut world), 1);
    }

    #[test]
    fn clear_command_empties_everything() {
        let mut world = test_world();
        world
            .resource_mut::<PendingCommands>()
            .0
            .push(SandboxCommand::SpawnDemo);
        apply_commands(&mut world);
        assert_eq!(
            world.resource::<Simulation>().len(),
            DEMO_ORBITER_COUNT + 1
        );

        world
            .resource_mut::<PendingCommands>()
            .0
            .push(SandboxCommand::Clear);
        apply_commands(&mut world);

        assert!(world.resource::<Simulation>().is_empty());
        assert_eq!(visual_count(&mut world), 0);
    }

    #[test]
    fn run_simulation_respects_pause() {
        let mut world = test_world();
        {
            let mut sim = world.resource_mut::<Simulation>();
            let anchor = sim.allocate_id();
            sim.push(Body::from_kind(anchor, Vec2::ZERO, BodyKind::FixedStar, 50).unwrap());
            let satellite = sim.allocate_id();
            sim.push(
                Body::from_kind(satellite, Vec2::new(100.0, 0.0), BodyKind::Planet, 50).unwrap(),
            );
        }

        fn run(world: &mut World) {
            let mut system_state: SystemState<(
                ResMut<Simulation>,
                Res<Stepper>,
                Res<SimConfig>,
                Res<SimSettings>,
            )> = SystemState::new(world);
            let (sim, stepper, config, settings) = system_state.get_mut(world);
            run_simulation(sim, stepper, config, settings);
        }

        world.resource_mut::<SimSettings>().paused = true;
        run(&mut world);
        assert_eq!(
            world.resource::<Simulation>().bodies()[1].velocity(),
            Vec2::ZERO
        );

        world.resource_mut::<SimSettings>().paused = false;
        run(&mut world);
        // Satellite is pulled toward the anchor in -x.
        assert!(world.resource::<Simulation>().bodies()[1].velocity().x < 0.0);
    }
}
