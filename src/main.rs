mod body;
mod components;
mod physics;
mod resources;
mod systems;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

use crate::physics::Stepper;
use crate::resources::{
    DragState, PendingCommands, SimConfig, SimSettings, Simulation, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::systems::*;

fn main() {
    let config = SimConfig::default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "2D Orbit Sandbox".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Stepper::new(config.g))
        .insert_resource(config)
        .init_resource::<SimSettings>()
        .init_resource::<Simulation>()
        .init_resource::<PendingCommands>()
        .init_resource::<DragState>()
        .add_systems(EguiPrimaryContextPass, ui_controls)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                mouse_input,
                keyboard_input,
                sync_body_visuals,
                draw_trails,
                draw_drag_indicator,
            )
                .chain(),
        )
        .add_systems(
            FixedUpdate,
            (apply_pending_commands, run_simulation).chain(),
        )
        .insert_resource(Time::<Fixed>::from_seconds(config.dt as f64))
        .run();
}
