use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_egui::egui;

use crate::body::BodyKind;
use crate::resources::{
    MAX_TIME_SCALE, MIN_TIME_SCALE, PendingCommands, SandboxCommand, SimSettings, Simulation,
};

pub fn ui_controls(
    mut contexts: EguiContexts,
    mut settings: ResMut<SimSettings>,
    mut pending: ResMut<PendingCommands>,
    sim: Res<Simulation>,
    mut frames_rendered: Local<usize>,
) {
    if *frames_rendered < 5 {
        *frames_rendered += 1;
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Window::new("Sandbox Controls")
            .default_pos(egui::pos2(10.0, 10.0))
            .max_size([320.0, 360.0])
            .vscroll(true)
            .show(ctx, |ui| {
                ui.heading("Simulation");
                ui.add(
                    egui::Slider::new(&mut settings.time_scale, MIN_TIME_SCALE..=MAX_TIME_SCALE)
                        .logarithmic(true)
                        .text("Time Scale (Speed)"),
                );
                let pause_label = if settings.paused { "Resume" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    settings.paused = !settings.paused;
                }

                ui.separator();
                ui.heading("Body Placement");
                for (index, kind) in BodyKind::ALL.iter().enumerate() {
                    ui.selectable_value(
                        &mut settings.selected_kind,
                        *kind,
                        format!("{}: {}", index, kind.label()),
                    );
                }
                ui.label(format!("Bodies: {}", sim.len()));

                ui.separator();
                ui.heading("Scene");
                ui.checkbox(&mut settings.enable_trails, "Enable Trails");
                if ui.button("Spawn Demo Scene").clicked() {
                    pending.0.push(SandboxCommand::SpawnDemo);
                }
                if ui.button("Clear All Bodies").clicked() {
                    pending.0.push(SandboxCommand::Clear);
                }

                ui.separator();
                ui.heading("Controls");
                ui.label("Drag + release: launch a body");
                ui.label("Right click: delete body");
                ui.label("Space: pause / resume");
                ui.label("R: clear, 0-4: pick body type");
            });
    }
}
