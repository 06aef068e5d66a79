use bevy::prelude::*;
use bevy_egui::input::EguiWantsInput;

use crate::body::BodyKind;
use crate::resources::{DRAG_VELOCITY_SCALE, DragState, PendingCommands, SandboxCommand, SimSettings};

/// Cursor position in world coordinates, if the cursor is over the window.
pub fn cursor_world_position(
    windows: &Query<&Window>,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let window = windows.single().ok()?;
    let (camera, camera_transform) = camera_q.single().ok()?;
    let cursor = window.cursor_position()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

/// Translates pointer gestures into sandbox commands: left drag-release
/// launches a body of the selected kind (drag vector scaled into an initial
/// velocity), right click deletes the body under the cursor.
pub fn mouse_input(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    settings: Res<SimSettings>,
    mut drag: ResMut<DragState>,
    mut pending: ResMut<PendingCommands>,
    egui_input: Res<EguiWantsInput>,
) {
    if egui_input.wants_any_pointer_input() {
        return;
    }

    let Some(cursor) = cursor_world_position(&windows, &camera_q) else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        drag.start = Some(cursor);
    }

    if buttons.just_released(MouseButton::Left)
        && let Some(start) = drag.start.take()
    {
        let kind = settings.selected_kind;
        let velocity = if kind.is_fixed() {
            Vec2::ZERO
        } else {
            (cursor - start) * DRAG_VELOCITY_SCALE
        };
        pending.0.push(SandboxCommand::Spawn {
            kind,
            position: start,
            velocity,
        });
    }

    if buttons.just_pressed(MouseButton::Right) {
        pending.0.push(SandboxCommand::RemoveAt(cursor));
    }
}

/// Keyboard shortcuts: Space pauses, R clears, digits pick the body kind.
pub fn keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<SimSettings>,
    mut pending: ResMut<PendingCommands>,
    egui_input: Res<EguiWantsInput>,
) {
    if egui_input.wants_any_keyboard_input() {
        return;
    }

    if keys.just_pressed(KeyCode::Space) {
        settings.paused = !settings.paused;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        pending.0.push(SandboxCommand::Clear);
    }

    for (key, kind) in [
        (KeyCode::Digit0, BodyKind::FixedStar),
        (KeyCode::Digit1, BodyKind::Star),
        (KeyCode::Digit2, BodyKind::Planet),
        (KeyCode::Digit3, BodyKind::Moon),
        (KeyCode::Digit4, BodyKind::Asteroid),
    ] {
        if keys.just_pressed(key) {
            settings.selected_kind = kind;
        }
    }
}
