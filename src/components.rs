use bevy::prelude::*;

use crate::body::{BodyId, BodyKind};

/// Marks a mesh entity as the on-screen disc for the simulated body with
/// this id.
#[derive(Component)]
pub struct BodyVisual(pub BodyId);

/// Palette for the body kinds. The physics core only carries the kind tag;
/// this mapping is the single place colors come from.
pub fn kind_color(kind: BodyKind) -> Color {
    match kind {
        BodyKind::FixedStar => Color::srgb_u8(255, 255, 128),
        BodyKind::Star => Color::srgb_u8(255, 255, 0),
        BodyKind::Planet => Color::srgb_u8(100, 100, 255),
        BodyKind::Moon => Color::srgb_u8(169, 169, 169),
        BodyKind::Asteroid => Color::srgb_u8(255, 100, 100),
    }
}
