//! Development tools — only included with `cargo run --features dev`.
//!
//! Debug spawners and hit tracing go here. This module is stripped from
//! release builds.

use avian3d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::Health;
use crate::gameplay::level::LevelAssets;
use crate::gameplay::player::Grabbable;
use crate::gameplay::weapons::HitscanImpact;
use crate::screens::GameState;
use crate::third_party::CollisionLayer;
use crate::{GameSet, gameplay_running};

/// Edge length of debug-spawned crates.
const DEBUG_CRATE_SIZE: f32 = 0.4;

/// Height above the floor debug crates drop from.
const DEBUG_DROP_HEIGHT: f32 = 4.0;

/// Drops an extra crate into the range on B, for testing grabs and blasts.
fn debug_spawn_crate(
    keyboard: Res<ButtonInput<KeyCode>>,
    assets: Res<LevelAssets>,
    mut commands: Commands,
) {
    if !keyboard.just_pressed(KeyCode::KeyB) {
        return;
    }

    let mut rng = rand::rng();
    let position = Vec3::new(
        rng.random_range(-3.0..3.0),
        DEBUG_DROP_HEIGHT,
        rng.random_range(-3.0..3.0),
    );

    commands.spawn((
        Name::new("Debug Crate"),
        Grabbable,
        Health::new(40.0),
        Mesh3d(assets.crate_mesh.clone()),
        MeshMaterial3d(assets.crate_material.clone()),
        Transform::from_translation(position),
        RigidBody::Dynamic,
        Collider::cuboid(DEBUG_CRATE_SIZE, DEBUG_CRATE_SIZE, DEBUG_CRATE_SIZE),
        CollisionLayers::new(CollisionLayer::Prop, LayerMask::ALL),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Traces every hitscan impact to the log.
fn trace_hitscan_impacts(mut impacts: MessageReader<HitscanImpact>) {
    for impact in impacts.read() {
        debug!(
            "hitscan impact on {:?} at {:.2?} along {:.2?}",
            impact.target, impact.point, impact.direction
        );
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (debug_spawn_crate, trace_hitscan_impacts)
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );
}
