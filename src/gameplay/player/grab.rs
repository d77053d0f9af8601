//! The physics grab: aim trace, prop highlight, and the hold servo.
//!
//! While the grab key is held, the aimed prop is pulled toward a hold point
//! in front of the camera by steering its velocity — the avian analog of a
//! kinematic physics handle. No joint: a thrown or blasted prop simply
//! leaves the servo's reach and the hold breaks.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::{Player, PlayerAction, PlayerCamera};
use crate::gameplay::level::LevelAssets;
use crate::{GameSet, gameplay_running};

// === Constants ===

/// How far ahead the aim trace looks for grabbable props (meters).
pub const MAX_GRAB_DISTANCE: f32 = 3.5;

/// Distance from the camera at which a held prop hovers.
const HOLD_DISTANCE: f32 = 2.2;

/// Velocity-servo gain pulling the prop toward the hold point.
const HOLD_STIFFNESS: f32 = 10.0;

/// Caps servo speed so a far prop doesn't whip through the player.
const MAX_HOLD_SPEED: f32 = 8.0;

/// Per-frame angular velocity damping on the held prop.
const ANGULAR_DAMP: f32 = 0.85;

// === Components ===

/// Marker: this prop can be picked up.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Grabbable;

/// What the camera ray currently points at, if it is a grabbable dynamic
/// body in reach. Lives on the player; drives the highlight and the grab.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct GrabAim {
    pub target: Option<Entity>,
}

/// Present on the player while a prop is held.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GrabbedProp {
    pub prop: Entity,
}

// === Resources ===

/// The prop currently rendered with the highlight material, with its
/// original material so it can be restored.
#[derive(Resource, Default)]
struct CurrentHighlight(Option<(Entity, Handle<StandardMaterial>)>);

// === Systems ===

/// Camera-forward ray up to [`MAX_GRAB_DISTANCE`]. The hit must be a
/// grabbable dynamic body to become the aim target; anything else (walls,
/// targets, static meshes) clears it.
fn aim_trace(
    spatial: SpatialQuery,
    mut players: Query<(Entity, &mut GrabAim, Has<GrabbedProp>), With<Player>>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    grabbables: Query<&RigidBody, With<Grabbable>>,
) {
    for (player, mut aim, holding) in &mut players {
        if holding {
            aim.target = None;
            continue;
        }
        let Ok(camera) = cameras.single() else {
            continue;
        };

        let filter = SpatialQueryFilter::default().with_excluded_entities([player]);
        let hit = spatial.cast_ray(
            camera.translation(),
            camera.forward(),
            MAX_GRAB_DISTANCE,
            true,
            &filter,
        );

        aim.target = match hit {
            Some(hit) if grabbables.get(hit.entity).is_ok_and(RigidBody::is_dynamic) => {
                Some(hit.entity)
            }
            _ => None,
        };
    }
}

/// Swaps the aimed prop's material for the highlight material and restores
/// the previous one. Headless runs carry no level assets and skip this.
fn update_highlight(
    players: Query<&GrabAim, With<Player>>,
    mut highlight: ResMut<CurrentHighlight>,
    assets: Option<Res<LevelAssets>>,
    mut materials: Query<&mut MeshMaterial3d<StandardMaterial>>,
) {
    let desired = players.single().ok().and_then(|aim| aim.target);
    if highlight.0.as_ref().map(|(entity, _)| *entity) == desired {
        return;
    }

    if let Some((old, original)) = highlight.0.take()
        && let Ok(mut material) = materials.get_mut(old)
    {
        material.0 = original;
    }

    let Some(assets) = assets else {
        return;
    };
    if let Some(entity) = desired
        && let Ok(mut material) = materials.get_mut(entity)
    {
        highlight.0 = Some((entity, material.0.clone()));
        material.0 = assets.highlight_material.clone();
    }
}

/// Starts and ends the hold in response to grab/release actions.
fn apply_grab_actions(
    mut commands: Commands,
    mut actions: MessageReader<PlayerAction>,
    players: Query<(Entity, &GrabAim, Has<GrabbedProp>), With<Player>>,
) {
    for action in actions.read() {
        let Ok((player, aim, holding)) = players.single() else {
            return;
        };
        match action {
            PlayerAction::Grab => {
                if !holding && let Some(prop) = aim.target {
                    commands.entity(player).insert(GrabbedProp { prop });
                }
            }
            PlayerAction::Release => {
                commands.entity(player).remove::<GrabbedProp>();
            }
            _ => {}
        }
    }
}

/// Steers the held prop toward the hold point in front of the camera.
/// Drops the hold if the prop no longer exists (broken, despawned).
fn hold_grabbed_prop(
    mut commands: Commands,
    players: Query<(Entity, &GrabbedProp), With<Player>>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    mut props: Query<(&Transform, &mut LinearVelocity, &mut AngularVelocity)>,
) {
    for (player, grabbed) in &players {
        let Ok(camera) = cameras.single() else {
            continue;
        };
        let Ok((transform, mut velocity, mut angular)) = props.get_mut(grabbed.prop) else {
            commands.entity(player).remove::<GrabbedProp>();
            continue;
        };

        let hold_point = camera.translation() + camera.forward() * HOLD_DISTANCE;
        velocity.0 =
            ((hold_point - transform.translation) * HOLD_STIFFNESS).clamp_length_max(MAX_HOLD_SPEED);
        angular.0 *= ANGULAR_DAMP;
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Grabbable>()
        .register_type::<GrabAim>()
        .register_type::<GrabbedProp>();
    app.init_resource::<CurrentHighlight>();

    app.add_systems(
        Update,
        (
            aim_trace,
            update_highlight,
            apply_grab_actions,
            hold_grabbed_prop,
        )
            .chain()
            .in_set(GameSet::Movement)
            .after(super::movement::apply_look)
            .run_if(gameplay_running),
    );
}
