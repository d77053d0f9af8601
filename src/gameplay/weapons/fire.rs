//! Trigger handling: cooldowns, weapon switching, and the two fire paths.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::projectile::{PROJECTILE_LIFETIME, PROJECTILE_RADIUS, Projectile, SeenContacts};
use super::{
    ActiveWeapon, DamagePolicy, HitscanImpact, HitscanWeapon, ProjectileWeapon, SurfaceHit, Weapon,
    WeaponHit, WeaponSlot,
};
use crate::gameplay::Lifetime;
use crate::gameplay::level::LevelAssets;
use crate::gameplay::player::{Player, PlayerAction, PlayerCamera};
use crate::screens::GameState;
use crate::third_party::CollisionLayer;

pub(super) fn tick_weapon_cooldowns(time: Res<Time>, mut weapons: Query<&mut Weapon>) {
    for mut weapon in &mut weapons {
        weapon.cooldown.tick(time.delta());
    }
}

/// Moves the `ActiveWeapon` marker to the selected slot.
pub(super) fn switch_weapons(
    mut actions: MessageReader<PlayerAction>,
    mut commands: Commands,
    weapons: Query<(Entity, &WeaponSlot)>,
) {
    for action in actions.read() {
        let PlayerAction::SelectWeapon(selected) = action else {
            continue;
        };
        for (entity, slot) in &weapons {
            if slot == selected {
                commands.entity(entity).insert(ActiveWeapon);
                info!("switched to {slot:?}");
            } else {
                commands.entity(entity).remove::<ActiveWeapon>();
            }
        }
    }
}

/// Instant ray from the camera along its forward vector. A miss consumes
/// the cooldown but produces nothing — there is no "no target" error.
pub(super) fn fire_hitscan(
    mut actions: MessageReader<PlayerAction>,
    spatial: SpatialQuery,
    players: Query<Entity, With<Player>>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    mut weapons: Query<
        (Entity, &mut Weapon, Option<&DamagePolicy>, &HitscanWeapon),
        With<ActiveWeapon>,
    >,
    mut hits: MessageWriter<WeaponHit>,
    mut impacts: MessageWriter<HitscanImpact>,
) {
    for action in actions.read() {
        if !matches!(action, PlayerAction::Fire) {
            continue;
        }
        let (Ok(player), Ok(camera)) = (players.single(), cameras.single()) else {
            return;
        };
        let Ok((weapon_entity, mut weapon, policy, hitscan)) = weapons.single_mut() else {
            continue;
        };
        if !weapon.cooldown.is_finished() {
            continue;
        }
        weapon.cooldown.reset();

        let origin = camera.translation();
        let direction = camera.forward();
        let filter = SpatialQueryFilter::default().with_excluded_entities([player]);
        let Some(hit) = spatial.cast_ray(origin, direction, hitscan.range, true, &filter) else {
            continue;
        };

        let point = origin + direction * hit.distance;
        hits.write(WeaponHit {
            shooter: player,
            weapon: weapon_entity,
            impulse_strength: weapon.impulse_strength,
            policy: policy.cloned(),
            hit: SurfaceHit {
                actor: hit.entity,
                point,
                normal: hit.normal,
            },
            projectile: None,
        });
        impacts.write(HitscanImpact {
            target: hit.entity,
            point,
            direction: direction.as_vec3(),
        });
    }
}

/// Spawns a physical round at the muzzle with the camera's aim.
pub(super) fn fire_projectile(
    mut actions: MessageReader<PlayerAction>,
    mut commands: Commands,
    players: Query<Entity, With<Player>>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    mut weapons: Query<
        (Entity, &mut Weapon, Option<&DamagePolicy>, &ProjectileWeapon),
        With<ActiveWeapon>,
    >,
    assets: Option<Res<LevelAssets>>,
) {
    for action in actions.read() {
        if !matches!(action, PlayerAction::Fire) {
            continue;
        }
        let (Ok(player), Ok(camera)) = (players.single(), cameras.single()) else {
            return;
        };
        let Ok((weapon_entity, mut weapon, policy, launcher)) = weapons.single_mut() else {
            continue;
        };
        if !weapon.cooldown.is_finished() {
            continue;
        }
        weapon.cooldown.reset();

        let origin = camera.transform_point(weapon.muzzle_offset);
        let direction = camera.forward();

        let mut round = commands.spawn((
            Name::new("Projectile"),
            Projectile {
                shooter: player,
                weapon: weapon_entity,
                radius: launcher.radius,
                destroy_on_hit: launcher.destroy_on_hit,
                impulse_strength: weapon.impulse_strength,
                policy: policy.cloned(),
            },
            SeenContacts::default(),
            Transform::from_translation(origin),
            RigidBody::Dynamic,
            Collider::sphere(PROJECTILE_RADIUS),
            LinearVelocity(direction * launcher.speed),
            CollisionLayers::new(
                CollisionLayer::Projectile,
                [
                    CollisionLayer::Environment,
                    CollisionLayer::Prop,
                    CollisionLayer::Target,
                ],
            ),
            CollisionEventsEnabled,
            CollidingEntities::default(),
            Lifetime::new(PROJECTILE_LIFETIME),
            DespawnOnExit(GameState::InGame),
        ));
        // Headless runs have no meshes to attach.
        if let Some(assets) = &assets {
            round.insert((
                Mesh3d(assets.projectile_mesh.clone()),
                MeshMaterial3d(assets.projectile_material.clone()),
            ));
        }
    }
}
