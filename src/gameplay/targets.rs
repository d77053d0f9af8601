//! Breakable targets: a one-way `Intact -> Broken` transition with debris.
//!
//! A target is a static panel with `Health`. When its health is depleted it
//! breaks exactly once: the panel despawns, a [`TargetBroken`] message goes
//! out, and a handful of dynamic fragments scatter from the panel's pose.
//! Duplicate zero-health observations never produce a second notification.

use avian3d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::combat::death::DeathCheck;
use crate::gameplay::level::LevelAssets;
use crate::gameplay::{Health, Lifetime};
use crate::screens::GameState;
use crate::third_party::CollisionLayer;
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Hit points of an intact target panel.
pub const TARGET_HEALTH: f32 = 30.0;

/// Fragments spawned per broken target.
const DEBRIS_COUNT: usize = 6;

/// Fragment cube edge length (meters).
pub const DEBRIS_SIZE: f32 = 0.14;

/// Scatter speed range for fragments (meters per second).
const DEBRIS_MIN_SPEED: f32 = 1.5;
const DEBRIS_MAX_SPEED: f32 = 4.0;

/// Fragments dissolve after this long (seconds).
const DEBRIS_LIFETIME: f32 = 5.0;

// === Components ===

/// Marker for breakable target panels.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BreakableTarget;

/// Marker sealing the one-way break transition. A target carrying this has
/// already notified observers; it never notifies again.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Broken;

/// Marker for scattered target fragments.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Debris;

// === Messages ===

/// Broadcast once per target, on its first transition to broken.
/// Carries the panel's last pose so observers (debris, effects) outlive
/// the despawned entity.
#[derive(Message, Debug, Clone, Copy)]
pub struct TargetBroken {
    pub target: Entity,
    pub position: Vec3,
}

// === Systems ===

/// Transitions depleted targets to broken: despawns the panel and emits one
/// [`TargetBroken`]. The `Without<Broken>` filter plus the marker insert make
/// the transition idempotent even if the despawn is still pending.
pub fn break_targets(
    mut commands: Commands,
    targets: Query<(Entity, &Health, &GlobalTransform), (With<BreakableTarget>, Without<Broken>)>,
    mut broken: MessageWriter<TargetBroken>,
) {
    for (entity, health, transform) in &targets {
        if health.current > 0.0 {
            continue;
        }
        commands.entity(entity).insert(Broken);
        commands.entity(entity).despawn();
        broken.write(TargetBroken {
            target: entity,
            position: transform.translation(),
        });
        info!("target {entity:?} broken");
    }
}

/// Scatters dynamic fragments from the pose of every freshly broken target.
/// Headless runs (tests) carry no level assets and skip the visuals entirely.
fn spawn_debris(
    mut commands: Commands,
    mut broken: MessageReader<TargetBroken>,
    assets: Option<Res<LevelAssets>>,
) {
    let Some(assets) = assets else {
        return;
    };
    let mut rng = rand::rng();

    for message in broken.read() {
        for _ in 0..DEBRIS_COUNT {
            let offset = Vec3::new(
                rng.random_range(-0.3..0.3),
                rng.random_range(-0.3..0.3),
                rng.random_range(-0.1..0.1),
            );
            // Outward from the panel, biased upward so fragments arc.
            let direction = (offset * 2.0 + Vec3::Y).normalize_or(Vec3::Y);
            let speed = rng.random_range(DEBRIS_MIN_SPEED..DEBRIS_MAX_SPEED);

            commands.spawn((
                Name::new("Debris"),
                Debris,
                Mesh3d(assets.debris_mesh.clone()),
                MeshMaterial3d(assets.debris_material.clone()),
                Transform::from_translation(message.position + offset),
                RigidBody::Dynamic,
                Collider::cuboid(DEBRIS_SIZE, DEBRIS_SIZE, DEBRIS_SIZE),
                CollisionLayers::new(
                    CollisionLayer::Target,
                    [
                        CollisionLayer::Environment,
                        CollisionLayer::Prop,
                        CollisionLayer::Target,
                    ],
                ),
                LinearVelocity(direction * speed),
                AngularVelocity(Vec3::new(
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0),
                )),
                Lifetime::new(DEBRIS_LIFETIME),
                DespawnOnExit(GameState::InGame),
            ));
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<BreakableTarget>()
        .register_type::<Broken>()
        .register_type::<Debris>();
    app.add_message::<TargetBroken>();

    app.add_systems(
        Update,
        (break_targets, spawn_debris)
            .chain()
            .in_set(GameSet::Death)
            .before(DeathCheck)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::testing::assert_entity_count;
    use pretty_assertions::assert_eq;

    /// Collects every `TargetBroken` the systems under test emit.
    #[derive(Resource, Default)]
    struct BrokenLog(Vec<Entity>);

    fn log_broken(mut reader: MessageReader<TargetBroken>, mut log: ResMut<BrokenLog>) {
        for message in reader.read() {
            log.0.push(message.target);
        }
    }

    fn create_break_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<TargetBroken>();
        app.init_resource::<BrokenLog>();
        app.add_systems(Update, (break_targets, log_broken).chain());
        app
    }

    fn spawn_target(world: &mut World, hp: f32) -> Entity {
        world
            .spawn((
                BreakableTarget,
                Health {
                    current: hp,
                    max: TARGET_HEALTH,
                },
                Transform::from_xyz(0.0, 1.0, -5.0),
                GlobalTransform::from(Transform::from_xyz(0.0, 1.0, -5.0)),
            ))
            .id()
    }

    #[test]
    fn depleted_target_breaks_and_notifies_once() {
        let mut app = create_break_test_app();
        let target = spawn_target(app.world_mut(), 0.0);

        app.update();

        let log = app.world().resource::<BrokenLog>();
        assert_eq!(log.0, vec![target]);
        assert_entity_count::<With<BreakableTarget>>(&mut app, 0);
    }

    #[test]
    fn subsequent_frames_produce_no_extra_notifications() {
        let mut app = create_break_test_app();
        spawn_target(app.world_mut(), -10.0);

        app.update();
        app.update();
        app.update();

        let log = app.world().resource::<BrokenLog>();
        assert_eq!(log.0.len(), 1);
    }

    #[test]
    fn healthy_target_stays_intact() {
        let mut app = create_break_test_app();
        spawn_target(app.world_mut(), TARGET_HEALTH);

        app.update();

        let log = app.world().resource::<BrokenLog>();
        assert!(log.0.is_empty());
        assert_entity_count::<With<BreakableTarget>>(&mut app, 1);
    }

    #[test]
    fn two_targets_break_independently() {
        let mut app = create_break_test_app();
        spawn_target(app.world_mut(), 0.0);
        spawn_target(app.world_mut(), TARGET_HEALTH);

        app.update();

        let log = app.world().resource::<BrokenLog>();
        assert_eq!(log.0.len(), 1);
        assert_entity_count::<With<BreakableTarget>>(&mut app, 1);
    }
}
