//! In-flight projectile bookkeeping: contact detection and hit emission.
//!
//! Contacts are polled from avian's `CollidingEntities`. A round remembers
//! every entity it already reported so a grenade resting against a crate
//! emits one hit, not one per frame.

use avian3d::prelude::*;
use bevy::ecs::entity::hash_set::EntityHashSet;
use bevy::prelude::*;

use super::{DamagePolicy, ProjectileContext, SurfaceHit, WeaponHit};

// === Constants ===

/// Collider radius of a round (meters).
pub const PROJECTILE_RADIUS: f32 = 0.08;

/// Rounds expire after this long in flight (seconds).
pub const PROJECTILE_LIFETIME: f32 = 6.0;

// === Components ===

/// A physical round in flight, carrying a snapshot of its weapon's policy
/// so resolution survives the weapon being switched or dropped mid-flight.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub shooter: Entity,
    pub weapon: Entity,
    /// Radial-effect extent.
    pub radius: f32,
    /// `false` keeps the round bouncing after impact.
    pub destroy_on_hit: bool,
    pub impulse_strength: f32,
    pub policy: Option<DamagePolicy>,
}

/// Entities this round has already reported a hit against.
#[derive(Component, Debug, Clone, Default)]
pub struct SeenContacts(pub EntityHashSet);

// === Systems ===

/// Emits a [`WeaponHit`] per new contact. The impact point is the round's
/// center and the normal its reversed travel direction — within one round
/// radius of the true contact, and the radial path never reads the normal.
pub(super) fn handle_projectile_contacts(
    mut commands: Commands,
    mut projectiles: Query<(
        Entity,
        &Projectile,
        &Transform,
        &LinearVelocity,
        &CollidingEntities,
        &mut SeenContacts,
    )>,
    mut hits: MessageWriter<WeaponHit>,
) {
    for (entity, projectile, transform, velocity, colliding, mut seen) in &mut projectiles {
        for &other in &colliding.0 {
            if !seen.0.insert(other) {
                continue;
            }

            let position = transform.translation;
            hits.write(WeaponHit {
                shooter: projectile.shooter,
                weapon: projectile.weapon,
                impulse_strength: projectile.impulse_strength,
                policy: projectile.policy.clone(),
                hit: SurfaceHit {
                    actor: other,
                    point: position,
                    normal: -velocity.0.normalize_or(Vec3::Y),
                },
                projectile: Some(ProjectileContext {
                    entity,
                    radius: projectile.radius,
                    velocity: velocity.0,
                    position,
                }),
            });

            if projectile.destroy_on_hit {
                commands.entity(entity).despawn();
                break;
            }
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::DamageKind;
    use crate::gameplay::weapons::ImpulseKind;
    use crate::testing::assert_entity_count;
    use pretty_assertions::assert_eq;

    #[derive(Resource, Default)]
    struct HitLog(Vec<WeaponHit>);

    fn log_hits(mut reader: MessageReader<WeaponHit>, mut log: ResMut<HitLog>) {
        for hit in reader.read() {
            log.0.push(hit.clone());
        }
    }

    fn create_contact_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<WeaponHit>();
        app.init_resource::<HitLog>();
        app.add_systems(Update, (handle_projectile_contacts, log_hits).chain());
        app
    }

    /// Spawns a round with pre-populated `CollidingEntities`, sidestepping
    /// the physics pipeline the same way the attack tests do.
    fn spawn_round(
        world: &mut World,
        destroy_on_hit: bool,
        colliding_with: &[Entity],
    ) -> Entity {
        let shooter = world.spawn_empty().id();
        let weapon = world.spawn_empty().id();
        world
            .spawn((
                Projectile {
                    shooter,
                    weapon,
                    radius: 3.0,
                    destroy_on_hit,
                    impulse_strength: 8.0,
                    policy: Some(DamagePolicy {
                        impulse: ImpulseKind::Radial,
                        amount: 50.0,
                        kind: DamageKind::Blast,
                    }),
                },
                SeenContacts::default(),
                Transform::from_xyz(1.0, 2.0, 3.0),
                LinearVelocity(Vec3::new(0.0, 0.0, -18.0)),
                CollidingEntities(EntityHashSet::from_iter(
                    colliding_with.iter().copied(),
                )),
            ))
            .id()
    }

    #[test]
    fn contact_emits_one_hit_with_projectile_context() {
        let mut app = create_contact_test_app();
        let wall = app.world_mut().spawn_empty().id();
        spawn_round(app.world_mut(), true, &[wall]);

        app.update();

        let log = app.world().resource::<HitLog>();
        assert_eq!(log.0.len(), 1);
        let hit = &log.0[0];
        assert_eq!(hit.hit.actor, wall);
        let context = hit.projectile.as_ref().unwrap();
        assert_eq!(context.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(context.radius, 3.0);
        // Normal opposes travel.
        assert!(hit.hit.normal.z > 0.9);
    }

    #[test]
    fn destroy_on_hit_despawns_the_round() {
        let mut app = create_contact_test_app();
        let wall = app.world_mut().spawn_empty().id();
        spawn_round(app.world_mut(), true, &[wall]);

        app.update();

        assert_entity_count::<With<Projectile>>(&mut app, 0);
    }

    #[test]
    fn bouncing_round_survives_and_deduplicates_contacts() {
        let mut app = create_contact_test_app();
        let wall = app.world_mut().spawn_empty().id();
        spawn_round(app.world_mut(), false, &[wall]);

        app.update();
        app.update(); // Still resting against the same wall
        app.update();

        assert_entity_count::<With<Projectile>>(&mut app, 1);
        let log = app.world().resource::<HitLog>();
        assert_eq!(log.0.len(), 1);
    }

    #[test]
    fn bouncing_round_reports_each_new_surface() {
        let mut app = create_contact_test_app();
        let first = app.world_mut().spawn_empty().id();
        let round = spawn_round(app.world_mut(), false, &[first]);

        app.update();

        // The round bounces onto a second surface.
        let second = app.world_mut().spawn_empty().id();
        app.world_mut()
            .entity_mut(round)
            .insert(CollidingEntities(EntityHashSet::from_iter([second])));
        app.update();

        let log = app.world().resource::<HitLog>();
        assert_eq!(log.0.len(), 2);
    }

    #[test]
    fn no_contact_means_no_hit() {
        let mut app = create_contact_test_app();
        spawn_round(app.world_mut(), true, &[]);

        app.update();

        assert!(app.world().resource::<HitLog>().0.is_empty());
        assert_entity_count::<With<Projectile>>(&mut app, 1);
    }
}
