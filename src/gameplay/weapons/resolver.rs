//! Weapon hit resolution: one policy, two independent phases.
//!
//! [`resolve`] is a pure dispatch table from `(policy, hit, projectile)` to
//! a [`Resolution`] — what damage to apply and what impulse to apply.
//! `resolve_weapon_hits` then executes the plan against the world: damage
//! messages into the combat sink, impulses onto simulating bodies, and for
//! the radial case one sphere overlap feeding both the damage and the
//! impulse fan-out.
//!
//! Every missing reference (no policy, no simulating body, no projectile
//! where the shape needs one) skips that sub-effect and nothing else.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::{DamagePolicy, ImpulseKind, ProjectileContext, SurfaceHit, WeaponHit};
use crate::gameplay::DamageKind;
use crate::gameplay::combat::InflictDamage;
use crate::third_party::linear_falloff;

// === Plans ===

/// Damage half of a resolution. Exactly one branch per hit — except the
/// radial shape without a projectile, which is a defined no-op (a sphere
/// with no center or extent applies nowhere).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamagePlan {
    /// Point damage at the impact, driven along the reversed surface normal.
    Point {
        target: Entity,
        amount: f32,
        direction: Vec3,
        point: Vec3,
        kind: DamageKind,
    },
    /// Sphere of damage around the projectile, linear falloff to the edge.
    Radial {
        center: Vec3,
        radius: f32,
        amount: f32,
        kind: DamageKind,
    },
    /// Actor-wide damage with no spatial information (policy fallback).
    Direct {
        target: Entity,
        amount: f32,
        kind: DamageKind,
    },
}

/// Impulse half of a resolution. At most one branch per hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpulsePlan {
    /// One impulse at the impact point on the struck body.
    AtPoint {
        body: Entity,
        impulse: Vec3,
        point: Vec3,
    },
    /// Radial impulse over every simulating body in the sphere,
    /// falling off linearly from the center.
    Radial {
        center: Vec3,
        radius: f32,
        strength: f32,
    },
}

/// The resolved effects of one hit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolution {
    pub damage: Option<DamagePlan>,
    pub impulse: Option<ImpulsePlan>,
}

/// Resolves one hit against a damage policy.
///
/// `struck_body` must be the struck entity only when that entity is
/// currently under physical simulation — a `None` exempts static and
/// sleeping-kinematic surfaces from the impulse phase entirely.
#[must_use]
pub fn resolve(
    policy: &DamagePolicy,
    impulse_strength: f32,
    hit: &SurfaceHit,
    struck_body: Option<Entity>,
    projectile: Option<&ProjectileContext>,
) -> Resolution {
    let damage = match policy.impulse {
        // Point and ray rounds currently share one damage shape; only the
        // impulse phase distinguishes them.
        ImpulseKind::Ray | ImpulseKind::Point => Some(DamagePlan::Point {
            target: hit.actor,
            amount: policy.amount,
            direction: -hit.normal,
            point: hit.point,
            kind: policy.kind,
        }),
        ImpulseKind::Radial => projectile.map(|p| DamagePlan::Radial {
            center: p.position,
            radius: p.radius,
            amount: policy.amount,
            kind: policy.kind,
        }),
        ImpulseKind::None => Some(DamagePlan::Direct {
            target: hit.actor,
            amount: policy.amount,
            kind: policy.kind,
        }),
    };

    let impulse = match policy.impulse {
        ImpulseKind::Ray => struck_body.map(|body| ImpulsePlan::AtPoint {
            body,
            impulse: -hit.normal * impulse_strength,
            point: hit.point,
        }),
        ImpulseKind::Point => match (struck_body, projectile) {
            (Some(body), Some(p)) => Some(ImpulsePlan::AtPoint {
                body,
                impulse: p.velocity.normalize_or_zero() * impulse_strength,
                point: hit.point,
            }),
            _ => None,
        },
        // The fan-out is not bound to the struck body; it reaches every
        // body in the sphere whether or not the direct hit simulates.
        ImpulseKind::Radial => projectile.map(|p| ImpulsePlan::Radial {
            center: p.position,
            radius: p.radius,
            strength: impulse_strength,
        }),
        ImpulseKind::None => None,
    };

    Resolution { damage, impulse }
}

// === Executor ===

/// Applies resolved hits to the world. Runs after fire and contact
/// detection, ahead of the damage sink, all within the triggering frame.
pub(super) fn resolve_weapon_hits(
    mut hits: MessageReader<WeaponHit>,
    spatial: SpatialQuery,
    bodies: Query<&RigidBody>,
    transforms: Query<&GlobalTransform>,
    mut forces: Query<Forces>,
    mut damage: MessageWriter<InflictDamage>,
) {
    for message in hits.read() {
        // A weapon without a policy resolves to nothing.
        let Some(policy) = &message.policy else {
            continue;
        };

        let struck_body = bodies
            .get(message.hit.actor)
            .ok()
            .filter(|body| body.is_dynamic())
            .map(|_| message.hit.actor);

        let resolution = resolve(
            policy,
            message.impulse_strength,
            &message.hit,
            struck_body,
            message.projectile.as_ref(),
        );

        // Attribution: the projectile delivered the hit if there was one,
        // otherwise the shooter did.
        let causer = message
            .projectile
            .as_ref()
            .map_or(message.shooter, |p| p.entity);

        match resolution.damage {
            Some(DamagePlan::Point {
                target,
                amount,
                kind,
                ..
            }) => {
                damage.write(InflictDamage {
                    target,
                    amount,
                    kind,
                    instigator: Some(message.shooter),
                    causer: Some(causer),
                });
            }
            // The fallback is attributed straight to the shooter.
            Some(DamagePlan::Direct {
                target,
                amount,
                kind,
            }) => {
                damage.write(InflictDamage {
                    target,
                    amount,
                    kind,
                    instigator: Some(message.shooter),
                    causer: Some(message.shooter),
                });
            }
            Some(DamagePlan::Radial {
                center,
                radius,
                amount,
                kind,
            }) => {
                radial_fan_out(
                    message,
                    center,
                    radius,
                    amount,
                    kind,
                    causer,
                    resolution.impulse,
                    &spatial,
                    &bodies,
                    &transforms,
                    &mut forces,
                    &mut damage,
                );
            }
            None => {}
        }

        if let Some(ImpulsePlan::AtPoint {
            body,
            impulse,
            point,
        }) = resolution.impulse
            && let Ok(mut body_forces) = forces.get_mut(body)
        {
            body_forces.apply_linear_impulse_at_point(impulse, point);
        }
    }
}

/// One sphere overlap serving both radial damage and radial impulses.
/// Excludes the shooter, the weapon, and the projectile itself.
fn radial_fan_out(
    message: &WeaponHit,
    center: Vec3,
    radius: f32,
    amount: f32,
    kind: DamageKind,
    causer: Entity,
    impulse: Option<ImpulsePlan>,
    spatial: &SpatialQuery,
    bodies: &Query<&RigidBody>,
    transforms: &Query<&GlobalTransform>,
    forces: &mut Query<Forces>,
    damage: &mut MessageWriter<InflictDamage>,
) {
    let mut excluded = vec![message.shooter, message.weapon];
    if let Some(projectile) = &message.projectile {
        excluded.push(projectile.entity);
    }
    let filter = SpatialQueryFilter::default().with_excluded_entities(excluded);

    let overlapped =
        spatial.shape_intersections(&Collider::sphere(radius), center, Quat::IDENTITY, &filter);

    let strength = match impulse {
        Some(ImpulsePlan::Radial { strength, .. }) => Some(strength),
        _ => None,
    };

    for entity in overlapped {
        let Ok(transform) = transforms.get(entity) else {
            continue;
        };
        let offset = transform.translation() - center;
        let falloff = linear_falloff(offset.length(), radius);
        if falloff <= 0.0 {
            continue;
        }

        damage.write(InflictDamage {
            target: entity,
            amount: amount * falloff,
            kind,
            instigator: Some(message.shooter),
            causer: Some(causer),
        });

        if let Some(strength) = strength
            && bodies.get(entity).is_ok_and(RigidBody::is_dynamic)
            && let Ok(mut body_forces) = forces.get_mut(entity)
        {
            let direction = offset.normalize_or(Vec3::Y);
            body_forces.apply_linear_impulse(direction * strength * falloff);
        }
    }
}
