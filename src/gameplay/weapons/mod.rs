//! Weapons: damage policies, hitscan and projectile fire, hit resolution.
//!
//! Both weapon kinds funnel into one [`WeaponHit`] message and one resolver.
//! A weapon's [`DamagePolicy`] decides how a hit turns into damage and
//! impulse — swapping a rifle for a radial launcher is a data change, the
//! resolver never branches on the weapon kind itself.

pub mod fire;
pub mod projectile;
pub mod resolver;

use bevy::prelude::*;
use std::time::Duration;

use crate::gameplay::DamageKind;
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Impulse magnitude per hit (N·s). One knob shared by every impulse shape.
pub const IMPULSE_STRENGTH: f32 = 8.0;

/// Muzzle offset in camera space: right, down, forward.
pub const MUZZLE_OFFSET: Vec3 = Vec3::new(0.15, -0.12, -0.5);

pub const RIFLE_DAMAGE: f32 = 10.0;
pub const RIFLE_RANGE: f32 = 60.0;
const RIFLE_COOLDOWN: f32 = 0.25;

pub const LAUNCHER_DAMAGE: f32 = 50.0;
pub const LAUNCHER_RADIUS: f32 = 3.0;
const LAUNCHER_SPEED: f32 = 18.0;
const LAUNCHER_COOLDOWN: f32 = 1.0;

// === Components ===

/// Loadout slot a weapon occupies; also the payload of a switch action.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum WeaponSlot {
    Rifle,
    Launcher,
}

/// Shared weapon state: impulse magnitude, muzzle, and refire cooldown.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub impulse_strength: f32,
    pub muzzle_offset: Vec3,
    pub cooldown: Timer,
}

impl Weapon {
    /// The cooldown starts expired so the first trigger pull fires.
    fn ready(cooldown_secs: f32) -> Self {
        let mut cooldown = Timer::from_seconds(cooldown_secs, TimerMode::Once);
        cooldown.tick(Duration::from_secs_f32(cooldown_secs));
        Self {
            impulse_strength: IMPULSE_STRENGTH,
            muzzle_offset: MUZZLE_OFFSET,
            cooldown,
        }
    }
}

/// How a hit becomes an impulse. The same tag also selects the damage shape
/// (point for `Ray`/`Point`, sphere for `Radial`, actor-wide for `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ImpulseKind {
    /// Push along the reversed impact normal, at the impact point.
    #[default]
    Ray,
    /// Push along the projectile's travel direction, at the impact point.
    Point,
    /// Sphere of force around the projectile; requires a projectile.
    Radial,
    /// No impulse; damage falls back to a plain actor-wide application.
    None,
}

/// Designer-authored damage policy, one per weapon. A weapon carrying no
/// policy fires inert rounds — every hit resolves to nothing.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DamagePolicy {
    pub impulse: ImpulseKind,
    pub amount: f32,
    pub kind: DamageKind,
}

/// Marker for a hitscan weapon: instant ray up to `range`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HitscanWeapon {
    pub range: f32,
}

/// Marker for a projectile weapon: spawns a physical round.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ProjectileWeapon {
    pub speed: f32,
    /// Radial-effect extent carried by every spawned round.
    pub radius: f32,
    /// `false` keeps the round alive after impact (bouncing grenade).
    pub destroy_on_hit: bool,
}

/// Marker on the currently selected weapon.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ActiveWeapon;

// === Loadout ===

/// The starting slot-1 weapon: hitscan rifle, selected by default.
pub fn rifle_bundle() -> impl Bundle {
    (
        Name::new("Rifle"),
        WeaponSlot::Rifle,
        Weapon::ready(RIFLE_COOLDOWN),
        DamagePolicy {
            impulse: ImpulseKind::Ray,
            amount: RIFLE_DAMAGE,
            kind: DamageKind::Bullet,
        },
        HitscanWeapon { range: RIFLE_RANGE },
        ActiveWeapon,
        Transform::default(),
    )
}

/// The slot-2 weapon: radial projectile launcher.
pub fn launcher_bundle() -> impl Bundle {
    (
        Name::new("Launcher"),
        WeaponSlot::Launcher,
        Weapon::ready(LAUNCHER_COOLDOWN),
        DamagePolicy {
            impulse: ImpulseKind::Radial,
            amount: LAUNCHER_DAMAGE,
            kind: DamageKind::Blast,
        },
        ProjectileWeapon {
            speed: LAUNCHER_SPEED,
            radius: LAUNCHER_RADIUS,
            destroy_on_hit: true,
        },
        Transform::default(),
    )
}

// === Messages ===

/// Where a shot landed. The ECS collapses the engine's actor/body split —
/// whether the struck entity counts as a physical body is the resolver's
/// question, answered against its `RigidBody` at resolution time.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    pub actor: Entity,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Spatial context of the projectile that delivered a hit. Absent for
/// hitscan rays, which is exactly what makes radial effects unreachable
/// from them.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileContext {
    pub entity: Entity,
    pub radius: f32,
    pub velocity: Vec3,
    pub position: Vec3,
}

/// One weapon hit awaiting resolution. Consumed the same frame, never stored.
#[derive(Message, Debug, Clone)]
pub struct WeaponHit {
    pub shooter: Entity,
    pub weapon: Entity,
    pub impulse_strength: f32,
    pub policy: Option<DamagePolicy>,
    pub hit: SurfaceHit,
    pub projectile: Option<ProjectileContext>,
}

/// Broadcast per hitscan impact, for effects and observers.
#[derive(Message, Debug, Clone, Copy)]
pub struct HitscanImpact {
    pub target: Entity,
    pub point: Vec3,
    pub direction: Vec3,
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<WeaponSlot>()
        .register_type::<Weapon>()
        .register_type::<DamagePolicy>()
        .register_type::<HitscanWeapon>()
        .register_type::<ProjectileWeapon>()
        .register_type::<ActiveWeapon>()
        .register_type::<projectile::Projectile>();
    app.add_message::<WeaponHit>();
    app.add_message::<HitscanImpact>();

    // Fire → contacts → resolve, all ahead of the damage sink so a hit
    // lands the same frame the trigger is pulled.
    app.add_systems(
        Update,
        (
            fire::tick_weapon_cooldowns,
            fire::switch_weapons,
            fire::fire_hitscan,
            fire::fire_projectile,
            projectile::handle_projectile_contacts,
            resolver::resolve_weapon_hits,
        )
            .chain()
            .in_set(GameSet::Combat)
            .before(crate::gameplay::combat::apply_damage)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::assertions_on_constants)]
    #[test]
    fn constants_are_valid() {
        assert!(IMPULSE_STRENGTH > 0.0);
        assert!(RIFLE_DAMAGE > 0.0);
        assert!(RIFLE_RANGE > 0.0);
        assert!(LAUNCHER_DAMAGE > 0.0);
        assert!(LAUNCHER_RADIUS > 0.0);
    }

    #[test]
    fn fresh_weapons_start_ready() {
        let weapon = Weapon::ready(RIFLE_COOLDOWN);
        assert!(weapon.cooldown.is_finished());
    }
}
