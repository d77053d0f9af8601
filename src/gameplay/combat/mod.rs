//! Combat foundation: health, damage classification, and the damage sink.
//!
//! Weapons never touch `Health` directly — they write [`InflictDamage`]
//! messages and `apply_damage` drains them. Anything with a `Health`
//! component (targets, props) is damageable through the same sink.

pub mod death;

use bevy::prelude::*;

use crate::{GameSet, gameplay_running};

// === Components ===

/// Hit points. Entities at or below zero are picked up by the death /
/// target-break systems the same frame.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }
}

/// Gameplay damage category, attributed on every damage message.
/// Kept opaque to the resolver — it only copies the weapon's classifier
/// through to the sink (resistances and stats hang off it later).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum DamageKind {
    /// Hitscan rounds.
    #[default]
    Bullet,
    /// Radial explosions.
    Blast,
}

// === Messages ===

/// One damage application against one entity. Written by the weapon hit
/// resolver, consumed by [`apply_damage`].
#[derive(Message, Debug, Clone)]
pub struct InflictDamage {
    pub target: Entity,
    pub amount: f32,
    pub kind: DamageKind,
    /// Who is held responsible (the firing player).
    pub instigator: Option<Entity>,
    /// What physically delivered the hit (projectile, or the shooter for rays).
    pub causer: Option<Entity>,
}

// === Systems ===

/// Drains [`InflictDamage`] messages into `Health`. Messages aimed at
/// entities without health (walls, debris) are silently dropped — absence
/// of an effect is the defined outcome, not an error.
pub fn apply_damage(
    mut messages: MessageReader<InflictDamage>,
    mut healths: Query<&mut Health>,
) {
    for damage in messages.read() {
        let Ok(mut health) = healths.get_mut(damage.target) else {
            continue;
        };
        health.current -= damage.amount;
        debug!(
            "{:?} took {:.1} {:?} damage ({:.1}/{:.1})",
            damage.target, damage.amount, damage.kind, health.current, health.max
        );
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Health>();
    app.add_message::<InflictDamage>();

    app.add_plugins(death::plugin);

    app.add_systems(
        Update,
        apply_damage
            .in_set(GameSet::Combat)
            .run_if(gameplay_running),
    );
}
