//! Gameplay domain plugins: the range, player, weapons, targets, and objective.

pub mod combat;
pub mod hud;
pub mod level;
pub mod objective;
pub mod player;
pub mod targets;
pub mod weapons;

use bevy::prelude::*;

pub use combat::{DamageKind, Health};

use crate::{GameSet, gameplay_running};

/// Despawns the entity when the timer runs out. Used by projectiles and
/// target debris so short-lived bodies don't pile up in the physics world.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Lifetime(pub Timer);

impl Lifetime {
    #[must_use]
    pub fn new(secs: f32) -> Self {
        Self(Timer::from_seconds(secs, TimerMode::Once))
    }
}

fn tick_lifetimes(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Lifetime)>,
) {
    for (entity, mut lifetime) in &mut query {
        lifetime.0.tick(time.delta());
        if lifetime.0.is_finished() {
            commands.entity(entity).despawn();
        }
    }
}

pub fn plugin(app: &mut App) {
    app.register_type::<Lifetime>();

    app.add_plugins((
        combat::plugin,
        level::plugin,
        player::plugin,
        weapons::plugin,
        targets::plugin,
        objective::plugin,
        hud::plugin,
    ));

    app.add_systems(
        Update,
        tick_lifetimes
            .in_set(GameSet::Movement)
            .run_if(gameplay_running),
    );
}
