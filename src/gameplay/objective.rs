//! Win-condition objective: count the targets, track the breaks, call the win.
//!
//! The counter is initialized once from the targets actually present after
//! level spawn, decrements by exactly one per unique break notification
//! (floor-clamped at zero), and broadcasts the win exactly once.

use bevy::prelude::*;

use crate::gameplay::targets::{BreakableTarget, Broken, TargetBroken, break_targets};
use crate::menus::Menu;
use crate::screens::GameState;
use crate::{GameSet, gameplay_running};

// === Resources ===

/// Remaining-target bookkeeping for the current round.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct RemainingTargets {
    pub total: usize,
    pub remaining: usize,
    /// One-time census of the spawned level has happened.
    counted: bool,
    /// The win broadcast already went out.
    won: bool,
}

// === Messages ===

/// Broadcast on every change of the remaining-target count, including the
/// initial census. Consumed by the HUD counter.
#[derive(Message, Debug, Clone, Copy)]
pub struct TargetCountChanged {
    pub remaining: usize,
    pub total: usize,
}

/// Broadcast exactly once, when the last target breaks.
#[derive(Message, Debug, Clone, Copy)]
pub struct WinConditionMet;

// === Systems ===

fn reset_objective(mut commands: Commands) {
    commands.insert_resource(RemainingTargets::default());
}

/// One-time census of intact targets. Runs until the spawned level is
/// visible to queries (level spawn commands apply a frame after `OnEnter`).
fn count_targets(
    targets: Query<Entity, (With<BreakableTarget>, Without<Broken>)>,
    mut objective: ResMut<RemainingTargets>,
    mut count_changed: MessageWriter<TargetCountChanged>,
) {
    if objective.counted || targets.is_empty() {
        return;
    }
    let total = targets.iter().count();
    objective.total = total;
    objective.remaining = total;
    objective.counted = true;
    count_changed.write(TargetCountChanged {
        remaining: total,
        total,
    });
    info!("range armed with {total} targets");
}

/// Decrements the counter per break notification and emits the one-shot win.
/// A spurious extra break leaves the clamped counter untouched and never
/// re-broadcasts the win.
fn track_broken_targets(
    mut broken: MessageReader<TargetBroken>,
    mut objective: ResMut<RemainingTargets>,
    mut count_changed: MessageWriter<TargetCountChanged>,
    mut win: MessageWriter<WinConditionMet>,
) {
    for _ in broken.read() {
        if !objective.counted {
            continue;
        }
        if objective.remaining > 0 {
            objective.remaining -= 1;
            count_changed.write(TargetCountChanged {
                remaining: objective.remaining,
                total: objective.total,
            });
        }
        if objective.remaining == 0 && !objective.won {
            objective.won = true;
            win.write(WinConditionMet);
            info!("win condition met");
        }
    }
}

/// Opens the victory overlay when the win broadcast arrives.
fn open_victory_menu(mut win: MessageReader<WinConditionMet>, mut next_menu: ResMut<NextState<Menu>>) {
    if win.read().next().is_some() {
        next_menu.set(Menu::Victory);
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<RemainingTargets>();
    app.init_resource::<RemainingTargets>();
    app.add_message::<TargetCountChanged>();
    app.add_message::<WinConditionMet>();

    app.add_systems(OnEnter(GameState::InGame), reset_objective);
    app.add_systems(
        Update,
        (count_targets, track_broken_targets)
            .chain()
            .after(break_targets)
            .in_set(GameSet::Death)
            .run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        open_victory_menu
            .in_set(GameSet::Ui)
            .run_if(in_state(GameState::InGame)),
    );
}
