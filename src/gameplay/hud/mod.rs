//! In-game HUD: crosshair, remaining-target counter, stamina bar.

use bevy::prelude::*;

use crate::gameplay::objective::TargetCountChanged;
use crate::gameplay::player::{GrabAim, Player, Stamina};
use crate::screens::GameState;
use crate::theme::palette;
use crate::{GameSet, gameplay_running};

// === Layout Constants ===

const CROSSHAIR_SIZE: f32 = 6.0;
const STAMINA_BAR_WIDTH: f32 = 220.0;
const STAMINA_BAR_HEIGHT: f32 = 10.0;
const HUD_MARGIN: f32 = 24.0;

// === Components ===

/// Marker: the center-screen crosshair dot.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Crosshair;

/// Marker: "Targets: N/M" readout.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TargetCounterText;

/// Marker: stamina bar fill node (scales with the stamina ratio).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct StaminaBarFill;

// === Systems ===

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("Crosshair"),
        Crosshair,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            width: Val::Px(CROSSHAIR_SIZE),
            height: Val::Px(CROSSHAIR_SIZE),
            margin: UiRect::all(Val::Px(-CROSSHAIR_SIZE / 2.0)),
            ..default()
        },
        BorderRadius::MAX,
        BackgroundColor(palette::CROSSHAIR),
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("Target Counter"),
        TargetCounterText,
        Text::new("Targets: -"),
        TextFont::from_font_size(palette::FONT_SIZE_HUD),
        TextColor(palette::TARGET_COUNTER_TEXT),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_MARGIN),
            right: Val::Px(HUD_MARGIN),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("Stamina Bar"),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(HUD_MARGIN),
            left: Val::Px(HUD_MARGIN),
            width: Val::Px(STAMINA_BAR_WIDTH),
            height: Val::Px(STAMINA_BAR_HEIGHT),
            ..default()
        },
        BackgroundColor(palette::STAMINA_BAR_BG),
        DespawnOnExit(GameState::InGame),
        children![(
            Name::new("Stamina Fill"),
            StaminaBarFill,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(palette::STAMINA_BAR_FILL),
        )],
    ));
}

/// Rewrites the counter on every count-changed broadcast.
fn update_target_counter(
    mut changes: MessageReader<TargetCountChanged>,
    mut counters: Query<&mut Text, With<TargetCounterText>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    for mut text in &mut counters {
        text.0 = format!("Targets: {}/{}", change.remaining, change.total);
    }
}

/// Scales the stamina fill with the player's stamina ratio and tints it
/// when too exhausted to sprint.
fn update_stamina_bar(
    players: Query<&Stamina, With<Player>>,
    mut fills: Query<(&mut Node, &mut BackgroundColor), With<StaminaBarFill>>,
) {
    let Ok(stamina) = players.single() else {
        return;
    };
    for (mut node, mut color) in &mut fills {
        node.width = Val::Percent(stamina.ratio() * 100.0);
        color.0 = if stamina.depleted() {
            palette::STAMINA_BAR_DEPLETED
        } else {
            palette::STAMINA_BAR_FILL
        };
    }
}

/// Lights the crosshair up when a grabbable prop is under the aim ray.
fn update_crosshair(
    players: Query<&GrabAim, With<Player>>,
    mut crosshairs: Query<&mut BackgroundColor, With<Crosshair>>,
) {
    let Ok(aim) = players.single() else {
        return;
    };
    for mut color in &mut crosshairs {
        color.0 = if aim.target.is_some() {
            palette::CROSSHAIR_GRAB
        } else {
            palette::CROSSHAIR
        };
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Crosshair>()
        .register_type::<TargetCounterText>()
        .register_type::<StaminaBarFill>();

    app.add_systems(OnEnter(GameState::InGame), spawn_hud);
    app.add_systems(
        Update,
        (update_target_counter, update_stamina_bar, update_crosshair)
            .in_set(GameSet::Ui)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_entity_count;

    fn create_hud_test_app() -> App {
        let mut app = crate::testing::create_base_test_app();
        app.add_message::<TargetCountChanged>();
        app.add_systems(OnEnter(GameState::InGame), spawn_hud);
        app.add_systems(
            Update,
            (update_target_counter, update_stamina_bar, update_crosshair),
        );
        crate::testing::transition_to_ingame(&mut app);
        app.update(); // Apply deferred spawns
        app
    }

    #[test]
    fn hud_spawns_on_enter_ingame() {
        let mut app = create_hud_test_app();

        assert_entity_count::<With<Crosshair>>(&mut app, 1);
        assert_entity_count::<With<TargetCounterText>>(&mut app, 1);
        assert_entity_count::<With<StaminaBarFill>>(&mut app, 1);
    }

    #[test]
    fn counter_reflects_count_changes() {
        let mut app = create_hud_test_app();

        app.world_mut().write_message(TargetCountChanged {
            remaining: 3,
            total: 5,
        });
        app.update();

        let mut texts = app
            .world_mut()
            .query_filtered::<&Text, With<TargetCounterText>>();
        let text = texts.single(app.world()).unwrap();
        assert_eq!(text.0, "Targets: 3/5");
    }

    #[test]
    fn stamina_bar_tracks_ratio() {
        let mut app = create_hud_test_app();
        app.world_mut().spawn((
            Player,
            Stamina {
                current: 25.0,
                max: 100.0,
            },
        ));

        app.update();

        let mut fills = app
            .world_mut()
            .query_filtered::<&Node, With<StaminaBarFill>>();
        let node = fills.single(app.world()).unwrap();
        assert!(matches!(node.width, Val::Percent(p) if (p - 25.0).abs() < 0.001));
    }

    #[test]
    fn crosshair_lights_up_over_grabbable() {
        let mut app = create_hud_test_app();
        let player = app.world_mut().spawn((Player, GrabAim::default())).id();
        app.update();

        {
            let mut crosshairs = app
                .world_mut()
                .query_filtered::<&BackgroundColor, With<Crosshair>>();
            assert_eq!(
                crosshairs.single(app.world()).unwrap().0,
                palette::CROSSHAIR
            );
        }

        let prop = app.world_mut().spawn_empty().id();
        app.world_mut().get_mut::<GrabAim>(player).unwrap().target = Some(prop);
        app.update();

        let mut crosshairs = app
            .world_mut()
            .query_filtered::<&BackgroundColor, With<Crosshair>>();
        assert_eq!(
            crosshairs.single(app.world()).unwrap().0,
            palette::CROSSHAIR_GRAB
        );
    }
}
