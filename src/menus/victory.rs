//! Victory overlay UI with bordered panel and a clickable exit button.

use bevy::prelude::*;

use super::Menu;
use crate::screens::GameState;
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Victory), spawn_victory_screen);
}

fn spawn_victory_screen(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Victory Screen"),
        BackgroundColor(palette::OVERLAY_BACKGROUND),
        GlobalZIndex(1),
        DespawnOnExit(Menu::Victory),
        children![(
            Name::new("Victory Panel"),
            Node {
                width: Val::Px(500.0),
                min_height: Val::Px(300.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::SpaceEvenly,
                padding: UiRect::all(Val::Px(40.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(palette::PANEL_BACKGROUND),
            BorderColor::all(palette::PANEL_BORDER),
            children![
                (
                    Text::new("RANGE CLEAR!"),
                    TextFont::from_font_size(palette::FONT_SIZE_HEADER),
                    TextColor(palette::VICTORY_TEXT),
                ),
                widget::prompt("Every target broken"),
                widget::button(
                    "Exit to Menu",
                    |_: On<Pointer<Click>>, mut next_game: ResMut<NextState<GameState>>| {
                        next_game.set(GameState::MainMenu);
                    },
                ),
            ],
        )],
    ));
}
