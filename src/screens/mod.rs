//! Screen plugins for each game state.

mod in_game;
mod loading;
mod main_menu;

use bevy::prelude::*;

/// Primary game states.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[states(scoped_entities)]
pub enum GameState {
    /// Initial loading state.
    #[default]
    Loading,
    /// Title screen with the main menu overlay.
    MainMenu,
    /// Active gameplay on the range.
    InGame,
}

pub fn plugin(app: &mut App) {
    app.init_state::<GameState>();
    app.add_plugins((loading::plugin, main_menu::plugin, in_game::plugin));
}
