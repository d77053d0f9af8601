//! Tests for game state transitions through the full plugin stack.

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use pretty_assertions::assert_eq;
use shatter_range::menus::Menu;
use shatter_range::screens::GameState;

fn create_game_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.add_plugins(InputPlugin);
    app.add_plugins(shatter_range::plugin);
    app
}

#[test]
fn game_initializes_in_loading_state() {
    let app = create_game_app();
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::Loading);
}

#[test]
fn loading_advances_to_main_menu() {
    let mut app = create_game_app();

    app.update(); // Loading runs its auto-advance
    app.update(); // Transition applies

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::MainMenu);
}

#[test]
fn main_menu_screen_opens_main_menu_overlay() {
    let mut app = create_game_app();

    app.update();
    app.update();
    app.update(); // Menu::Main pending transition applies

    let menu = app.world().resource::<State<Menu>>();
    assert_eq!(*menu.get(), Menu::Main);
}

#[test]
fn can_transition_between_states() {
    let mut app = create_game_app();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::MainMenu);
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::MainMenu);
}
