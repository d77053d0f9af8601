//! Testing utilities for Bevy systems.

#![cfg(test)]

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::menus::Menu;
use crate::screens::GameState;

/// Creates a minimal app for testing with essential plugins.
pub fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

/// Creates a test app with both game states initialized.
pub fn create_base_test_app() -> App {
    let mut app = create_test_app();
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.init_state::<Menu>();
    app
}

/// Transitions the app into `GameState::InGame` and applies it.
pub fn transition_to_ingame(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
}

/// Asserts the number of entities matching the query filter.
pub fn assert_entity_count<F: bevy::ecs::query::QueryFilter>(app: &mut App, expected: usize) {
    let count = app
        .world_mut()
        .query_filtered::<Entity, F>()
        .iter(app.world())
        .count();
    assert_eq!(
        count, expected,
        "expected {expected} matching entities, found {count}"
    );
}
