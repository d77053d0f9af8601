//! In-game screen plugin: pause input and mouse-cursor capture.
//!
//! Gameplay visuals and logic live in the `gameplay` domain plugins.
//! This plugin owns the keybinding that opens the pause overlay and keeps
//! the OS cursor locked to the window while actively playing.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use super::GameState;
use crate::menus::Menu;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        open_pause_menu.run_if(crate::gameplay_running),
    );
    app.add_systems(OnEnter(GameState::InGame), capture_cursor);
    app.add_systems(OnExit(GameState::InGame), release_cursor);
    // Menu overlays need a visible cursor even while the game state is unchanged.
    app.add_systems(OnExit(Menu::None), release_cursor);
    app.add_systems(
        OnEnter(Menu::None),
        capture_cursor.run_if(in_state(GameState::InGame)),
    );
}

fn open_pause_menu(keyboard: Res<ButtonInput<KeyCode>>, mut next_menu: ResMut<NextState<Menu>>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_menu.set(Menu::Pause);
    }
}

fn capture_cursor(mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    // Headless (test) runs have no window.
    let Ok(mut cursor) = cursor.single_mut() else {
        return;
    };
    cursor.grab_mode = CursorGrabMode::Locked;
    cursor.visible = false;
}

fn release_cursor(mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    let Ok(mut cursor) = cursor.single_mut() else {
        return;
    };
    cursor.grab_mode = CursorGrabMode::None;
    cursor.visible = true;
}
