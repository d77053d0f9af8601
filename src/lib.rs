//! Shatter Range game library.
//!
//! A first-person physics range: grab and throw props, shoot breakable
//! targets with hitscan and projectile weapons, clear every target to win.

#[cfg(feature = "dev")]
pub mod dev_tools;
pub mod gameplay;
pub mod menus;
pub mod screens;
#[cfg(test)]
pub mod testing;
pub mod theme;
pub mod third_party;

use bevy::prelude::*;

use crate::menus::Menu;
use crate::screens::GameState;

/// Frame ordering for gameplay systems. Configured as a chain in [`plugin`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Read raw input, emit player action messages.
    Input,
    /// Character movement, grabbing, projectile bookkeeping.
    Movement,
    /// Weapon fire, hit resolution, damage application.
    Combat,
    /// Target breaking, death despawns, win detection.
    Death,
    /// HUD updates.
    Ui,
}

/// Run condition: actively playing (in game, no menu overlay open).
pub fn gameplay_running(game_state: Res<State<GameState>>, menu: Res<State<Menu>>) -> bool {
    *game_state.get() == GameState::InGame && *menu.get() == Menu::None
}

/// Top-level plugin wiring every module together.
/// `main.rs` adds this on top of `DefaultPlugins`; integration tests add it
/// on top of `MinimalPlugins` + `StatesPlugin`.
pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (
            GameSet::Input,
            GameSet::Movement,
            GameSet::Combat,
            GameSet::Death,
            GameSet::Ui,
        )
            .chain(),
    );

    app.add_plugins((
        third_party::plugin,
        theme::plugin,
        screens::plugin,
        menus::plugin,
        gameplay::plugin,
    ));

    #[cfg(feature = "dev")]
    app.add_plugins(dev_tools::plugin);
}
