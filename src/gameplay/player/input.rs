//! Raw input → [`PlayerAction`] messages.
//!
//! Keeping the bindings in one place means movement, grabbing, and weapons
//! never look at the keyboard themselves — they read actions, which also
//! makes them trivially drivable from tests.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::gameplay::weapons::WeaponSlot;

/// One discrete player intent for this frame.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// Local-space movement axes: x = strafe right, y = forward.
    Move(Vec2),
    /// Mouse delta for this frame.
    Look(Vec2),
    Jump,
    /// Sprint key engaged / released.
    Sprint(bool),
    /// Start holding the aimed prop.
    Grab,
    /// Drop the held prop.
    Release,
    Fire,
    SelectWeapon(WeaponSlot),
}

pub(super) fn keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut actions: MessageWriter<PlayerAction>,
) {
    let right = i8::from(keyboard.pressed(KeyCode::KeyD));
    let left = i8::from(keyboard.pressed(KeyCode::KeyA));
    let forward = i8::from(keyboard.pressed(KeyCode::KeyW));
    let back = i8::from(keyboard.pressed(KeyCode::KeyS));

    let axes = Vec2::new(f32::from(right - left), f32::from(forward - back));
    if axes != Vec2::ZERO {
        actions.write(PlayerAction::Move(axes.normalize()));
    }

    if keyboard.just_pressed(KeyCode::Space) {
        actions.write(PlayerAction::Jump);
    }

    if keyboard.just_pressed(KeyCode::ShiftLeft) {
        actions.write(PlayerAction::Sprint(true));
    }
    if keyboard.just_released(KeyCode::ShiftLeft) {
        actions.write(PlayerAction::Sprint(false));
    }

    // Hold-to-carry: grab on press, drop on release.
    if keyboard.just_pressed(KeyCode::KeyE) {
        actions.write(PlayerAction::Grab);
    }
    if keyboard.just_released(KeyCode::KeyE) {
        actions.write(PlayerAction::Release);
    }

    if mouse.just_pressed(MouseButton::Left) {
        actions.write(PlayerAction::Fire);
    }

    if keyboard.just_pressed(KeyCode::Digit1) {
        actions.write(PlayerAction::SelectWeapon(WeaponSlot::Rifle));
    }
    if keyboard.just_pressed(KeyCode::Digit2) {
        actions.write(PlayerAction::SelectWeapon(WeaponSlot::Launcher));
    }
}

pub(super) fn mouse_input(
    motion: Res<AccumulatedMouseMotion>,
    mut actions: MessageWriter<PlayerAction>,
) {
    if motion.delta != Vec2::ZERO {
        actions.write(PlayerAction::Look(motion.delta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct ActionLog(Vec<PlayerAction>);

    fn log_actions(mut reader: MessageReader<PlayerAction>, mut log: ResMut<ActionLog>) {
        for action in reader.read() {
            log.0.push(*action);
        }
    }

    fn create_input_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<ButtonInput<MouseButton>>();
        app.init_resource::<ActionLog>();
        app.add_message::<PlayerAction>();
        app.add_systems(Update, (keyboard_input, log_actions).chain());
        app
    }

    #[test]
    fn wasd_produces_normalized_move() {
        let mut app = create_input_test_app();

        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyD);
        app.update();

        let log = app.world().resource::<ActionLog>();
        let Some(PlayerAction::Move(axes)) = log.0.first() else {
            panic!("expected a Move action, got {:?}", log.0);
        };
        assert!((axes.length() - 1.0).abs() < 0.001);
        assert!(axes.x > 0.0 && axes.y > 0.0);
    }

    #[test]
    fn no_keys_means_no_move() {
        let mut app = create_input_test_app();
        app.update();

        let log = app.world().resource::<ActionLog>();
        assert!(!log.0.iter().any(|a| matches!(a, PlayerAction::Move(_))));
    }

    #[test]
    fn grab_key_maps_to_grab_then_release() {
        let mut app = create_input_test_app();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyE);
        app.update();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::KeyE);
        app.update();

        let log = app.world().resource::<ActionLog>();
        assert!(log.0.contains(&PlayerAction::Grab));
        assert!(log.0.contains(&PlayerAction::Release));
    }

    #[test]
    fn digit_keys_select_weapons() {
        let mut app = create_input_test_app();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Digit2);
        app.update();

        let log = app.world().resource::<ActionLog>();
        assert!(
            log.0
                .contains(&PlayerAction::SelectWeapon(WeaponSlot::Launcher))
        );
    }
}
