//! Character movement: acceleration, jumping, damping, sprint stamina, look.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::{
    Grounded, MovementSettings, Player, PlayerAction, PlayerCamera, STAMINA_DEPLETION_RATE,
    STAMINA_RECOVERY_RATE, Sprinting, Stamina,
};

/// Mouse-delta to radians.
const LOOK_SENSITIVITY: f32 = 0.002;

/// Just shy of straight up/down so the view never flips.
const PITCH_LIMIT: f32 = 1.54;

/// Horizontal speed below which the character counts as standing still.
const MOVING_THRESHOLD: f32 = 0.1;

/// Marks the character grounded when the downward shape cast hits a slope
/// shallower than `max_slope_angle`.
pub(super) fn update_grounded(
    mut commands: Commands,
    query: Query<(Entity, &ShapeHits, &Rotation, &MovementSettings), With<Player>>,
) {
    for (entity, hits, rotation, settings) in &query {
        let is_grounded = hits.iter().any(|hit| {
            (rotation.0 * -hit.normal2).angle_between(Vec3::Y) <= settings.max_slope_angle
        });

        if is_grounded {
            commands.entity(entity).insert(Grounded);
        } else {
            commands.entity(entity).remove::<Grounded>();
        }
    }
}

/// Applies movement, jump, and sprint actions to the character body.
pub(super) fn apply_player_actions(
    time: Res<Time>,
    mut actions: MessageReader<PlayerAction>,
    mut players: Query<
        (
            &MovementSettings,
            &Stamina,
            &mut Sprinting,
            &Transform,
            &mut LinearVelocity,
            Has<Grounded>,
        ),
        With<Player>,
    >,
) {
    let delta = time.delta_secs();
    for action in actions.read() {
        let Ok((settings, stamina, mut sprinting, transform, mut velocity, grounded)) =
            players.single_mut()
        else {
            return;
        };
        match action {
            PlayerAction::Move(axes) => {
                // Yaw-relative: forward is the body's -Z.
                let direction = (transform.rotation * Vec3::new(axes.x, 0.0, -axes.y))
                    .with_y(0.0)
                    .normalize_or_zero();
                velocity.0 += direction * settings.acceleration * delta;

                let max_speed = if sprinting.0 {
                    settings.run_speed
                } else {
                    settings.walk_speed
                };
                let horizontal = velocity.0.with_y(0.0);
                if horizontal.length() > max_speed {
                    let capped = horizontal.normalize() * max_speed;
                    velocity.x = capped.x;
                    velocity.z = capped.z;
                }
            }
            PlayerAction::Jump => {
                if grounded {
                    velocity.y = settings.jump_impulse;
                }
            }
            PlayerAction::Sprint(active) => {
                sprinting.0 = *active && !stamina.depleted();
            }
            _ => {}
        }
    }
}

/// Slows horizontal movement so releasing the keys stops the character.
pub(super) fn apply_movement_damping(
    mut query: Query<(&MovementSettings, &mut LinearVelocity), With<Player>>,
) {
    for (settings, mut velocity) in &mut query {
        // Leave the Y axis to gravity.
        velocity.x *= settings.damping;
        velocity.z *= settings.damping;
    }
}

/// Drains stamina while sprint-moving, recovers it otherwise, and
/// force-stops the sprint at zero.
pub(super) fn update_stamina(
    time: Res<Time>,
    mut players: Query<(&mut Stamina, &mut Sprinting, &LinearVelocity), With<Player>>,
) {
    let delta = time.delta_secs();
    for (mut stamina, mut sprinting, velocity) in &mut players {
        let moving = velocity.0.with_y(0.0).length() > MOVING_THRESHOLD;
        if sprinting.0 && moving {
            stamina.current -= STAMINA_DEPLETION_RATE * delta;
        } else {
            stamina.current += STAMINA_RECOVERY_RATE * delta;
        }
        stamina.current = stamina.current.clamp(0.0, stamina.max);

        if stamina.depleted() {
            sprinting.0 = false;
        }
    }
}

/// Mouse look: yaw rotates the body, pitch rotates the camera child.
pub(super) fn apply_look(
    mut actions: MessageReader<PlayerAction>,
    mut bodies: Query<&mut Transform, (With<Player>, Without<PlayerCamera>)>,
    mut cameras: Query<(&mut Transform, &mut PlayerCamera), Without<Player>>,
) {
    for action in actions.read() {
        let PlayerAction::Look(delta) = action else {
            continue;
        };
        if let Ok(mut body) = bodies.single_mut() {
            body.rotate_y(-delta.x * LOOK_SENSITIVITY);
        }
        if let Ok((mut camera, mut state)) = cameras.single_mut() {
            state.pitch = (state.pitch - delta.y * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            camera.rotation = Quat::from_rotation_x(state.pitch);
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn create_movement_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<PlayerAction>();
        app.add_systems(
            Update,
            (apply_player_actions, update_stamina, apply_look).chain(),
        );
        app.update(); // Initialize time (first frame delta=0)
        app
    }

    fn spawn_player(world: &mut World) -> Entity {
        world
            .spawn((
                Player,
                MovementSettings::default(),
                Stamina::default(),
                Sprinting::default(),
                Transform::default(),
                LinearVelocity::default(),
            ))
            .id()
    }

    fn act(app: &mut App, action: PlayerAction) {
        app.world_mut().write_message(action);
    }

    /// Sleep briefly so MinimalPlugins' wall-clock delta is positive.
    fn update_with_delta(app: &mut App) {
        std::thread::sleep(Duration::from_millis(2));
        app.update();
    }

    #[test]
    fn move_action_accelerates_forward() {
        let mut app = create_movement_test_app();
        let player = spawn_player(app.world_mut());

        act(&mut app, PlayerAction::Move(Vec2::Y));
        update_with_delta(&mut app);

        let velocity = app.world().get::<LinearVelocity>(player).unwrap();
        // Forward is -Z for an unrotated body.
        assert!(velocity.z < 0.0, "expected forward motion, got {velocity:?}");
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn jump_requires_ground() {
        let mut app = create_movement_test_app();
        let player = spawn_player(app.world_mut());

        act(&mut app, PlayerAction::Jump);
        update_with_delta(&mut app);

        let velocity = app.world().get::<LinearVelocity>(player).unwrap();
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn grounded_jump_sets_vertical_velocity() {
        let mut app = create_movement_test_app();
        let player = spawn_player(app.world_mut());
        app.world_mut().entity_mut(player).insert(Grounded);

        act(&mut app, PlayerAction::Jump);
        update_with_delta(&mut app);

        let velocity = app.world().get::<LinearVelocity>(player).unwrap();
        let settings = app.world().get::<MovementSettings>(player).unwrap();
        assert_eq!(velocity.y, settings.jump_impulse);
    }

    #[test]
    fn sprinting_drains_stamina_while_moving() {
        let mut app = create_movement_test_app();
        let player = spawn_player(app.world_mut());
        app.world_mut()
            .entity_mut(player)
            .insert(LinearVelocity(Vec3::new(5.0, 0.0, 0.0)));

        act(&mut app, PlayerAction::Sprint(true));
        update_with_delta(&mut app);

        let stamina = app.world().get::<Stamina>(player).unwrap();
        assert!(stamina.current < stamina.max);
    }

    #[test]
    fn stamina_recovers_while_walking() {
        let mut app = create_movement_test_app();
        let player = spawn_player(app.world_mut());
        app.world_mut().get_mut::<Stamina>(player).unwrap().current = 50.0;

        update_with_delta(&mut app);

        let stamina = app.world().get::<Stamina>(player).unwrap();
        assert!(stamina.current > 50.0);
        assert!(stamina.current <= stamina.max);
    }

    #[test]
    fn empty_stamina_force_stops_sprint() {
        let mut app = create_movement_test_app();
        let player = spawn_player(app.world_mut());
        app.world_mut().get_mut::<Stamina>(player).unwrap().current = 0.001;
        app.world_mut()
            .entity_mut(player)
            .insert((Sprinting(true), LinearVelocity(Vec3::new(5.0, 0.0, 0.0))));

        update_with_delta(&mut app);

        let sprinting = app.world().get::<Sprinting>(player).unwrap();
        assert!(!sprinting.0);
        let stamina = app.world().get::<Stamina>(player).unwrap();
        assert!(stamina.current >= 0.0);
    }

    #[test]
    fn look_yaws_the_body() {
        let mut app = create_movement_test_app();
        let player = spawn_player(app.world_mut());

        act(&mut app, PlayerAction::Look(Vec2::new(100.0, 0.0)));
        update_with_delta(&mut app);

        let transform = app.world().get::<Transform>(player).unwrap();
        assert!(transform.rotation != Quat::IDENTITY);
    }

    #[test]
    fn look_pitch_is_clamped() {
        let mut app = create_movement_test_app();
        spawn_player(app.world_mut());
        let camera = app
            .world_mut()
            .spawn((PlayerCamera::default(), Transform::default()))
            .id();

        // A wildly large delta must clamp, not flip the view.
        act(&mut app, PlayerAction::Look(Vec2::new(0.0, 1_000_000.0)));
        update_with_delta(&mut app);

        let state = app.world().get::<PlayerCamera>(camera).unwrap();
        assert!((state.pitch + PITCH_LIMIT).abs() < 0.001);
    }
}
