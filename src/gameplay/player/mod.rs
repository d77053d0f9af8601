//! First-person character: movement, sprint stamina, mouse look, and the
//! physics grab. Raw input becomes [`PlayerAction`] messages in `input`;
//! everything downstream consumes actions, never keys.

mod grab;
mod input;
mod movement;

use avian3d::prelude::*;
use bevy::prelude::*;

pub use grab::{GrabAim, Grabbable, GrabbedProp};
pub use input::PlayerAction;

use crate::screens::GameState;
use crate::third_party::CollisionLayer;
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Capsule dimensions (meters): radius and cylinder length.
pub const PLAYER_RADIUS: f32 = 0.35;
pub const PLAYER_HEIGHT: f32 = 1.1;

/// Eye height above the capsule center.
pub const EYE_HEIGHT: f32 = 0.6;

pub const WALK_SPEED: f32 = 4.0;
pub const RUN_SPEED: f32 = 7.0;
const ACCELERATION: f32 = 40.0;
const DAMPING_FACTOR: f32 = 0.85;
const JUMP_IMPULSE: f32 = 5.0;
const MAX_SLOPE_ANGLE: f32 = std::f32::consts::PI * 0.25;

pub const STAMINA_MAX: f32 = 100.0;
/// Drain while sprinting (per second).
pub const STAMINA_DEPLETION_RATE: f32 = 20.0;
/// Recovery while not sprinting (per second).
pub const STAMINA_RECOVERY_RATE: f32 = 12.0;

// === Components ===

/// Marker for the player character body.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Marker for the first-person camera (child of the player body).
/// Accumulated pitch lives here; yaw lives on the body transform.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerCamera {
    pub pitch: f32,
}

/// Marker: the character is standing on walkable ground.
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Grounded;

/// Tuning knobs for the character controller.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct MovementSettings {
    pub acceleration: f32,
    pub damping: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_impulse: f32,
    pub max_slope_angle: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            damping: DAMPING_FACTOR,
            walk_speed: WALK_SPEED,
            run_speed: RUN_SPEED,
            jump_impulse: JUMP_IMPULSE,
            max_slope_angle: MAX_SLOPE_ANGLE,
        }
    }
}

/// Sprint energy. Drains while running, recovers while walking; sprinting
/// force-stops at zero.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
}

impl Default for Stamina {
    fn default() -> Self {
        Self {
            current: STAMINA_MAX,
            max: STAMINA_MAX,
        }
    }
}

impl Stamina {
    #[must_use]
    pub fn ratio(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn depleted(&self) -> bool {
        self.current <= f32::EPSILON
    }
}

/// Whether the sprint key is currently engaged (and affordable).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Sprinting(pub bool);

// === Spawning ===

/// Spawns the player body with its camera child and weapon loadout at the
/// given position. Called from level setup.
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    let collider = Collider::capsule(PLAYER_RADIUS, PLAYER_HEIGHT);
    let mut caster_shape = collider.clone();
    caster_shape.set_scale(Vec3::ONE * 0.99, 10);

    commands
        .spawn((
            Name::new("Player"),
            Player,
            Stamina::default(),
            Sprinting::default(),
            MovementSettings::default(),
            GrabAim::default(),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            collider,
            ShapeCaster::new(caster_shape, Vec3::ZERO, Quat::IDENTITY, Dir3::NEG_Y)
                .with_max_distance(0.2),
            LockedAxes::ROTATION_LOCKED,
            Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
            Restitution::ZERO.with_combine_rule(CoefficientCombine::Min),
            CollisionLayers::new(
                CollisionLayer::Player,
                [
                    CollisionLayer::Environment,
                    CollisionLayer::Prop,
                    CollisionLayer::Target,
                ],
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Name::new("Player Camera"),
                    PlayerCamera::default(),
                    Camera3d::default(),
                    Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
                ))
                .with_children(|camera| {
                    camera.spawn(crate::gameplay::weapons::rifle_bundle());
                    camera.spawn(crate::gameplay::weapons::launcher_bundle());
                });
        })
        .id()
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<PlayerCamera>()
        .register_type::<MovementSettings>()
        .register_type::<Stamina>()
        .register_type::<Sprinting>();
    app.add_message::<PlayerAction>();

    app.add_systems(
        Update,
        (input::keyboard_input, input::mouse_input)
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );

    app.add_systems(
        Update,
        (
            movement::update_grounded,
            movement::apply_player_actions,
            movement::apply_movement_damping,
            movement::update_stamina,
            movement::apply_look,
        )
            .chain()
            .in_set(GameSet::Movement)
            .run_if(gameplay_running),
    );

    app.add_plugins(grab::plugin);
}
