//! The range itself: ground, walls, grabbable props, targets, light, player.
//!
//! Everything spawned here is scoped to `GameState::InGame`, so leaving for
//! the menu tears the whole range down and re-entering builds a fresh one.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::gameplay::player::{Grabbable, spawn_player};
use crate::gameplay::targets::{BreakableTarget, DEBRIS_SIZE, TARGET_HEALTH};
use crate::gameplay::{Health, player};
use crate::screens::GameState;
use crate::theme::palette;
use crate::third_party::CollisionLayer;

// === Constants ===

/// Playable floor extent (meters, square).
const RANGE_SIZE: f32 = 30.0;

/// Perimeter wall height.
const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.4;

/// Crate edge length and ball radius for the grabbable props.
const CRATE_SIZE: f32 = 0.4;
const BALL_RADIUS: f32 = 0.22;

/// Props survive some abuse before check_death removes them.
const PROP_HEALTH: f32 = 40.0;

/// Target panel dimensions.
const TARGET_SIZE: f32 = 0.6;
const TARGET_THICKNESS: f32 = 0.08;
/// Panel center height on its stand.
const TARGET_HEIGHT: f32 = 1.3;

/// How many targets the range starts with.
pub const TARGET_COUNT: usize = 5;

const PROJECTILE_VISUAL_RADIUS: f32 = 0.08;

// === Resources ===

/// Shared mesh and material handles for everything the range spawns at
/// runtime (props, targets, debris, projectiles, highlight).
#[derive(Resource)]
pub struct LevelAssets {
    pub crate_mesh: Handle<Mesh>,
    pub ball_mesh: Handle<Mesh>,
    pub target_mesh: Handle<Mesh>,
    pub debris_mesh: Handle<Mesh>,
    pub projectile_mesh: Handle<Mesh>,
    pub crate_material: Handle<StandardMaterial>,
    pub ball_material: Handle<StandardMaterial>,
    pub target_material: Handle<StandardMaterial>,
    pub debris_material: Handle<StandardMaterial>,
    pub projectile_material: Handle<StandardMaterial>,
    pub highlight_material: Handle<StandardMaterial>,
}

impl LevelAssets {
    /// Builds every runtime handle. Shared with tests that need a populated
    /// asset table without running the full `OnEnter` chain.
    pub fn create(
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Self {
        Self {
            crate_mesh: meshes.add(Cuboid::new(CRATE_SIZE, CRATE_SIZE, CRATE_SIZE)),
            ball_mesh: meshes.add(Sphere::new(BALL_RADIUS)),
            target_mesh: meshes.add(Cuboid::new(TARGET_SIZE, TARGET_SIZE, TARGET_THICKNESS)),
            debris_mesh: meshes.add(Cuboid::new(DEBRIS_SIZE, DEBRIS_SIZE, DEBRIS_SIZE)),
            projectile_mesh: meshes.add(Sphere::new(PROJECTILE_VISUAL_RADIUS)),
            crate_material: materials.add(StandardMaterial {
                base_color: palette::CRATE,
                perceptual_roughness: 0.9,
                ..default()
            }),
            ball_material: materials.add(StandardMaterial {
                base_color: palette::BALL,
                perceptual_roughness: 0.4,
                ..default()
            }),
            target_material: materials.add(StandardMaterial {
                base_color: palette::TARGET,
                perceptual_roughness: 0.6,
                ..default()
            }),
            debris_material: materials.add(StandardMaterial {
                base_color: palette::DEBRIS,
                perceptual_roughness: 0.8,
                ..default()
            }),
            projectile_material: materials.add(StandardMaterial {
                base_color: palette::PROJECTILE,
                emissive: LinearRgba::rgb(2.0, 1.8, 0.6),
                ..default()
            }),
            highlight_material: materials.add(StandardMaterial {
                base_color: palette::CRATE,
                emissive: palette::HIGHLIGHT_EMISSIVE,
                ..default()
            }),
        }
    }
}

// === Systems ===

fn setup_level_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let assets = LevelAssets::create(&mut meshes, &mut materials);
    commands.insert_resource(assets);
}

/// Ground plane, four perimeter walls, and the sun.
fn spawn_range(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(StandardMaterial {
        base_color: palette::GROUND,
        perceptual_roughness: 1.0,
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: palette::WALL,
        perceptual_roughness: 1.0,
        ..default()
    });

    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(RANGE_SIZE, RANGE_SIZE))),
        MeshMaterial3d(ground_material),
        Transform::IDENTITY,
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
        CollisionLayers::new(CollisionLayer::Environment, LayerMask::ALL),
        DespawnOnExit(GameState::InGame),
    ));

    let wall_mesh = meshes.add(Cuboid::new(RANGE_SIZE, WALL_HEIGHT, WALL_THICKNESS));
    let half = RANGE_SIZE / 2.0;
    let wall_poses = [
        Transform::from_xyz(0.0, WALL_HEIGHT / 2.0, -half),
        Transform::from_xyz(0.0, WALL_HEIGHT / 2.0, half),
        Transform::from_xyz(-half, WALL_HEIGHT / 2.0, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
        Transform::from_xyz(half, WALL_HEIGHT / 2.0, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
    ];
    for (i, transform) in wall_poses.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Wall {i}")),
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(wall_material.clone()),
            transform,
            RigidBody::Static,
            Collider::cuboid(RANGE_SIZE, WALL_HEIGHT, WALL_THICKNESS),
            CollisionLayers::new(CollisionLayer::Environment, LayerMask::ALL),
            DespawnOnExit(GameState::InGame),
        ));
    }

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.5, 0.0)),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Grabbable crates and balls scattered mid-range.
fn spawn_props(mut commands: Commands, assets: Res<LevelAssets>) {
    let crate_positions = [
        Vec3::new(-2.0, CRATE_SIZE / 2.0, 2.0),
        Vec3::new(2.5, CRATE_SIZE / 2.0, 1.0),
        Vec3::new(-1.0, CRATE_SIZE / 2.0, -1.5),
        Vec3::new(1.5, CRATE_SIZE / 2.0 + CRATE_SIZE, 1.0),
    ];
    for (i, position) in crate_positions.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Crate {i}")),
            Grabbable,
            Health::new(PROP_HEALTH),
            Mesh3d(assets.crate_mesh.clone()),
            MeshMaterial3d(assets.crate_material.clone()),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::cuboid(CRATE_SIZE, CRATE_SIZE, CRATE_SIZE),
            CollisionLayers::new(CollisionLayer::Prop, LayerMask::ALL),
            DespawnOnExit(GameState::InGame),
        ));
    }

    let ball_positions = [
        Vec3::new(0.5, BALL_RADIUS, 3.0),
        Vec3::new(-3.0, BALL_RADIUS, 0.0),
    ];
    for (i, position) in ball_positions.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Ball {i}")),
            Grabbable,
            Health::new(PROP_HEALTH),
            Mesh3d(assets.ball_mesh.clone()),
            MeshMaterial3d(assets.ball_material.clone()),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::sphere(BALL_RADIUS),
            CollisionLayers::new(CollisionLayer::Prop, LayerMask::ALL),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// A row of breakable targets along the far wall.
fn spawn_targets(
    mut commands: Commands,
    assets: Res<LevelAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let stand_mesh = meshes.add(Cuboid::new(0.1, TARGET_HEIGHT, 0.1));
    let stand_material = materials.add(StandardMaterial {
        base_color: palette::TARGET_STAND,
        perceptual_roughness: 0.9,
        ..default()
    });

    let spacing = RANGE_SIZE / (TARGET_COUNT as f32 + 1.0);
    let z = -RANGE_SIZE / 2.0 + 2.0;
    for i in 0..TARGET_COUNT {
        let x = -RANGE_SIZE / 2.0 + spacing * (i as f32 + 1.0);

        commands.spawn((
            Name::new(format!("Target Stand {i}")),
            Mesh3d(stand_mesh.clone()),
            MeshMaterial3d(stand_material.clone()),
            Transform::from_xyz(x, TARGET_HEIGHT / 2.0, z),
            RigidBody::Static,
            Collider::cuboid(0.1, TARGET_HEIGHT, 0.1),
            CollisionLayers::new(CollisionLayer::Environment, LayerMask::ALL),
            DespawnOnExit(GameState::InGame),
        ));

        commands.spawn((
            Name::new(format!("Target {i}")),
            BreakableTarget,
            Health::new(TARGET_HEALTH),
            Mesh3d(assets.target_mesh.clone()),
            MeshMaterial3d(assets.target_material.clone()),
            Transform::from_xyz(x, TARGET_HEIGHT, z),
            RigidBody::Static,
            Collider::cuboid(TARGET_SIZE, TARGET_SIZE, TARGET_THICKNESS),
            CollisionLayers::new(CollisionLayer::Target, LayerMask::ALL),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn spawn_level_player(mut commands: Commands) {
    spawn_player(&mut commands, Vec3::new(0.0, player::PLAYER_HEIGHT, 10.0));
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (
            setup_level_assets,
            spawn_range,
            spawn_props,
            spawn_targets,
            spawn_level_player,
        )
            .chain(),
    );
}
