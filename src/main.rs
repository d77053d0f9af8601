//! Shatter Range entry point.

fn main() {
    use bevy::prelude::*;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Shatter Range".to_string(),
                resolution: (1920, 1080).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(shatter_range::plugin)
        .run();
}
