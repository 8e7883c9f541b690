use bevy::prelude::*;
use dimension_shift::DimensionShiftPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Dimension Shift".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(DimensionShiftPlugin::default())
        .run();
}
