use asteroblast::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use asteroblast::{config, graphics, AsteroblastPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "asteroblast".into(),
            resolution: WindowResolution::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32),
            resizable: false,
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    .add_plugins(AsteroblastPlugin)
    // Needs the AssetServer from DefaultPlugins, so it is built here rather
    // than inside the plugin.
    .init_resource::<graphics::GameAssets>()
    .add_systems(
        Startup,
        (
            // Load config first so every other startup system sees the final values.
            config::load_game_config,
            graphics::setup_camera.after(config::load_game_config),
            graphics::spawn_background.after(graphics::setup_camera),
        ),
    );

    app.run();
}
