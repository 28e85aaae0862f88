use {
    bevy::{log::LogPlugin, prelude::*},
    game_core::CorePlugin,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(LogPlugin {
                filter: "error,practice=debug,\
                    practice_assets=info,\
                    game_core=info,\
                    hud=info,\
                    notification_ui=info"
                    .into(),
                level: bevy::log::Level::TRACE,
                ..Default::default()
            }),
        )
        .add_plugins(CorePlugin)
        .run();
}
