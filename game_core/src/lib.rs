use {
    bevy::prelude::*,
    hud::CooldownHudPlugin,
    notification_ui::ToastUiPlugin,
    practice::PracticePlugin,
    states::GameState,
    system_schedule::TickSchedule,
};

mod systems;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .configure_sets(
                Update,
                (
                    TickSchedule::Observe,
                    TickSchedule::Notify,
                    TickSchedule::Detect,
                    TickSchedule::Render,
                )
                    .chain(),
            )
            .add_plugins((PracticePlugin, CooldownHudPlugin, ToastUiPlugin))
            .add_systems(Startup, (systems::setup_camera, systems::start_tuning_load))
            .add_systems(
                Update,
                systems::finish_loading.run_if(in_state(GameState::Loading)),
            )
            .add_systems(
                Update,
                systems::sample_action_input
                    .in_set(TickSchedule::Observe)
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(OnEnter(GameState::Running), systems::spawn_practice_range);
    }
}
