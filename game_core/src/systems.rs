use {
    bevy::prelude::*,
    practice_assets::{PracticeTuning, TuningHandle},
    practice_components::Living,
    practice_resources::ActionInput,
    states::GameState,
};

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn start_tuning_load(asset_server: Res<AssetServer>, mut commands: Commands) {
    commands.insert_resource(TuningHandle(asset_server.load("practice.tuning.ron")));
}

/// Swaps in the loaded tuning and starts the session. A failed load keeps
/// the compiled defaults.
pub fn finish_loading(
    handle: Res<TuningHandle>,
    tunings: Res<Assets<PracticeTuning>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Some(tuning) = tunings.get(&handle.0) {
        debug!(?tuning, "practice tuning loaded");
        commands.insert_resource(tuning.clone());
        next_state.set(GameState::Running);
    } else if asset_server.load_state(&handle.0).is_failed() {
        warn!("practice tuning failed to load, keeping defaults");
        next_state.set(GameState::Running);
    }
}

/// Maps the default mouse bindings onto the abstract action input the
/// detectors read.
pub fn sample_action_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<ActionInput>,
) {
    input.attack = buttons.pressed(MouseButton::Left);
    input.use_item = buttons.pressed(MouseButton::Right);
}

/// A couple of standing targets so aim detection has something to find.
pub fn spawn_practice_range(mut commands: Commands) {
    commands.spawn((
        Living,
        Transform::from_xyz(6.0, 0.0, 0.0),
        Name::new("PracticeDummy"),
    ));
    commands.spawn((
        Living,
        Transform::from_xyz(10.0, 2.0, 0.0),
        Name::new("PracticeDummyFar"),
    ));
}
