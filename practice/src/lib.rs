//! Turns noisy per-tick observations of the local player into discrete,
//! deduplicated "skill practiced" events, and manages the resulting
//! cooldowns and one-shot ready notifications.

pub mod aim;
pub mod systems;

#[cfg(test)]
mod tests;

use {
    bevy::prelude::*,
    practice_assets::PracticeAssetsPlugin,
    practice_components::PracticeComponentsPlugin,
    practice_events::PracticeEventsPlugin,
    practice_resources::{ActionInput, CooldownStore, PlayerObservation, ToastQueue},
    states::GameState,
    system_schedule::TickSchedule,
};

pub struct PracticePlugin;

impl Plugin for PracticePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            PracticeComponentsPlugin,
            PracticeEventsPlugin,
            PracticeAssetsPlugin,
        ))
        .register_type::<ActionInput>()
        .init_resource::<ActionInput>()
        .init_resource::<PlayerObservation>()
        .init_resource::<CooldownStore>()
        .init_resource::<ToastQueue>()
        .add_observer(systems::on_block_broken)
        .add_observer(systems::apply_practice)
        .add_systems(
            Update,
            (systems::expire_and_notify, systems::expire_toasts)
                .chain()
                .in_set(TickSchedule::Notify)
                .run_if(in_state(GameState::Running)),
        )
        .add_systems(
            Update,
            (
                systems::detect_melee,
                systems::detect_bow,
                systems::detect_crossbow,
                systems::detect_inventory_gain,
            )
                .chain()
                .in_set(TickSchedule::Detect)
                .run_if(in_state(GameState::Running)),
        );
    }
}
