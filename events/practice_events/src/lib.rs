use {
    bevy::prelude::*,
    practice_components::{BlockDesc, ItemDesc, SkillKey},
};

pub struct PracticeEventsPlugin;

impl Plugin for PracticeEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BlockBroken>()
            .register_type::<SkillPracticed>()
            .register_type::<CooldownReady>();
    }
}

/// Fired by the host when the local player destroys a block.
#[derive(Event, Debug, Default, Reflect)]
#[reflect(Default)]
pub struct BlockBroken {
    pub held: ItemDesc,
    pub block: BlockDesc,
}

/// A detector resolved one practiced action. The single observer of this
/// event is the only writer of the cooldown store.
#[derive(Event, Debug, Default, Reflect)]
#[reflect(Default)]
pub struct SkillPracticed {
    pub key: SkillKey,
    /// Copy of the triggering item, kept for display.
    pub icon: ItemDesc,
}

/// One-shot signal that a cooldown finished. Audio hooks observe this.
#[derive(Event, Debug, Default, Reflect)]
#[reflect(Default)]
pub struct CooldownReady {
    pub key: SkillKey,
}
