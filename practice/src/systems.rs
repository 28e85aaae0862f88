use {
    crate::aim,
    bevy::prelude::*,
    practice_assets::PracticeTuning,
    practice_components::{classify, Dead, ItemDesc, Living, Skill, SkillKey, Tier},
    practice_events::{BlockBroken, CooldownReady, SkillPracticed},
    practice_resources::{ActionInput, CooldownStore, PlayerObservation, Slot, ToastQueue},
    std::time::Duration,
};

pub const BOW_GROUP: &str = "bow";
pub const CROSSBOW_GROUP: &str = "crossbow";

/// Sole writer of the cooldown store. Every detector funnels through the
/// `SkillPracticed` event into this observer.
pub fn apply_practice(
    trigger: On<SkillPracticed>,
    tuning: Res<PracticeTuning>,
    mut store: ResMut<CooldownStore>,
) {
    let event = trigger.event();
    debug!(?event.key, "skill practiced");
    store.start_or_refresh(
        event.key.clone(),
        &event.icon,
        Duration::from_secs_f32(tuning.cooldown_secs),
    );
}

/// Classifies a block the local player just destroyed. Runs synchronously
/// with the host event, outside the tick ordering.
pub fn on_block_broken(trigger: On<BlockBroken>, mut commands: Commands) {
    let event = trigger.event();
    let Some(tier) = classify::tier_of(&event.held.id) else {
        return;
    };
    let Some(skill) = classify::harvest_skill_of(&event.held, &event.block) else {
        return;
    };
    commands.trigger(SkillPracticed {
        key: SkillKey::new(skill, tier, None),
        icon: event.held.clone(),
    });
}

/// Ticks every cooldown; a finished, unnotified entry fires its ready
/// signal exactly once: toast plus `CooldownReady` for audio hooks.
pub fn expire_and_notify(
    time: Res<Time>,
    tuning: Res<PracticeTuning>,
    mut store: ResMut<CooldownStore>,
    mut toasts: ResMut<ToastQueue>,
    mut commands: Commands,
) {
    for (key, entry) in store.iter_mut() {
        entry.timer.tick(time.delta());
        if entry.timer.is_finished() && !entry.notified {
            entry.notified = true;
            info!(?key, "cooldown ready");
            toasts.push(key.clone(), Duration::from_secs_f32(tuning.toast_secs));
            commands.trigger(CooldownReady { key: key.clone() });
        }
    }
}

/// Ages the toast queue and drops expired toasts.
pub fn expire_toasts(time: Res<Time>, mut toasts: ResMut<ToastQueue>) {
    toasts.tick(time.delta());
}

/// Attack-input rising edge while a weapon is held and a living creature
/// is under the crosshair. Holding the key does not retrigger; only the
/// not-pressed to pressed transition counts.
pub fn detect_melee(
    input: Res<ActionInput>,
    obs: Res<PlayerObservation>,
    living: Query<(), (With<Living>, Without<Dead>)>,
    mut was_pressed: Local<bool>,
    mut commands: Commands,
) {
    let rising = input.attack && !*was_pressed;
    *was_pressed = input.attack;
    if !rising {
        return;
    }

    let Some(held) = obs.main_hand.as_ref() else {
        return;
    };
    if !held.is_melee_weapon() {
        return;
    }
    let Some(target) = obs.crosshair_target else {
        return;
    };
    if living.get(target).is_err() {
        return;
    }
    let Some(tier) = classify::tier_of(&held.id) else {
        return;
    };

    commands.trigger(SkillPracticed {
        key: SkillKey::new(Skill::MeleeCombat, tier, None),
        icon: held.clone(),
    });
}

/// Cross-tick state of an in-progress bow draw.
#[derive(Default)]
pub struct BowDraw {
    ticks: u32,
    bow: ItemDesc,
}

/// Bow shots are recognized on release: the draw must have lasted the
/// minimum tick count and the aim cone must contain a living target.
/// Shorter releases are accidental taps, not shots.
pub fn detect_bow(
    obs: Res<PlayerObservation>,
    tuning: Res<PracticeTuning>,
    living: Query<(Entity, &Transform), (With<Living>, Without<Dead>)>,
    mut draw: Local<Option<BowDraw>>,
    mut commands: Commands,
) {
    let drawing = obs.using_item
        && obs
            .active_item
            .as_ref()
            .is_some_and(|item| item.categories.bow && !item.categories.crossbow);

    if drawing {
        if let Some(bow) = obs.active_item.as_ref() {
            let state = draw.get_or_insert_with(|| BowDraw {
                ticks: 0,
                bow: bow.clone(),
            });
            // Each sampled drawing tick counts, so `ticks` equals the
            // elapsed draw time at the release tick.
            state.ticks = state.ticks.saturating_add(1);
        }
        return;
    }

    let Some(state) = draw.take() else {
        return;
    };
    if state.ticks < tuning.min_draw_ticks {
        debug!(ticks = state.ticks, "bow released early, not a shot");
        return;
    }
    let target = aim::nearest_in_cone(
        obs.eye_position,
        obs.look_direction,
        tuning.aim_max_distance,
        tuning.aim_max_angle_deg,
        living
            .iter()
            .map(|(entity, transform)| (entity, transform.translation)),
    );
    if target.is_none() {
        return;
    }
    let Some(tier) = classify::tier_of(&state.bow.id) else {
        return;
    };

    commands.trigger(SkillPracticed {
        key: SkillKey::new(Skill::RangedCombat, tier, Some(BOW_GROUP)),
        icon: state.bow,
    });
}

/// Two-click crossbow primer. The first use click only charges; the
/// second fires and always clears the charge, hit or miss. Swapping away
/// from the crossbow abandons an in-progress charge.
///
/// Re-priming in the same breath as a shot can fold into the next charge;
/// accepted imprecision of the two-state primer.
pub fn detect_crossbow(
    input: Res<ActionInput>,
    obs: Res<PlayerObservation>,
    tuning: Res<PracticeTuning>,
    living: Query<(Entity, &Transform), (With<Living>, Without<Dead>)>,
    mut primed: Local<bool>,
    mut was_pressed: Local<bool>,
    mut commands: Commands,
) {
    let Some(crossbow) = obs.holding(|item| item.categories.crossbow) else {
        *primed = false;
        *was_pressed = input.use_item;
        return;
    };

    let rising = input.use_item && !*was_pressed;
    *was_pressed = input.use_item;
    if !rising {
        return;
    }

    if !*primed {
        *primed = true;
        return;
    }
    *primed = false;

    let target = aim::nearest_in_cone(
        obs.eye_position,
        obs.look_direction,
        tuning.aim_max_distance,
        tuning.aim_max_angle_deg,
        living
            .iter()
            .map(|(entity, transform)| (entity, transform.translation)),
    );
    if target.is_none() {
        return;
    }

    let tier = classify::tier_of(&crossbow.id).unwrap_or(Tier::Wood);
    commands.trigger(SkillPracticed {
        key: SkillKey::new(Skill::RangedCombat, tier, Some(CROSSBOW_GROUP)),
        icon: crossbow.clone(),
    });
}

/// Diffs the inventory against last tick's snapshot and classifies the
/// first gained stack: smithing skills when a crafting surface is open,
/// fishing when a rod is in hand. One gain per tick at most, so a burst
/// like a furnace dump grants a single candidate.
pub fn detect_inventory_gain(
    obs: Res<PlayerObservation>,
    mut snapshot: Local<Option<Vec<Slot>>>,
    mut commands: Commands,
) {
    let Some(slots) = obs.inventory.as_deref() else {
        // Unreadable this tick; start over once the host can see it again.
        if snapshot.is_some() {
            debug!("inventory unreadable, resetting snapshot");
        }
        *snapshot = None;
        return;
    };

    let Some(previous) = snapshot.as_deref() else {
        *snapshot = Some(slots.to_vec());
        return;
    };
    if previous.len() != slots.len() {
        *snapshot = Some(slots.to_vec());
        return;
    }

    let gained = previous
        .iter()
        .zip(slots)
        .find_map(|(before, after)| slot_gain(before, after));

    if let Some(item) = gained {
        if let Some(key) = classify_gain(&obs, item) {
            commands.trigger(SkillPracticed {
                key,
                icon: item.clone(),
            });
        }
    }

    *snapshot = Some(slots.to_vec());
}

fn slot_gain<'a>(before: &Slot, after: &'a Slot) -> Option<&'a ItemDesc> {
    let item = after.item.as_ref()?;
    match &before.item {
        Some(prev) if prev.id == item.id => (after.count > before.count).then_some(item),
        // Slot swapped to a different item; not a pickup we can attribute.
        Some(_) => None,
        None => (after.count > 0).then_some(item),
    }
}

fn classify_gain(obs: &PlayerObservation, item: &ItemDesc) -> Option<SkillKey> {
    if obs.crafting_surface_open() {
        let skill = if item.categories.armor {
            Skill::Armouring
        } else if item.is_smithed_weapon() {
            Skill::Weaponsmithing
        } else if item.is_smithed_tool() {
            Skill::Toolsmithing
        } else {
            return None;
        };
        return Some(SkillKey::new(skill, Tier::Wood, None));
    }

    if obs.holding(|held| held.categories.fishing_rod).is_some() && item.categories.fish {
        return Some(SkillKey::new(Skill::Fishing, Tier::Wood, None));
    }
    None
}
