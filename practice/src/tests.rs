use {
    crate::systems::{self, BOW_GROUP, CROSSBOW_GROUP},
    bevy::prelude::*,
    practice_assets::PracticeTuning,
    practice_components::{
        BlockDesc, BlockTags, Dead, ItemCategories, ItemDesc, Living, Skill, SkillKey, Tier,
    },
    practice_events::{BlockBroken, SkillPracticed},
    practice_resources::{
        ActionInput, CooldownStore, PlayerObservation, Slot, SurfaceKind, ToastQueue,
    },
    std::time::Duration,
};

/// Spy output: one spawned per detected practice.
#[derive(Component)]
struct Practiced {
    key: SkillKey,
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<ActionInput>()
        .init_resource::<PlayerObservation>()
        .init_resource::<CooldownStore>()
        .init_resource::<ToastQueue>()
        .insert_resource(PracticeTuning::default())
        .add_observer(systems::apply_practice)
        .add_observer(
            |trigger: On<SkillPracticed>, mut commands: Commands| {
                commands.spawn(Practiced {
                    key: trigger.event().key.clone(),
                });
            },
        );
    app
}

fn practiced_keys(app: &mut App) -> Vec<SkillKey> {
    let mut query = app.world_mut().query::<&Practiced>();
    query.iter(app.world()).map(|p| p.key.clone()).collect()
}

fn spawn_target(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Living, Transform::from_translation(position)))
        .id()
}

fn with_category(id: &str, set: impl FnOnce(&mut ItemCategories)) -> ItemDesc {
    let mut categories = ItemCategories::default();
    set(&mut categories);
    ItemDesc::new(id, categories)
}

fn sword(id: &str) -> ItemDesc {
    with_category(id, |c| c.sword = true)
}

fn pickaxe(id: &str) -> ItemDesc {
    with_category(id, |c| c.pickaxe = true)
}

fn bow() -> ItemDesc {
    with_category("minecraft:bow", |c| c.bow = true)
}

fn crossbow() -> ItemDesc {
    with_category("minecraft:crossbow", |c| {
        c.bow = true;
        c.crossbow = true;
    })
}

fn fishing_rod() -> ItemDesc {
    with_category("minecraft:fishing_rod", |c| c.fishing_rod = true)
}

fn fish() -> ItemDesc {
    with_category("minecraft:cod", |c| c.fish = true)
}

fn set_attack(app: &mut App, pressed: bool) {
    app.world_mut().resource_mut::<ActionInput>().attack = pressed;
}

/// One full press-and-release of the use action across two updates.
fn click_use(app: &mut App) {
    app.world_mut().resource_mut::<ActionInput>().use_item = true;
    app.update();
    app.world_mut().resource_mut::<ActionInput>().use_item = false;
    app.update();
}

// ============================================================================
// Melee
// ============================================================================

#[test]
fn melee_fires_once_per_rising_edge() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_melee);

    let target = spawn_target(&mut app, Vec3::new(2.0, 0.0, 0.0));
    {
        let mut obs = app.world_mut().resource_mut::<PlayerObservation>();
        obs.main_hand = Some(sword("minecraft:stone_sword"));
        obs.crosshair_target = Some(target);
    }

    set_attack(&mut app, true);
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(
        practiced_keys(&mut app).len(),
        1,
        "held attack input must only trigger on the edge"
    );

    set_attack(&mut app, false);
    app.update();
    set_attack(&mut app, true);
    app.update();

    let keys = practiced_keys(&mut app);
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0], SkillKey::new(Skill::MeleeCombat, Tier::Stone, None));
}

#[test]
fn melee_requires_a_living_crosshair_target() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_melee);

    let scenery = app.world_mut().spawn(Transform::default()).id();
    let corpse = app.world_mut().spawn((Living, Dead, Transform::default())).id();

    {
        let mut obs = app.world_mut().resource_mut::<PlayerObservation>();
        obs.main_hand = Some(sword("minecraft:iron_sword"));
        obs.crosshair_target = None;
    }
    set_attack(&mut app, true);
    app.update();
    set_attack(&mut app, false);
    app.update();

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .crosshair_target = Some(scenery);
    set_attack(&mut app, true);
    app.update();
    set_attack(&mut app, false);
    app.update();

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .crosshair_target = Some(corpse);
    set_attack(&mut app, true);
    app.update();

    assert!(practiced_keys(&mut app).is_empty());
}

#[test]
fn melee_requires_a_weapon_and_a_resolvable_tier() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_melee);

    let target = spawn_target(&mut app, Vec3::new(2.0, 0.0, 0.0));
    {
        let mut obs = app.world_mut().resource_mut::<PlayerObservation>();
        obs.main_hand = Some(fishing_rod());
        obs.crosshair_target = Some(target);
    }
    set_attack(&mut app, true);
    app.update();
    set_attack(&mut app, false);
    app.update();

    // Sword-like but no known material word.
    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .main_hand = Some(sword("minecraft:netherite_sword"));
    set_attack(&mut app, true);
    app.update();

    assert!(practiced_keys(&mut app).is_empty());
}

// ============================================================================
// Bow
// ============================================================================

fn aim_down_x(app: &mut App) {
    let mut obs = app.world_mut().resource_mut::<PlayerObservation>();
    obs.eye_position = Vec3::ZERO;
    obs.look_direction = Vec3::X;
}

#[test]
fn bow_shot_after_full_draw() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_bow);

    spawn_target(&mut app, Vec3::new(8.0, 0.0, 0.0));
    aim_down_x(&mut app);
    {
        let mut obs = app.world_mut().resource_mut::<PlayerObservation>();
        obs.using_item = true;
        obs.active_item = Some(bow());
    }
    for _ in 0..7 {
        app.update();
    }
    app.world_mut().resource_mut::<PlayerObservation>().using_item = false;
    app.update();

    let keys = practiced_keys(&mut app);
    assert_eq!(
        keys,
        vec![SkillKey::new(Skill::RangedCombat, Tier::Wood, Some(BOW_GROUP))]
    );
}

#[test]
fn bow_tap_is_not_a_shot() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_bow);

    spawn_target(&mut app, Vec3::new(8.0, 0.0, 0.0));
    aim_down_x(&mut app);
    {
        let mut obs = app.world_mut().resource_mut::<PlayerObservation>();
        obs.using_item = true;
        obs.active_item = Some(bow());
    }
    app.update();
    app.update();
    app.world_mut().resource_mut::<PlayerObservation>().using_item = false;
    app.update();

    assert!(practiced_keys(&mut app).is_empty());
}

#[test]
fn bow_needs_a_target_in_the_cone() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_bow);

    // Target behind the shooter.
    spawn_target(&mut app, Vec3::new(-8.0, 0.0, 0.0));
    aim_down_x(&mut app);
    {
        let mut obs = app.world_mut().resource_mut::<PlayerObservation>();
        obs.using_item = true;
        obs.active_item = Some(bow());
    }
    for _ in 0..7 {
        app.update();
    }
    app.world_mut().resource_mut::<PlayerObservation>().using_item = false;
    app.update();

    assert!(practiced_keys(&mut app).is_empty());
}

// ============================================================================
// Crossbow
// ============================================================================

#[test]
fn crossbow_first_click_primes_second_fires() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_crossbow);

    spawn_target(&mut app, Vec3::new(6.0, 0.0, 0.0));
    aim_down_x(&mut app);
    app.world_mut().resource_mut::<PlayerObservation>().main_hand = Some(crossbow());

    click_use(&mut app);
    assert!(
        practiced_keys(&mut app).is_empty(),
        "priming click grants nothing"
    );

    click_use(&mut app);
    let keys = practiced_keys(&mut app);
    assert_eq!(
        keys,
        vec![SkillKey::new(
            Skill::RangedCombat,
            Tier::Wood,
            Some(CROSSBOW_GROUP)
        )]
    );

    // A missed shot still clears the charge: prime, fire into nothing,
    // then a full prime-and-fire cycle lands exactly one more.
    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .look_direction = Vec3::NEG_X;
    click_use(&mut app); // primes
    click_use(&mut app); // fires at nothing
    assert_eq!(practiced_keys(&mut app).len(), 1);

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .look_direction = Vec3::X;
    click_use(&mut app); // primes
    click_use(&mut app); // fires
    assert_eq!(practiced_keys(&mut app).len(), 2);
}

#[test]
fn switching_weapons_abandons_the_charge() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_crossbow);

    spawn_target(&mut app, Vec3::new(6.0, 0.0, 0.0));
    aim_down_x(&mut app);
    app.world_mut().resource_mut::<PlayerObservation>().main_hand = Some(crossbow());

    click_use(&mut app); // primes

    // Swap to a sword for a tick, then back.
    app.world_mut().resource_mut::<PlayerObservation>().main_hand =
        Some(sword("minecraft:iron_sword"));
    app.update();
    app.world_mut().resource_mut::<PlayerObservation>().main_hand = Some(crossbow());

    click_use(&mut app);
    assert!(
        practiced_keys(&mut app).is_empty(),
        "first click after re-equip must prime again, not fire"
    );

    click_use(&mut app);
    assert_eq!(practiced_keys(&mut app).len(), 1);
}

// ============================================================================
// Inventory gains
// ============================================================================

fn empty_slots(count: usize) -> Vec<Slot> {
    vec![Slot::default(); count]
}

fn set_inventory(app: &mut App, slots: Option<Vec<Slot>>) {
    app.world_mut().resource_mut::<PlayerObservation>().inventory = slots;
}

#[test]
fn crafted_tools_refresh_one_collapsed_cooldown() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_inventory_gain);

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .open_surface = SurfaceKind::CraftingLike;
    set_inventory(&mut app, Some(empty_slots(2)));
    app.update(); // first observation only snapshots

    let mut slots = empty_slots(2);
    slots[0] = Slot {
        item: Some(pickaxe("minecraft:diamond_pickaxe")),
        count: 1,
    };
    set_inventory(&mut app, Some(slots.clone()));
    app.update();

    let expected = SkillKey::new(Skill::Toolsmithing, Tier::Wood, None);
    assert_eq!(practiced_keys(&mut app), vec![expected.clone()]);

    slots[1] = Slot {
        item: Some(pickaxe("minecraft:wooden_pickaxe")),
        count: 1,
    };
    set_inventory(&mut app, Some(slots));
    app.update();

    let keys = practiced_keys(&mut app);
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[1], expected);
    assert_eq!(
        app.world().resource::<CooldownStore>().len(),
        1,
        "both crafts share the collapsed toolsmithing cooldown"
    );
}

#[test]
fn smithing_branches_on_item_kind() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_inventory_gain);

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .open_surface = SurfaceKind::CraftingLike;
    set_inventory(&mut app, Some(empty_slots(3)));
    app.update();

    let mut slots = empty_slots(3);
    slots[0] = Slot {
        item: Some(with_category("minecraft:iron_chestplate", |c| c.armor = true)),
        count: 1,
    };
    set_inventory(&mut app, Some(slots.clone()));
    app.update();

    slots[1] = Slot {
        item: Some(sword("minecraft:iron_sword")),
        count: 1,
    };
    set_inventory(&mut app, Some(slots));
    app.update();

    let keys = practiced_keys(&mut app);
    assert_eq!(
        keys,
        vec![
            SkillKey::new(Skill::Armouring, Tier::Wood, None),
            SkillKey::new(Skill::Weaponsmithing, Tier::Wood, None),
        ]
    );
}

#[test]
fn a_burst_of_gains_grants_only_the_first() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_inventory_gain);

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .open_surface = SurfaceKind::CraftingLike;
    set_inventory(&mut app, Some(empty_slots(2)));
    app.update();

    let mut slots = empty_slots(2);
    slots[0] = Slot {
        item: Some(pickaxe("minecraft:iron_pickaxe")),
        count: 1,
    };
    slots[1] = Slot {
        item: Some(with_category("minecraft:iron_chestplate", |c| c.armor = true)),
        count: 1,
    };
    set_inventory(&mut app, Some(slots));
    app.update();

    assert_eq!(
        practiced_keys(&mut app),
        vec![SkillKey::new(Skill::Toolsmithing, Tier::Wood, None)]
    );
}

#[test]
fn fishing_needs_a_rod_in_hand_and_no_crafting_surface() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_inventory_gain);

    set_inventory(&mut app, Some(empty_slots(1)));
    app.update();

    // Gain a fish without holding a rod: nothing.
    let caught = vec![Slot {
        item: Some(fish()),
        count: 1,
    }];
    set_inventory(&mut app, Some(caught.clone()));
    app.update();
    assert!(practiced_keys(&mut app).is_empty());

    // Rod in the off hand, another fish lands on the stack.
    app.world_mut().resource_mut::<PlayerObservation>().off_hand = Some(fishing_rod());
    let mut more = caught;
    more[0].count = 2;
    set_inventory(&mut app, Some(more));
    app.update();

    assert_eq!(
        practiced_keys(&mut app),
        vec![SkillKey::new(Skill::Fishing, Tier::Wood, None)]
    );
}

#[test]
fn unreadable_inventory_resets_the_snapshot() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_inventory_gain);

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .open_surface = SurfaceKind::CraftingLike;
    set_inventory(&mut app, Some(empty_slots(1)));
    app.update();

    set_inventory(&mut app, None);
    app.update();

    // Looks like a gain against the stale snapshot, but the reset means
    // this tick only re-captures.
    let slots = vec![Slot {
        item: Some(pickaxe("minecraft:iron_pickaxe")),
        count: 1,
    }];
    set_inventory(&mut app, Some(slots.clone()));
    app.update();
    assert!(practiced_keys(&mut app).is_empty());

    let mut more = slots;
    more[0].count = 2;
    set_inventory(&mut app, Some(more));
    app.update();
    assert_eq!(practiced_keys(&mut app).len(), 1);
}

#[test]
fn a_resized_inventory_only_recaptures() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_inventory_gain);

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .open_surface = SurfaceKind::CraftingLike;
    set_inventory(&mut app, Some(empty_slots(1)));
    app.update();

    let mut slots = empty_slots(2);
    slots[0] = Slot {
        item: Some(pickaxe("minecraft:iron_pickaxe")),
        count: 1,
    };
    set_inventory(&mut app, Some(slots));
    app.update();

    assert!(practiced_keys(&mut app).is_empty());
}

#[test]
fn unknown_surfaces_degrade_to_no_crafting() {
    let mut app = test_app();
    app.add_systems(Update, systems::detect_inventory_gain);

    app.world_mut()
        .resource_mut::<PlayerObservation>()
        .open_surface = SurfaceKind::Unknown;
    set_inventory(&mut app, Some(empty_slots(1)));
    app.update();

    let slots = vec![Slot {
        item: Some(pickaxe("minecraft:iron_pickaxe")),
        count: 1,
    }];
    set_inventory(&mut app, Some(slots));
    app.update();

    assert!(practiced_keys(&mut app).is_empty());
}

// ============================================================================
// Block breaks and the full cooldown cycle
// ============================================================================

#[test]
fn block_break_starts_a_cooldown_and_notifies_once() {
    let mut app = test_app();
    app.add_observer(systems::on_block_broken);
    app.add_systems(
        Update,
        (systems::expire_and_notify, systems::expire_toasts).chain(),
    );

    app.world_mut().trigger(BlockBroken {
        held: with_category("minecraft:wooden_axe", |c| c.axe = true),
        block: BlockDesc {
            id: "minecraft:oak_log".to_string(),
            tags: BlockTags {
                log: true,
                ..Default::default()
            },
        },
    });
    app.update();

    let key = SkillKey::new(Skill::Forestry, Tier::Wood, None);
    {
        let store = app.world().resource::<CooldownStore>();
        let entry = store.get(&key).expect("breaking a log starts forestry");
        assert!(!entry.timer.is_finished());
        assert!((entry.remaining_secs() - 60.0).abs() < 0.5);
    }
    assert!(app.world().resource::<ToastQueue>().is_empty());

    // A minute later the ready signal fires exactly once.
    app.world_mut()
        .resource_mut::<CooldownStore>()
        .get_mut(&key)
        .unwrap()
        .timer
        .tick(Duration::from_secs(61));
    app.update();

    assert_eq!(app.world().resource::<ToastQueue>().len(), 1);
    assert!(app.world().resource::<CooldownStore>().get(&key).unwrap().notified);

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(
        app.world().resource::<ToastQueue>().len(),
        1,
        "ready notification is one-shot"
    );
}

#[test]
fn unmatched_block_breaks_are_ignored() {
    let mut app = test_app();
    app.add_observer(systems::on_block_broken);

    // Sword on a log: no harvest rule.
    app.world_mut().trigger(BlockBroken {
        held: sword("minecraft:iron_sword"),
        block: BlockDesc {
            id: "minecraft:oak_log".to_string(),
            tags: BlockTags {
                log: true,
                ..Default::default()
            },
        },
    });
    app.update();

    assert!(app.world().resource::<CooldownStore>().is_empty());
}

#[test]
fn repeated_practice_does_not_extend_a_running_cooldown() {
    let mut app = test_app();
    app.add_observer(systems::on_block_broken);

    let broken = BlockDesc {
        id: "minecraft:iron_ore".to_string(),
        tags: BlockTags {
            pickaxe_mineable: true,
            ..Default::default()
        },
    };
    app.world_mut().trigger(BlockBroken {
        held: pickaxe("minecraft:iron_pickaxe"),
        block: broken.clone(),
    });
    app.update();

    let key = SkillKey::new(Skill::Mining, Tier::Iron, None);
    app.world_mut()
        .resource_mut::<CooldownStore>()
        .get_mut(&key)
        .unwrap()
        .timer
        .tick(Duration::from_secs(20));

    app.world_mut().trigger(BlockBroken {
        held: pickaxe("minecraft:iron_pickaxe"),
        block: broken,
    });
    app.update();

    let store = app.world().resource::<CooldownStore>();
    let entry = store.get(&key).unwrap();
    assert!(
        (entry.remaining_secs() - 40.0).abs() < 0.5,
        "a second trigger mid-cooldown must not push the deadline"
    );
}
