//! Shared state of the practice engine: the per-tick host observations the
//! detectors read, the cooldown store, and the toast queue.

use {
    bevy::{platform::collections::HashMap, prelude::*},
    practice_components::{ItemDesc, SkillKey},
    std::time::Duration,
};

/// Pressed-state of the host's bound actions, written every frame before
/// the detectors run.
#[derive(Resource, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Resource, Default)]
pub struct ActionInput {
    pub attack: bool,
    pub use_item: bool,
}

/// What kind of interface the player currently has open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum SurfaceKind {
    #[default]
    None,
    CraftingLike,
    /// Modded or malformed surfaces the host could not classify.
    Unknown,
}

/// One inventory slot as observed by the host.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Default)]
pub struct Slot {
    pub item: Option<ItemDesc>,
    pub count: u32,
}

/// Per-tick view of the locally controlled player, written by the host
/// before the detection set runs.
#[derive(Resource, Debug, Clone)]
pub struct PlayerObservation {
    pub main_hand: Option<ItemDesc>,
    pub off_hand: Option<ItemDesc>,
    /// True while the player actively uses `active_item` (drawing a bow,
    /// eating, blocking).
    pub using_item: bool,
    pub active_item: Option<ItemDesc>,
    /// Entity under the crosshair, if the host resolved one.
    pub crosshair_target: Option<Entity>,
    pub eye_position: Vec3,
    pub look_direction: Vec3,
    pub open_surface: SurfaceKind,
    /// `None` when the host could not read the inventory this tick.
    pub inventory: Option<Vec<Slot>>,
}

impl Default for PlayerObservation {
    fn default() -> Self {
        Self {
            main_hand: None,
            off_hand: None,
            using_item: false,
            active_item: None,
            crosshair_target: None,
            eye_position: Vec3::ZERO,
            look_direction: Vec3::NEG_Z,
            open_surface: SurfaceKind::None,
            inventory: None,
        }
    }
}

impl PlayerObservation {
    /// Unknown surfaces degrade to "nothing crafting-like is open".
    pub fn crafting_surface_open(&self) -> bool {
        self.open_surface == SurfaceKind::CraftingLike
    }

    /// First hand holding an item matching `pred`, main hand first.
    pub fn holding(&self, pred: impl Fn(&ItemDesc) -> bool) -> Option<&ItemDesc> {
        [self.main_hand.as_ref(), self.off_hand.as_ref()]
            .into_iter()
            .flatten()
            .find(|item| pred(item))
    }
}

/// One skill's cooldown state. Entries are never removed; an expired entry
/// just stops rendering.
#[derive(Debug, Clone)]
pub struct CooldownEntry {
    pub timer: Timer,
    /// Whether the one-shot ready signal fired for the current window.
    pub notified: bool,
    /// Copy of the last item that triggered this key.
    pub icon: ItemDesc,
}

impl CooldownEntry {
    fn new(duration: Duration, icon: ItemDesc) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            notified: false,
            icon,
        }
    }

    pub fn remaining_secs(&self) -> f32 {
        self.timer.remaining_secs()
    }
}

/// Owns every cooldown. Detectors submit candidates through the
/// `SkillPracticed` event only; its observer is the sole caller of
/// [`CooldownStore::start_or_refresh`].
#[derive(Resource, Debug, Default)]
pub struct CooldownStore {
    entries: HashMap<SkillKey, CooldownEntry>,
}

impl CooldownStore {
    /// Starts a cooldown for `key`, or restarts an expired one. An
    /// already-running cooldown keeps its deadline; the icon snapshot is
    /// overwritten either way so the display tracks the latest tool.
    pub fn start_or_refresh(&mut self, key: SkillKey, icon: &ItemDesc, duration: Duration) {
        if let Some(entry) = self.entries.get_mut(&key) {
            if entry.timer.is_finished() {
                entry.timer = Timer::new(duration, TimerMode::Once);
                entry.notified = false;
            }
            entry.icon = icon.clone();
        } else {
            self.entries
                .insert(key, CooldownEntry::new(duration, icon.clone()));
        }
    }

    pub fn get(&self, key: &SkillKey) -> Option<&CooldownEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &SkillKey) -> Option<&mut CooldownEntry> {
        self.entries.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkillKey, &CooldownEntry)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&SkillKey, &mut CooldownEntry)> {
        self.entries.iter_mut()
    }

    /// Entries still counting down, in key order for stable display.
    pub fn active(&self) -> Vec<(&SkillKey, &CooldownEntry)> {
        let mut rows: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.timer.is_finished())
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A transient "skill ready" acknowledgment.
#[derive(Debug, Clone)]
pub struct Toast {
    pub key: SkillKey,
    pub timer: Timer,
}

/// Ready toasts in insertion order; the order determines stacking.
#[derive(Resource, Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, key: SkillKey, duration: Duration) {
        self.toasts.push(Toast {
            key,
            timer: Timer::new(duration, TimerMode::Once),
        });
    }

    /// Advances every toast and drops the ones past their display time.
    pub fn tick(&mut self, delta: Duration) {
        for toast in &mut self.toasts {
            toast.timer.tick(delta);
        }
        self.toasts.retain(|toast| !toast.timer.is_finished());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
