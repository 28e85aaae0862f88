//! Value types shared by the practice detectors and the overlay crates.

pub mod classify;

use bevy::prelude::*;

pub struct PracticeComponentsPlugin;

impl Plugin for PracticeComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Skill>()
            .register_type::<Tier>()
            .register_type::<SkillKey>()
            .register_type::<ItemCategories>()
            .register_type::<ItemDesc>()
            .register_type::<BlockTags>()
            .register_type::<BlockDesc>()
            .register_type::<Living>()
            .register_type::<Dead>();
    }
}

/// Trackable player activity category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Default,
)]
#[reflect(Default)]
pub enum Skill {
    #[default]
    MeleeCombat,
    Digging,
    Forestry,
    Husbandry,
    Mining,
    RangedCombat,
    Toolsmithing,
    Weaponsmithing,
    Armouring,
    Fishing,
}

impl Skill {
    /// Smithing skills share one cooldown regardless of the crafted tier.
    pub fn is_smithing(self) -> bool {
        matches!(
            self,
            Skill::Toolsmithing | Skill::Weaponsmithing | Skill::Armouring
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Skill::MeleeCombat => "Melee Combat",
            Skill::Digging => "Digging",
            Skill::Forestry => "Forestry",
            Skill::Husbandry => "Husbandry",
            Skill::Mining => "Mining",
            Skill::RangedCombat => "Ranged Combat",
            Skill::Toolsmithing => "Toolsmithing",
            Skill::Weaponsmithing => "Weaponsmithing",
            Skill::Armouring => "Armouring",
            Skill::Fishing => "Fishing",
        }
    }
}

/// Equipment grade derived from an item identifier. Copper doubles as the
/// golden tier, which it retextures.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Default,
)]
#[reflect(Default)]
pub enum Tier {
    #[default]
    Wood,
    Stone,
    Copper,
    Iron,
    Diamond,
    Leather,
    Chainmail,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Wood => "wood",
            Tier::Stone => "stone",
            Tier::Copper => "copper",
            Tier::Iron => "iron",
            Tier::Diamond => "diamond",
            Tier::Leather => "leather",
            Tier::Chainmail => "chainmail",
        }
    }
}

/// Identifies one independent cooldown. `tool_group` splits modalities
/// that land on the same skill and tier but must cool down on their own,
/// like bows versus crossbows.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Default,
)]
#[reflect(Default)]
pub struct SkillKey {
    pub skill: Skill,
    pub tier: Tier,
    pub tool_group: Option<String>,
}

impl SkillKey {
    /// Smithing tiers collapse to wood here so no call site can create a
    /// second cooldown for the same smithing skill.
    pub fn new(skill: Skill, tier: Tier, tool_group: Option<&str>) -> Self {
        let tier = if skill.is_smithing() { Tier::Wood } else { tier };
        Self {
            skill,
            tier,
            tool_group: tool_group.map(str::to_owned),
        }
    }
}

/// Capability flags the host resolves for a held or gained item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub struct ItemCategories {
    pub axe: bool,
    pub pickaxe: bool,
    pub shovel: bool,
    pub hoe: bool,
    pub sword: bool,
    pub bow: bool,
    pub crossbow: bool,
    pub fishing_rod: bool,
    pub armor: bool,
    pub fish: bool,
}

/// Minimal host-agnostic description of an item stack.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Default)]
pub struct ItemDesc {
    pub id: String,
    pub categories: ItemCategories,
}

impl ItemDesc {
    pub fn new(id: impl Into<String>, categories: ItemCategories) -> Self {
        Self {
            id: id.into(),
            categories,
        }
    }

    /// Swings that count as melee practice.
    pub fn is_melee_weapon(&self) -> bool {
        self.categories.sword || self.categories.axe
    }

    /// Crafted results that count as weaponsmithing.
    pub fn is_smithed_weapon(&self) -> bool {
        self.categories.sword || self.categories.bow || self.categories.crossbow
    }

    /// Crafted results that count as toolsmithing.
    pub fn is_smithed_tool(&self) -> bool {
        self.categories.pickaxe
            || self.categories.axe
            || self.categories.shovel
            || self.categories.hoe
    }
}

/// Tags of a block broken by the local player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub struct BlockTags {
    pub log: bool,
    pub pickaxe_mineable: bool,
    pub shovel_mineable: bool,
    pub crop: bool,
}

/// Minimal description of a broken block.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Default)]
pub struct BlockDesc {
    pub id: String,
    pub tags: BlockTags,
}

/// Marker: entity counts as a creature for aim checks.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Living;

/// Marker: creature died and no longer counts as a target.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Dead;
