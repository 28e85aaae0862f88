//! Identifier and capability classification. Everything here is pure:
//! unknown input means `None`, never an error.

use crate::{BlockDesc, ItemDesc, Skill, Tier};

/// Resolves an equipment tier from an item identifier by substring.
///
/// Diamond outranks any co-occurring material word; after that the first
/// match in declaration order wins. Bows and crossbows carry no material
/// prefix and fall back to wood.
pub fn tier_of(item_id: &str) -> Option<Tier> {
    let id = item_id.to_ascii_lowercase();

    if id.contains("diamond") {
        return Some(Tier::Diamond);
    }
    if id.contains("wooden") {
        return Some(Tier::Wood);
    }
    if id.contains("stone") {
        return Some(Tier::Stone);
    }
    // golden assets are the copper retexture
    if id.contains("golden") || id.contains("copper") {
        return Some(Tier::Copper);
    }
    if id.contains("iron") {
        return Some(Tier::Iron);
    }
    if id.contains("leather") {
        return Some(Tier::Leather);
    }
    if id.contains("chainmail") {
        return Some(Tier::Chainmail);
    }
    // "bow" also matches "crossbow"
    if id.contains("bow") {
        return Some(Tier::Wood);
    }
    None
}

/// Which harvest skill a break with `item` on `block` practices, if any.
/// An item without a resolvable tier never classifies.
pub fn harvest_skill_of(item: &ItemDesc, block: &BlockDesc) -> Option<Skill> {
    tier_of(&item.id)?;

    let held = item.categories;
    let broken = block.tags;

    if held.axe && broken.log {
        return Some(Skill::Forestry);
    }
    if held.pickaxe && broken.pickaxe_mineable {
        return Some(Skill::Mining);
    }
    if held.shovel && broken.shovel_mineable {
        return Some(Skill::Digging);
    }
    if held.hoe && broken.crop {
        return Some(Skill::Husbandry);
    }
    None
}
