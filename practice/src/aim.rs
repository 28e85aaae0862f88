//! Nearest-in-cone target selection. Deliberately more forgiving than a
//! raycast: arcing a shot slightly above a target still counts as aiming
//! at it, at the cost of sometimes picking a neighbor a strict ray would
//! not hit.

use bevy::prelude::*;

/// Candidates closer than this are degenerate (the shooter itself).
const MIN_TARGET_DISTANCE: f32 = 1e-3;

/// Picks the nearest candidate whose center lies within `max_angle_deg`
/// of `look` and within `max_distance` of `eye`. `None` when nothing
/// qualifies.
pub fn nearest_in_cone(
    eye: Vec3,
    look: Vec3,
    max_distance: f32,
    max_angle_deg: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Option<Entity> {
    let look = look.normalize_or_zero();
    if look == Vec3::ZERO {
        return None;
    }
    let cos_limit = max_angle_deg.to_radians().cos();

    let mut best: Option<(f32, Entity)> = None;
    for (entity, center) in candidates {
        let to_target = center - eye;
        let distance = to_target.length();
        if distance < MIN_TARGET_DISTANCE || distance > max_distance {
            continue;
        }
        if (to_target / distance).dot(look) < cos_limit {
            continue;
        }
        if best.map_or(true, |(best_distance, _)| distance < best_distance) {
            best = Some((distance, entity));
        }
    }
    best.map(|(_, entity)| entity)
}
