use bevy::prelude::*;

/// Per-frame ordering contract: host observations land first, cooldown
/// expiry notifications fire before any new detection runs, and rendering
/// sees the finished state of the frame.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSchedule {
    Observe,
    Notify,
    Detect,
    Render,
}
