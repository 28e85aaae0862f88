use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    serde::{Deserialize, Serialize},
};

pub struct PracticeAssetsPlugin;

impl Plugin for PracticeAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<PracticeTuning>::new(&["tuning.ron"]))
            .init_resource::<PracticeTuning>();
    }
}

/// Detection and display tuning, loaded from `assets/practice.tuning.ron`.
/// The compiled defaults apply until the asset arrives, and stay in place
/// if it never does.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeTuning {
    /// Seconds one practiced skill stays on cooldown.
    pub cooldown_secs: f32,
    /// Seconds a ready toast stays on screen.
    pub toast_secs: f32,
    /// Bow releases after fewer draw ticks count as accidental taps.
    pub min_draw_ticks: u32,
    /// Aim-cone reach in world units.
    pub aim_max_distance: f32,
    /// Aim-cone half-angle in degrees.
    pub aim_max_angle_deg: f32,
}

impl Default for PracticeTuning {
    fn default() -> Self {
        Self {
            cooldown_secs: 60.0,
            toast_secs: 2.5,
            min_draw_ticks: 5,
            aim_max_distance: 32.0,
            aim_max_angle_deg: 12.0,
        }
    }
}

/// Keeps the tuning asset alive while it loads.
#[derive(Resource)]
pub struct TuningHandle(pub Handle<PracticeTuning>);
