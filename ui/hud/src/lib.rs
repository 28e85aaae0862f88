//! Left-side overlay listing every cooldown still counting down: tier
//! swatch, skill/tier label, remaining seconds. Read-only over the store.

use {
    bevy::prelude::*,
    practice_components::Tier,
    practice_resources::CooldownStore,
    states::GameState,
    system_schedule::TickSchedule,
    widgets::UiTheme,
};

const HUD_LEFT: f32 = 10.0;
const HUD_TOP: f32 = 10.0;
const ROW_GAP: f32 = 4.0;

pub struct CooldownHudPlugin;

impl Plugin for CooldownHudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud_root).add_systems(
            Update,
            update_cooldown_rows
                .in_set(TickSchedule::Render)
                .run_if(in_state(GameState::Running)),
        );
    }
}

/// Marker for the HUD column container.
#[derive(Component)]
struct CooldownHudRoot;

/// Display snapshot of one row; the UI is only rebuilt when these change.
#[derive(Clone, PartialEq)]
struct CooldownRow {
    label: String,
    seconds: u64,
    tier: Tier,
    smithing: bool,
}

fn setup_hud_root(mut commands: Commands) {
    commands.spawn((
        CooldownHudRoot,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_LEFT),
            top: Val::Px(HUD_TOP),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(ROW_GAP),
            ..default()
        },
        Name::new("CooldownHud"),
    ));
}

fn build_rows(store: &CooldownStore) -> Vec<CooldownRow> {
    store
        .active()
        .into_iter()
        .map(|(key, entry)| CooldownRow {
            label: format!("{} ({})", key.skill.label(), key.tier.label()),
            seconds: entry.remaining_secs().ceil() as u64,
            tier: key.tier,
            smithing: key.skill.is_smithing(),
        })
        .collect()
}

fn update_cooldown_rows(
    mut commands: Commands,
    store: Res<CooldownStore>,
    root: Query<Entity, With<CooldownHudRoot>>,
    children: Query<&Children>,
    mut last_rows: Local<Vec<CooldownRow>>,
) {
    let Ok(root) = root.single() else {
        return;
    };

    let rows = build_rows(&store);
    if *last_rows == rows {
        return;
    }
    *last_rows = rows.clone();

    if let Ok(existing) = children.get(root) {
        for child in existing.iter() {
            commands.entity(child).despawn();
        }
    }
    commands.entity(root).with_children(|parent| {
        for row in &rows {
            spawn_row(parent, row);
        }
    });
}

fn spawn_row(parent: &mut ChildSpawnerCommands, row: &CooldownRow) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(UiTheme::PANEL_BG),
        ))
        .with_children(|row_node| {
            widgets::spawn_icon_swatch(row_node, widgets::tier_color(row.tier), row.smithing);
            row_node.spawn((
                Text::new(row.label.clone()),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(UiTheme::TEXT_PRIMARY),
            ));
            row_node.spawn((
                Text::new(format!("{}s", row.seconds)),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(UiTheme::TEXT_MUTED),
            ));
        });
}
