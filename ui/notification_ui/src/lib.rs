//! Toast-style popups at the top right acknowledging a cooldown that just
//! finished. Stacking follows the queue's insertion order; expiry is the
//! queue's own, this crate only renders.

use {
    bevy::prelude::*,
    practice_components::Tier,
    practice_resources::ToastQueue,
    states::GameState,
    system_schedule::TickSchedule,
    widgets::UiTheme,
};

const TOAST_WIDTH: f32 = 170.0;
const TOAST_GAP: f32 = 4.0;
const TOAST_RIGHT: f32 = 10.0;
const TOAST_TOP: f32 = 10.0;

pub struct ToastUiPlugin;

impl Plugin for ToastUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_toast_root).add_systems(
            Update,
            update_toasts
                .in_set(TickSchedule::Render)
                .run_if(in_state(GameState::Running)),
        );
    }
}

/// Marker for the toast stack container.
#[derive(Component)]
struct ToastUiRoot;

/// Display snapshot of one toast.
#[derive(Clone, PartialEq)]
struct ToastRow {
    title: String,
    subtitle: String,
    tier: Tier,
    smithing: bool,
}

fn setup_toast_root(mut commands: Commands) {
    commands.spawn((
        ToastUiRoot,
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(TOAST_RIGHT),
            top: Val::Px(TOAST_TOP),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(TOAST_GAP),
            ..default()
        },
        Name::new("ToastStack"),
    ));
}

fn build_rows(queue: &ToastQueue) -> Vec<ToastRow> {
    queue
        .iter()
        .map(|toast| ToastRow {
            title: format!("{} READY", toast.key.skill.label().to_uppercase()),
            subtitle: format!("({})", toast.key.tier.label()),
            tier: toast.key.tier,
            smithing: toast.key.skill.is_smithing(),
        })
        .collect()
}

fn update_toasts(
    mut commands: Commands,
    queue: Res<ToastQueue>,
    root: Query<Entity, With<ToastUiRoot>>,
    children: Query<&Children>,
    mut last_rows: Local<Vec<ToastRow>>,
) {
    let Ok(root) = root.single() else {
        return;
    };

    let rows = build_rows(&queue);
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
            spawn_toast(parent, row);
        }
    });
}

fn spawn_toast(parent: &mut ChildSpawnerCommands, row: &ToastRow) {
    parent
        .spawn((
            Node {
                width: Val::Px(TOAST_WIDTH),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(4.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(UiTheme::PANEL_BG),
            BorderColor::all(UiTheme::CARD_BORDER),
        ))
        .with_children(|toast| {
            widgets::spawn_icon_swatch(toast, widgets::tier_color(row.tier), row.smithing);
            toast
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    ..default()
                })
                .with_children(|text_column| {
                    text_column.spawn((
                        Text::new(row.title.clone()),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(UiTheme::TEXT_PRIMARY),
                    ));
                    text_column.spawn((
                        Text::new(row.subtitle.clone()),
                        TextFont {
                            font_size: 10.0,
                            ..default()
                        },
                        TextColor(UiTheme::TEXT_MUTED),
                    ));
                });
        });
}
