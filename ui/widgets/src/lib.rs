use {bevy::prelude::*, practice_components::Tier};

/// Shared colors for the overlay crates.
pub struct UiTheme;

impl UiTheme {
    pub const PANEL_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.8);
    pub const CARD_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.9);
    pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.95, 0.95);
    pub const TEXT_MUTED: Color = Color::srgb(0.67, 0.67, 0.67);
    /// Crafting-table browns behind smithing icons.
    pub const SMITHING_OUTER: Color = Color::srgb(0.23, 0.13, 0.04);
    pub const SMITHING_INNER: Color = Color::srgb(0.55, 0.35, 0.17);
}

/// Swatch color standing in for an item icon of the given tier.
pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Wood => Color::srgb_u8(134, 96, 56),
        Tier::Stone => Color::srgb_u8(125, 125, 125),
        Tier::Copper => Color::srgb_u8(216, 127, 81),
        Tier::Iron => Color::srgb_u8(216, 216, 216),
        Tier::Diamond => Color::srgb_u8(108, 236, 238),
        Tier::Leather => Color::srgb_u8(197, 125, 77),
        Tier::Chainmail => Color::srgb_u8(170, 178, 189),
    }
}

/// Spawns the square icon swatch used by the HUD rows and the toasts.
/// Smithing entries get the two-tone crafting-table backdrop.
pub fn spawn_icon_swatch(parent: &mut ChildSpawnerCommands, color: Color, smithing: bool) {
    if smithing {
        parent
            .spawn((
                Node {
                    width: Val::Px(20.0),
                    height: Val::Px(20.0),
                    padding: UiRect::all(Val::Px(2.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(UiTheme::SMITHING_OUTER),
            ))
            .with_children(|backdrop| {
                backdrop
                    .spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(UiTheme::SMITHING_INNER),
                    ))
                    .with_children(|inner| {
                        inner.spawn((
                            Node {
                                width: Val::Px(10.0),
                                height: Val::Px(10.0),
                                ..default()
                            },
                            BackgroundColor(color),
                        ));
                    });
            });
    } else {
        parent.spawn((
            Node {
                width: Val::Px(16.0),
                height: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(color),
        ));
    }
}
