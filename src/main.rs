mod bonus;
mod combat;
mod content;
mod core;
mod enemies;
mod hero;
mod maps;
mod movement;
mod sprites;

use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Bubble Arcade".to_string(),
                        resolution: (1024, 768).into(),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            maps::MapsPlugin,
            movement::MovementPlugin,
            hero::HeroPlugin,
            enemies::EnemiesPlugin,
            combat::CombatPlugin,
            bonus::BonusPlugin,
            sprites::SpritesPlugin,
        ))
        .run();
}
