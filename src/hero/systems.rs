//! Hero domain: input, per-tick update and drawing.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::components::{Hero, HeroTick};
use crate::combat::CombatTuning;
use crate::core::{GameOutcome, GameOverEvent, GameState, Session};
use crate::maps::Levels;
use crate::movement::{MovementInput, MovementTuning};
use crate::sprites::{DrawQueue, Renderable};

pub(super) fn apply_hero_input(
    mut input: ResMut<MovementInput>,
    movement: Res<MovementTuning>,
    combat: Res<CombatTuning>,
    mut heroes: Query<&mut Hero>,
) {
    if let Ok(mut hero) = heroes.single_mut() {
        if hero.apply_input(&input, &movement, &combat) {
            debug!("bubble blown, {} in flight", hero.character.arsenal.len());
        }
    }
    input.clear_releases();
}

pub(super) fn update_hero(
    time: Res<Time>,
    levels: Res<Levels>,
    movement: Res<MovementTuning>,
    combat: Res<CombatTuning>,
    mut session: ResMut<Session>,
    mut heroes: Query<&mut Hero>,
    mut game_over: MessageWriter<GameOverEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(mut hero) = heroes.single_mut() else {
        return;
    };
    let Some(map) = levels.current_map() else {
        return;
    };

    match hero.update(map, time.delta_secs(), &movement, &combat) {
        HeroTick::Respawned { lives } => {
            info!("hero respawned, {} lives left", lives);
        }
        HeroTick::OutOfLives => {
            if session.finish(GameOutcome::Lose) {
                info!("hero out of lives on level {}", levels.current_index() + 1);
                game_over.write(GameOverEvent {
                    outcome: GameOutcome::Lose,
                });
                next_state.set(GameState::GameOver);
            }
        }
        HeroTick::Alive | HeroTick::Dying => {}
    }
}

pub(super) fn queue_hero_draws(mut queue: ResMut<DrawQueue>, heroes: Query<&Hero>) {
    for hero in &heroes {
        hero.render(&mut *queue);
    }
}
