//! Combat domain: hero bubbles against enemies and hero contact with enemies.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::resources::CombatTuning;
use crate::core::{AudioCue, AudioCueEvent};
use crate::enemies::{Enemy, SpawnOrder, in_spawn_order};
use crate::hero::Hero;

/// Outcome of the hero touching an enemy this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    /// A captured enemy was burst; carries its position in the scan.
    Popped(usize),
    HeroKilled,
}

/// Let each floating bubble of the hero trap the first enemy in reach.
/// Returns how many enemies were captured.
pub fn capture_with_bubbles(hero: &mut Hero, enemies: &mut [&mut Enemy], tuning: &CombatTuning) -> usize {
    let mut captured = 0;
    for bubble in hero.character.arsenal.iter_mut() {
        if !bubble.is_capturable() {
            continue;
        }
        for enemy in enemies.iter_mut() {
            if enemy.try_capture(bubble, tuning) {
                debug!("bubble captured {:?}", enemy.kind);
                bubble.mark_discard();
                captured += 1;
                break;
            }
        }
    }
    captured
}

/// Scan enemies in order; the first one touching the hero decides the
/// outcome.
pub fn resolve_hero_contact(hero: &mut Hero, enemies: &mut [&mut Enemy], tuning: &CombatTuning) -> Contact {
    if hero.is_dead() || hero.character.is_starting() {
        return Contact::None;
    }
    let hero_body = hero.character.body;

    for (index, enemy) in enemies.iter_mut().enumerate() {
        if enemy.is_dead() || enemy.character.is_starting() {
            continue;
        }
        let reach = enemy.character.body.size.x * tuning.collision_ratio;
        if hero_body.distance(&enemy.character.body) > reach {
            continue;
        }
        if enemy.is_captured() {
            enemy.pop(hero_body.velocity.x, tuning);
            return Contact::Popped(index);
        }
        if hero.kill() {
            return Contact::HeroKilled;
        }
        return Contact::None;
    }
    Contact::None
}

pub(super) fn capture_enemies(
    tuning: Res<CombatTuning>,
    mut heroes: Query<&mut Hero>,
    mut enemies: Query<(&SpawnOrder, &mut Enemy)>,
) {
    let Ok(mut hero) = heroes.single_mut() else {
        return;
    };
    let mut enemies: Vec<Mut<Enemy>> = in_spawn_order(&mut enemies);
    let mut refs: Vec<&mut Enemy> = enemies.iter_mut().map(|enemy| &mut **enemy).collect();
    capture_with_bubbles(&mut hero, &mut refs, &tuning);
}

pub(super) fn hero_enemy_contact(
    tuning: Res<CombatTuning>,
    mut heroes: Query<&mut Hero>,
    mut enemies: Query<(&SpawnOrder, &mut Enemy)>,
    mut cues: MessageWriter<AudioCueEvent>,
) {
    let Ok(mut hero) = heroes.single_mut() else {
        return;
    };
    let mut enemies: Vec<Mut<Enemy>> = in_spawn_order(&mut enemies);
    let mut refs: Vec<&mut Enemy> = enemies.iter_mut().map(|enemy| &mut **enemy).collect();
    match resolve_hero_contact(&mut hero, &mut refs, &tuning) {
        Contact::Popped(index) => {
            debug!("popped {:?}", refs[index].kind);
            cues.write(AudioCueEvent::new(AudioCue::PopBubble));
        }
        Contact::HeroKilled => info!("hero caught, {} lives left", hero.lives),
        Contact::None => {}
    }
}
