//! Bonus domain: pickup, expiry and drawing.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::components::{Bonus, BonusTally};
use crate::combat::CombatTuning;
use crate::content::SessionConfig;
use crate::core::{AudioCue, AudioCueEvent};
use crate::hero::Hero;
use crate::sprites::{DrawQueue, Renderable};

/// What became of a bonus this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusOutcome {
    Kept,
    Expired,
    Collected { extra_life: bool },
}

/// Pickup before expiry: a bonus touched on its last tick still counts.
pub fn settle_bonus(
    bonus: &mut Bonus,
    hero: &mut Hero,
    tally: &mut BonusTally,
    dt: f32,
    collision_ratio: f32,
    per_life: u32,
) -> BonusOutcome {
    let hero_active = !hero.is_dead() && !hero.character.is_starting();
    if hero_active && bonus.can_collect(&hero.character.body, collision_ratio) {
        let extra_life = tally.record(per_life);
        if extra_life {
            hero.add_life();
        }
        return BonusOutcome::Collected { extra_life };
    }
    if bonus.tick(dt) {
        return BonusOutcome::Expired;
    }
    BonusOutcome::Kept
}

pub(super) fn update_bonuses(
    mut commands: Commands,
    time: Res<Time>,
    combat: Res<CombatTuning>,
    config: Res<SessionConfig>,
    mut tally: ResMut<BonusTally>,
    mut heroes: Query<&mut Hero>,
    mut bonuses: Query<(Entity, &mut Bonus)>,
    mut cues: MessageWriter<AudioCueEvent>,
) {
    let Ok(mut hero) = heroes.single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    for (entity, mut bonus) in &mut bonuses {
        match settle_bonus(
            &mut bonus,
            &mut hero,
            &mut tally,
            dt,
            combat.collision_ratio,
            config.bonuses_per_life,
        ) {
            BonusOutcome::Collected { extra_life } => {
                commands.entity(entity).despawn();
                if extra_life {
                    info!("extra life after {} bonuses, {} lives", tally.collected, hero.lives);
                    cues.write(AudioCueEvent::new(AudioCue::ExtraLife));
                } else {
                    cues.write(AudioCueEvent::new(AudioCue::Fruit));
                }
            }
            BonusOutcome::Expired => {
                debug!("{:?} expired", bonus.kind);
                commands.entity(entity).despawn();
            }
            BonusOutcome::Kept => {}
        }
    }
}

pub(super) fn queue_bonus_draws(mut queue: ResMut<DrawQueue>, bonuses: Query<&Bonus>) {
    for bonus in &bonuses {
        bonus.render(&mut *queue);
    }
}
