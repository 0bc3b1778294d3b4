//! Core domain: session flow systems and setup.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::bonus::Bonus;
use crate::combat::CombatTuning;
use crate::content::SessionConfig;
use crate::core::events::{AudioCueEvent, GameOverEvent};
use crate::core::resources::{GameOutcome, GameRng, Session};
use crate::core::state::GameState;
use crate::enemies::{Enemy, EnemyRoster, SpawnSequence, populate_level};
use crate::hero::Hero;
use crate::maps::{LEVEL_SHEET_PATH, Levels};
use crate::movement::MovementTuning;

const CAMERA_SCALE: f32 = 0.25;

/// What the end of a tick means for the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelProgress {
    InProgress,
    Cleared,
    Won,
}

/// A level is done once no enemy or bonus is left and the hero is up and
/// running. Clearing the last level wins the session. A session that already
/// has an outcome makes no further progress.
pub fn level_progress(
    session: &Session,
    enemies: usize,
    bonuses: usize,
    hero: &Hero,
    is_last: bool,
) -> LevelProgress {
    if session.is_over() {
        return LevelProgress::InProgress;
    }
    if enemies > 0 || bonuses > 0 || hero.is_dead() || hero.character.is_starting() {
        return LevelProgress::InProgress;
    }
    if is_last {
        LevelProgress::Won
    } else {
        LevelProgress::Cleared
    }
}

/// One tick of the scroll between levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// No scroll is running.
    Idle,
    Scrolling,
    Arrived,
}

pub fn step_transition(levels: &mut Levels) -> TransitionStep {
    if !levels.is_transitioning() {
        return TransitionStep::Idle;
    }
    if levels.advance_transition() {
        TransitionStep::Arrived
    } else {
        TransitionStep::Scrolling
    }
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::from_scale(Vec3::splat(CAMERA_SCALE))));
}

pub(crate) fn seed_rng(config: Res<SessionConfig>, mut rng: ResMut<GameRng>) {
    if let Some(seed) = config.seed {
        *rng = GameRng::from_seed(seed);
        info!("Session seeded with {}", seed);
    }
}

/// Once every level is built, drop the hero and the first wave into the
/// starting level.
pub(crate) fn finish_loading(
    mut commands: Commands,
    mut levels: ResMut<Levels>,
    config: Res<SessionConfig>,
    movement: Res<MovementTuning>,
    combat: Res<CombatTuning>,
    roster: Res<EnemyRoster>,
    mut sequence: ResMut<SpawnSequence>,
    mut rng: ResMut<GameRng>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !levels.is_built() {
        return;
    }
    if levels.is_empty() {
        warn!("No playable levels in {}", LEVEL_SHEET_PATH);
        next_state.set(GameState::GameOver);
        return;
    }

    levels.select(config.starting_level);
    let index = levels.current_index();
    let Some(map) = levels.current_map_mut() else {
        return;
    };

    let hero = Hero::entering(config.hero_skin, map, config.starting_lives, &movement, &combat);
    commands.spawn(hero);
    let wave = populate_level(&mut commands, map, &roster, &mut sequence, 0, &mut rng.0, &movement);

    info!(
        "Starting on level {} with {} lives and {} enemies",
        index + 1,
        config.starting_lives,
        wave
    );
    next_state.set(GameState::Playing);
}

pub(crate) fn check_level_complete(
    mut levels: ResMut<Levels>,
    enemies: Query<(), With<Enemy>>,
    bonuses: Query<(), With<Bonus>>,
    mut heroes: Query<&mut Hero>,
    mut session: ResMut<Session>,
    mut game_over: MessageWriter<GameOverEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(mut hero) = heroes.single_mut() else {
        return;
    };

    let progress = level_progress(
        &session,
        enemies.iter().count(),
        bonuses.iter().count(),
        &hero,
        levels.is_last(),
    );
    match progress {
        LevelProgress::InProgress => {}
        LevelProgress::Won => {
            if session.finish(GameOutcome::Win) {
                info!("Final level cleared with {} lives left", hero.lives);
                game_over.write(GameOverEvent {
                    outcome: GameOutcome::Win,
                });
                next_state.set(GameState::GameOver);
            }
        }
        LevelProgress::Cleared => {
            info!("Level {} cleared", levels.current_index() + 1);
            let position = hero.character.body.position;
            hero.begin_level(position);
            levels.start_transition();
            next_state.set(GameState::LevelTransition);
        }
    }
}

/// Scroll toward the next level; once it is in view, send the hero to its
/// start point and bring in a new wave.
pub(crate) fn advance_transition(
    mut commands: Commands,
    mut levels: ResMut<Levels>,
    movement: Res<MovementTuning>,
    roster: Res<EnemyRoster>,
    mut sequence: ResMut<SpawnSequence>,
    mut rng: ResMut<GameRng>,
    mut heroes: Query<&mut Hero>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    match step_transition(&mut levels) {
        TransitionStep::Idle => {
            warn!("No level scroll in progress; resuming play");
            next_state.set(GameState::Playing);
            return;
        }
        TransitionStep::Scrolling => return,
        TransitionStep::Arrived => {}
    }
    let index = levels.current_index();
    let Some(map) = levels.current_map_mut() else {
        return;
    };

    if let Ok(mut hero) = heroes.single_mut() {
        let start = hero.skin.start_point(map);
        hero.begin_level(start);
    }
    let wave = populate_level(&mut commands, map, &roster, &mut sequence, 0, &mut rng.0, &movement);
    info!("Entering level {} with {} enemies", index + 1, wave);
    next_state.set(GameState::Playing);
}

pub(crate) fn log_audio_cues(mut cues: MessageReader<AudioCueEvent>) {
    for event in cues.read() {
        debug!("Audio cue: {:?}", event.cue);
    }
}

pub(crate) fn announce_game_over(session: Res<Session>, levels: Res<Levels>) {
    match session.outcome() {
        Some(GameOutcome::Win) => info!("Game over: every level cleared"),
        Some(GameOutcome::Lose) => {
            info!("Game over: lost on level {}", levels.current_index() + 1)
        }
        None => info!("Game over"),
    }
}
