//! Core domain: tests for session outcome, level progression and seeding.

use bevy::prelude::*;
use rand::Rng;

use super::*;
use crate::combat::CombatTuning;
use crate::hero::{Hero, HeroSkin};
use crate::maps::fixtures::arena;
use crate::maps::{Levels, MAP_HEIGHT, SheetGeometry};
use crate::movement::{CharacterState, MovementTuning};

fn hero(state: CharacterState) -> Hero {
    let mut hero = Hero::new(
        HeroSkin::Bub,
        Vec2::new(40.0, 176.0),
        3,
        &MovementTuning::default(),
        &CombatTuning::default(),
    );
    hero.character.set_state(state);
    hero
}

// -----------------------------------------------------------------------------
// Session
// -----------------------------------------------------------------------------

#[test]
fn test_session_outcome_is_recorded_once() {
    let mut session = Session::default();
    assert!(!session.is_over());
    assert_eq!(session.outcome(), None);

    assert!(session.finish(GameOutcome::Lose));
    assert!(!session.finish(GameOutcome::Win));
    assert_eq!(session.outcome(), Some(GameOutcome::Lose));
    assert!(session.is_over());
}

#[test]
fn test_game_starts_loading() {
    assert_eq!(GameState::default(), GameState::Loading);
}

// -----------------------------------------------------------------------------
// Level progression
// -----------------------------------------------------------------------------

#[test]
fn test_level_with_enemies_or_bonuses_is_in_progress() {
    let idle = hero(CharacterState::Idle);
    assert_eq!(level_progress(&Session::default(), 1, 0, &idle, false), LevelProgress::InProgress);
    assert_eq!(level_progress(&Session::default(), 0, 2, &idle, true), LevelProgress::InProgress);
}

#[test]
fn test_empty_level_is_cleared() {
    let walking = hero(CharacterState::Walking);
    assert_eq!(level_progress(&Session::default(), 0, 0, &walking, false), LevelProgress::Cleared);
}

#[test]
fn test_clearing_the_last_level_wins() {
    let jumping = hero(CharacterState::Jumping);
    assert_eq!(level_progress(&Session::default(), 0, 0, &jumping, true), LevelProgress::Won);
}

#[test]
fn test_level_waits_for_dying_or_entering_hero() {
    let dead = hero(CharacterState::Dead);
    assert_eq!(level_progress(&Session::default(), 0, 0, &dead, true), LevelProgress::InProgress);

    let entering = hero(CharacterState::Starting);
    assert_eq!(level_progress(&Session::default(), 0, 0, &entering, false), LevelProgress::InProgress);
}

#[test]
fn test_finished_session_makes_no_progress() {
    let walking = hero(CharacterState::Walking);
    let mut session = Session::default();
    session.finish(GameOutcome::Lose);

    assert_eq!(level_progress(&session, 0, 0, &walking, true), LevelProgress::InProgress);
    assert_eq!(level_progress(&session, 0, 0, &walking, false), LevelProgress::InProgress);
}

#[test]
fn test_transition_step_scrolls_then_arrives() {
    let mut levels = Levels::new(SheetGeometry {
        map_count: 2,
        ..SheetGeometry::default()
    });
    levels.record_build(Ok(arena())).unwrap();
    levels.record_build(Ok(arena())).unwrap();
    levels.select(0);
    assert_eq!(step_transition(&mut levels), TransitionStep::Idle);

    levels.start_transition();
    let mut scrolling = 0;
    loop {
        match step_transition(&mut levels) {
            TransitionStep::Scrolling => scrolling += 1,
            TransitionStep::Arrived => break,
            TransitionStep::Idle => panic!("scroll stopped early"),
        }
        assert!(scrolling < 1000);
    }
    assert_eq!(scrolling + 1, MAP_HEIGHT as usize);
    assert_eq!(levels.current_index(), 1);
    assert_eq!(step_transition(&mut levels), TransitionStep::Idle);
}

// -----------------------------------------------------------------------------
// Randomness and events
// -----------------------------------------------------------------------------

#[test]
fn test_seeded_rng_is_reproducible() {
    let mut a = GameRng::from_seed(42);
    let mut b = GameRng::from_seed(42);
    let first: Vec<u32> = (0..16).map(|_| a.0.random_range(0..100)).collect();
    let second: Vec<u32> = (0..16).map(|_| b.0.random_range(0..100)).collect();
    assert_eq!(first, second);

    let mut c = GameRng::from_seed(43);
    let third: Vec<u32> = (0..16).map(|_| c.0.random_range(0..100)).collect();
    assert_ne!(first, third);
}

#[test]
fn test_audio_cue_event_wraps_cue() {
    assert_eq!(AudioCueEvent::new(AudioCue::Fruit).cue, AudioCue::Fruit);
}
