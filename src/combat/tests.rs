//! Combat domain: tests for projectile lifecycles and collision dispatch.

use std::time::Duration;

use bevy::prelude::*;

use super::*;
use crate::enemies::{Enemy, EnemyKind, SpawnOrder, in_spawn_order};
use crate::hero::{Hero, HeroClip, HeroSkin};
use crate::maps::fixtures::arena;
use crate::movement::{Body, CharacterState, Facing, MovementTuning};

fn sixty_hertz() -> f32 {
    Duration::from_secs_f64(1.0 / 60.0).as_secs_f32()
}

fn ready_hero(position: Vec2) -> Hero {
    let mut hero = Hero::new(
        HeroSkin::Bub,
        position,
        3,
        &MovementTuning::default(),
        &CombatTuning::default(),
    );
    hero.character.set_state(CharacterState::Idle);
    hero.character.animation.set_clip(HeroClip::Idle);
    hero.character.sync_size();
    hero
}

fn ready_enemy(kind: EnemyKind, position: Vec2) -> Enemy {
    let mut enemy = Enemy::new(kind, position, &MovementTuning::default());
    enemy.character.body.position = position;
    enemy.character.set_state(CharacterState::Idle);
    enemy
}

/// A bubble already floating in its capturable phase at `position`.
fn floating_bubble(position: Vec2) -> Projectile {
    let map = arena();
    let mut bubble = Projectile::bubble(position, Facing::Right, &CombatTuning::default());
    bubble.update(&map, 1.0, None);
    bubble.body.position = position;
    assert_eq!(bubble.phase(), Some(BubblePhase::Middle));
    bubble
}

// -----------------------------------------------------------------------------
// Bubble lifecycle
// -----------------------------------------------------------------------------

#[test]
fn test_bubble_reaches_middle_when_begin_finishes() {
    let map = arena();
    let tuning = CombatTuning::default();
    let mut bubble = Projectile::bubble(Vec2::new(100.0, 100.0), Facing::Right, &tuning);
    assert_eq!(bubble.body.velocity, Vec2::new(tuning.bubble_speed, 0.0));

    for _ in 0..3 {
        bubble.update(&map, 0.25, None);
        assert_eq!(bubble.phase(), Some(BubblePhase::Begin));
        assert!(!bubble.is_capturable());
    }

    bubble.update(&map, 0.25, None);
    assert_eq!(bubble.phase(), Some(BubblePhase::Middle));
    assert_eq!(bubble.body.velocity.x, 0.0);
    assert_eq!(bubble.body.velocity.y, -tuning.bubble_rise_speed);
    assert!(bubble.is_capturable());
}

#[test]
fn test_bubble_reaches_middle_on_wall_contact() {
    let map = arena();
    let mut bubble = Projectile::bubble(Vec2::new(231.0, 100.0), Facing::Right, &CombatTuning::default());

    bubble.update(&map, 0.01, None);
    assert_eq!(bubble.phase(), Some(BubblePhase::Begin));

    bubble.update(&map, 0.01, None);
    assert_eq!(bubble.phase(), Some(BubblePhase::Middle));
    assert_eq!(bubble.body.velocity.x, 0.0);
}

#[test]
fn test_bubble_ends_then_discards() {
    let map = arena();
    let mut bubble = floating_bubble(Vec2::new(100.0, 100.0));

    bubble.update(&map, 4.0, None);
    assert_eq!(bubble.phase(), Some(BubblePhase::End));
    assert_eq!(bubble.body.velocity, Vec2::ZERO);
    assert!(!bubble.is_capturable());
    assert!(!bubble.can_discard());

    bubble.update(&map, 1.0, None);
    assert!(bubble.can_discard());
}

#[test]
fn test_bubble_floats_for_exact_ticks_at_sixty_hertz() {
    let map = arena();
    let mut bubble = floating_bubble(Vec2::new(100.0, 100.0));

    // 3.25 s of float is 195 ticks.
    for _ in 0..194 {
        bubble.update(&map, sixty_hertz(), None);
        assert_eq!(bubble.phase(), Some(BubblePhase::Middle));
    }
    bubble.update(&map, sixty_hertz(), None);
    assert_eq!(bubble.phase(), Some(BubblePhase::End));
}

#[test]
fn test_mark_discard_is_terminal() {
    let map = arena();
    let mut bubble = floating_bubble(Vec2::new(100.0, 100.0));
    bubble.mark_discard();
    assert!(bubble.can_discard());
    assert!(!bubble.is_capturable());

    bubble.mark_discard();
    bubble.update(&map, 0.25, None);
    assert!(bubble.can_discard());
}

#[test]
fn test_floating_bubble_is_a_platform_for_a_falling_parent() {
    let bubble = floating_bubble(Vec2::new(100.0, 100.0));
    let parent = Body::new(Vec2::new(102.0, 95.0), Vec2::splat(16.0));

    assert_eq!(bubble.landing_for(&parent, CharacterState::Falling), Some(84.0));
    assert_eq!(bubble.landing_for(&parent, CharacterState::Attacking), Some(84.0));
    assert_eq!(bubble.landing_for(&parent, CharacterState::Idle), None);
    assert_eq!(bubble.landing_for(&parent, CharacterState::Jumping), None);

    let beside = Body::new(Vec2::new(120.0, 95.0), Vec2::splat(16.0));
    assert_eq!(bubble.landing_for(&beside, CharacterState::Falling), None);
}

#[test]
fn test_hero_lands_on_own_bubble() {
    let map = arena();
    let mut hero = ready_hero(Vec2::new(100.0, 95.0));
    hero.character.set_state(CharacterState::Falling);
    hero.character.arsenal.fire(floating_bubble(Vec2::new(100.0, 100.0)));

    hero.character.update_projectiles(&map, 0.01, None);
    assert_eq!(hero.character.body.position.y, 84.0);
    assert_eq!(hero.character.state(), CharacterState::Idle);
}

// -----------------------------------------------------------------------------
// Enemy shots
// -----------------------------------------------------------------------------

#[test]
fn test_shot_leaving_the_map_is_discarded() {
    let map = arena();
    let mut shot = Projectile::shot(ProjectileKind::Fire, Vec2::new(245.0, 100.0), Facing::Right, false, 2.25);
    assert!(!shot.update(&map, 0.01, None));
    assert!(shot.can_discard());
}

#[test]
fn test_shot_expires_after_its_lifetime() {
    let map = arena();
    let mut shot = Projectile::shot(ProjectileKind::SpikeBall, Vec2::new(100.0, 100.0), Facing::Left, true, 2.25);
    shot.update(&map, 1.0, None);
    assert!(!shot.can_discard());
    shot.update(&map, 2.0, None);
    assert!(shot.can_discard());
}

#[test]
fn test_shot_lifetime_is_exact_ticks_at_sixty_hertz() {
    let map = arena();
    let mut shot = Projectile::shot(ProjectileKind::Fire, Vec2::new(100.0, 100.0), Facing::Right, false, 0.0);

    // 3 s of flight is 180 ticks.
    for _ in 0..179 {
        shot.update(&map, sixty_hertz(), None);
        assert!(!shot.can_discard());
    }
    shot.update(&map, sixty_hertz(), None);
    assert!(shot.can_discard());
}

#[test]
fn test_shot_hits_vulnerable_hero_once() {
    let map = arena();
    let position = Vec2::new(100.0, 100.0);
    let mut target = HeroTarget {
        body: Body::new(position, Vec2::splat(16.0)),
        vulnerable: true,
    };
    let mut first = Projectile::shot(ProjectileKind::Fire, position, Facing::Right, false, 0.0);
    let mut second = Projectile::shot(ProjectileKind::Fire, position, Facing::Right, false, 0.0);

    assert!(first.update(&map, 0.01, Some(&mut target)));
    assert!(first.can_discard());
    assert!(!target.vulnerable);

    assert!(!second.update(&map, 0.01, Some(&mut target)));
    assert!(!second.can_discard());
}

#[test]
fn test_shot_ignores_invulnerable_hero() {
    let map = arena();
    let position = Vec2::new(100.0, 100.0);
    let mut target = HeroTarget {
        body: Body::new(position, Vec2::splat(16.0)),
        vulnerable: false,
    };
    let mut shot = Projectile::shot(ProjectileKind::Fire, position, Facing::Right, false, 0.0);
    assert!(!shot.update(&map, 0.01, Some(&mut target)));
    assert!(!shot.can_discard());
}

#[test]
fn test_laser_drops_straight_down() {
    let shot = Projectile::shot(ProjectileKind::Laser, Vec2::new(100.0, 50.0), Facing::Left, false, 2.25);
    assert_eq!(shot.body.velocity, Vec2::new(0.0, 2.25));
    assert_eq!(shot.kind(), ProjectileKind::Laser);
    assert_eq!(shot.phase(), None);
    assert!(!shot.can_stand());
}

#[test]
fn test_fire_interval_shortens_when_angry() {
    let tuning = CombatTuning::default();
    assert_eq!(tuning.fire_interval(false), 2.0);
    assert_eq!(tuning.fire_interval(true), 1.0);
    assert_eq!(tuning.shot_speed(0.75), 2.25);
}

// -----------------------------------------------------------------------------
// Arsenal
// -----------------------------------------------------------------------------

#[test]
fn test_arsenal_respects_limit_and_purges() {
    let mut arsenal = Arsenal::new(2);
    let position = Vec2::new(100.0, 100.0);
    assert!(arsenal.fire(floating_bubble(position)));
    assert!(arsenal.fire(floating_bubble(position)));
    assert!(!arsenal.fire(floating_bubble(position)));
    assert_eq!(arsenal.len(), 2);

    if let Some(first) = arsenal.iter_mut().next() {
        first.mark_discard();
    }
    arsenal.purge_discarded();
    assert_eq!(arsenal.len(), 1);
    assert!(arsenal.has_room());
}

// -----------------------------------------------------------------------------
// Collision dispatch
// -----------------------------------------------------------------------------

#[test]
fn test_bubble_captures_only_the_first_enemy_in_reach() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(40.0, 176.0));
    hero.character.arsenal.fire(floating_bubble(Vec2::new(100.0, 100.0)));
    let mut first = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(104.0, 100.0));
    let mut second = ready_enemy(EnemyKind::Coiley, Vec2::new(96.0, 100.0));

    let captured = capture_with_bubbles(&mut hero, &mut [&mut first, &mut second], &tuning);
    assert_eq!(captured, 1);
    assert!(first.is_captured());
    assert!(!second.is_captured());
    assert!(hero.character.arsenal.iter().all(|bubble| bubble.can_discard()));
}

#[test]
fn test_earlier_spawn_wins_the_capture_whatever_the_storage_order() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(40.0, 176.0));
    hero.character.arsenal.fire(floating_bubble(Vec2::new(100.0, 100.0)));
    let mut stored = vec![
        (SpawnOrder(5), ready_enemy(EnemyKind::BubbleBuster, Vec2::new(104.0, 100.0))),
        (SpawnOrder(2), ready_enemy(EnemyKind::Coiley, Vec2::new(96.0, 100.0))),
    ];

    let mut refs: Vec<&mut Enemy> = in_spawn_order(stored.iter_mut().map(|(order, enemy)| (&*order, enemy)));
    assert_eq!(capture_with_bubbles(&mut hero, &mut refs, &tuning), 1);

    assert!(!stored[0].1.is_captured());
    assert!(stored[1].1.is_captured());
}

#[test]
fn test_bubble_in_begin_phase_captures_nothing() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(40.0, 176.0));
    hero.character
        .arsenal
        .fire(Projectile::bubble(Vec2::new(100.0, 100.0), Facing::Right, &tuning));
    let mut enemy = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(100.0, 100.0));

    assert_eq!(capture_with_bubbles(&mut hero, &mut [&mut enemy], &tuning), 0);
    assert!(!enemy.is_captured());
}

#[test]
fn test_bubble_out_of_reach_captures_nothing() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(40.0, 176.0));
    hero.character.arsenal.fire(floating_bubble(Vec2::new(100.0, 100.0)));
    // Reach is 18 * 0.75 = 13.5 px.
    let mut enemy = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(114.0, 100.0));

    assert_eq!(capture_with_bubbles(&mut hero, &mut [&mut enemy], &tuning), 0);
}

#[test]
fn test_hero_pops_captured_enemy() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(100.0, 100.0));
    hero.character.set_state(CharacterState::Walking);
    hero.character.body.velocity.x = 1.0;
    let mut enemy = ready_enemy(EnemyKind::Stoner, Vec2::new(105.0, 100.0));
    enemy.character.arsenal.fire(Projectile::shot(
        ProjectileKind::Fire,
        Vec2::new(60.0, 100.0),
        Facing::Left,
        false,
        2.25,
    ));
    assert!(enemy.capture());

    let contact = resolve_hero_contact(&mut hero, &mut [&mut enemy], &tuning);
    assert_eq!(contact, Contact::Popped(0));
    assert!(enemy.is_dead());
    assert!(!enemy.is_captured());
    assert!(enemy.character.arsenal.is_empty());
    assert!(enemy.character.body.velocity.x > 0.0);
    assert!(enemy.character.body.velocity.y < 0.0);
    assert!(!hero.is_dead());
}

#[test]
fn test_hero_dies_touching_free_enemy() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(100.0, 100.0));
    hero.character.body.velocity.x = 1.0;
    let mut enemy = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(105.0, 100.0));

    assert_eq!(resolve_hero_contact(&mut hero, &mut [&mut enemy], &tuning), Contact::HeroKilled);
    assert!(hero.is_dead());
    assert_eq!(hero.character.body.velocity, Vec2::ZERO);
}

#[test]
fn test_invincible_hero_survives_contact() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(100.0, 100.0));
    hero.grant_invincibility(tuning.invincibility);
    let mut enemy = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(100.0, 100.0));

    assert_eq!(resolve_hero_contact(&mut hero, &mut [&mut enemy], &tuning), Contact::None);
    assert!(!hero.is_dead());
}

#[test]
fn test_contact_skips_starting_and_dead() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(100.0, 100.0));
    let mut entering = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(100.0, 100.0));
    entering.character.begin_start(Vec2::new(100.0, 120.0));
    let mut dead = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(100.0, 100.0));
    dead.character.set_state(CharacterState::Dead);

    assert_eq!(
        resolve_hero_contact(&mut hero, &mut [&mut entering, &mut dead], &tuning),
        Contact::None
    );

    hero.character.begin_start(Vec2::new(40.0, 176.0));
    let mut free = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(100.0, 100.0));
    assert_eq!(resolve_hero_contact(&mut hero, &mut [&mut free], &tuning), Contact::None);
}

#[test]
fn test_first_contact_ends_the_scan() {
    let tuning = CombatTuning::default();
    let mut hero = ready_hero(Vec2::new(100.0, 100.0));
    hero.character.body.velocity.x = -1.0;
    let mut first = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(100.0, 100.0));
    let mut second = ready_enemy(EnemyKind::BubbleBuster, Vec2::new(100.0, 100.0));
    first.capture();
    second.capture();

    let contact = resolve_hero_contact(&mut hero, &mut [&mut first, &mut second], &tuning);
    assert_eq!(contact, Contact::Popped(0));
    assert!(first.is_dead());
    assert!(first.character.body.velocity.x < 0.0);
    assert!(second.is_captured());
}
