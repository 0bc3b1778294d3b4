//! Core domain: messages for audio cues and the end of a session.

use bevy::ecs::message::Message;

use super::resources::GameOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    PopBubble,
    EnemyFire,
    Fruit,
    ExtraLife,
}

/// Request to play a sound; the simulation never plays audio itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioCueEvent {
    pub cue: AudioCue,
}

impl AudioCueEvent {
    pub fn new(cue: AudioCue) -> Self {
        Self { cue }
    }
}

impl Message for AudioCueEvent {}

/// Fired once when the session is won or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverEvent {
    pub outcome: GameOutcome,
}

impl Message for GameOverEvent {}
