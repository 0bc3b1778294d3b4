//! Animation clips and playback.
//!
//! Every visible object owns an [`AnimationPlayer`] keyed by its own clip
//! enum. Frames carry their source rect in the sprite sheet and how long
//! they stay on screen.
//!
//! Playback time accumulates as a [`Duration`] so a clip ends on the exact
//! tick its frame delays add up to.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use bevy::prelude::*;

/// Key type naming the clips of one kind of object.
pub trait ClipKey: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T: Copy + Eq + Hash + Debug + Send + Sync + 'static> ClipKey for T {}

/// Seconds as a [`Duration`]; negative or non-finite input counts as zero.
pub fn secs(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Source rect in the sheet, in pixels.
    pub source: Rect,
    /// How long the frame stays up.
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub frames: Vec<Frame>,
    pub looping: bool,
}

impl Clip {
    /// `count` frames laid out left to right starting at (x, y), each shown
    /// for `delay` seconds.
    pub fn strip(
        count: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        delay: f32,
        looping: bool,
    ) -> Self {
        let delay = secs(delay);
        let frames = (0..count)
            .map(|i| Frame {
                source: Rect::new(
                    x + i as f32 * width,
                    y,
                    x + (i + 1) as f32 * width,
                    y + height,
                ),
                delay,
            })
            .collect();
        Self { frames, looping }
    }

    /// Total time to play every frame once.
    pub fn duration(&self) -> Duration {
        self.frames.iter().map(|frame| frame.delay).sum()
    }
}

/// Playback cursor over a set of named clips.
#[derive(Debug, Clone)]
pub struct AnimationPlayer<K: ClipKey> {
    clips: Vec<(K, Clip)>,
    current: K,
    frame: usize,
    elapsed: Duration,
    finished: bool,
}

impl<K: ClipKey> AnimationPlayer<K> {
    pub fn new(initial: K) -> Self {
        Self {
            clips: Vec::new(),
            current: initial,
            frame: 0,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Register a clip, replacing any clip already stored under `key`.
    pub fn with_clip(mut self, key: K, clip: Clip) -> Self {
        self.clips.retain(|(existing, _)| *existing != key);
        self.clips.push((key, clip));
        self
    }

    pub fn current(&self) -> K {
        self.current
    }

    pub fn is(&self, key: K) -> bool {
        self.current == key
    }

    pub fn clip(&self) -> Option<&Clip> {
        self.clips
            .iter()
            .find(|(key, _)| *key == self.current)
            .map(|(_, clip)| clip)
    }

    /// Switch clips; a no-op when `key` is already playing.
    pub fn set_clip(&mut self, key: K) {
        if self.current != key {
            self.restart(key);
        }
    }

    /// Switch clips and rewind even when `key` is already playing.
    pub fn restart(&mut self, key: K) {
        self.current = key;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.elapsed = Duration::ZERO;
        self.finished = false;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn force_finish(&mut self) {
        self.finished = true;
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    /// Time spent on the current frame.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn advance(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        let Some((frame_count, looping)) = self.clip().map(|c| (c.frames.len(), c.looping)) else {
            return;
        };
        if frame_count == 0 {
            self.finished = true;
            return;
        }

        self.elapsed += secs(dt);
        loop {
            let delay = self.frame_delay(self.frame);
            if self.elapsed < delay {
                break;
            }
            if self.frame + 1 < frame_count {
                self.elapsed -= delay;
                self.frame += 1;
            } else if looping {
                if delay.is_zero() {
                    break;
                }
                self.elapsed -= delay;
                self.frame = 0;
            } else {
                self.finished = true;
                break;
            }
        }
    }

    fn frame_delay(&self, index: usize) -> Duration {
        self.clip()
            .and_then(|clip| clip.frames.get(index))
            .map(|frame| frame.delay)
            .unwrap_or_default()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.clip().and_then(|clip| clip.frames.get(self.frame))
    }

    /// Size of the current frame; zero when the clip is missing.
    pub fn frame_size(&self) -> Vec2 {
        self.current_frame()
            .map(|frame| frame.source.size())
            .unwrap_or(Vec2::ZERO)
    }
}
