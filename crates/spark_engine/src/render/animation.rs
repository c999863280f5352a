//! Frame-timeline sprite animation
//!
//! Plays a sequence of sprite-sheet frames with per-frame durations.
//! The timer resets on every frame advance, so a long stall skips at most
//! one frame rather than fast-forwarding the timeline.

use super::{SpriteParams, TextureHandle};
use crate::foundation::math::Rect;

/// One frame of an animation timeline
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    /// Source sub-rectangle in the sprite sheet
    pub source: Rect,
    /// How long the frame stays on screen, in seconds
    pub duration: f32,
}

/// A playing animation over a sprite-sheet texture
#[derive(Debug, Clone)]
pub struct SpriteAnimation {
    texture: TextureHandle,
    frames: Vec<AnimationFrame>,
    current: usize,
    waited: f32,
    speed: f32,
    looping: bool,
    playing: bool,
    finished: bool,
}

impl SpriteAnimation {
    /// Create an animation over `frames`; starts playing at frame 0.
    ///
    /// `frames` must be non-empty.
    pub fn new(texture: TextureHandle, frames: Vec<AnimationFrame>, looping: bool) -> Self {
        debug_assert!(!frames.is_empty(), "animation needs at least one frame");
        Self {
            texture,
            frames,
            current: 0,
            waited: 0.0,
            speed: 1.0,
            looping,
            playing: true,
            finished: false,
        }
    }

    /// Playback rate multiplier (1.0 = real time)
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Advance the timeline by `elapsed` seconds
    pub fn update(&mut self, elapsed: f32) {
        if !self.playing || self.frames.is_empty() {
            return;
        }

        self.waited += elapsed * self.speed;
        if self.waited < self.frames[self.current].duration {
            return;
        }

        self.waited = 0.0;
        self.current += 1;
        if self.current == self.frames.len() {
            if self.looping {
                self.current = 0;
            } else {
                // Stop on the last valid frame.
                self.current -= 1;
                self.playing = false;
                self.finished = true;
            }
        }
    }

    /// The frame currently on screen
    pub fn current_frame(&self) -> &AnimationFrame {
        &self.frames[self.current]
    }

    /// Index of the frame currently on screen
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Texture the frames index into
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Whether a non-looping animation has run off its last frame
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the timeline is advancing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Pause the timeline in place
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Resume a paused timeline
    pub fn play(&mut self) {
        if !self.finished {
            self.playing = true;
        }
    }

    /// Rewind to frame 0 and start playing
    pub fn restart(&mut self) {
        self.current = 0;
        self.waited = 0.0;
        self.playing = true;
        self.finished = false;
    }

    /// Fill in the source rectangle of `params` with the current frame
    pub fn apply_to(&self, params: SpriteParams) -> SpriteParams {
        params.with_source(self.current_frame().source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point2, Vec2};

    fn frames(n: usize, duration: f32) -> Vec<AnimationFrame> {
        (0..n)
            .map(|i| AnimationFrame {
                source: Rect::new(Point2::new(i as f32 * 16.0, 0.0), Vec2::new(16.0, 16.0)),
                duration,
            })
            .collect()
    }

    #[test]
    fn test_frames_advance_on_duration() {
        let mut anim = SpriteAnimation::new(TextureHandle::new(1), frames(3, 0.1), false);
        assert_eq!(anim.current_index(), 0);
        anim.update(0.05);
        assert_eq!(anim.current_index(), 0);
        anim.update(0.05);
        assert_eq!(anim.current_index(), 1);
    }

    #[test]
    fn test_non_looping_stops_on_last_frame() {
        let mut anim = SpriteAnimation::new(TextureHandle::new(1), frames(2, 0.1), false);
        anim.update(0.1);
        anim.update(0.1);
        assert_eq!(anim.current_index(), 1);
        assert!(anim.is_finished());
        assert!(!anim.is_playing());

        // Further updates do not move the timeline.
        anim.update(1.0);
        assert_eq!(anim.current_index(), 1);
    }

    #[test]
    fn test_looping_wraps_to_first_frame() {
        let mut anim = SpriteAnimation::new(TextureHandle::new(1), frames(2, 0.1), true);
        anim.update(0.1);
        anim.update(0.1);
        assert_eq!(anim.current_index(), 0);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_timer_resets_instead_of_fast_forwarding() {
        let mut anim = SpriteAnimation::new(TextureHandle::new(1), frames(4, 0.1), true);
        // A huge delta advances a single frame.
        anim.update(5.0);
        assert_eq!(anim.current_index(), 1);
    }

    #[test]
    fn test_restart() {
        let mut anim = SpriteAnimation::new(TextureHandle::new(1), frames(2, 0.1), false);
        anim.update(0.1);
        anim.update(0.1);
        assert!(anim.is_finished());
        anim.restart();
        assert_eq!(anim.current_index(), 0);
        assert!(anim.is_playing());
    }
}
