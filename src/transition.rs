use crate::constants::{FADE_COMPLETE, FADE_STEP};

/// A cross-fade from `from` to `to`, advanced one step per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    pub from: usize,
    pub to: usize,
    progress: u32,
}

impl Fade {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to, progress: 0 }
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Advance one frame. Returns `true` once the fade has run past the end.
    pub fn step(&mut self) -> bool {
        self.progress += FADE_STEP;
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.progress > FADE_COMPLETE
    }

    /// Opacity of the incoming slide.
    pub fn incoming_alpha(&self) -> f32 {
        (self.progress.min(FADE_COMPLETE) as f32) / FADE_COMPLETE as f32
    }

    /// Opacity of the outgoing slide.
    pub fn outgoing_alpha(&self) -> f32 {
        1.0 - self.incoming_alpha()
    }
}
