//! Playback: replay a resolved swap as timed frames.
//!
//! Frame sequence:
//! - reverted swap: `Swap` (the swapped grid), then back to the live grid
//! - resolved swap: `Swap`, then per cascade step a `Clear` frame (matched cells
//!   emptied and highlighted) and a `Fall` frame (grid after collapse/refill)
//!
//! Playback never mutates the session; the session already holds the final
//! state. Skipping playback entirely yields the same end state.

use crate::core::{Grid, MatchSet, SwapResult};
use crate::types::AnimationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Swap,
    Clear,
    Fall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,
    pub grid: Grid,
    /// Cells to highlight (matched tiles on `Clear` frames).
    pub highlight: MatchSet,
    pub duration_ms: u32,
    /// Score shown while this frame is on screen.
    pub score: u32,
}

#[derive(Debug, Clone)]
pub struct Playback {
    frames: Vec<Frame>,
    index: usize,
    elapsed_ms: u32,
}

impl Playback {
    /// Build frames for `result`. `score_before` is the session score before the
    /// swap was requested.
    ///
    /// Returns None for ignored swaps: there is nothing to show.
    pub fn from_result(
        result: &SwapResult,
        anim: &AnimationConfig,
        score_before: u32,
    ) -> Option<Self> {
        let mut frames = Vec::new();

        match result {
            SwapResult::Ignored(_) => return None,
            SwapResult::Reverted { swapped, .. } => {
                frames.push(Frame {
                    kind: FrameKind::Swap,
                    grid: swapped.clone(),
                    highlight: MatchSet::new(),
                    duration_ms: anim.swap_ms,
                    score: score_before,
                });
            }
            SwapResult::Resolved(cascade) => {
                let rows = cascade.swapped.rows();
                frames.push(Frame {
                    kind: FrameKind::Swap,
                    grid: cascade.swapped.clone(),
                    highlight: MatchSet::new(),
                    duration_ms: anim.swap_ms,
                    score: score_before,
                });

                let mut score = score_before;
                for step in &cascade.steps {
                    score = score.saturating_add(step.score.total);
                    frames.push(Frame {
                        kind: FrameKind::Clear,
                        grid: step.cleared.clone(),
                        highlight: step.matches.clone(),
                        duration_ms: anim.pop_ms,
                        score,
                    });
                    frames.push(Frame {
                        kind: FrameKind::Fall,
                        grid: step.settled.clone(),
                        highlight: MatchSet::new(),
                        duration_ms: anim.fall_ms(rows),
                        score,
                    });
                }
            }
        }

        Some(Self {
            frames,
            index: 0,
            elapsed_ms: 0,
        })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame on screen, or None once playback is finished.
    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.frames.len()
    }

    /// Advance the clock. Returns true when the visible frame changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.is_finished() {
            return false;
        }

        let start = self.index;
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);

        while let Some(frame) = self.frames.get(self.index) {
            if self.elapsed_ms < frame.duration_ms {
                break;
            }
            self.elapsed_ms -= frame.duration_ms;
            self.index += 1;
        }
        if self.is_finished() {
            self.elapsed_ms = 0;
        }

        self.index != start
    }
}
