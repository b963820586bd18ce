//! Session module - the cascade controller
//!
//! Owns the board session state (grid, score, moves remaining, phase) for one
//! level and is its only writer. `request_swap` is the sole mutating entry point
//! during play: it validates the swap, runs the full detect → score → clear →
//! collapse/refill cascade to quiescence, and returns every intermediate grid so
//! a presentation layer can replay the cascade at its own pace.

use crate::error::{validate_level, ConfigError};
use crate::generator::generate;
use crate::gravity::{clear_matches, collapse_and_refill};
use crate::grid::Grid;
use crate::matcher::{find_runs, has_match, MatchSet, Run};
use crate::rng::SimpleRng;
use crate::scoring::{score_with_rules, ScoreResult};
use crate::snapshot::SessionSnapshot;
use crate::types::{Coord, LevelConfig, Rules};

/// How a level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Fail,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Fail => "fail",
        }
    }
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    /// A validated swap is being resolved. Only observable from inside
    /// `request_swap`.
    Resolving,
    Ended(Outcome),
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Resolving => "resolving",
            Phase::Ended(Outcome::Win) => "win",
            Phase::Ended(Outcome::Fail) => "fail",
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Phase::Ended(_))
    }
}

/// Why a swap request was dropped without touching the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The controller was resolving or the level has ended.
    NotIdle,
    OutOfBounds,
    NotAdjacent,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::NotIdle => "not_idle",
            IgnoreReason::OutOfBounds => "out_of_bounds",
            IgnoreReason::NotAdjacent => "not_adjacent",
        }
    }
}

/// One detect → score → clear → collapse/refill iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    pub runs: Vec<Run>,
    pub matches: MatchSet,
    pub score: ScoreResult,
    /// Grid with the matched cells emptied.
    pub cleared: Grid,
    /// Grid after collapse and refill.
    pub settled: Grid,
}

/// A fully resolved, move-charging swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    pub from: Coord,
    pub to: Coord,
    /// Grid right after the swap, before anything cleared.
    pub swapped: Grid,
    pub steps: Vec<CascadeStep>,
    pub score_gained: u32,
    /// Phase after end conditions were evaluated.
    pub phase: Phase,
}

/// Result of [`Session::request_swap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapResult {
    /// Invalid request; nothing changed.
    Ignored(IgnoreReason),
    /// The swap produced no match and was undone. No move charged.
    Reverted { from: Coord, to: Coord, swapped: Grid },
    Resolved(Cascade),
}

impl SwapResult {
    pub fn cascade(&self) -> Option<&Cascade> {
        match self {
            SwapResult::Resolved(c) => Some(c),
            _ => None,
        }
    }
}

/// Board session state for one level.
#[derive(Debug, Clone)]
pub struct Session {
    level: LevelConfig,
    rules: Rules,
    rng: SimpleRng,
    grid: Grid,
    score: u32,
    moves_remaining: u32,
    phase: Phase,
    /// Monotonic episode id (increments on every level start or restart).
    episode_id: u32,
}

impl Session {
    /// Start `level` with a fresh grid drawn from `seed`.
    pub fn start(level: LevelConfig, rules: Rules, seed: u32) -> Result<Self, ConfigError> {
        validate_level(&level, rules.tile_kinds)?;
        let mut rng = SimpleRng::new(seed);
        let grid = generate(level.rows, level.cols, rules.tile_kinds, &mut rng)?;
        Ok(Self {
            level,
            rules,
            rng,
            grid,
            score: 0,
            moves_remaining: level.moves,
            phase: Phase::Idle,
            episode_id: 0,
        })
    }

    /// Start `level` on a prepared grid instead of a generated one.
    ///
    /// The grid must match the level's size and hold only kinds below
    /// `rules.tile_kinds`. It may contain runs; they are left for the first swap's
    /// cascade to clear. `seed` drives refills.
    pub fn with_grid(
        level: LevelConfig,
        rules: Rules,
        grid: Grid,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        validate_level(&level, rules.tile_kinds)?;
        if (grid.rows(), grid.cols()) != (level.rows, level.cols) {
            return Err(ConfigError::GridShape {
                expected: (level.rows, level.cols),
                actual: (grid.rows(), grid.cols()),
            });
        }
        if let Some((at, _)) = grid
            .iter()
            .find(|(_, cell)| !matches!(cell, Some(k) if *k < rules.tile_kinds))
        {
            return Err(ConfigError::GridCell { at });
        }

        Ok(Self {
            level,
            rules,
            rng: SimpleRng::new(seed),
            grid,
            score: 0,
            moves_remaining: level.moves,
            phase: Phase::Idle,
            episode_id: 0,
        })
    }

    /// Replace the session with a fresh start of `level`.
    ///
    /// On error the current session is left untouched.
    pub fn start_level(&mut self, level: LevelConfig) -> Result<&Grid, ConfigError> {
        validate_level(&level, self.rules.tile_kinds)?;
        let grid = generate(level.rows, level.cols, self.rules.tile_kinds, &mut self.rng)?;
        self.level = level;
        self.grid = grid;
        self.score = 0;
        self.moves_remaining = level.moves;
        self.phase = Phase::Idle;
        self.episode_id = self.episode_id.wrapping_add(1);
        Ok(&self.grid)
    }

    /// Start the current level over with a new grid.
    pub fn restart(&mut self) -> Result<&Grid, ConfigError> {
        self.start_level(self.level)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn target_score(&self) -> u32 {
        self.level.target_score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.write_grid(&self.grid);
        out.level_id = self.level.id;
        out.score = self.score;
        out.moves_remaining = self.moves_remaining;
        out.target_score = self.level.target_score;
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Validate and resolve a swap of `a` and `b`.
    ///
    /// Invalid requests (not idle, out of bounds, not adjacent) and swaps that
    /// produce no match leave score, moves and grid untouched.
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> SwapResult {
        if self.phase != Phase::Idle {
            return SwapResult::Ignored(IgnoreReason::NotIdle);
        }
        if !self.grid.in_bounds(a) || !self.grid.in_bounds(b) {
            return SwapResult::Ignored(IgnoreReason::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return SwapResult::Ignored(IgnoreReason::NotAdjacent);
        }

        self.phase = Phase::Resolving;
        self.grid.swap(a, b);

        if !has_match(&self.grid) {
            let swapped = self.grid.clone();
            self.grid.swap(a, b);
            self.phase = Phase::Idle;
            return SwapResult::Reverted {
                from: a,
                to: b,
                swapped,
            };
        }

        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        let swapped = self.grid.clone();
        let score_before = self.score;
        let steps = self.run_cascade();

        self.phase = self.evaluate_end();
        SwapResult::Resolved(Cascade {
            from: a,
            to: b,
            swapped,
            steps,
            score_gained: self.score - score_before,
            phase: self.phase,
        })
    }

    /// Repeat detect → score → clear → collapse/refill until nothing matches.
    fn run_cascade(&mut self) -> Vec<CascadeStep> {
        let mut steps = Vec::new();

        loop {
            debug_assert!(
                !self.grid.has_empty(),
                "match detection on a grid with empty cells"
            );
            let runs = find_runs(&self.grid);
            if runs.is_empty() {
                break;
            }
            let matches: MatchSet = runs.iter().flat_map(|r| r.cells()).collect();

            let score = score_with_rules(matches.len(), &self.rules);
            self.score = self.score.saturating_add(score.total);

            clear_matches(&mut self.grid, &matches);
            let cleared = self.grid.clone();

            collapse_and_refill(&mut self.grid, self.rules.tile_kinds, &mut self.rng);

            steps.push(CascadeStep {
                runs,
                matches,
                score,
                cleared,
                settled: self.grid.clone(),
            });
        }

        steps
    }

    fn evaluate_end(&self) -> Phase {
        if self.score >= self.level.target_score {
            Phase::Ended(Outcome::Win)
        } else if self.moves_remaining == 0 {
            Phase::Ended(Outcome::Fail)
        } else {
            Phase::Idle
        }
    }
}
