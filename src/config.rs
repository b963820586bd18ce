//! Game configuration: level table, rules and animation pacing.
//!
//! Defaults come from [`DEFAULT_LEVELS`], [`Rules::default`] and
//! [`AnimationConfig::default`]. On top of that:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `MATCH3_CONFIG` | JSON file with optional `levels`, `rules`, `animation` keys |
//! | `MATCH3_SEED` | RNG seed (u32); defaults to a clock-derived value |
//! | `MATCH3_START_LEVEL` | 1-based level number, clamped to the table |
//! | `MATCH3_LOG_PATH` | JSON-lines event log; empty disables it |
//!
//! Unparsable numeric variables fall back to their defaults. A config file that
//! cannot be read or parsed is an error, and so is one holding a level that
//! could never start (empty board, no moves, fewer than two tile kinds).

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::core::validate_level;
use crate::types::{AnimationConfig, LevelConfig, Rules, DEFAULT_LEVELS};

pub const ENV_CONFIG: &str = "MATCH3_CONFIG";
pub const ENV_SEED: &str = "MATCH3_SEED";
pub const ENV_START_LEVEL: &str = "MATCH3_START_LEVEL";
pub const ENV_LOG_PATH: &str = "MATCH3_LOG_PATH";

/// On-disk shape. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    levels: Option<Vec<LevelConfig>>,
    rules: Option<Rules>,
    animation: Option<AnimationConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Never empty.
    pub levels: Vec<LevelConfig>,
    pub rules: Rules,
    pub animation: AnimationConfig,
    pub seed: u32,
    /// Zero-based index into `levels`.
    pub start_level: usize,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS.to_vec(),
            rules: Rules::default(),
            animation: AnimationConfig::default(),
            seed: 1,
            start_level: 0,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (`from_env` passes
    /// `std::env::var`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(path) = non_empty(ENV_CONFIG) {
            config.load_file(&path)?;
        }

        config.seed = non_empty(ENV_SEED)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        if let Some(n) = non_empty(ENV_START_LEVEL).and_then(|s| s.parse::<usize>().ok()) {
            config.start_level = config.clamp_index(n.saturating_sub(1));
        }

        config.log_path = non_empty(ENV_LOG_PATH);
        Ok(config)
    }

    /// Merge a JSON config file over the current values.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        self.apply_json(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Merge a JSON document over the current values.
    ///
    /// Every level of the merged table is checked against the merged rules, so
    /// a bad level is reported here rather than when play reaches it. On error
    /// nothing is changed.
    pub fn apply_json(&mut self, json: &str) -> Result<()> {
        let file: ConfigFile = serde_json::from_str(json)?;

        let levels = file.levels.unwrap_or_else(|| self.levels.clone());
        if levels.is_empty() {
            bail!("level table is empty");
        }
        let rules = file.rules.unwrap_or(self.rules);
        for (n, level) in levels.iter().enumerate() {
            validate_level(level, rules.tile_kinds)
                .with_context(|| format!("level #{} (id {})", n + 1, level.id))?;
        }

        self.levels = levels;
        self.rules = rules;
        self.start_level = self.clamp_index(self.start_level);
        if let Some(animation) = file.animation {
            self.animation = animation;
        }
        Ok(())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Level at `index`, clamped to the last level.
    pub fn level(&self, index: usize) -> LevelConfig {
        self.levels[self.clamp_index(index)]
    }

    /// Index of the level after `index`, if any.
    pub fn next_level_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.level_count()).then_some(next)
    }

    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.level_count().saturating_sub(1))
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_use_stock_tables() {
        let c = GameConfig::default();
        assert_eq!(c.level_count(), 5);
        assert_eq!(c.level(0).target_score, 900);
        assert_eq!(c.rules.tile_kinds, 5);
        assert_eq!(c.animation.swap_ms, 80);
    }

    #[test]
    fn env_overrides_seed_level_and_log() {
        let c = GameConfig::from_lookup(lookup(&[
            (ENV_SEED, "4242"),
            (ENV_START_LEVEL, "3"),
            (ENV_LOG_PATH, " /tmp/match3.jsonl "),
        ]))
        .unwrap();
        assert_eq!(c.seed, 4242);
        assert_eq!(c.start_level, 2);
        assert_eq!(c.log_path.as_deref(), Some("/tmp/match3.jsonl"));
    }

    #[test]
    fn start_level_is_clamped_and_bad_values_fall_back() {
        let c = GameConfig::from_lookup(lookup(&[
            (ENV_SEED, "not-a-number"),
            (ENV_START_LEVEL, "99"),
            (ENV_LOG_PATH, "   "),
        ]))
        .unwrap();
        assert_eq!(c.start_level, 4);
        assert_eq!(c.log_path, None);

        let c = GameConfig::from_lookup(lookup(&[(ENV_START_LEVEL, "0")])).unwrap();
        assert_eq!(c.start_level, 0);
    }

    #[test]
    fn json_merges_partial_documents() {
        let mut c = GameConfig::default();
        c.apply_json(r#"{ "rules": { "tileKinds": 6 } }"#).unwrap();
        assert_eq!(c.rules.tile_kinds, 6);
        assert_eq!(c.rules.per_tile, 20);
        assert_eq!(c.level_count(), 5);

        c.apply_json(
            r#"{ "levels": [ { "id": 9, "rows": 4, "cols": 5, "moves": 3, "targetScore": 100 } ],
                 "animation": { "popMs": 10 } }"#,
        )
        .unwrap();
        assert_eq!(c.levels, vec![LevelConfig::new(9, 4, 5, 3, 100)]);
        assert_eq!(c.animation.pop_ms, 10);
        assert_eq!(c.animation.swap_ms, 80);
    }

    #[test]
    fn json_rejects_empty_table_and_unknown_keys() {
        let mut c = GameConfig::default();
        assert!(c.apply_json(r#"{ "levels": [] }"#).is_err());
        assert!(c.apply_json(r#"{ "speed": 3 }"#).is_err());
        assert_eq!(c, GameConfig::default());
    }

    #[test]
    fn json_rejects_a_level_that_cannot_start() {
        let mut c = GameConfig::default();
        let err = c
            .apply_json(
                r#"{ "levels": [
                    { "id": 1, "rows": 7, "cols": 7, "moves": 1, "targetScore": 1 },
                    { "id": 2, "rows": 0, "cols": 7, "moves": 5, "targetScore": 9 }
                ] }"#,
            )
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("level #2"));
        assert!(msg.contains("at least 1x1"));

        let err = c
            .apply_json(
                r#"{ "levels": [ { "id": 4, "rows": 7, "cols": 7, "moves": 0, "targetScore": 9 } ] }"#,
            )
            .unwrap_err();
        assert!(format!("{err:#}").contains("level 4 has no moves"));

        assert!(c.apply_json(r#"{ "rules": { "tileKinds": 1 } }"#).is_err());
        assert_eq!(c, GameConfig::default());
    }

    #[test]
    fn level_lookup_clamps_and_next_stops_at_end() {
        let c = GameConfig::default();
        assert_eq!(c.level(17).id, 5);
        assert_eq!(c.next_level_index(0), Some(1));
        assert_eq!(c.next_level_index(4), None);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = GameConfig::from_lookup(lookup(&[(ENV_CONFIG, "/nonexistent/match3.json")]))
            .unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));
    }
}
