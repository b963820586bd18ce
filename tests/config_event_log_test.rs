//! Config file loading and the JSON-lines event log, end to end on disk.

use std::path::PathBuf;

use tui_match3::config::{GameConfig, ENV_CONFIG, ENV_LOG_PATH, ENV_SEED, ENV_START_LEVEL};
use tui_match3::core::{Grid, Session};
use tui_match3::event_log::{EventLog, LogEvent};
use tui_match3::types::{Coord, LevelConfig, Rules};

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tui-match3-{}-{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn config_file_and_env_combine() {
    let path = temp_path("config.json");
    std::fs::write(
        &path,
        r#"{
            "levels": [
                { "id": 1, "rows": 6, "cols": 6, "moves": 10, "targetScore": 300 },
                { "id": 2, "rows": 6, "cols": 8, "moves": 12, "targetScore": 600 }
            ],
            "rules": { "tileKinds": 4, "perTile": 10 }
        }"#,
    )
    .unwrap();
    let config_path = path.to_string_lossy().into_owned();

    let config = GameConfig::from_lookup(|key| match key {
        k if k == ENV_CONFIG => Some(config_path.clone()),
        k if k == ENV_SEED => Some("77".to_string()),
        k if k == ENV_START_LEVEL => Some("5".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.level_count(), 2);
    assert_eq!(config.start_level, 1);
    assert_eq!(config.level(config.start_level).cols, 8);
    assert_eq!(config.rules.tile_kinds, 4);
    assert_eq!(config.rules.per_tile, 10);
    assert_eq!(config.rules.bonus_per_extra_tile, 20);
    assert_eq!(config.seed, 77);

    let session = Session::start(config.level(config.start_level), config.rules, config.seed)
        .unwrap();
    assert_eq!(session.grid().cols(), 8);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn broken_config_file_is_reported_with_its_path() {
    let path = temp_path("broken.json");
    std::fs::write(&path, "{ levels: oops").unwrap();
    let p = path.to_string_lossy().into_owned();

    let err = GameConfig::from_lookup(|key| (key == ENV_CONFIG).then(|| p.clone())).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("parsing config file"));
    assert!(msg.contains("broken.json"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unplayable_later_level_fails_at_load_time() {
    let path = temp_path("bad-level.json");
    std::fs::write(
        &path,
        r#"{ "levels": [
            { "id": 1, "rows": 7, "cols": 7, "moves": 1, "targetScore": 1 },
            { "id": 2, "rows": 7, "cols": 7, "moves": 0, "targetScore": 9 }
        ] }"#,
    )
    .unwrap();
    let p = path.to_string_lossy().into_owned();

    let err = GameConfig::from_lookup(|key| (key == ENV_CONFIG).then(|| p.clone())).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("bad-level.json"));
    assert!(msg.contains("level 2 has no moves"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn session_events_are_logged_as_json_lines() {
    let path = temp_path("events.jsonl");
    let log_path = path.to_string_lossy().into_owned();

    let config = GameConfig::from_lookup(|key| (key == ENV_LOG_PATH).then(|| log_path.clone()))
        .unwrap();
    let mut log = EventLog::from_path(config.log_path.as_deref()).unwrap();
    assert!(log.is_enabled());

    let grid = Grid::from_rows(&[
        [0u8, 1, 2, 3, 4, 0, 1],
        [1, 2, 3, 4, 0, 1, 2],
        [0, 0, 4, 0, 1, 2, 3],
        [3, 4, 0, 1, 2, 3, 4],
        [4, 0, 1, 2, 3, 4, 0],
        [0, 1, 2, 3, 4, 0, 1],
        [1, 2, 3, 4, 0, 1, 2],
    ])
    .unwrap();
    let mut s = Session::with_grid(LevelConfig::new(1, 7, 7, 18, 60), Rules::default(), grid, 1)
        .unwrap();
    log.record(&LogEvent::level_start(&s));

    for (a, b) in [
        (Coord::new(0, 0), Coord::new(3, 3)),
        (Coord::new(0, 0), Coord::new(0, 1)),
        (Coord::new(2, 2), Coord::new(2, 3)),
    ] {
        let result = s.request_swap(a, b);
        log.record_all(&LogEvent::for_swap(&s, a, b, &result));
    }
    assert_eq!(log.seq(), 5);
    drop(log);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let events: Vec<&str> = lines.iter().map(|v| v["event"].as_str().unwrap()).collect();
    assert_eq!(
        events,
        vec![
            "level_start",
            "swap_ignored",
            "swap_reverted",
            "cascade",
            "level_end"
        ]
    );

    assert_eq!(lines[0]["target"], 60);
    assert_eq!(lines[1]["reason"], "not_adjacent");
    assert_eq!(lines[3]["steps"][0]["cleared"], 3);
    assert_eq!(lines[3]["score"], 60);
    assert_eq!(lines[3]["moves_remaining"], 17);
    assert_eq!(lines[4]["outcome"], "win");
    assert_eq!(lines[4]["seq"], 5);

    let _ = std::fs::remove_file(&path);
}
