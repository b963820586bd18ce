//! JSON-lines event log.
//!
//! One object per line, tagged by `event`:
//!
//! ```text
//! {"seq":1,"event":"level_start","episode":0,"level":1,"rows":7,"cols":7,"moves":18,"target":900,"seed":7}
//! {"seq":2,"event":"swap_reverted","episode":0,"from":{"row":0,"col":0},"to":{"row":0,"col":1}}
//! {"seq":3,"event":"cascade","episode":0,...,"steps":[{"cleared":3,"runs":1,"score":60}],...}
//! {"seq":4,"event":"level_end","episode":0,"level":1,"outcome":"win","score":960,"moves_remaining":4}
//! ```
//!
//! A disabled log does nothing. The first write failure is reported on stderr
//! and disables the log.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{Phase, Session, SwapResult};
use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub cleared: usize,
    pub runs: usize,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    LevelStart {
        episode: u32,
        level: u32,
        rows: usize,
        cols: usize,
        moves: u32,
        target: u32,
        seed: u32,
    },
    SwapIgnored {
        episode: u32,
        from: Coord,
        to: Coord,
        reason: &'static str,
    },
    SwapReverted {
        episode: u32,
        from: Coord,
        to: Coord,
    },
    Cascade {
        episode: u32,
        from: Coord,
        to: Coord,
        steps: Vec<StepRecord>,
        score_gained: u32,
        score: u32,
        moves_remaining: u32,
    },
    LevelEnd {
        episode: u32,
        level: u32,
        outcome: &'static str,
        score: u32,
        moves_remaining: u32,
    },
}

impl LogEvent {
    pub fn level_start(session: &Session) -> Self {
        let level = session.level();
        LogEvent::LevelStart {
            episode: session.episode_id(),
            level: level.id,
            rows: level.rows,
            cols: level.cols,
            moves: level.moves,
            target: level.target_score,
            seed: session.seed(),
        }
    }

    /// Events for one swap request, already applied to `session`.
    pub fn for_swap(session: &Session, from: Coord, to: Coord, result: &SwapResult) -> Vec<Self> {
        let episode = session.episode_id();
        let mut events = Vec::with_capacity(2);

        match result {
            SwapResult::Ignored(reason) => events.push(LogEvent::SwapIgnored {
                episode,
                from,
                to,
                reason: reason.as_str(),
            }),
            SwapResult::Reverted { from, to, .. } => events.push(LogEvent::SwapReverted {
                episode,
                from: *from,
                to: *to,
            }),
            SwapResult::Resolved(cascade) => {
                events.push(LogEvent::Cascade {
                    episode,
                    from: cascade.from,
                    to: cascade.to,
                    steps: cascade
                        .steps
                        .iter()
                        .map(|s| StepRecord {
                            cleared: s.matches.len(),
                            runs: s.runs.len(),
                            score: s.score.total,
                        })
                        .collect(),
                    score_gained: cascade.score_gained,
                    score: session.score(),
                    moves_remaining: session.moves_remaining(),
                });
            }
        }

        if let Some(Phase::Ended(outcome)) = result.cascade().map(|c| c.phase) {
            events.push(LogEvent::LevelEnd {
                episode,
                level: session.level().id,
                outcome: outcome.as_str(),
                score: session.score(),
                moves_remaining: session.moves_remaining(),
            });
        }

        events
    }
}

#[derive(Serialize)]
struct Line<'a> {
    seq: u64,
    #[serde(flatten)]
    event: &'a LogEvent,
}

pub struct EventLog {
    out: Option<Box<dyn Write + Send>>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self {
            out: None,
            seq: 0,
            buf: Vec::new(),
        }
    }

    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::to_writer(BufWriter::new(file)))
    }

    /// `open` when a path is configured, otherwise a disabled log.
    pub fn from_path(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::open(p),
            None => Ok(Self::disabled()),
        }
    }

    pub fn to_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
            seq: 0,
            buf: Vec::with_capacity(512),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Lines written so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, event: &LogEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        let line = Line {
            seq: self.seq + 1,
            event,
        };
        if let Err(e) = serde_json::to_writer(&mut self.buf, &line) {
            eprintln!("[match3] event log encode failed: {e}");
            return;
        }
        self.buf.push(b'\n');

        match out.write_all(&self.buf).and_then(|_| out.flush()) {
            Ok(()) => self.seq += 1,
            Err(e) => {
                eprintln!("[match3] event log write failed, disabling: {e}");
                self.out = None;
            }
        }
    }

    pub fn record_all(&mut self, events: &[LogEvent]) {
        for event in events {
            self.record(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn ignored() -> LogEvent {
        LogEvent::SwapIgnored {
            episode: 3,
            from: Coord::new(0, 0),
            to: Coord::new(2, 2),
            reason: "not_adjacent",
        }
    }

    #[test]
    fn writes_one_tagged_object_per_line() {
        let sink = Shared::default();
        let mut log = EventLog::to_writer(sink.clone());
        log.record(&ignored());
        log.record(&ignored());

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["seq"], 2);
        assert_eq!(v["event"], "swap_ignored");
        assert_eq!(v["reason"], "not_adjacent");
        assert_eq!(v["to"]["col"], 2);
    }

    #[test]
    fn disabled_log_is_a_noop() {
        let mut log = EventLog::disabled();
        log.record(&ignored());
        assert!(!log.is_enabled());
        assert_eq!(log.seq(), 0);
    }

    #[test]
    fn write_failure_disables_log() {
        let mut log = EventLog::to_writer(Broken);
        log.record(&ignored());
        assert!(!log.is_enabled());
        assert_eq!(log.seq(), 0);
        log.record(&ignored());
    }
}
