//! Terminal match-3 runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. Every swap is
//! resolved immediately by the core; the recorded cascade is then replayed at
//! animation pace before input is accepted again.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::config::GameConfig;
use tui_match3::core::{Outcome, Phase, Session, SessionSnapshot};
use tui_match3::engine::Playback;
use tui_match3::event_log::{EventLog, LogEvent};
use tui_match3::input::{handle_key_event, should_quit, InputEvent, InputHandler};
use tui_match3::term::{BoardOverlay, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    let log = EventLog::from_path(config.log_path.as_deref())?;
    if let (true, Some(path)) = (log.is_enabled(), config.log_path.as_deref()) {
        eprintln!("[match3] logging events to {path}");
    }
    let app = App::new(config, log)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, app);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

struct App {
    config: GameConfig,
    level_index: usize,
    session: Session,
    input: InputHandler,
    playback: Option<Playback>,
    log: EventLog,
}

impl App {
    fn new(config: GameConfig, log: EventLog) -> Result<Self> {
        let level_index = config.start_level;
        let level = config.level(level_index);
        let session = Session::start(level, config.rules, config.seed)
            .with_context(|| format!("starting level {}", level.id))?;

        let mut app = Self {
            input: InputHandler::new(level.rows, level.cols),
            config,
            level_index,
            session,
            playback: None,
            log,
        };
        app.log.record(&LogEvent::level_start(&app.session));
        Ok(app)
    }

    /// Returns true when something visible changed.
    fn handle_action(&mut self, action: GameAction) -> Result<bool> {
        let flow = matches!(action, GameAction::Restart | GameAction::NextLevel);
        if !flow && (self.playback.is_some() || self.session.phase().is_ended()) {
            return Ok(false);
        }

        match self.input.handle_action(action) {
            Some(InputEvent::Swap { from, to }) => {
                let score_before = self.session.score();
                let result = self.session.request_swap(from, to);
                self.log
                    .record_all(&LogEvent::for_swap(&self.session, from, to, &result));
                self.playback =
                    Playback::from_result(&result, &self.config.animation, score_before);
            }
            Some(InputEvent::Restart) => {
                self.session.restart()?;
                self.enter_level();
            }
            Some(InputEvent::NextLevel) => {
                if self.session.phase() != Phase::Ended(Outcome::Win) {
                    return Ok(false);
                }
                let Some(next) = self.config.next_level_index(self.level_index) else {
                    return Ok(false);
                };
                self.level_index = next;
                self.session.start_level(self.config.level(next))?;
                self.enter_level();
            }
            None => {}
        }
        Ok(true)
    }

    fn enter_level(&mut self) {
        self.playback = None;
        let level = *self.session.level();
        self.input.resize(level.rows, level.cols);
        self.log.record(&LogEvent::level_start(&self.session));
    }

    /// Advance playback. Returns true when the visible frame changed.
    fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(playback) = self.playback.as_mut() else {
            return false;
        };
        let changed = playback.tick(elapsed_ms);
        if playback.is_finished() {
            self.playback = None;
        }
        changed
    }

    fn render(
        &self,
        view: &GameView,
        snap: &mut SessionSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.session.snapshot_into(snap);
        let frame = self.playback.as_ref().and_then(|p| p.current());
        if let Some(f) = frame {
            snap.write_grid(&f.grid);
            snap.score = f.score;
            snap.phase = Phase::Resolving;
        }

        let overlay = BoardOverlay {
            cursor: frame.is_none().then(|| self.input.cursor()),
            selected: self.input.selected(),
            highlight: frame.map(|f| &f.highlight),
            last_level: self.config.next_level_index(self.level_index).is_none(),
        };
        view.render_into(snap, &overlay, viewport, fb);
    }
}

fn run(term: &mut TerminalRenderer, mut app: App) -> Result<()> {
    let view = GameView::default();
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            app.render(&view, &mut snap, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        dirty |= app.handle_action(action)?;
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            dirty |= app.tick(TICK_MS);
        }
    }
}
