//! Game controller: owns the live state, the timers and the sessions
//!
//! The controller is driven from the frame loop with the current clock
//! reading. Every timer event runs at the time it was due, so results do not
//! depend on frame rate.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::MAX_TICKS_PER_ADVANCE;
use crate::game::GameState;
use crate::input::Command;
use crate::render::{RenderSink, Scene, SessionPanel, SessionRow, StatusSurface};
use crate::scheduler::{Scheduler, TimerEvent};
use crate::session::{BlobStore, SessionStore};

pub struct Controller<B: BlobStore, R: Rng> {
    state: GameState,
    scheduler: Scheduler,
    sessions: SessionStore<B>,
    rng: R,
}

impl<B: BlobStore, R: Rng> Controller<B, R> {
    /// Start a fresh game at `now`
    pub fn new(sessions: SessionStore<B>, mut rng: R, now: Duration) -> Self {
        let state = GameState::new(&mut rng);
        Self::with_state(sessions, rng, state, now)
    }

    /// Start from a prepared game state
    pub fn with_state(sessions: SessionStore<B>, rng: R, state: GameState, now: Duration) -> Self {
        let mut controller = Self {
            state,
            scheduler: Scheduler::new(),
            sessions,
            rng,
        };
        controller.arm_timers(now);
        info!(
            "Game started in session {} (tick every {:?})",
            controller.sessions.current_id(),
            controller.state.tick_interval()
        );
        controller
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn sessions(&self) -> &SessionStore<B> {
        &self.sessions
    }

    /// Apply a player command. `Quit` is left to the caller.
    pub fn handle(&mut self, command: Command, now: Duration) {
        match command {
            Command::Turn(direction) => {
                if !self.state.is_over() {
                    self.state.request_direction(direction);
                }
            }
            Command::Restart => self.restart(now),
            Command::NewSession => {
                if let Err(e) = self.sessions.create_session() {
                    warn!("New session not persisted: {}", e);
                }
            }
            Command::NextSession => {
                if let Some(id) = self.sessions.next_session_id() {
                    self.sessions.switch_to(&id);
                }
            }
            Command::Quit => {}
        }
    }

    /// Throw the current game away and start a new one. Pending timers are
    /// cancelled before the new state exists.
    pub fn restart(&mut self, now: Duration) {
        self.scheduler.cancel_all();
        self.state = GameState::new(&mut self.rng);
        self.arm_timers(now);
        info!("Game restarted");
    }

    /// Run every timer event due at or before `now`. Returns the number of
    /// ticks processed.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut ticks = 0;
        while let Some((at, event)) = self.scheduler.pop_due(now) {
            match event {
                TimerEvent::GoldenExpired => self.on_golden_expired(at),
                TimerEvent::Tick => {
                    self.on_tick(at);
                    ticks += 1;
                    if ticks >= MAX_TICKS_PER_ADVANCE {
                        self.resync_if_behind(now);
                        break;
                    }
                }
            }
        }
        ticks
    }

    /// Hand the current state to the renderer and status surface
    pub fn present<S: RenderSink + StatusSurface>(&self, out: &mut S) {
        out.paint(&Scene {
            snake: self.state.snake(),
            items: self.state.items(),
            golden_active: self.state.golden_active(),
            level: self.state.level(),
        });
        out.show_progress(self.state.score(), self.state.level());
        out.show_game_over(self.state.score(), self.state.level(), self.state.is_over());
        out.show_sessions(&self.session_panel(Utc::now()));
    }

    pub fn session_panel(&self, now: DateTime<Utc>) -> SessionPanel<'_> {
        let current = self.sessions.current_id();
        let rows = self
            .sessions
            .sessions_newest_first()
            .into_iter()
            .map(|s| SessionRow {
                label: s
                    .start_time
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                current: s.id == current,
            })
            .collect();

        let session = self.sessions.current_session();
        SessionPanel {
            rows,
            info: session.map(|s| {
                (
                    s.start_time.with_timezone(&Local).format("%H:%M:%S").to_string(),
                    s.duration_minutes(now),
                )
            }),
            scores: session.map(|s| s.scores.as_slice()),
        }
    }

    fn arm_timers(&mut self, now: Duration) {
        self.scheduler.schedule_ticks(now, self.state.tick_interval());
        if let Some(deadline) = self.state.golden_deadline() {
            self.scheduler.arm_golden_expiry(deadline);
        }
    }

    fn on_tick(&mut self, at: Duration) {
        let outcome = self.state.tick(at, &mut self.rng);

        if let Some(deadline) = outcome.golden_deadline {
            debug!("Golden effect until {:?}", deadline);
            self.scheduler.arm_golden_expiry(deadline);
        }
        if outcome.died.is_some() {
            self.game_over();
            return;
        }
        if let Some(interval) = outcome.new_interval {
            self.scheduler.schedule_ticks(at, interval);
        }
    }

    fn on_golden_expired(&mut self, at: Duration) {
        if let Some(interval) = self.state.expire_golden() {
            self.scheduler.schedule_ticks(at, interval);
        }
    }

    fn game_over(&mut self) {
        self.scheduler.cancel_all();
        let id = self.sessions.current_id().to_string();
        if let Err(e) = self
            .sessions
            .submit_score(&id, self.state.score(), self.state.level())
        {
            warn!("Score not persisted: {}", e);
        }
    }

    fn resync_if_behind(&mut self, now: Duration) {
        let behind = self.scheduler.next_tick().is_some_and(|at| at <= now);
        if let (true, Some(interval)) = (behind, self.scheduler.tick_interval()) {
            debug!("Tick timer fell behind, resyncing at {:?}", now);
            self.scheduler.schedule_ticks(now, interval);
        }
    }
}
