//! Game session: run phase, spawner and combo expiry
//!
//! The browser driver calls `advance` once per animation frame and `tap` for
//! every click/touch. Spawning and combo expiry are scheduled tasks owned
//! here, so the whole session is reproducible from a seed and a clock.

use super::state::{GameState, PopEvent, SpawnParams};
use super::tick::{frames_between, update};
use super::timers::{TaskHandle, Timers};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not running, instructions shown
    Idle,
    /// Active gameplay
    Running,
    /// Frozen, paused overlay shown
    Paused,
}

/// Deferred work owned by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    SpawnBubble,
    ExpireCombo,
}

/// A game session
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    phase: Phase,
    params: SpawnParams,
    timers: Timers<TimerTask>,
    /// Periodic spawner
    spawner: Option<TaskHandle>,
    /// Front-loaded spawns from the last (re)start
    burst: Vec<TaskHandle>,
    /// Single combo-expiry slot
    combo_expiry: Option<TaskHandle>,
    last_frame_ms: Option<f64>,
}

impl Session {
    pub fn new(state: GameState, params: SpawnParams) -> Self {
        Self {
            state,
            phase: Phase::Idle,
            params,
            timers: Timers::new(),
            spawner: None,
            burst: Vec::new(),
            combo_expiry: None,
            last_frame_ms: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn params(&self) -> SpawnParams {
        self.params
    }

    /// Update spawn parameters. New bubbles pick up the change immediately;
    /// the spawn interval follows on the next start/resume.
    pub fn set_params(&mut self, params: SpawnParams) {
        self.params = params;
    }

    /// Milliseconds between periodic spawns
    pub fn spawn_interval_ms(&self) -> f64 {
        SPAWN_BASE_INTERVAL_MS / self.params.speed.max(1.0) as f64
    }

    /// Number of front-loaded spawns on (re)start
    pub fn burst_count(&self) -> u32 {
        BURST_BASE_COUNT + self.params.speed.max(0.0) as u32
    }

    pub fn start(&mut self, now_ms: f64) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Running;
        self.last_frame_ms = None;
        self.arm_spawner(now_ms);
        log::info!("Session started");
    }

    /// Stop the session: clears the playfield and the session score
    pub fn stop(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        self.phase = Phase::Idle;
        self.timers.clear();
        self.spawner = None;
        self.burst.clear();
        self.combo_expiry = None;
        self.last_frame_ms = None;
        self.state.reset();
        log::info!("Session stopped (best {})", self.state.score.best);
    }

    pub fn pause(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::Paused;
        self.disarm_spawner();
        log::info!("Session paused");
    }

    pub fn resume(&mut self, now_ms: f64) {
        if self.phase != Phase::Paused {
            return;
        }
        self.phase = Phase::Running;
        self.last_frame_ms = None;
        self.arm_spawner(now_ms);
        log::info!("Session resumed");
    }

    pub fn toggle_start(&mut self, now_ms: f64) {
        match self.phase {
            Phase::Idle => self.start(now_ms),
            Phase::Running | Phase::Paused => self.stop(),
        }
    }

    pub fn toggle_pause(&mut self, now_ms: f64) {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(now_ms),
            Phase::Idle => {}
        }
    }

    fn arm_spawner(&mut self, now_ms: f64) {
        self.disarm_spawner();
        let interval = self.spawn_interval_ms();
        self.spawner = Some(
            self.timers
                .schedule_every(now_ms + interval, interval, TimerTask::SpawnBubble),
        );
        for i in 0..self.burst_count() {
            let due = now_ms + i as f64 * BURST_STAGGER_MS;
            self.burst
                .push(self.timers.schedule_once(due, TimerTask::SpawnBubble));
        }
    }

    fn disarm_spawner(&mut self) {
        self.timers.cancel_slot(&mut self.spawner);
        for handle in self.burst.drain(..) {
            self.timers.cancel(handle);
        }
    }

    /// Fire every task due at or before `now_ms`
    fn fire_due(&mut self, now_ms: f64) {
        while let Some((handle, _, task)) = self.timers.pop_due(now_ms) {
            match task {
                TimerTask::SpawnBubble => {
                    self.burst.retain(|h| *h != handle);
                    if self.phase == Phase::Running {
                        self.state.spawn_bubble(&self.params);
                    }
                }
                TimerTask::ExpireCombo => {
                    self.combo_expiry = None;
                    self.state.expire_combo();
                    log::debug!("Combo expired");
                }
            }
        }
    }

    /// Per-frame driver entry: fire due timers, then simulate unless paused
    pub fn advance(&mut self, now_ms: f64) {
        self.fire_due(now_ms);

        if self.phase != Phase::Running {
            return;
        }
        let frames = match self.last_frame_ms {
            Some(last) => frames_between(last, now_ms),
            None => 1.0,
        };
        self.last_frame_ms = Some(now_ms);
        update(&mut self.state, frames);
    }

    /// Pointer/tap at canvas coordinates. Pops at most one bubble.
    pub fn tap(&mut self, x: f32, y: f32, now_ms: f64) -> Option<PopEvent> {
        if self.phase != Phase::Running {
            return None;
        }
        // An expiry that is already due must reset the combo before this pop counts
        self.fire_due(now_ms);

        let id = self.state.hit_test(x, y)?;
        let event = self.state.pop(id)?;
        self.timers.replace_once(
            &mut self.combo_expiry,
            now_ms + COMBO_TIMEOUT_MS,
            TimerTask::ExpireCombo,
        );
        log::debug!(
            "Popped bubble {} (count {}, combo x{})",
            event.bubble_id,
            event.pop_count,
            event.combo
        );
        Some(event)
    }

    /// Pending scheduled tasks (spawner, burst, combo expiry)
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }
}
