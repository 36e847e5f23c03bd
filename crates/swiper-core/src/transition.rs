//! The slide transition state machine.
//!
//! A [`Transition`] drives one switch animation from start to disposal:
//!
//! ```text
//! Created -> Prepared -> Overlaying -> Running -> Restoring -> Disposed
//! ```
//!
//! Any failure before `Running`, and an unrecoverable render failure while
//! running, jump straight to `Restoring`. Restoration always runs, exactly
//! once, whether the transition finished, failed or was dropped early.

use std::time::{Duration, Instant};

use crate::action::Direction;
use crate::config::AnimationConfig;
use crate::easing::ease_in_out_quint;
use crate::pacing::{FramePacer, ProgressGuard, progress};
use crate::slide::SlideFrame;
use crate::window::WindowResult;

/// Lifecycle of a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Prepared,
    Overlaying,
    Running,
    Restoring,
    Disposed,
}

/// Side-effecting steps of a transition, implemented per platform.
pub trait Stage {
    /// Snapshots both windows, shows them without activation and
    /// suppresses compositor effects.
    fn prepare(&mut self) -> WindowResult<()>;

    /// Samples both windows into off-screen images.
    fn capture(&mut self) -> WindowResult<()>;

    /// Creates the overlay surface and its renderer, and uploads the images.
    fn open_overlay(&mut self) -> WindowResult<()>;

    /// Renders one frame.
    fn draw(&mut self, frame: &SlideFrame) -> WindowResult<()>;

    /// Tears down the renderer, re-captures both windows and rebuilds.
    fn rebuild(&mut self) -> WindowResult<()>;

    /// Tells the user a transition had to be abandoned.
    fn report(&mut self, message: &str);

    /// Puts both windows back exactly as [`prepare`](Self::prepare) found them.
    fn restore(&mut self);

    /// Releases images, renderer and overlay surface.
    fn release(&mut self);
}

/// One running slide animation.
pub struct Transition<S: Stage> {
    stage: S,
    phase: Phase,
    width: i32,
    direction: Direction,
    duration: Duration,
    pacer: FramePacer,
    guard: ProgressGuard,
    started: Option<Instant>,
    frames: u32,
    recovering: bool,
}

impl<S: Stage> Transition<S> {
    /// Creates a transition across a work area `width` pixels wide.
    pub fn new(stage: S, width: i32, direction: Direction, config: &AnimationConfig) -> Self {
        Self {
            stage,
            phase: Phase::Created,
            width,
            direction,
            duration: config.duration(),
            pacer: FramePacer::new(config.target_fps),
            guard: ProgressGuard::default(),
            started: None,
            frames: 0,
            recovering: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    /// Number of frames rendered successfully so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Prepares, captures and opens the overlay, then renders the first frame.
    ///
    /// On failure the transition is closed (windows restored) before the
    /// error is returned.
    pub fn start(&mut self, now: Instant) -> WindowResult<()> {
        if self.phase != Phase::Created {
            return Err("transition already started".into());
        }
        if let Err(e) = self.enter_running(now) {
            crate::log_error!("Transition failed to start in {:?}: {e}", self.phase);
            self.close();
            return Err(e);
        }
        self.pacer.mark(now);
        self.render(now);
        Ok(())
    }

    fn enter_running(&mut self, now: Instant) -> WindowResult<()> {
        self.stage.prepare()?;
        self.set_phase(Phase::Prepared);
        self.stage.capture()?;
        self.stage.open_overlay()?;
        self.set_phase(Phase::Overlaying);
        self.started = Some(now);
        self.set_phase(Phase::Running);
        Ok(())
    }

    /// Called on every idle slice. Renders at most one frame.
    ///
    /// Returns whether the transition is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.pacer.ready(now) {
            self.render(now);
        }
        self.is_running()
    }

    /// Time until the next frame is due, `None` once the transition stopped.
    pub fn next_frame_in(&self, now: Instant) -> Option<Duration> {
        self.is_running().then(|| self.pacer.until_next(now))
    }

    fn render(&mut self, now: Instant) {
        let Some(started) = self.started else {
            return;
        };
        let p = progress(now.saturating_duration_since(started), self.duration);
        if p >= 1.0 {
            crate::log_debug!("Transition complete after {} frames", self.frames);
            self.close();
            return;
        }
        if !self.guard.advance(p) {
            return;
        }

        let frame = SlideFrame::at(self.width, ease_in_out_quint(p), self.direction);
        match self.stage.draw(&frame) {
            Ok(()) => {
                self.frames += 1;
                self.recovering = false;
            }
            Err(e) if self.recovering => self.abandon(&e.to_string()),
            Err(e) => {
                crate::log_warn!("Frame failed, rebuilding renderer: {e}");
                self.recovering = true;
                if let Err(e) = self.stage.rebuild() {
                    self.abandon(&e.to_string());
                }
            }
        }
    }

    fn abandon(&mut self, reason: &str) {
        crate::log_error!("Abandoning transition: {reason}");
        self.stage
            .report(&format!("The window transition could not be rendered.\n\n{reason}"));
        self.close();
    }

    /// Stops the transition and restores both windows. Idempotent.
    ///
    /// The phase leaves `Running` first so no further frame is rendered,
    /// then window state is restored, then graphics resources are freed.
    pub fn close(&mut self) {
        if matches!(self.phase, Phase::Restoring | Phase::Disposed) {
            return;
        }
        self.set_phase(Phase::Restoring);
        self.stage.restore();
        self.stage.release();
        self.set_phase(Phase::Disposed);
    }

    fn set_phase(&mut self, phase: Phase) {
        crate::log_debug!("Transition {:?} -> {phase:?}", self.phase);
        self.phase = phase;
    }
}

impl<S: Stage> Drop for Transition<S> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
