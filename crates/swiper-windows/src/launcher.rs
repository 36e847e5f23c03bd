use std::time::{Duration, Instant};

use swiper_core::config::AnimationConfig;
use swiper_core::stage::SlideStage;
use swiper_core::{SwitchPlan, Transition, TransitionLauncher};
use windows::Win32::Media::{timeBeginPeriod, timeEndPeriod};

use crate::compositor::D2dCompositor;
use crate::native_state::Win32Ops;

type SlideTransition = Transition<SlideStage<Win32Ops, D2dCompositor>>;

/// Owns the slide currently on screen, if any.
///
/// Only one transition exists at a time: launching a new one closes the
/// previous one first, which restores its windows before the new capture.
pub struct SlideLauncher {
    config: AnimationConfig,
    active: Option<SlideTransition>,
    fine_timer: bool,
}

impl SlideLauncher {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            active: None,
            fine_timer: false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.as_ref().is_some_and(|t| t.is_running())
    }

    /// Renders at most one frame. Returns the time until the next frame is
    /// due, or `None` once nothing is animating.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        let running = self.active.as_mut().is_some_and(|t| t.tick(now));
        if !running {
            self.close();
            return None;
        }
        self.active.as_ref().and_then(|t| t.next_frame_in(now))
    }

    /// Closes the active transition and restores its windows.
    pub fn close(&mut self) {
        if let Some(mut transition) = self.active.take() {
            transition.close();
        }
        self.set_fine_timer(false);
    }

    fn set_fine_timer(&mut self, on: bool) {
        if self.fine_timer == on {
            return;
        }
        // SAFETY: calls are paired through `fine_timer`.
        unsafe {
            if on {
                let _ = timeBeginPeriod(1);
            } else {
                let _ = timeEndPeriod(1);
            }
        }
        self.fine_timer = on;
    }
}

impl TransitionLauncher for SlideLauncher {
    fn launch(&mut self, plan: &SwitchPlan) {
        self.close();

        let Some(from) = plan.from.filter(|&from| from != plan.to) else {
            swiper_core::log_debug!("No outgoing window, switching without a slide");
            return;
        };

        let area = plan.monitor.work_area;
        let stage = SlideStage::new(Win32Ops, D2dCompositor::new(), from, plan.to, area);
        let mut transition = Transition::new(stage, area.width, plan.direction, &self.config);

        match transition.start(Instant::now()) {
            Ok(()) if transition.is_running() => {
                self.set_fine_timer(true);
                self.active = Some(transition);
            }
            Ok(()) => {}
            Err(e) => swiper_core::log_warn!("Slide skipped: {e}"),
        }
    }
}

impl Drop for SlideLauncher {
    fn drop(&mut self) {
        self.close();
    }
}
