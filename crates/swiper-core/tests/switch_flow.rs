//! End-to-end switch: tracker decision, transition and window restoration
//! against an in-memory desktop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use swiper_core::config::AnimationConfig;
use swiper_core::easing::ease_in_out_quint;
use swiper_core::mutation::{Effect, Visibility, WindowOps, style};
use swiper_core::raster::Raster;
use swiper_core::slide::SlideFrame;
use swiper_core::stage::{CaptureMode, Compositor, SlideStage};
use swiper_core::{
    DebounceGate, Desktop, Direction, MonitorInfo, Point, Rect, SwitchOutcome, SwitchPlan,
    SwitchTracker, Transition, TransitionLauncher, WindowResult,
};

const A: usize = 0xA0;
const B: usize = 0xB0;
const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
};
const STYLE: u32 = style::CAPTION | style::THICKFRAME | style::MAXIMIZE | style::VISIBLE;

#[derive(Debug, Clone, PartialEq)]
struct FakeWindow {
    style: u32,
    visible: bool,
    maximized: bool,
    rect: Rect,
    effects: HashMap<u8, u32>,
}

impl FakeWindow {
    fn maximized() -> Self {
        Self {
            style: STYLE,
            visible: true,
            maximized: true,
            rect: Rect::new(-8, -8, 1936, 1096),
            effects: HashMap::from([
                (Effect::Transitions as u8, 0),
                (Effect::DarkMode as u8, 1),
                (Effect::Backdrop as u8, 2),
                (Effect::BypassCompositor as u8, 0),
                (Effect::Mica as u8, 0),
            ]),
        }
    }
}

#[derive(Default)]
struct World {
    windows: HashMap<usize, FakeWindow>,
    order: Vec<usize>,
    foreground: Option<usize>,
}

type Shared = Rc<RefCell<World>>;

fn world_with(handles: &[usize], foreground: usize) -> Shared {
    let mut world = World::default();
    for &h in handles {
        world.windows.insert(h, FakeWindow::maximized());
        world.order.push(h);
    }
    world.foreground = Some(foreground);
    Rc::new(RefCell::new(world))
}

struct FakeDesktop(Shared);

impl Desktop for FakeDesktop {
    fn monitors(&self) -> Vec<MonitorInfo> {
        vec![MonitorInfo {
            id: 1,
            work_area: AREA,
        }]
    }
    fn monitor_at(&self, point: Point) -> Option<usize> {
        AREA.contains(point).then_some(1)
    }
    fn cursor_position(&self) -> Option<Point> {
        Some(Point::new(960, 540))
    }
    fn foreground_window(&self) -> Option<usize> {
        self.0.borrow().foreground
    }
    fn top_level_windows(&self) -> Vec<usize> {
        self.0.borrow().order.clone()
    }
    fn window_rect(&self, hwnd: usize) -> Option<Rect> {
        self.0.borrow().windows.get(&hwnd).map(|w| w.rect)
    }
    fn is_switchable(&self, hwnd: usize) -> bool {
        self.0
            .borrow()
            .windows
            .get(&hwnd)
            .is_some_and(|w| w.visible && w.maximized)
    }
    fn focus(&self, hwnd: usize) {
        self.0.borrow_mut().foreground = Some(hwnd);
    }
}

struct FakeOps(Shared);

impl FakeOps {
    fn with<R>(&self, hwnd: usize, f: impl FnOnce(&mut FakeWindow) -> R) -> Option<R> {
        self.0.borrow_mut().windows.get_mut(&hwnd).map(f)
    }
}

impl WindowOps for FakeOps {
    fn style(&self, hwnd: usize) -> u32 {
        self.with(hwnd, |w| w.style).unwrap_or(0)
    }
    fn set_style(&self, hwnd: usize, style: u32) {
        self.with(hwnd, |w| w.style = style);
    }
    fn redraw(&self, _hwnd: usize) {}
    fn rect(&self, hwnd: usize) -> Option<Rect> {
        self.with(hwnd, |w| w.rect)
    }
    fn pin(&self, hwnd: usize, rect: Rect) {
        self.with(hwnd, |w| w.rect = rect);
    }
    fn is_visible(&self, hwnd: usize) -> bool {
        self.with(hwnd, |w| w.visible).unwrap_or(false)
    }
    fn set_visibility(&self, hwnd: usize, visibility: Visibility) {
        self.with(hwnd, |w| w.visible = visibility != Visibility::Hide);
    }
    fn effect(&self, hwnd: usize, effect: Effect) -> Option<u32> {
        self.with(hwnd, |w| w.effects.get(&(effect as u8)).copied())
            .flatten()
    }
    fn set_effect(&self, hwnd: usize, effect: Effect, value: u32) {
        self.with(hwnd, |w| w.effects.insert(effect as u8, value));
    }
}

#[derive(Default)]
struct Journal {
    captured_styles: Vec<u32>,
    uploads: Vec<(Raster, Raster)>,
    frames: Vec<SlideFrame>,
    alerts: Vec<String>,
    closed: u32,
}

struct FakeCompositor {
    world: Shared,
    journal: Rc<RefCell<Journal>>,
    refuse_full: Vec<usize>,
    draw_failures: u32,
}

impl Compositor for FakeCompositor {
    fn capture(
        &mut self,
        hwnd: usize,
        width: u32,
        height: u32,
    ) -> WindowResult<(Raster, CaptureMode)> {
        let style = self.world.borrow().windows[&hwnd].style;
        self.journal.borrow_mut().captured_styles.push(style);
        let mode = if self.refuse_full.contains(&hwnd) {
            CaptureMode::BestEffort
        } else {
            CaptureMode::Full
        };
        let pixels = vec![0x0011_2233; width as usize * height as usize];
        let raster = Raster::from_pixels(width, height, pixels).ok_or("bad size")?;
        Ok((raster, mode))
    }

    fn open(&mut self, _area: Rect) -> WindowResult<()> {
        Ok(())
    }

    fn upload(&mut self, outgoing: &Raster, incoming: &Raster) -> WindowResult<()> {
        self.journal
            .borrow_mut()
            .uploads
            .push((outgoing.clone(), incoming.clone()));
        Ok(())
    }

    fn draw(&mut self, frame: &SlideFrame) -> WindowResult<()> {
        if self.draw_failures > 0 {
            self.draw_failures -= 1;
            return Err("device removed".into());
        }
        self.journal.borrow_mut().frames.push(*frame);
        Ok(())
    }

    fn reset_renderer(&mut self) -> WindowResult<()> {
        Ok(())
    }

    fn close(&mut self) {
        self.journal.borrow_mut().closed += 1;
    }

    fn alert(&mut self, message: &str) {
        self.journal.borrow_mut().alerts.push(message.to_string());
    }
}

/// Runs every launched transition to completion on a simulated clock.
struct RunToEnd {
    world: Shared,
    journal: Rc<RefCell<Journal>>,
    refuse_full: Vec<usize>,
    draw_failures: u32,
    started: Vec<WindowResult<()>>,
}

impl RunToEnd {
    fn new(world: &Shared) -> Self {
        Self {
            world: world.clone(),
            journal: Rc::default(),
            refuse_full: Vec::new(),
            draw_failures: 0,
            started: Vec::new(),
        }
    }
}

impl TransitionLauncher for RunToEnd {
    fn launch(&mut self, plan: &SwitchPlan) {
        let Some(from) = plan.from else { return };
        let compositor = FakeCompositor {
            world: self.world.clone(),
            journal: self.journal.clone(),
            refuse_full: self.refuse_full.clone(),
            draw_failures: self.draw_failures,
        };
        let stage = SlideStage::new(
            FakeOps(self.world.clone()),
            compositor,
            from,
            plan.to,
            plan.monitor.work_area,
        );
        let mut transition = Transition::new(
            stage,
            plan.monitor.work_area.width,
            plan.direction,
            &AnimationConfig::default(),
        );

        let t0 = Instant::now();
        let result = transition.start(t0);
        let mut step = 0;
        while transition.tick(t0 + Duration::from_millis(step)) {
            step += 1;
        }
        assert!(transition.is_disposed());
        self.started.push(result);
    }
}

fn switch_once(world: &Shared, launcher: &mut RunToEnd) -> (SwitchTracker, SwitchOutcome) {
    let desktop = FakeDesktop(world.clone());
    let mut tracker = SwitchTracker::new(desktop.monitors());
    tracker.seed(&desktop);
    let gate = DebounceGate::new(Duration::from_millis(300));
    let outcome = tracker.request_switch(
        &desktop,
        &gate,
        launcher,
        Direction::Next,
        Instant::now(),
    );
    (tracker, outcome)
}

#[test]
fn forward_switch_slides_full_width_and_restores_both_windows() {
    // Arrange
    let world = world_with(&[A, B], A);
    let before = world.borrow().windows.clone();
    let mut launcher = RunToEnd::new(&world);

    // Act
    let (tracker, outcome) = switch_once(&world, &mut launcher);

    // Assert
    assert_eq!(outcome, SwitchOutcome::Switched { to: B, index: 1 });
    assert_eq!(tracker.monitor(1).and_then(|m| m.list.cursor()), Some(1));
    assert_eq!(world.borrow().foreground, Some(B));
    assert!(launcher.started[0].is_ok());

    let journal = launcher.journal.borrow();
    assert!(journal.frames.len() > 10);
    assert_eq!(journal.frames[0].outgoing_x, 0);
    assert!(journal.frames.iter().all(|f| f.incoming_x == f.outgoing_x + 1920));
    assert_eq!(
        SlideFrame::at(1920, ease_in_out_quint(1.0), Direction::Next).outgoing_x,
        -1920
    );
    assert_eq!(journal.closed, 1);

    assert_eq!(world.borrow().windows, before);
}

#[test]
fn chrome_is_stripped_only_while_capturing() {
    let world = world_with(&[A, B], A);
    let mut launcher = RunToEnd::new(&world);

    switch_once(&world, &mut launcher);

    let journal = launcher.journal.borrow();
    assert_eq!(journal.captured_styles.len(), 2);
    assert!(
        journal
            .captured_styles
            .iter()
            .all(|s| s & style::CHROME == 0 && s & style::MAXIMIZE != 0)
    );
    assert!(world.borrow().windows.values().all(|w| w.style == STYLE));
}

#[test]
fn refused_full_capture_falls_back_and_completes() {
    // Arrange
    let world = world_with(&[A, B], A);
    let mut launcher = RunToEnd::new(&world);
    launcher.refuse_full = vec![A, B];

    // Act
    switch_once(&world, &mut launcher);

    // Assert
    assert!(launcher.started[0].is_ok());
    let journal = launcher.journal.borrow();
    let (outgoing, incoming) = &journal.uploads[0];
    assert!(!outgoing.is_blank());
    assert!(incoming.pixels().iter().all(|p| p >> 24 == 0xFF));
    assert_eq!(journal.closed, 1);
}

#[test]
fn persistent_render_failure_alerts_and_still_restores() {
    let world = world_with(&[A, B], A);
    let before = world.borrow().windows.clone();
    let mut launcher = RunToEnd::new(&world);
    launcher.draw_failures = u32::MAX;

    let (_, outcome) = switch_once(&world, &mut launcher);

    assert_eq!(outcome, SwitchOutcome::Switched { to: B, index: 1 });
    let journal = launcher.journal.borrow();
    assert_eq!(journal.alerts.len(), 1);
    assert_eq!(journal.uploads.len(), 2);
    assert_eq!(journal.closed, 1);
    assert_eq!(world.borrow().windows, before);
}

#[test]
fn stale_neighbour_is_skipped_end_to_end() {
    let world = world_with(&[A, B, 0xC0], A);
    let mut launcher = RunToEnd::new(&world);
    let desktop = FakeDesktop(world.clone());
    let mut tracker = SwitchTracker::new(desktop.monitors());
    tracker.seed(&desktop);
    if let Some(w) = world.borrow_mut().windows.get_mut(&B) {
        w.maximized = false;
    }

    let outcome = tracker.request_switch(
        &desktop,
        &DebounceGate::new(Duration::from_millis(300)),
        &mut launcher,
        Direction::Next,
        Instant::now(),
    );

    assert_eq!(outcome, SwitchOutcome::Switched { to: 0xC0, index: 1 });
    assert_eq!(world.borrow().foreground, Some(0xC0));
}
