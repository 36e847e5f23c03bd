use std::cell::RefCell;
use std::rc::Rc;

use super::*;

type Calls = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
struct FakeStage {
    calls: Calls,
    fail_prepare: bool,
    fail_capture: bool,
    fail_rebuild: bool,
    draw_failures: u32,
    frames: Vec<SlideFrame>,
}

impl FakeStage {
    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

impl Stage for FakeStage {
    fn prepare(&mut self) -> WindowResult<()> {
        self.record("prepare");
        if self.fail_prepare {
            return Err("prepare failed".into());
        }
        Ok(())
    }

    fn capture(&mut self) -> WindowResult<()> {
        self.record("capture");
        if self.fail_capture {
            return Err("capture failed".into());
        }
        Ok(())
    }

    fn open_overlay(&mut self) -> WindowResult<()> {
        self.record("open_overlay");
        Ok(())
    }

    fn draw(&mut self, frame: &SlideFrame) -> WindowResult<()> {
        self.record("draw");
        if self.draw_failures > 0 {
            self.draw_failures -= 1;
            return Err("device lost".into());
        }
        self.frames.push(*frame);
        Ok(())
    }

    fn rebuild(&mut self) -> WindowResult<()> {
        self.record("rebuild");
        if self.fail_rebuild {
            return Err("no device".into());
        }
        Ok(())
    }

    fn report(&mut self, _message: &str) {
        self.record("report");
    }

    fn restore(&mut self) {
        self.record("restore");
    }

    fn release(&mut self) {
        self.record("release");
    }
}

fn config() -> AnimationConfig {
    AnimationConfig {
        duration_ms: 300,
        target_fps: 100,
        debounce_ms: 300,
    }
}

fn transition(stage: FakeStage) -> (Transition<FakeStage>, Calls) {
    let calls = stage.calls.clone();
    (
        Transition::new(stage, 1920, Direction::Next, &config()),
        calls,
    )
}

fn count(calls: &Calls, name: &str) -> usize {
    calls.borrow().iter().filter(|c| *c == name).count()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn start_walks_phases_and_draws_first_frame() {
    // Arrange
    let (mut t, calls) = transition(FakeStage::default());

    // Act
    t.start(Instant::now()).unwrap();

    // Assert
    assert_eq!(t.phase(), Phase::Running);
    assert_eq!(
        *calls.borrow(),
        vec!["prepare", "capture", "open_overlay", "draw"]
    );
    assert_eq!(
        t.stage().frames[0],
        SlideFrame {
            outgoing_x: 0,
            incoming_x: 1920
        }
    );
}

#[test]
fn tick_respects_frame_interval() {
    // Arrange
    let (mut t, calls) = transition(FakeStage::default());
    let t0 = Instant::now();
    t.start(t0).unwrap();

    // Act
    t.tick(t0 + ms(4));
    t.tick(t0 + ms(10));

    // Assert
    assert_eq!(count(&calls, "draw"), 2);
    assert_eq!(t.frames(), 2);
}

#[test]
fn frames_slide_monotonically_left_when_moving_forward() {
    let (mut t, _) = transition(FakeStage::default());
    let t0 = Instant::now();
    t.start(t0).unwrap();

    for step in 1..30 {
        t.tick(t0 + ms(step * 10));
    }

    let xs: Vec<i32> = t.stage().frames.iter().map(|f| f.outgoing_x).collect();
    assert!(xs.windows(2).all(|w| w[1] <= w[0]), "{xs:?}");
    assert!(t.stage().frames.iter().all(|f| f.incoming_x == f.outgoing_x + 1920));
}

#[test]
fn completion_restores_then_releases_once() {
    // Arrange
    let (mut t, calls) = transition(FakeStage::default());
    let t0 = Instant::now();
    t.start(t0).unwrap();

    // Act
    let running = t.tick(t0 + ms(300));
    drop(t);

    // Assert
    assert!(!running);
    let calls = calls.borrow();
    let tail: Vec<&str> = calls.iter().rev().take(2).rev().map(String::as_str).collect();
    assert_eq!(tail, ["restore", "release"]);
    assert_eq!(calls.iter().filter(|c| *c == "restore").count(), 1);
}

#[test]
fn completion_does_not_draw_a_final_frame() {
    let (mut t, calls) = transition(FakeStage::default());
    let t0 = Instant::now();
    t.start(t0).unwrap();

    t.tick(t0 + ms(500));

    assert!(t.is_disposed());
    assert_eq!(count(&calls, "draw"), 1);
    assert_eq!(t.next_frame_in(t0 + ms(500)), None);
}

#[test]
fn prepare_failure_still_restores() {
    let (mut t, calls) = transition(FakeStage {
        fail_prepare: true,
        ..FakeStage::default()
    });

    let result = t.start(Instant::now());

    assert!(result.is_err());
    assert!(t.is_disposed());
    assert_eq!(*calls.borrow(), vec!["prepare", "restore", "release"]);
}

#[test]
fn capture_failure_still_restores() {
    let (mut t, calls) = transition(FakeStage {
        fail_capture: true,
        ..FakeStage::default()
    });

    assert!(t.start(Instant::now()).is_err());

    assert_eq!(count(&calls, "restore"), 1);
    assert_eq!(count(&calls, "draw"), 0);
}

#[test]
fn single_render_failure_rebuilds_and_continues() {
    // Arrange
    let (mut t, calls) = transition(FakeStage {
        draw_failures: 1,
        ..FakeStage::default()
    });
    let t0 = Instant::now();

    // Act
    t.start(t0).unwrap();
    let running = t.tick(t0 + ms(20));

    // Assert
    assert!(running);
    assert_eq!(count(&calls, "rebuild"), 1);
    assert_eq!(count(&calls, "report"), 0);
    assert_eq!(t.frames(), 1);
}

#[test]
fn failed_rebuild_reports_and_closes() {
    let (mut t, calls) = transition(FakeStage {
        draw_failures: 1,
        fail_rebuild: true,
        ..FakeStage::default()
    });

    t.start(Instant::now()).unwrap();

    assert!(t.is_disposed());
    assert_eq!(
        *calls.borrow(),
        vec![
            "prepare",
            "capture",
            "open_overlay",
            "draw",
            "rebuild",
            "report",
            "restore",
            "release"
        ]
    );
}

#[test]
fn second_consecutive_render_failure_reports_and_closes() {
    let (mut t, calls) = transition(FakeStage {
        draw_failures: 2,
        ..FakeStage::default()
    });
    let t0 = Instant::now();
    t.start(t0).unwrap();

    let running = t.tick(t0 + ms(20));

    assert!(!running);
    assert_eq!(count(&calls, "rebuild"), 1);
    assert_eq!(count(&calls, "report"), 1);
    assert_eq!(count(&calls, "restore"), 1);
}

#[test]
fn dropping_a_running_transition_restores_windows() {
    let (mut t, calls) = transition(FakeStage::default());
    t.start(Instant::now()).unwrap();

    drop(t);

    assert_eq!(count(&calls, "restore"), 1);
    assert_eq!(count(&calls, "release"), 1);
}

#[test]
fn close_is_idempotent() {
    let (mut t, calls) = transition(FakeStage::default());
    t.start(Instant::now()).unwrap();

    t.close();
    t.close();
    drop(t);

    assert_eq!(count(&calls, "restore"), 1);
}

#[test]
fn start_twice_is_rejected() {
    let (mut t, _) = transition(FakeStage::default());
    let t0 = Instant::now();
    t.start(t0).unwrap();

    assert!(t.start(t0).is_err());
    assert!(t.is_running());
}
