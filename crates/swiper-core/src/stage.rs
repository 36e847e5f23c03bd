//! The slide [`Stage`] built from window ops and a compositor.

use crate::mutation::{Mutation, MutationGuard, MutationLog, WindowOps, style};
use crate::raster::Raster;
use crate::rect::Rect;
use crate::slide::SlideFrame;
use crate::transition::Stage;
use crate::window::WindowResult;

/// How a window image was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Full content, including DirectComposition/DirectX surfaces.
    Full,
    /// Whatever the window could draw when full-content capture was refused.
    BestEffort,
}

/// Window capture and overlay rendering.
pub trait Compositor {
    /// Samples a window into a `width` x `height` image.
    ///
    /// Implementations fall back to a best-effort capture on their own
    /// and report which one succeeded.
    fn capture(&mut self, hwnd: usize, width: u32, height: u32)
    -> WindowResult<(Raster, CaptureMode)>;

    /// Creates the overlay surface over `area` and a renderer bound to it.
    fn open(&mut self, area: Rect) -> WindowResult<()>;

    /// Converts both images into renderer bitmaps.
    fn upload(&mut self, outgoing: &Raster, incoming: &Raster) -> WindowResult<()>;

    /// Clears the surface, draws incoming then outgoing, presents.
    fn draw(&mut self, frame: &SlideFrame) -> WindowResult<()>;

    /// Drops the renderer and its bitmaps and creates a fresh renderer.
    fn reset_renderer(&mut self) -> WindowResult<()>;

    /// Releases bitmaps and renderer and destroys the overlay surface.
    fn close(&mut self);

    /// Shows a message to the user.
    fn alert(&mut self, message: &str);
}

/// Slides `to` in over `from` across a monitor's work area.
pub struct SlideStage<O: WindowOps, C: Compositor> {
    ops: O,
    compositor: C,
    from: usize,
    to: usize,
    area: Rect,
    log: MutationLog,
    outgoing: Option<Raster>,
    incoming: Option<Raster>,
}

impl<O: WindowOps, C: Compositor> SlideStage<O, C> {
    pub fn new(ops: O, compositor: C, from: usize, to: usize, area: Rect) -> Self {
        Self {
            ops,
            compositor,
            from,
            to,
            area,
            log: MutationLog::new(),
            outgoing: None,
            incoming: None,
        }
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    /// Captures one window with its caption and sizing frame stripped.
    ///
    /// The original style is back before this returns, whether or not
    /// the capture succeeded.
    fn capture_one(&mut self, hwnd: usize) -> WindowResult<Raster> {
        let width = u32::try_from(self.area.width)?;
        let height = u32::try_from(self.area.height)?;

        let _lock = MutationGuard::new(
            &self.ops,
            hwnd,
            Mutation::Lock {
                strip: style::CHROME,
            },
        );
        self.ops.redraw(hwnd);
        let (mut raster, mode) = self.compositor.capture(hwnd, width, height)?;
        if mode == CaptureMode::BestEffort {
            crate::log_info!("Full-content capture refused for 0x{hwnd:X}, used best effort");
        }
        raster.make_opaque();
        Ok(raster)
    }

    fn upload(&mut self) -> WindowResult<()> {
        match (&self.outgoing, &self.incoming) {
            (Some(outgoing), Some(incoming)) => self.compositor.upload(outgoing, incoming),
            _ => Err("windows have not been captured".into()),
        }
    }
}

impl<O: WindowOps, C: Compositor> Stage for SlideStage<O, C> {
    fn prepare(&mut self) -> WindowResult<()> {
        for hwnd in [self.from, self.to] {
            self.log.apply(&self.ops, hwnd, Mutation::ShowNoActivate);
            self.log.apply(&self.ops, hwnd, Mutation::SnapshotStyle);
            self.log.apply(&self.ops, hwnd, Mutation::SuppressEffects);
        }
        Ok(())
    }

    fn capture(&mut self) -> WindowResult<()> {
        self.outgoing = Some(self.capture_one(self.from)?);
        self.incoming = Some(self.capture_one(self.to)?);
        Ok(())
    }

    fn open_overlay(&mut self) -> WindowResult<()> {
        self.compositor.open(self.area)?;
        self.upload()
    }

    fn draw(&mut self, frame: &SlideFrame) -> WindowResult<()> {
        self.compositor.draw(frame)
    }

    fn rebuild(&mut self) -> WindowResult<()> {
        self.compositor.reset_renderer()?;
        self.capture()?;
        self.upload()
    }

    fn report(&mut self, message: &str) {
        self.compositor.alert(message);
    }

    fn restore(&mut self) {
        let restored = self.log.restore_all(&self.ops);
        crate::log_debug!("Restored {restored} window changes");
    }

    fn release(&mut self) {
        self.outgoing = None;
        self.incoming = None;
        self.compositor.close();
    }
}
