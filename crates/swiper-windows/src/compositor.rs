use swiper_core::raster::Raster;
use swiper_core::slide::SlideFrame;
use swiper_core::stage::{CaptureMode, Compositor};
use swiper_core::{Rect, WindowResult};
use windows::Win32::Graphics::Direct2D::ID2D1Factory;

use crate::capture;
use crate::notify;
use crate::overlay::Overlay;
use crate::renderer::{self, Renderer};
use crate::window::Window;

/// Captures with `PrintWindow` and renders with Direct2D on an [`Overlay`].
#[derive(Default)]
pub struct D2dCompositor {
    factory: Option<ID2D1Factory>,
    overlay: Option<Overlay>,
    renderer: Option<Renderer>,
}

impl D2dCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_renderer(&mut self) -> WindowResult<()> {
        let Some(overlay) = &self.overlay else {
            return Err("overlay is not open".into());
        };
        let factory = match &self.factory {
            Some(f) => f.clone(),
            None => {
                let f = renderer::create_factory()?;
                self.factory = Some(f.clone());
                f
            }
        };
        self.renderer = Some(Renderer::new(&factory, overlay.hwnd(), overlay.area())?);
        Ok(())
    }
}

impl Compositor for D2dCompositor {
    fn capture(
        &mut self,
        hwnd: usize,
        width: u32,
        height: u32,
    ) -> WindowResult<(Raster, CaptureMode)> {
        capture::capture_window(Window::from_raw(hwnd).hwnd(), width, height)
    }

    fn open(&mut self, area: Rect) -> WindowResult<()> {
        self.overlay = Some(Overlay::new(area)?);
        self.create_renderer()
    }

    fn upload(&mut self, outgoing: &Raster, incoming: &Raster) -> WindowResult<()> {
        match &mut self.renderer {
            Some(r) => r.upload(outgoing, incoming),
            None => Err("renderer is not ready".into()),
        }
    }

    fn draw(&mut self, frame: &SlideFrame) -> WindowResult<()> {
        match &self.renderer {
            Some(r) => r.draw(frame),
            None => Err("renderer is not ready".into()),
        }
    }

    fn reset_renderer(&mut self) -> WindowResult<()> {
        self.renderer = None;
        self.factory = None;
        self.create_renderer()
    }

    fn close(&mut self) {
        self.renderer = None;
        self.overlay = None;
    }

    fn alert(&mut self, message: &str) {
        notify::warn("Swiper", message);
    }
}
