//! Direct2D rendering of slide frames onto the overlay.

use std::ffi::c_void;

use swiper_core::raster::Raster;
use swiper_core::slide::SlideFrame;
use swiper_core::{Rect, WindowResult};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct2D::Common::{
    D2D_RECT_F, D2D_SIZE_U, D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_COLOR_F, D2D1_PIXEL_FORMAT,
};
use windows::Win32::Graphics::Direct2D::{
    D2D1_ANTIALIAS_MODE_ALIASED, D2D1_BITMAP_INTERPOLATION_MODE_LINEAR, D2D1_BITMAP_PROPERTIES,
    D2D1_FACTORY_TYPE_SINGLE_THREADED, D2D1_FEATURE_LEVEL_DEFAULT,
    D2D1_HWND_RENDER_TARGET_PROPERTIES, D2D1_PRESENT_OPTIONS_NONE,
    D2D1_RENDER_TARGET_PROPERTIES, D2D1_RENDER_TARGET_TYPE_HARDWARE,
    D2D1_RENDER_TARGET_USAGE_NONE, D2D1CreateFactory, ID2D1Bitmap, ID2D1Factory,
    ID2D1HwndRenderTarget,
};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows_numerics::Matrix3x2;

const TRANSPARENT: D2D1_COLOR_F = D2D1_COLOR_F {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

fn pixel_format() -> D2D1_PIXEL_FORMAT {
    D2D1_PIXEL_FORMAT {
        format: DXGI_FORMAT_B8G8R8A8_UNORM,
        alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
    }
}

/// Creates the process's Direct2D factory.
pub fn create_factory() -> WindowResult<ID2D1Factory> {
    // SAFETY: single-threaded factory, used only from the loop thread.
    let factory = unsafe { D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)? };
    Ok(factory)
}

/// A hardware render target bound to the overlay window, plus the two
/// uploaded window images.
pub struct Renderer {
    target: ID2D1HwndRenderTarget,
    bitmaps: Option<(ID2D1Bitmap, ID2D1Bitmap)>,
    width: f32,
    height: f32,
}

impl Renderer {
    /// Binds a render target to `hwnd`, sized to `area`, at 96 DPI so one
    /// device-independent pixel is one physical pixel.
    pub fn new(factory: &ID2D1Factory, hwnd: HWND, area: Rect) -> WindowResult<Self> {
        let props = D2D1_RENDER_TARGET_PROPERTIES {
            r#type: D2D1_RENDER_TARGET_TYPE_HARDWARE,
            pixelFormat: pixel_format(),
            dpiX: 96.0,
            dpiY: 96.0,
            usage: D2D1_RENDER_TARGET_USAGE_NONE,
            minLevel: D2D1_FEATURE_LEVEL_DEFAULT,
        };
        let hwnd_props = D2D1_HWND_RENDER_TARGET_PROPERTIES {
            hwnd,
            pixelSize: D2D_SIZE_U {
                width: u32::try_from(area.width)?,
                height: u32::try_from(area.height)?,
            },
            presentOptions: D2D1_PRESENT_OPTIONS_NONE,
        };

        // SAFETY: both property structs outlive the call.
        let target = unsafe { factory.CreateHwndRenderTarget(&props, &hwnd_props)? };
        // SAFETY: plain state setter on a live target.
        unsafe { target.SetAntialiasMode(D2D1_ANTIALIAS_MODE_ALIASED) };

        Ok(Self {
            target,
            bitmaps: None,
            width: area.width as f32,
            height: area.height as f32,
        })
    }

    /// Uploads both captured images as premultiplied BGRA bitmaps.
    pub fn upload(&mut self, outgoing: &Raster, incoming: &Raster) -> WindowResult<()> {
        let outgoing = self.bitmap_from(outgoing)?;
        let incoming = self.bitmap_from(incoming)?;
        self.bitmaps = Some((outgoing, incoming));
        Ok(())
    }

    fn bitmap_from(&self, raster: &Raster) -> WindowResult<ID2D1Bitmap> {
        let props = D2D1_BITMAP_PROPERTIES {
            pixelFormat: pixel_format(),
            dpiX: 96.0,
            dpiY: 96.0,
        };
        let size = D2D_SIZE_U {
            width: raster.width(),
            height: raster.height(),
        };
        // SAFETY: the pixel slice covers height * pitch bytes and is copied
        // by Direct2D before this returns.
        let bitmap = unsafe {
            self.target.CreateBitmap(
                size,
                Some(raster.pixels().as_ptr() as *const c_void),
                raster.pitch(),
                &props,
            )?
        };
        Ok(bitmap)
    }

    /// Clears, draws incoming then outgoing on top, and presents.
    pub fn draw(&self, frame: &SlideFrame) -> WindowResult<()> {
        let Some((outgoing, incoming)) = &self.bitmaps else {
            return Err("nothing uploaded to draw".into());
        };
        let dest = D2D_RECT_F {
            left: 0.0,
            top: 0.0,
            right: self.width,
            bottom: self.height,
        };

        // SAFETY: BeginDraw/EndDraw bracket every call on the target.
        unsafe {
            self.target.BeginDraw();
            self.target.Clear(Some(&TRANSPARENT as *const _));

            self.target
                .SetTransform(&Matrix3x2::translation(frame.incoming_x as f32, 0.0));
            self.target.DrawBitmap(
                incoming,
                Some(&dest as *const _),
                1.0,
                D2D1_BITMAP_INTERPOLATION_MODE_LINEAR,
                None,
            );

            self.target
                .SetTransform(&Matrix3x2::translation(frame.outgoing_x as f32, 0.0));
            self.target.DrawBitmap(
                outgoing,
                Some(&dest as *const _),
                1.0,
                D2D1_BITMAP_INTERPOLATION_MODE_LINEAR,
                None,
            );

            self.target.SetTransform(&Matrix3x2::identity());
            self.target.EndDraw(None, None)?;
        }
        Ok(())
    }
}
