use std::mem;

use swiper_core::raster::Raster;
use swiper_core::stage::CaptureMode;
use swiper_core::WindowResult;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, CreateCompatibleDC, CreateDIBSection, DIB_RGB_COLORS,
    DeleteDC, DeleteObject, GetDC, HBITMAP, HDC, HGDIOBJ, ReleaseDC, SelectObject,
};
use windows::Win32::Storage::Xps::{PRINT_WINDOW_FLAGS, PrintWindow};

/// `PW_RENDERFULLCONTENT`: include DirectComposition and DirectX content.
const PW_RENDERFULLCONTENT: PRINT_WINDOW_FLAGS = PRINT_WINDOW_FLAGS(2);

/// Memory DC with a top-down 32-bit DIB selected into it.
struct DibCanvas {
    screen: HDC,
    dc: HDC,
    bitmap: HBITMAP,
    previous: HGDIOBJ,
    bits: *mut u32,
    len: usize,
}

impl DibCanvas {
    fn new(width: u32, height: u32) -> WindowResult<Self> {
        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: i32::try_from(width)?,
                biHeight: -i32::try_from(height)?, // top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        // SAFETY: every handle created here is released in Drop, in
        // reverse order, including on the early-return paths below.
        unsafe {
            let screen = GetDC(None);
            let dc = CreateCompatibleDC(Some(screen));
            let mut bits = std::ptr::null_mut();
            let bitmap = match CreateDIBSection(Some(dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
            {
                Ok(b) if !bits.is_null() => b,
                Ok(b) => {
                    let _ = DeleteObject(b.into());
                    let _ = DeleteDC(dc);
                    ReleaseDC(None, screen);
                    return Err("CreateDIBSection returned no pixel buffer".into());
                }
                Err(e) => {
                    let _ = DeleteDC(dc);
                    ReleaseDC(None, screen);
                    return Err(e.into());
                }
            };
            let previous = SelectObject(dc, bitmap.into());
            Ok(Self {
                screen,
                dc,
                bitmap,
                previous,
                bits: bits as *mut u32,
                len: width as usize * height as usize,
            })
        }
    }

    fn pixels(&self) -> Vec<u32> {
        // SAFETY: `bits` points at `len` pixels owned by the DIB section,
        // which stays alive until Drop.
        unsafe { std::slice::from_raw_parts(self.bits, self.len).to_vec() }
    }
}

impl Drop for DibCanvas {
    fn drop(&mut self) {
        // SAFETY: releasing exactly what new() acquired.
        unsafe {
            SelectObject(self.dc, self.previous);
            let _ = DeleteObject(self.bitmap.into());
            let _ = DeleteDC(self.dc);
            ReleaseDC(None, self.screen);
        }
    }
}

/// Renders a window into an off-screen `width` x `height` image.
///
/// Asks for full content first. When the window refuses (protected or
/// unavailable surfaces), retries with a plain `PrintWindow`, which
/// draws whatever the window can render through GDI.
pub fn capture_window(hwnd: HWND, width: u32, height: u32) -> WindowResult<(Raster, CaptureMode)> {
    let canvas = DibCanvas::new(width, height)?;

    // SAFETY: the canvas DC is valid for the lifetime of `canvas`.
    let mode = unsafe {
        if PrintWindow(hwnd, canvas.dc, PW_RENDERFULLCONTENT).as_bool() {
            CaptureMode::Full
        } else {
            let _ = PrintWindow(hwnd, canvas.dc, PRINT_WINDOW_FLAGS(0));
            CaptureMode::BestEffort
        }
    };

    let raster = Raster::from_pixels(width, height, canvas.pixels())
        .ok_or("captured buffer does not match the requested size")?;
    Ok((raster, mode))
}
