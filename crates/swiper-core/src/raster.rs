/// A captured window image as 32-bit BGRA pixels, top-down rows.
///
/// GDI leaves the alpha byte of captured pixels at zero. Forcing it to
/// 0xFF with [`make_opaque`](Self::make_opaque) turns the buffer into valid
/// premultiplied data, which is what the renderer expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Raster {
    /// Wraps a pixel buffer. Returns `None` if its length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
        let expected = width as usize * height as usize;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A fully transparent image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn pitch(&self) -> u32 {
        self.width * 4
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Sets every alpha byte to 0xFF.
    pub fn make_opaque(&mut self) {
        for pixel in &mut self.pixels {
            *pixel |= 0xFF00_0000;
        }
    }

    /// Whether every pixel is fully transparent black.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }
}
