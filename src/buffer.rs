use crate::renderer::{RenderError, Result};
use crate::vec3::quantize;
use crate::Vec3;
use image::{ImageBuffer, RgbImage};
use std::ops::Range;
use std::path::Path;

pub const BYTES_PER_PIXEL: usize = 3;

/// Row-major RGB8 pixel grid, the target of a render pass.
///
/// Both dimensions are at least 2 so that pixel centers map onto [-1, 1]
/// without dividing by zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width < 2 || height < 2 {
        return Err(RenderError::DegenerateBuffer { width, height });
    }
    Ok(())
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; width * height * BYTES_PER_PIXEL],
        })
    }

    /// Changes the dimensions and clears every pixel to black.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height * BYTES_PER_PIXEL, 0);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_bytes(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    pub fn clear(&mut self) {
        self.fill([0, 0, 0]);
    }

    pub fn fill(&mut self, rgb: [u8; 3]) {
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgb);
        }
    }

    /// Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vec3) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * BYTES_PER_PIXEL;
            self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&[
                quantize(color.x),
                quantize(color.y),
                quantize(color.z),
            ]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * BYTES_PER_PIXEL;
            Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
        } else {
            None
        }
    }

    /// Contiguous RGB8 bytes, `width * height * 3` long, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable bytes of the given rows.
    pub(crate) fn rows_mut(&mut self, rows: Range<usize>) -> &mut [u8] {
        let row_bytes = self.row_bytes();
        &mut self.pixels[rows.start * row_bytes..rows.end * row_bytes]
    }

    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let [r, g, b] = self.pixel(x as usize, y as usize).unwrap_or_default();
            image::Rgb([r, g, b])
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}
