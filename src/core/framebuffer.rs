use std::io::{self, Write};

use crate::error::{RenderError, Result};
use crate::math::Color;

/// One framebuffer pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for Rgba8 {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.to_bytes();
        Self::new(r, g, b, a)
    }
}

/// RGBA drawing buffer, rows top to bottom
#[derive(Clone, Debug)]
pub struct Framebuffer {
    pixels: Vec<Rgba8>,
    width: u32,
    height: u32,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        Ok(Self {
            pixels: vec![Rgba8::default(); (width as usize) * (height as usize)],
            width,
            height,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(Rgba8::from(color));
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    /// Source-over blend of a straight-alpha `[r, g, b, a]` color in `[0, 1]`.
    /// Out-of-bounds writes are ignored.
    pub fn blend(&mut self, x: u32, y: u32, source: [f32; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }

        let alpha = source[3].clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let idx = self.index(x, y);
        let dst = self.pixels[idx];
        let mix = |src: f32, dst: u8| -> u8 {
            let dst = f32::from(dst) / 255.0;
            ((src.clamp(0.0, 1.0) * alpha + dst * (1.0 - alpha)) * 255.0).round() as u8
        };

        let out_alpha = alpha + f32::from(dst.a) / 255.0 * (1.0 - alpha);
        self.pixels[idx] = Rgba8::new(
            mix(source[0], dst.r),
            mix(source[1], dst.g),
            mix(source[2], dst.b),
            (out_alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        );
    }

    /// Copy a rectangle out of the buffer as tightly packed RGBA bytes
    pub fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Vec<u8>> {
        let fits = width > 0
            && height > 0
            && x.checked_add(width).is_some_and(|right| right <= self.width)
            && y.checked_add(height).is_some_and(|bottom| bottom <= self.height);
        if !fits {
            return Err(RenderError::ReadOutOfBounds {
                x,
                y,
                width,
                height,
                buffer_width: self.width,
                buffer_height: self.height,
            });
        }

        let mut out = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for row in y..y + height {
            let start = self.index(x, row);
            let end = start + width as usize;
            out.extend_from_slice(bytemuck::cast_slice(&self.pixels[start..end]));
        }
        Ok(out)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Binary PPM (P6); alpha is dropped
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)?;
        let rgb: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b])
            .collect();
        writer.write_all(&rgb)?;
        writer.flush()
    }
}
