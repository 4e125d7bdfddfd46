use std::sync::Arc;

use glam::DVec2;

use super::framebuffer::Framebuffer;
use crate::sun_texture::SunTexture;

/// Work queued by a primitive's update and executed by the scene
#[derive(Clone, Debug)]
pub enum DrawCommand {
    /// Screen-aligned textured square
    Billboard {
        /// Window coordinates of the square's centre
        center: DVec2,
        /// Half the side length, in pixels
        half_extent: f64,
        texture: Arc<SunTexture>,
    },
}

impl DrawCommand {
    /// Rasterize into `framebuffer`: every pixel whose centre falls inside
    /// the billboard, plus the pixel holding the billboard centre, samples the
    /// texture and is blended over the buffer.
    pub fn execute(&self, framebuffer: &mut Framebuffer) {
        match self {
            DrawCommand::Billboard { center, half_extent, texture } => {
                draw_billboard(framebuffer, *center, *half_extent, texture)
            }
        }
    }
}

fn draw_billboard(framebuffer: &mut Framebuffer, center: DVec2, half_extent: f64, texture: &SunTexture) {
    if half_extent <= 0.0 {
        return;
    }

    let (width, height) = framebuffer.dimensions();
    let min = center - DVec2::splat(half_extent);
    let max = center + DVec2::splat(half_extent);

    // Pixel (x, y) covers [x, x + 1); its centre is inside when x + 0.5 lies in [min, max)
    let mut first_x = (min.x - 0.5).ceil().max(0.0);
    let mut first_y = (min.y - 0.5).ceil().max(0.0);
    let mut last_x = (max.x - 0.5).ceil().min(f64::from(width));
    let mut last_y = (max.y - 0.5).ceil().min(f64::from(height));

    // The pixel holding the centre is always shaded, even when the square misses its centre
    let center_pixel = center.floor();
    let center_on_screen = center_pixel.x >= 0.0
        && center_pixel.y >= 0.0
        && center_pixel.x < f64::from(width)
        && center_pixel.y < f64::from(height);
    if center_on_screen {
        first_x = first_x.min(center_pixel.x);
        first_y = first_y.min(center_pixel.y);
        last_x = last_x.max(center_pixel.x + 1.0);
        last_y = last_y.max(center_pixel.y + 1.0);
    }
    if first_x >= last_x || first_y >= last_y {
        return;
    }

    let size = half_extent * 2.0;
    for y in first_y as u32..last_y as u32 {
        let v = (f64::from(y) + 0.5 - min.y) / size;
        for x in first_x as u32..last_x as u32 {
            let texel = if center_on_screen && f64::from(x) == center_pixel.x && f64::from(y) == center_pixel.y {
                texture.sample(0.5, 0.5)
            } else {
                texture.sample((f64::from(x) + 0.5 - min.x) / size, v)
            };
            framebuffer.blend(x, y, texel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;

    fn texture() -> Arc<SunTexture> {
        Arc::new(SunTexture::generate(0.0, 64))
    }

    #[test]
    fn billboard_covers_center_pixel() {
        let mut fb = Framebuffer::new(9, 9).unwrap();
        fb.clear(Color::RED);

        let command = DrawCommand::Billboard {
            center: DVec2::new(4.5, 4.5),
            half_extent: 3.0,
            texture: texture(),
        };
        command.execute(&mut fb);

        assert_ne!(fb.pixel(4, 4).unwrap().to_array(), [255, 0, 0, 255]);
        assert_eq!(fb.pixel(0, 0).unwrap().to_array(), [255, 0, 0, 255]);
    }

    #[test]
    fn sub_pixel_billboard_on_pixel_boundary_shades_center_pixel() {
        let mut fb = Framebuffer::new(640, 1).unwrap();
        fb.clear(Color::RED);

        let command = DrawCommand::Billboard {
            center: DVec2::new(320.0, 0.5),
            half_extent: 0.5,
            texture: texture(),
        };
        command.execute(&mut fb);

        assert_ne!(fb.pixel(320, 0).unwrap().to_array(), [255, 0, 0, 255]);
    }

    #[test]
    fn billboard_off_screen_draws_nothing() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.clear(Color::RED);

        let command = DrawCommand::Billboard {
            center: DVec2::new(-50.0, 2.0),
            half_extent: 10.0,
            texture: texture(),
        };
        command.execute(&mut fb);

        assert!(fb.as_bytes().chunks(4).all(|p| p == [255, 0, 0, 255]));
    }

    #[test]
    fn billboard_larger_than_buffer_is_clipped() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        fb.clear(Color::RED);

        let command = DrawCommand::Billboard {
            center: DVec2::new(1.0, 1.0),
            half_extent: 1000.0,
            texture: texture(),
        };
        command.execute(&mut fb);

        assert!(fb.as_bytes().chunks(4).all(|p| p != [255, 0, 0, 255]));
    }
}
