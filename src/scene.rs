use chrono::{DateTime, Utc};

use crate::camera::Camera;
use crate::config::{is_valid_fov_degrees, SceneOptions};
use crate::core::{Context, DrawCommand, FrameState};
use crate::error::{RenderError, Result};
use crate::math::{Color, GeographicProjection};
use crate::scene_mode::SceneMode;
use crate::sun::Sun;
use crate::traits::Primitive;

/// Owns the camera, the render context and what is drawn into it
pub struct Scene {
    /// Color every frame is cleared to
    pub background_color: Color,
    /// Scene time; drives the sun position
    pub time: DateTime<Utc>,
    mode: SceneMode,
    camera: Camera,
    context: Context,
    projection: GeographicProjection,
    sun: Option<Sun>,
    primitives: Vec<Box<dyn Primitive>>,
    frame_number: u64,
    destroyed: bool,
}

impl Scene {
    pub fn new(options: SceneOptions) -> Result<Self> {
        if !is_valid_fov_degrees(options.fov_degrees) {
            return Err(RenderError::InvalidFieldOfView(options.fov_degrees));
        }
        let time = options.time.unwrap_or_else(Utc::now);
        let context = Context::new(options.width, options.height, time)?;

        let mut camera = Camera::new(options.aspect_ratio());
        camera.frustum.fov = options.fov_degrees.to_radians();
        camera.reset_for_mode(options.mode);

        log::debug!(
            "created {}x{} scene in {} mode at {}",
            options.width,
            options.height,
            options.mode,
            time.to_rfc3339()
        );

        Ok(Self {
            background_color: options.background_color,
            time,
            mode: options.mode,
            camera,
            context,
            projection: GeographicProjection::default(),
            sun: options.sun.as_ref().map(|sun| sun.build()),
            primitives: Vec::new(),
            frame_number: 0,
            destroyed: false,
        })
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Switch modes, moving the camera to the new mode's default view
    pub fn set_mode(&mut self, mode: SceneMode) {
        if mode != self.mode {
            log::debug!("scene mode {} -> {}", self.mode, mode);
            self.mode = mode;
            self.camera.reset_for_mode(mode);
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn projection(&self) -> &GeographicProjection {
        &self.projection
    }

    pub fn sun(&self) -> Option<&Sun> {
        self.sun.as_ref()
    }

    pub fn sun_mut(&mut self) -> Option<&mut Sun> {
        self.sun.as_mut()
    }

    /// Assign (or clear) the sun, handing back the previous one
    pub fn set_sun(&mut self, sun: Option<Sun>) -> Option<Sun> {
        std::mem::replace(&mut self.sun, sun)
    }

    /// Additional primitives drawn after the sun, in insertion order
    pub fn primitives_mut(&mut self) -> &mut Vec<Box<dyn Primitive>> {
        &mut self.primitives
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Resize the drawing buffer and keep the camera's aspect ratio in step
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.check_destroyed()?;
        self.context.resize(width, height)?;
        self.camera.frustum.aspect_ratio = f64::from(width) / f64::from(height);
        Ok(())
    }

    /// Render one frame into the drawing buffer. The frame counter only
    /// advances when every primitive updated successfully.
    pub fn render(&mut self) -> Result<()> {
        self.check_destroyed()?;

        let frame_number = self.frame_number + 1;
        self.camera.frustum.aspect_ratio =
            f64::from(self.context.drawing_buffer_width()) / f64::from(self.context.drawing_buffer_height());
        self.context.uniform_state_mut().update(
            frame_number,
            self.mode,
            self.time,
            &self.camera,
            &self.projection,
        );

        let commands = self.update_primitives(frame_number)?;
        self.frame_number = frame_number;

        let background = self.background_color;
        let framebuffer = self.context.framebuffer_mut();
        framebuffer.clear(background);
        for command in &commands {
            command.execute(framebuffer);
        }

        log::trace!("frame {}: {} draw command(s)", self.frame_number, commands.len());
        Ok(())
    }

    fn update_primitives(&mut self, frame_number: u64) -> Result<Vec<DrawCommand>> {
        let frame_state = FrameState {
            frame_number,
            time: self.time,
            mode: self.mode,
            camera: &self.camera,
            uniform_state: self.context.uniform_state(),
            drawing_buffer_width: self.context.drawing_buffer_width(),
            drawing_buffer_height: self.context.drawing_buffer_height(),
        };

        let mut commands = Vec::new();
        if let Some(sun) = self.sun.as_mut() {
            commands.extend(sun.update(&frame_state)?);
        }
        for primitive in self.primitives.iter_mut() {
            if primitive.is_destroyed() {
                return Err(RenderError::Destroyed(primitive.name()));
            }
            commands.extend(primitive.update(&frame_state)?);
        }
        Ok(commands)
    }

    /// Render a frame and read back the pixel at the centre of the drawing buffer
    pub fn render_for_specs(&mut self) -> Result<[u8; 4]> {
        self.render()?;
        let x = self.context.drawing_buffer_width() / 2;
        let y = self.context.drawing_buffer_height() / 2;

        let pixel = self.read_pixels(x, y, 1, 1)?;
        Ok([pixel[0], pixel[1], pixel[2], pixel[3]])
    }

    /// RGBA bytes of a rectangle of the last rendered frame
    pub fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Vec<u8>> {
        self.check_destroyed()?;
        self.context.framebuffer().read_pixels(x, y, width, height)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Destroy the sun and every primitive the scene still holds
    pub fn destroy(&mut self) -> Result<()> {
        self.check_destroyed()?;

        if let Some(sun) = self.sun.as_mut() {
            if !sun.is_destroyed() {
                sun.destroy()?;
            }
        }
        for primitive in self.primitives.iter_mut() {
            if !primitive.is_destroyed() {
                primitive.destroy()?;
            }
        }

        self.destroyed = true;
        log::debug!("scene destroyed after {} frame(s)", self.frame_number);
        Ok(())
    }

    /// Alias of [`Scene::destroy`] for test teardown
    pub fn destroy_for_specs(&mut self) -> Result<()> {
        self.destroy()
    }

    fn check_destroyed(&self) -> Result<()> {
        if self.destroyed {
            Err(RenderError::Destroyed("Scene"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::Cell;
    use std::rc::Rc;

    fn options() -> SceneOptions {
        SceneOptions {
            width: 8,
            height: 8,
            background_color: Color::RED,
            time: Some(Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap()),
            ..SceneOptions::default()
        }
    }

    struct CountingPrimitive {
        updates: Rc<Cell<usize>>,
        destroyed: bool,
    }

    impl CountingPrimitive {
        fn new(destroyed: bool) -> (Self, Rc<Cell<usize>>) {
            let updates = Rc::new(Cell::new(0));
            (Self { updates: Rc::clone(&updates), destroyed }, updates)
        }
    }

    impl Primitive for CountingPrimitive {
        fn update(&mut self, _frame_state: &FrameState) -> Result<Option<DrawCommand>> {
            self.updates.set(self.updates.get() + 1);
            Ok(None)
        }

        fn is_destroyed(&self) -> bool {
            self.destroyed
        }

        fn destroy(&mut self) -> Result<()> {
            self.destroyed = true;
            Ok(())
        }
    }

    #[test]
    fn clears_to_background() {
        let mut scene = Scene::new(options()).unwrap();
        scene.render().unwrap();
        let pixels = scene.read_pixels(0, 0, 8, 8).unwrap();
        assert!(pixels.chunks(4).all(|p| p == [255, 0, 0, 255]));
        assert_eq!(scene.frame_number(), 1);
    }

    #[test]
    fn rejects_empty_drawing_buffer() {
        let err = Scene::new(SceneOptions { width: 0, ..options() }).err();
        assert_eq!(err, Some(RenderError::InvalidDimensions { width: 0, height: 8 }));
    }

    #[test]
    fn set_sun_returns_previous() {
        let mut scene = Scene::new(options()).unwrap();
        assert!(scene.set_sun(Some(Sun::new())).is_none());
        assert!(scene.sun().is_some());
        assert!(scene.set_sun(None).is_some());
        assert!(scene.sun().is_none());
    }

    #[test]
    fn sun_from_options() {
        let scene = Scene::new(SceneOptions {
            sun: Some(crate::config::SunOptions { show: false, glow_factor: 3.0 }),
            ..options()
        })
        .unwrap();

        let sun = scene.sun().unwrap();
        assert!(!sun.show);
        assert_eq!(sun.glow_factor(), 3.0);
    }

    #[test]
    fn set_mode_resets_camera() {
        let mut scene = Scene::new(options()).unwrap();
        scene.set_mode(SceneMode::ColumbusView);
        assert_eq!(scene.mode(), SceneMode::ColumbusView);
        assert_eq!(scene.camera().mode(), SceneMode::ColumbusView);
        assert_eq!(scene.camera().direction, glam::DVec3::NEG_Z);
    }

    #[test]
    fn primitives_are_updated_each_frame() {
        let mut scene = Scene::new(options()).unwrap();
        let (primitive, updates) = CountingPrimitive::new(false);
        scene.primitives_mut().push(Box::new(primitive));

        scene.render().unwrap();
        scene.render().unwrap();
        assert_eq!(updates.get(), 2);

        scene.destroy().unwrap();
        assert!(scene.primitives_mut()[0].is_destroyed());
    }

    #[test]
    fn destroyed_primitive_fails_render() {
        let mut scene = Scene::new(options()).unwrap();
        let (primitive, updates) = CountingPrimitive::new(true);
        scene.primitives_mut().push(Box::new(primitive));
        assert_eq!(scene.render(), Err(RenderError::Destroyed("Primitive")));
        assert_eq!(updates.get(), 0);
    }

    #[test]
    fn failed_render_keeps_frame_number() {
        let mut scene = Scene::new(options()).unwrap();
        scene.render().unwrap();

        let mut sun = Sun::new();
        sun.destroy().unwrap();
        scene.set_sun(Some(sun));

        assert_eq!(scene.render(), Err(RenderError::Destroyed("Sun")));
        assert_eq!(scene.frame_number(), 1);

        scene.set_sun(None);
        scene.render().unwrap();
        assert_eq!(scene.frame_number(), 2);
    }

    #[test]
    fn rejects_out_of_range_fov() {
        for fov in [0.0, -30.0, 180.0] {
            let err = Scene::new(SceneOptions { fov_degrees: fov, ..options() }).err();
            assert_eq!(err, Some(RenderError::InvalidFieldOfView(fov)));
        }

        let err = Scene::new(SceneOptions { fov_degrees: f64::NAN, ..options() }).err();
        assert!(matches!(err, Some(RenderError::InvalidFieldOfView(f)) if f.is_nan()));
    }

    #[test]
    fn resize_changes_readback_area() {
        let mut scene = Scene::new(options()).unwrap();
        scene.resize(4, 2).unwrap();
        scene.render().unwrap();
        assert_eq!(scene.read_pixels(0, 0, 4, 2).unwrap().len(), 4 * 2 * 4);
        assert!(scene.read_pixels(0, 0, 8, 8).is_err());
        assert_eq!(scene.camera().frustum.aspect_ratio, 2.0);
    }

    #[test]
    fn destroyed_scene_refuses_to_render() {
        let mut scene = Scene::new(options()).unwrap();
        scene.set_sun(Some(Sun::new()));
        scene.destroy_for_specs().unwrap();

        assert!(scene.is_destroyed());
        assert!(scene.sun().unwrap().is_destroyed());
        assert_eq!(scene.render(), Err(RenderError::Destroyed("Scene")));
        assert_eq!(scene.destroy(), Err(RenderError::Destroyed("Scene")));
    }
}
