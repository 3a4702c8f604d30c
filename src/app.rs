//! Application loop state, passed explicitly to whatever drives input
//! and presentation.

use crate::buffer::FrameBuffer;
use crate::camera::{Camera, Movement};
use crate::config::RenderConfig;
use crate::objects::sphere::Sphere;
use crate::renderer::{RenderError, Renderer, Result};
use crate::scene::Scene;
use crate::Vec3;
use log::{info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Window framebuffer size in pixels.
    Resize { width: usize, height: usize },
    /// Absolute cursor position.
    CursorMoved { x: f64, y: f64 },
    Scroll { y_offset: f64 },
    Key { movement: Movement, delta_time: f64 },
}

/// Frames completed in the last full second.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    current: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            current: 0,
        }
    }

    /// Counts a frame; returns the new rate once a second has passed.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            self.current = self.frames;
            self.frames = 0;
            self.window_start = now;
            Some(self.current)
        } else {
            None
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }
}

pub struct Application {
    pub camera: Camera,
    scene: Arc<Scene>,
    renderer: Renderer,
    buffer: FrameBuffer,
    window_size: (usize, usize),
    last_cursor: Option<(f64, f64)>,
    fps: FpsCounter,
}

impl Application {
    pub fn new(
        config: RenderConfig,
        scene: Scene,
        camera_position: Vec3,
        window_width: usize,
        window_height: usize,
    ) -> Result<Self> {
        let (width, height) = config.render_size(window_width, window_height);
        let buffer = FrameBuffer::new(width, height)?;
        let mut camera = Camera::new(camera_position);
        // pixels are square in the rendered image, not the window
        camera.set_aspect_ratio(width, height);
        info!(
            "window {}x{}, rendering at {}x{} with {} threads",
            window_width, window_height, width, height, config.threads
        );
        Ok(Self {
            camera,
            scene: Arc::new(scene),
            renderer: Renderer::new(config)?,
            buffer,
            window_size: (window_width, window_height),
            last_cursor: None,
            fps: FpsCounter::new(Instant::now()),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn window_size(&self) -> (usize, usize) {
        self.window_size
    }

    pub fn fps(&self) -> u32 {
        self.fps.current()
    }

    /// Fails with `SceneBusy` while a render pass still holds the scene.
    pub fn add_sphere(&mut self, sphere: Sphere) -> Result<()> {
        match Arc::get_mut(&mut self.scene) {
            Some(scene) => {
                scene.add(sphere);
                Ok(())
            }
            None => {
                warn!("sphere rejected, scene is in use by a render pass");
                Err(RenderError::SceneBusy)
            }
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Resize { width, height } => self.resize(width, height)?,
            InputEvent::CursorMoved { x, y } => {
                let (last_x, last_y) = self.last_cursor.unwrap_or((x, y));
                self.last_cursor = Some((x, y));
                // screen y grows downwards
                self.camera.apply_mouse_delta(x - last_x, last_y - y);
            }
            InputEvent::Scroll { y_offset } => self.camera.apply_scroll(y_offset),
            InputEvent::Key {
                movement,
                delta_time,
            } => self.camera.apply_keyboard(movement, delta_time),
        }
        Ok(())
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            // minimized
            return Ok(());
        }
        let (render_width, render_height) = self.renderer.config().render_size(width, height);
        self.buffer.resize(render_width, render_height)?;
        self.camera.set_aspect_ratio(render_width, render_height);
        self.window_size = (width, height);
        info!(
            "resized to {}x{}, rendering at {}x{}",
            width, height, render_width, render_height
        );
        Ok(())
    }

    /// Renders one frame and returns it for presentation.
    pub fn frame(&mut self) -> Result<&FrameBuffer> {
        self.renderer
            .render(&self.scene, &self.camera, &mut self.buffer)?;
        if let Some(fps) = self.fps.tick(Instant::now()) {
            info!("{} fps", fps);
        }
        Ok(&self.buffer)
    }
}
