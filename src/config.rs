use crate::Vec3;
use std::num::NonZeroUsize;

pub const DEFAULT_WIDTH: usize = 800;
pub const DEFAULT_HEIGHT: usize = 600;

pub const RENDER_SCALE: f64 = 0.5;
pub const SAMPLES_PER_PIXEL: usize = 1;
pub const RAY_T_MIN: f64 = 0.001;
pub const RAY_T_MAX: f64 = 1000.0;
pub const AMBIENT_STRENGTH: f64 = 0.1;

pub const DEFAULT_CAMERA_SPEED: f64 = 5.0;
pub const DEFAULT_MOUSE_SENSITIVITY: f64 = 0.05;
pub const DEFAULT_FOV: f64 = 45.0;
pub const DEFAULT_YAW: f64 = -90.0;
pub const DEFAULT_PITCH: f64 = 0.0;
pub const PITCH_LIMIT: f64 = 89.0;
pub const FOV_RANGE: (f64, f64) = (1.0, 90.0);

lazy_static! {
    pub static ref LIGHT_DIRECTION: Vec3 = Vec3::new(1., 1., -1.).unit();
}

/// Number of hardware threads, falling back to one when it is unknown.
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub threads: usize,
    /// Render resolution relative to the window resolution.
    pub render_scale: f64,
    /// Only 1 is supported.
    pub samples_per_pixel: usize,
    pub t_min: f64,
    pub t_max: f64,
    pub ambient: f64,
    pub light_dir: Vec3,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            threads: hardware_concurrency(),
            render_scale: RENDER_SCALE,
            samples_per_pixel: SAMPLES_PER_PIXEL,
            t_min: RAY_T_MIN,
            t_max: RAY_T_MAX,
            ambient: AMBIENT_STRENGTH,
            light_dir: *LIGHT_DIRECTION,
        }
    }
}

impl RenderConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Render resolution for a window of the given size, never below 2x2.
    pub fn render_size(&self, window_width: usize, window_height: usize) -> (usize, usize) {
        let scale = |d: usize| ((d as f64 * self.render_scale) as usize).max(2);
        (scale(window_width), scale(window_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert!(config.threads >= 1);
        assert_eq!(config.samples_per_pixel, 1);
        assert!((config.light_dir.length() - 1.0).abs() < 1e-12);
        assert!(config.light_dir.x > 0. && config.light_dir.y > 0. && config.light_dir.z < 0.);
    }

    #[test]
    fn test_render_size() {
        let config = RenderConfig::default();
        assert_eq!(config.render_size(DEFAULT_WIDTH, DEFAULT_HEIGHT), (400, 300));
        assert_eq!(config.render_size(1, 3), (2, 2));
    }
}
