use crate::config::{
    DEFAULT_CAMERA_SPEED, DEFAULT_FOV, DEFAULT_MOUSE_SENSITIVITY, DEFAULT_PITCH, DEFAULT_YAW,
    FOV_RANGE, PITCH_LIMIT,
};
use crate::vec3::degrees_to_radians;
use crate::{Ray, Vec3};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-look pinhole camera.
///
/// `front`, `right` and `up` are derived from yaw and pitch and only
/// recomputed when those change, never per frame or per ray.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    /// degrees
    yaw: f64,
    /// degrees
    pitch: f64,
    pub movement_speed: f64,
    pub mouse_sensitivity: f64,
    /// Vertical field of view in degrees.
    zoom: f64,
    pub aspect_ratio: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zero())
    }
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        let mut cam = Self {
            position,
            front: Vec3::new(0., 0., -1.),
            right: Vec3::new(1., 0., 0.),
            up: Vec3::new(0., 1., 0.),
            world_up: Vec3::new(0., 1., 0.),
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_CAMERA_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            zoom: DEFAULT_FOV,
            aspect_ratio: 1.0,
        };
        cam.update_camera_vectors();
        cam
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }
    pub fn right(&self) -> Vec3 {
        self.right
    }
    pub fn up(&self) -> Vec3 {
        self.up
    }
    pub fn yaw(&self) -> f64 {
        self.yaw
    }
    pub fn pitch(&self) -> f64 {
        self.pitch
    }
    pub fn fov(&self) -> f64 {
        self.zoom
    }

    pub fn set_aspect_ratio(&mut self, width: usize, height: usize) {
        self.aspect_ratio = width as f64 / height as f64;
    }

    /// Moves along `front`/`right` by `movement_speed * delta_time`.
    pub fn apply_keyboard(&mut self, direction: Movement, delta_time: f64) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
        }
    }

    /// Turns the camera; pitch is kept within ±89° so `front` never aligns
    /// with the world up vector.
    pub fn apply_mouse_delta(&mut self, x_offset: f64, y_offset: f64) {
        self.apply_mouse_delta_with(x_offset, y_offset, true)
    }

    pub fn apply_mouse_delta_with(&mut self, x_offset: f64, y_offset: f64, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_camera_vectors();
    }

    pub fn apply_scroll(&mut self, y_offset: f64) {
        let (min, max) = FOV_RANGE;
        self.zoom = (self.zoom - y_offset).clamp(min, max);
    }

    /// `u` and `v` are in [-1, 1], with `v = 1` at the top of the image.
    pub fn get_ray(&self, u: f64, v: f64) -> Ray {
        let h = f64::tan(degrees_to_radians(self.zoom) / 2.);
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;
        Ray::new(
            self.position,
            self.front + self.right * (u * viewport_width) + self.up * (v * viewport_height),
        )
    }

    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (degrees_to_radians(self.yaw), degrees_to_radians(self.pitch));
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .unit();
        self.right = Vec3::cross(self.front, self.world_up).unit();
        self.up = Vec3::cross(self.right, self.front).unit();
    }
}
