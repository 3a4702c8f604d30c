//! Interactive CPU ray tracer for scenes of spheres.
//!
//! Each frame casts one ray per pixel from a pinhole [`Camera`], finds the
//! nearest sphere in a [`Scene`] and writes an ambient plus diffuse color
//! into a [`FrameBuffer`]. The [`Renderer`] splits the frame into bands of
//! rows, one per thread of a persistent [`WorkerPool`].

#![allow(clippy::float_cmp)]
#[macro_use]
extern crate lazy_static;

pub mod app;
pub mod buffer;
pub mod camera;
pub mod config;
pub mod objects;
pub mod pool;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod vec3;

pub use app::{Application, InputEvent};
pub use buffer::FrameBuffer;
pub use camera::{Camera, Movement};
pub use config::RenderConfig;
pub use objects::hit::{HitRecord, Hitable};
pub use objects::sphere::Sphere;
pub use pool::{PoolError, TaskHandle, WorkerPool};
pub use ray::Ray;
pub use renderer::{RenderError, Renderer};
pub use scene::Scene;
pub use vec3::Vec3;
