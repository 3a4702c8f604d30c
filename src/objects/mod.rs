pub mod hit;
pub mod sphere;
