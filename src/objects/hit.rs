use crate::vec3::Vec3;
use crate::Ray;

/// Result of a successful intersection test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub t: f64,
    pub p: Vec3,
    /// Outward unit normal, not flipped towards the ray.
    pub normal: Vec3,
    pub albedo: Vec3,
}

impl HitRecord {
    pub fn new(t: f64, r: &Ray, outward_normal: Vec3, albedo: Vec3) -> Self {
        Self {
            t,
            p: r.at(t),
            normal: outward_normal,
            albedo,
        }
    }
}

pub trait Hitable {
    /// Nearest intersection with `t` strictly inside `(t_min, t_max)`.
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord>;
}

impl<H: Hitable> Hitable for [H] {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        let mut closest_so_far = t_max;
        let mut res = None;
        for object in self {
            if let Some(temp_rec) = object.hit(r, t_min, closest_so_far) {
                closest_so_far = temp_rec.t;
                res = Some(temp_rec);
            }
        }
        res
    }
}
