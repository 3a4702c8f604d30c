use crate::objects::hit::{HitRecord, Hitable};
use crate::{Ray, Vec3};

/// Radius must be positive; a degenerate sphere yields NaN normals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub albedo: Vec3,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64, albedo: Vec3) -> Self {
        debug_assert!(radius > 0., "sphere radius must be positive");
        Self {
            center,
            radius,
            albedo,
        }
    }
}

impl Hitable for Sphere {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        let oc = r.orig - self.center;
        let a = r.dir.squared_length();
        let b = 2.0 * (oc * r.dir);
        let c = oc.squared_length() - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        // a grazing ray counts as a miss
        if discriminant <= 0. {
            return None;
        }
        let sqrt_d = discriminant.sqrt();

        let in_range = |root: f64| root > t_min && root < t_max;
        let mut root = (-b - sqrt_d) / (2.0 * a);
        if !in_range(root) {
            root = (-b + sqrt_d) / (2.0 * a);
            if !in_range(root) {
                return None;
            }
        }

        let outward_normal = (r.at(root) - self.center) / self.radius;
        Some(HitRecord::new(root, r, outward_normal, self.albedo))
    }
}
