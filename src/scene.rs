use crate::objects::hit::{HitRecord, Hitable};
use crate::objects::sphere::Sphere;
use crate::{Ray, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RANDOM_FIELD_SEED: u64 = 0x5eed;

/// Ordered list of spheres.
///
/// A scene is read-only while a frame is being rendered. The renderer holds
/// it behind an `Arc`, so callers add spheres through `Arc::get_mut` once no
/// pass is in flight.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn clear(&mut self) {
        self.spheres.clear();
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }
}

impl Hitable for Scene {
    /// Linear scan; every candidate is tested against the closest hit found
    /// so far, so only a strictly nearer sphere can replace the record.
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        self.spheres[..].hit(r, t_min, t_max)
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            spheres: iter.into_iter().collect(),
        }
    }
}

/// Red, green and blue unit spheres in front of a camera looking down -z.
pub fn three_spheres_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add(Sphere::new(Vec3::new(0., 0., -5.), 1.0, Vec3::new(1.0, 0.2, 0.2)));
    scene.add(Sphere::new(Vec3::new(2., 0., -6.), 1.0, Vec3::new(0.2, 1.0, 0.2)));
    scene.add(Sphere::new(Vec3::new(-2., 0., -4.), 1.0, Vec3::new(0.2, 0.2, 1.0)));
    scene
}

/// A seeded grid of small spheres resting on a large ground sphere.
pub fn random_field_scene() -> Scene {
    let mut rng = StdRng::seed_from_u64(RANDOM_FIELD_SEED);
    let mut scene = Scene::new();
    scene.add(Sphere::new(
        Vec3::new(0., -1000., 0.),
        999.,
        Vec3::new(0.5, 0.5, 0.5),
    ));
    for a in -6..6 {
        for b in -12..0 {
            let center = Vec3::new(
                a as f64 + 0.8 * rng.gen::<f64>(),
                -0.8,
                b as f64 + 0.8 * rng.gen::<f64>(),
            );
            let albedo = Vec3::new(rng.gen(), rng.gen(), rng.gen());
            scene.add(Sphere::new(center, 0.2, albedo));
        }
    }
    scene
}

pub fn select_scene(index: usize) -> Option<Scene> {
    match index {
        0 => Some(three_spheres_scene()),
        1 => Some(random_field_scene()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlapping() -> (Sphere, Sphere) {
        let near = Sphere::new(Vec3::new(0., 0., -4.), 1.5, Vec3::new(0., 0., 1.));
        let far = Sphere::new(Vec3::new(0., 0., -6.), 1.5, Vec3::new(1., 0., 0.));
        (near, far)
    }

    #[test]
    fn test_nearest_hit_regardless_of_order() {
        let (near, far) = overlapping();
        let r = Ray::new(Vec3::zero(), Vec3::new(0., 0., -1.));
        for scene in [
            Scene::from_iter([near, far]),
            Scene::from_iter([far, near]),
        ] {
            let rec = scene.hit(&r, 0.001, 1000.).unwrap();
            assert_eq!(rec.albedo, near.albedo);
            assert!((rec.t - 2.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_t_max_bounds_the_query() {
        let (near, far) = overlapping();
        let scene = Scene::from_iter([far, near]);
        let r = Ray::new(Vec3::zero(), Vec3::new(0., 0., -1.));
        assert!(scene.hit(&r, 0.001, 2.0).is_none());
    }

    #[test]
    fn test_empty_scene_misses() {
        let r = Ray::new(Vec3::zero(), Vec3::new(0., 0., -1.));
        assert!(Scene::new().hit(&r, 0.001, 1000.).is_none());
        assert!(Scene::new().is_empty());
    }

    #[test]
    fn test_presets() {
        assert_eq!(select_scene(0).map(|s| s.len()), Some(3));
        let field = select_scene(1).unwrap();
        assert_eq!(field.len(), 1 + 12 * 12);
        // seeded, so identical between calls
        assert_eq!(field.spheres(), random_field_scene().spheres());
        assert!(select_scene(2).is_none());
    }
}
