use crate::Vec3;

/// A half-line `orig + t * dir`. `dir` is always unit length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub orig: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(orig: Vec3, dir: Vec3) -> Self {
        Self {
            orig,
            dir: dir.unit(),
        }
    }
    pub fn at(&self, t: f64) -> Vec3 {
        self.orig + t * self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalized() {
        let r = Ray::new(Vec3::zero(), Vec3::new(0.0, 3.0, 4.0));
        assert!((r.dir.length() - 1.0).abs() < 1e-12);
        assert_eq!(r.dir, Vec3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_at() {
        let r = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(r.at(3.0), Vec3::new(1.0, 0.0, -3.0));
    }
}
