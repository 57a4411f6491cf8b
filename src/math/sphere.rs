use glam::Vec3;

/// Nearest positive hit distance of a ray against a sphere
pub fn intersect_sphere(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let oc = ray_origin - center;
    let a = ray_dir.dot(ray_dir);
    let half_b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t = (-half_b - sqrt_d) / a;
    if t > 1e-4 {
        return Some(t);
    }

    let t = (-half_b + sqrt_d) / a;
    (t > 1e-4).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_intersection_hit() {
        let t = intersect_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert!((t.unwrap() - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_sphere_intersection_miss() {
        let t = intersect_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert!(t.is_none());
    }

    #[test]
    fn test_sphere_intersection_from_inside() {
        let t = intersect_sphere(Vec3::ZERO, Vec3::Y, Vec3::ZERO, 2.0);
        assert!((t.unwrap() - 2.0).abs() < 0.01);
    }
}
