mod aabb;
mod approach;
mod ray;
mod sphere;

pub use aabb::AABB;
pub use approach::{approach_speed, approach_step, ARRIVAL_EPSILON};
pub use ray::{intersect_aabb, Ray};
pub use sphere::intersect_sphere;
