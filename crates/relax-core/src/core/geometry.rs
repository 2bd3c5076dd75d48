use nalgebra::Point3;

/// Euclidean distance between two particle positions.
#[inline]
pub fn distance(a: &Point3<f32>, b: &Point3<f32>) -> f32 {
    (b - a).norm()
}
