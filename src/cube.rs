//! Unit cube centered at the origin, positions only.

#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; 24] = [
    -0.5, -0.5, -0.5,
     0.5, -0.5, -0.5,
     0.5,  0.5, -0.5,
    -0.5,  0.5, -0.5,
    -0.5, -0.5,  0.5,
     0.5, -0.5,  0.5,
     0.5,  0.5,  0.5,
    -0.5,  0.5,  0.5,
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, // front
    1, 5, 6, 6, 2, 1, // right
    5, 4, 7, 7, 6, 5, // back
    4, 0, 3, 3, 7, 4, // left
    3, 2, 6, 6, 7, 3, // top
    4, 5, 1, 1, 0, 4, // bottom
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_triangles() {
        assert_eq!(CUBE_INDICES.len(), 36);
        assert_eq!(CUBE_INDICES.chunks(3).count(), 12);
    }

    #[test]
    fn every_corner_used() {
        for v in 0..8 {
            assert!(CUBE_INDICES.contains(&v), "corner {v} unused");
        }
        assert!(CUBE_INDICES.iter().all(|&i| i < 8));
    }

    #[test]
    fn centered_unit_cube() {
        assert!(CUBE_VERTICES.iter().all(|c| c.abs() == 0.5));
        let sum: f32 = CUBE_VERTICES.iter().sum();
        assert_eq!(sum, 0.0);
    }
}
