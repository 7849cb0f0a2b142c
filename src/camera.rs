use cgmath::{Deg, Matrix3, Point3, SquareMatrix, Vector3};

/// Free-flying camera. Orientation is stored as a rotation matrix applied to
/// the canonical axes: right +X, up +Y, looking down -Z.
#[derive(Clone, Debug)]
pub struct Camera {
    pub location: Point3<f32>,
    pub rot_mat: Matrix3<f32>,
}

impl Camera {
    pub fn new(location: Point3<f32>) -> Self {
        Self {
            location,
            rot_mat: Matrix3::identity(),
        }
    }

    /// Yaw around world up, pitch around the camera's own side axis.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        let rot = Matrix3::from_angle_y(Deg(yaw))
            * Matrix3::from_axis_angle(self.side_vector(), Deg(pitch));
        self.rot_mat = rot * self.rot_mat;
    }

    pub fn position(&self) -> Point3<f32> {
        self.location
    }

    pub fn look_vector(&self) -> Vector3<f32> {
        self.rot_mat * Vector3::new(0.0, 0.0, -1.0)
    }

    pub fn up_vector(&self) -> Vector3<f32> {
        self.rot_mat * Vector3::new(0.0, 1.0, 0.0)
    }

    pub fn side_vector(&self) -> Vector3<f32> {
        self.rot_mat * Vector3::new(1.0, 0.0, 0.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 5.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn default_axes() {
        let camera = Camera::default();

        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 5.0));
        assert!(close(camera.look_vector(), Vector3::new(0.0, 0.0, -1.0)));
        assert!(close(camera.up_vector(), Vector3::new(0.0, 1.0, 0.0)));
        assert!(close(camera.side_vector(), Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn yaw_turns_left() {
        let mut camera = Camera::default();
        camera.rotate(90.0, 0.0);

        assert!(close(camera.look_vector(), Vector3::new(-1.0, 0.0, 0.0)));
        assert!(close(camera.up_vector(), Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn pitch_up() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 90.0);

        assert!(close(camera.look_vector(), Vector3::new(0.0, 1.0, 0.0)));
        assert!(close(camera.up_vector(), Vector3::new(0.0, 0.0, 1.0)));
    }
}
