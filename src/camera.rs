use glam::{Mat4, Vec3};

const DEFAULT_UP: Vec3 = Vec3::Y;

/// What the render scenes need to know about whichever camera is active.
pub trait CameraInterface {
    fn view_matrix(&self) -> Mat4;
    fn projection_matrix(&self) -> Mat4;
    fn position(&self) -> Vec3;
}

/// Snapshot of a camera as stored in each sub-scene's global data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    pub position: Vec3,
}

impl CameraState {
    pub fn capture(camera: &dyn CameraInterface) -> Self {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        Self { view, projection, view_projection: projection * view, position: camera.position() }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self { view: Mat4::IDENTITY, projection: Mat4::IDENTITY, view_projection: Mat4::IDENTITY, position: Vec3::ZERO }
    }
}

/// Simple perspective camera used by tools and tests.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_radians: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera3D {
    pub fn new(position: Vec3, target: Vec3, fov_y_radians: f32, near: f32, far: f32) -> Self {
        Self { position, target, up: DEFAULT_UP, fov_y_radians, aspect: 16.0 / 9.0, near, far }
    }
}

impl CameraInterface for Camera3D {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_radians, self.aspect.max(0.0001), self.near, self.far)
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
