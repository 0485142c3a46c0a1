//! Orbital 3D camera used to view the atom

use glam::{Mat4, Vec2, Vec3, Vec4};

/// 3D perspective camera with orbital controls
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    // Orbital parameters
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// A world-space point mapped onto the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Pixel position, origin at the top-left of the viewport
    pub position: Vec2,
    /// Normalized depth (0 = near plane, 1 = far plane)
    pub depth: f32,
    /// World units to pixels at this depth, for sizing spheres
    pub scale: f32,
}

impl Camera3D {
    pub fn new(aspect_ratio: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 50.0f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
            distance: 50.0,
            yaw: 0.0,
            pitch: 0.3,
            min_distance: 20.0,
            max_distance: 100.0,
        };
        camera.update_orbital();
        camera
    }

    /// Update camera position based on orbital parameters
    pub fn update_orbital(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            );
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-1.5, 1.5);
        self.update_orbital();
    }

    /// Zoom in/out, staying inside the configured distance range
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(self.min_distance, self.max_distance);
        self.update_orbital();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Project a world-space point into a viewport of `viewport` pixels.
    ///
    /// Returns `None` for points behind the camera or outside the depth range.
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<ScreenPoint> {
        let clip: Vec4 = self.view_projection() * point.extend(1.0);
        if clip.w <= self.near {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let position = Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        );
        // Height of the view frustum at this distance maps onto the viewport height
        let frustum_height = 2.0 * clip.w * (self.fov * 0.5).tan();
        let scale = viewport.y / frustum_height;

        Some(ScreenPoint {
            position,
            depth: ndc.z,
            scale,
        })
    }
}
