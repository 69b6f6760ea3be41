// Camera snapshot and world-to-screen projection.
//
// The environment owns camera movement; the core only reads a `CameraState`
// each tick to decide which edges look continuous on screen.
//
// Projection convention:
//   - Right-handed look-at view matrix (position -> target, with `up`)
//   - Perspective: vertical fov `fovy` in degrees, near 0.01, far 1000
//   - Orthographic: `fovy` is the visible height in world units
//   - Screen origin top-left, y grows downward, units are pixels

use glam::{Mat4, Vec2, Vec3};

/// Near clip distance used for projection.
pub const NEAR_PLANE: f32 = 0.01;
/// Far clip distance used for projection.
pub const FAR_PLANE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees (perspective) or visible height in
    /// world units (orthographic).
    pub fovy: f32,
    pub projection: Projection,
    /// Screen size in pixels the projection maps onto.
    pub viewport: Vec2,
}

impl CameraState {
    /// Default framing: above and behind the origin, 45 degree perspective.
    pub fn new(viewport: Vec2) -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 45.0,
            projection: Projection::Perspective,
            viewport,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective => Mat4::perspective_rh_gl(
                self.fovy.to_radians(),
                self.aspect(),
                NEAR_PLANE,
                FAR_PLANE,
            ),
            Projection::Orthographic => {
                let top = self.fovy * 0.5;
                let right = top * self.aspect();
                Mat4::orthographic_rh_gl(-right, right, -top, top, NEAR_PLANE, FAR_PLANE)
            }
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to screen pixels.
    pub fn world_to_screen(&self, world: Vec3) -> Vec2 {
        let ndc = self.view_projection().project_point3(world);
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        )
    }
}

// ============================================================================
// ORBIT RIG
// ============================================================================

/// Places a camera on a sphere around a target point.
///
/// Used by the demo driver to sweep the view around a level, and by tests to
/// reach the exact angle where two nodes line up on screen.
#[derive(Debug, Clone, Copy)]
pub struct OrbitRig {
    pub target: Vec3,
    pub distance: f32,
    /// Elevation angle in radians (0 = horizontal, PI/2 = straight down).
    pub pitch: f32,
    /// Horizontal rotation in radians (0 = eye on +Z looking toward -Z).
    pub yaw: f32,
    pub fovy: f32,
    pub projection: Projection,
}

impl OrbitRig {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            pitch: 35.0_f32.to_radians(),
            yaw: 0.0,
            fovy: 45.0,
            projection: Projection::Perspective,
        }
    }

    /// Aim the rig so that the eye sits on the ray from `target` through
    /// `through`, keeping the current distance.
    pub fn look_along(&mut self, through: Vec3) {
        let dir = (through - self.target).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.pitch = dir.y.clamp(-1.0, 1.0).asin();
        self.yaw = dir.x.atan2(dir.z);
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.eye_offset()
    }

    pub fn state(&self, viewport: Vec2) -> CameraState {
        CameraState {
            position: self.eye(),
            target: self.target,
            up: Vec3::Y,
            fovy: self.fovy,
            projection: self.projection,
            viewport,
        }
    }

    // Offset from target to camera eye based on pitch, yaw, and distance.
    fn eye_offset(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos() * self.distance,
            self.pitch.sin() * self.distance,
            self.yaw.cos() * self.pitch.cos() * self.distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 800.0);

    #[test]
    fn target_projects_to_screen_center() {
        let cam = CameraState::new(VIEWPORT);
        let p = cam.world_to_screen(cam.target);
        assert!((p - VIEWPORT * 0.5).length() < 1e-3, "{p:?}");
    }

    #[test]
    fn screen_y_grows_downward() {
        let cam = CameraState::new(VIEWPORT);
        let above = cam.world_to_screen(Vec3::new(0.0, 1.0, 0.0));
        let right = cam.world_to_screen(Vec3::new(1.0, 0.0, 0.0));
        assert!(above.y < VIEWPORT.y * 0.5);
        assert!(right.x > VIEWPORT.x * 0.5);
    }

    #[test]
    fn orthographic_maps_fovy_to_screen_height() {
        let mut cam = CameraState::new(VIEWPORT);
        cam.position = Vec3::new(0.0, 0.0, 10.0);
        cam.projection = Projection::Orthographic;
        cam.fovy = 10.0;
        // Half the visible height above the target lands on the top edge.
        let top = cam.world_to_screen(Vec3::new(0.0, 5.0, 0.0));
        assert!(top.y.abs() < 1e-3, "{top:?}");
        // Depth does not change orthographic screen position.
        let near = cam.world_to_screen(Vec3::new(1.0, 0.0, 3.0));
        let far = cam.world_to_screen(Vec3::new(1.0, 0.0, -3.0));
        assert!((near - far).length() < 1e-3);
    }

    #[test]
    fn orbit_eye_keeps_distance() {
        let mut rig = OrbitRig::new(Vec3::new(1.0, 0.0, -2.0), 12.0);
        rig.yaw = 1.1;
        rig.pitch = 0.4;
        assert!((rig.eye().distance(rig.target) - 12.0).abs() < 1e-4);
    }

    #[test]
    fn look_along_puts_point_between_eye_and_target() {
        let mut rig = OrbitRig::new(Vec3::ZERO, 20.0);
        let through = Vec3::new(2.0, 2.0, 0.0);
        rig.look_along(through);
        let cam = rig.state(VIEWPORT);
        let a = cam.world_to_screen(rig.target);
        let b = cam.world_to_screen(through);
        assert!((a - b).length() < 1e-2, "{a:?} vs {b:?}");
    }
}
