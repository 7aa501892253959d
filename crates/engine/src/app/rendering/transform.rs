use crate::app::{CameraView, Vec3};

pub const VERTICAL_FOV_RADIANS: f32 = std::f32::consts::FRAC_PI_3;
pub const NEAR_PLANE_WORLD: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    fn focal_length_px(self, vertical_fov: f32) -> f32 {
        self.height as f32 * 0.5 / (vertical_fov * 0.5).tan()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy)]
struct ViewBasis {
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

fn view_basis(camera: &CameraView) -> Option<ViewBasis> {
    let forward = (camera.look_at - camera.eye).try_normalize()?;
    let right = forward.cross(Vec3::UP).try_normalize()?;
    let up = right.cross(forward);
    Some(ViewBasis { forward, right, up })
}

/// Perspective projection of a world point; `None` when the point sits behind
/// the near plane or the camera looks straight along the up axis.
pub fn world_to_screen(
    world: Vec3,
    camera: &CameraView,
    viewport: Viewport,
    vertical_fov: f32,
) -> Option<ProjectedPoint> {
    let basis = view_basis(camera)?;
    let relative = world - camera.eye;
    let depth = relative.dot(basis.forward);
    if depth < NEAR_PLANE_WORLD {
        return None;
    }
    let focal = viewport.focal_length_px(vertical_fov);
    let x = viewport.width as f32 * 0.5 + relative.dot(basis.right) / depth * focal;
    let y = viewport.height as f32 * 0.5 - relative.dot(basis.up) / depth * focal;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(ProjectedPoint {
        x: x.round() as i32,
        y: y.round() as i32,
        depth,
    })
}

pub fn world_radius_to_px(
    radius_world: f32,
    depth: f32,
    viewport: Viewport,
    vertical_fov: f32,
) -> f32 {
    if depth <= 0.0 {
        return 0.0;
    }
    radius_world * viewport.focal_length_px(vertical_fov) / depth
}
