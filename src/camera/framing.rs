//! Bounding-box camera framing math.
//!
//! Positions a camera so that a model's axis-aligned bounding box is fully
//! visible under the camera's field of view and aspect ratio. Two modes are
//! supported: frontal (optionally orbited around the vertical axis) and
//! top-down. The fit is a pure function of its inputs; only the passed-in
//! camera is mutated.

use glam::Vec3;

use crate::camera::core::Camera;
use crate::error::VantageError;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Corner with the smallest coordinate on every axis.
    pub min: Vec3,
    /// Corner with the largest coordinate on every axis.
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box enclosing the given points. Returns `None` for an empty
    /// slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let mut min = first;
        let mut max = first;
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        Some(Self { min, max })
    }

    /// Extent along each axis (`max - min`).
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Smallest box enclosing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// How the camera is positioned relative to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramingMode {
    /// Camera faces the model horizontally at the model's vertical center.
    /// With `angle_deg: None` the camera sits on the positive depth axis;
    /// with `Some(θ)` it orbits the center by θ degrees around the vertical
    /// axis (θ = 0 is equivalent to `None`).
    Frontal {
        /// Optional orbit angle around the vertical axis, in degrees.
        angle_deg: Option<f32>,
    },
    /// Camera directly above the model, facing down.
    TopDown,
}

/// Validate camera projection parameters before framing.
///
/// The framing math itself does not guard against degenerate projections; a
/// field of view of exactly 0 or 180 degrees, or a non-positive aspect
/// ratio, would produce infinite or NaN positions. Callers fail fast here
/// instead.
///
/// # Errors
///
/// Returns [`VantageError::InvalidParameter`] unless `fovy` is finite and in
/// the open interval (0, 180) and `aspect` is finite and positive.
pub fn validate_projection(fovy: f32, aspect: f32) -> Result<(), VantageError> {
    if !fovy.is_finite() || fovy <= 0.0 || fovy >= 180.0 {
        return Err(VantageError::InvalidParameter(format!(
            "field of view must be in (0, 180) degrees, got {fovy}"
        )));
    }
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(VantageError::InvalidParameter(format!(
            "aspect ratio must be positive, got {aspect}"
        )));
    }
    Ok(())
}

/// Minimum distance at which a half-extent `h` fits within the visible
/// half-angle whose tangent is `tan_half`.
fn fitting_distance(h: f32, tan_half: f32) -> f32 {
    h / tan_half
}

/// Position `camera` so the whole of `bounds` is visible, then aim it at the
/// box center.
///
/// The required distance along each screen axis is `half_extent / tan(a)`,
/// where `a` is the vertical half field-of-view for the vertical axis and
/// `atan(tan(a) * aspect)` for the horizontal axis; the larger of the two
/// distances is used so both extents fit simultaneously. Frontal modes add
/// half the box depth so the near face clears the fitting distance;
/// top-down adds half the box height above the center.
///
/// Mutates only the camera's `eye`, `target`, and `up`; the bounds are never
/// modified. Callers must have validated the projection via
/// [`validate_projection`]. Zero-size axes are fine: the tangents are
/// strictly positive for any valid field of view.
pub fn fit_camera_to_bounds(
    bounds: &Aabb,
    camera: &mut Camera,
    mode: FramingMode,
) {
    let size = bounds.size();
    let center = bounds.center();

    let tan_half_y = (camera.fovy.to_radians() / 2.0).tan();
    let tan_half_x = tan_half_y * camera.aspect;

    match mode {
        FramingMode::Frontal { angle_deg } => {
            let half_width = size.x / 2.0;
            let half_height = size.y / 2.0;
            let needed = fitting_distance(half_width, tan_half_x)
                .max(fitting_distance(half_height, tan_half_y));

            // Add half the depth so the camera clears the front face.
            let radius = needed + size.z / 2.0;

            let angle_rad = angle_deg.unwrap_or(0.0).to_radians();
            camera.eye = Vec3::new(
                center.x + radius * angle_rad.sin(),
                center.y,
                center.z + radius * angle_rad.cos(),
            );
            camera.up = Vec3::Y;
        }
        FramingMode::TopDown => {
            // The footprint is the box's width/depth plane.
            let half_width = size.x / 2.0;
            let half_depth = size.z / 2.0;
            let needed = fitting_distance(half_width, tan_half_x)
                .max(fitting_distance(half_depth, tan_half_y));

            camera.eye =
                center + Vec3::new(0.0, size.y / 2.0 + needed, 0.0);
            // Looking straight down; +Y up would be parallel to the view
            // direction, so world -Z maps to screen-up instead.
            camera.up = Vec3::NEG_Z;
        }
    }

    camera.target = center;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera(fovy: f32, aspect: f32) -> Camera {
        Camera {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy,
            znear: 0.1,
            zfar: 2000.0,
        }
    }

    fn unit_box_scaled(size: Vec3) -> Aabb {
        Aabb {
            min: -size / 2.0,
            max: size / 2.0,
        }
    }

    #[test]
    fn aabb_size_and_center() {
        let b = Aabb {
            min: Vec3::new(-1.0, 2.0, -3.0),
            max: Vec3::new(3.0, 4.0, 5.0),
        };
        assert_eq!(b.size(), Vec3::new(4.0, 2.0, 8.0));
        assert_eq!(b.center(), Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn aabb_from_points_and_union() {
        let a = Aabb::from_points(&[
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-2.0, 3.0, 0.5),
        ])
        .unwrap();
        assert_eq!(a.min, Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(a.max, Vec3::new(1.0, 3.0, 0.5));

        let b = unit_box_scaled(Vec3::splat(10.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-5.0));
        assert_eq!(u.max, Vec3::new(5.0, 5.0, 5.0));

        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn frontal_unrotated_reference_scenario() {
        // 10x10x10 box centered at origin, 90 degree fov, square viewport:
        // tan(45) = 1, so the fitting distance is 5 and the camera sits at
        // z = 5 (half depth) + 5 = 10.
        let bounds = unit_box_scaled(Vec3::splat(10.0));
        let mut camera = test_camera(90.0, 1.0);
        fit_camera_to_bounds(
            &bounds,
            &mut camera,
            FramingMode::Frontal { angle_deg: None },
        );
        assert!((camera.eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn frontal_distance_fits_both_axes_exactly() {
        // At the computed distance the projected half extents must equal the
        // box half extents on the governing axis and fit on the other.
        let bounds = unit_box_scaled(Vec3::new(8.0, 2.0, 0.0));
        let mut camera = test_camera(60.0, 1.5);
        fit_camera_to_bounds(
            &bounds,
            &mut camera,
            FramingMode::Frontal { angle_deg: None },
        );

        let tan_half_y = 30.0f32.to_radians().tan();
        let tan_half_x = tan_half_y * 1.5;
        let dist = (camera.eye - bounds.center()).length();

        let visible_half_w = dist * tan_half_x;
        let visible_half_h = dist * tan_half_y;
        assert!(visible_half_w >= 4.0 - 1e-4);
        assert!(visible_half_h >= 1.0 - 1e-4);
        // Width is the governing axis here; it fits exactly.
        assert!((visible_half_w - 4.0).abs() < 1e-4);
    }

    #[test]
    fn taller_axis_governs_when_height_dominates() {
        let bounds = unit_box_scaled(Vec3::new(1.0, 20.0, 0.0));
        let mut camera = test_camera(90.0, 1.0);
        fit_camera_to_bounds(
            &bounds,
            &mut camera,
            FramingMode::Frontal { angle_deg: None },
        );
        // tan_half = 1 on both axes, so distance = max(0.5, 10) = 10.
        assert!((camera.eye.z - 10.0).abs() < 1e-4);
    }

    #[test]
    fn rotated_zero_matches_unrotated() {
        let bounds = Aabb {
            min: Vec3::new(-3.0, -1.0, 2.0),
            max: Vec3::new(5.0, 7.0, 10.0),
        };
        let mut unrotated = test_camera(45.0, 1.78);
        let mut rotated = test_camera(45.0, 1.78);
        fit_camera_to_bounds(
            &bounds,
            &mut unrotated,
            FramingMode::Frontal { angle_deg: None },
        );
        fit_camera_to_bounds(
            &bounds,
            &mut rotated,
            FramingMode::Frontal {
                angle_deg: Some(0.0),
            },
        );
        assert!((unrotated.eye - rotated.eye).length() < 1e-4);
    }

    #[test]
    fn rotated_half_turn_mirrors_across_center() {
        let bounds = unit_box_scaled(Vec3::splat(4.0));
        let mut front = test_camera(45.0, 1.0);
        let mut back = test_camera(45.0, 1.0);
        fit_camera_to_bounds(
            &bounds,
            &mut front,
            FramingMode::Frontal {
                angle_deg: Some(0.0),
            },
        );
        fit_camera_to_bounds(
            &bounds,
            &mut back,
            FramingMode::Frontal {
                angle_deg: Some(180.0),
            },
        );
        let center = bounds.center();
        let d_front = (front.eye - center).length();
        let d_back = (back.eye - center).length();
        assert!((d_front - d_back).abs() < 1e-3);
        assert!((back.eye.z - (center.z - d_back)).abs() < 1e-3);
        assert!((back.eye.x - center.x).abs() < 1e-3);
    }

    #[test]
    fn rotated_keeps_vertical_center() {
        let bounds = Aabb {
            min: Vec3::new(0.0, 10.0, 0.0),
            max: Vec3::new(2.0, 16.0, 2.0),
        };
        let mut camera = test_camera(45.0, 1.0);
        fit_camera_to_bounds(
            &bounds,
            &mut camera,
            FramingMode::Frontal {
                angle_deg: Some(37.0),
            },
        );
        assert!((camera.eye.y - 13.0).abs() < 1e-4);
    }

    #[test]
    fn top_down_sits_directly_above_center() {
        let bounds = Aabb {
            min: Vec3::new(-2.0, 0.0, -6.0),
            max: Vec3::new(4.0, 3.0, 2.0),
        };
        let mut camera = test_camera(60.0, 2.0);
        fit_camera_to_bounds(&bounds, &mut camera, FramingMode::TopDown);
        let center = bounds.center();
        assert!((camera.eye.x - center.x).abs() < 1e-4);
        assert!((camera.eye.z - center.z).abs() < 1e-4);
        assert!(camera.eye.y > bounds.max.y);
        assert_eq!(camera.target, center);

        // Footprint fit: distance above the top face covers the larger of
        // the width/depth fitting distances.
        let tan_half_y = 30.0f32.to_radians().tan();
        let tan_half_x = tan_half_y * 2.0;
        let expected = (3.0 / tan_half_x).max(4.0 / tan_half_y);
        let above_center = camera.eye.y - center.y;
        assert!((above_center - (1.5 + expected)).abs() < 1e-3);
    }

    #[test]
    fn zero_size_axes_produce_finite_positions() {
        // A flat (zero-height, zero-depth) model must not yield NaN.
        let bounds = Aabb {
            min: Vec3::new(-1.0, 0.0, 0.0),
            max: Vec3::new(1.0, 0.0, 0.0),
        };
        let mut camera = test_camera(45.0, 1.0);
        fit_camera_to_bounds(
            &bounds,
            &mut camera,
            FramingMode::Frontal { angle_deg: None },
        );
        assert!(camera.eye.is_finite());
        fit_camera_to_bounds(&bounds, &mut camera, FramingMode::TopDown);
        assert!(camera.eye.is_finite());
    }

    #[test]
    fn top_down_up_vector_is_not_degenerate() {
        let bounds = unit_box_scaled(Vec3::splat(2.0));
        let mut camera = test_camera(45.0, 1.0);
        fit_camera_to_bounds(&bounds, &mut camera, FramingMode::TopDown);
        // look_at must stay well-defined: up may not be parallel to the
        // view direction.
        let view = (camera.target - camera.eye).normalize();
        assert!(view.cross(camera.up).length() > 0.5);
        let matrix = camera.build_matrix();
        assert!(matrix.is_finite());
    }

    #[test]
    fn validate_projection_bounds() {
        assert!(validate_projection(45.0, 1.6).is_ok());
        assert!(validate_projection(0.0, 1.0).is_err());
        assert!(validate_projection(180.0, 1.0).is_err());
        assert!(validate_projection(-10.0, 1.0).is_err());
        assert!(validate_projection(45.0, 0.0).is_err());
        assert!(validate_projection(45.0, -2.0).is_err());
        assert!(validate_projection(f32::NAN, 1.0).is_err());
        assert!(validate_projection(45.0, f32::INFINITY).is_err());
    }
}
