//! Mapping from heliocentric AU to scene coordinates.
//!
//! Distances are compressed logarithmically so that Mercury and Saturn fit in
//! one view: a point at `d` AU lands `log10(d + 1.5) · 800` scene units from
//! the Sun along its own direction. The ecliptic plane is the scene's XZ
//! plane with ecliptic north pointing up (+Y).

use bevy::math::DVec3;
use bevy::prelude::*;

/// Scene units per decade of `d + 1.5`.
pub const LOG_SCALE: f64 = 800.0;

/// Offset added to the distance before taking the logarithm.
pub const LOG_OFFSET: f64 = 1.5;

/// Ecliptic (x, y, z) to scene axes: x stays, ecliptic z becomes up,
/// ecliptic y points into the screen.
pub fn ecliptic_to_scene(p: DVec3) -> DVec3 {
    DVec3::new(p.x, p.z, -p.y)
}

/// Log-compressed scene position of a heliocentric point in AU.
///
/// The origin maps to the origin. Direction is preserved.
pub fn scale_3d(p: DVec3) -> Vec3 {
    let dist = p.length();
    if dist == 0.0 || !dist.is_finite() {
        return Vec3::ZERO;
    }
    let r = (dist + LOG_OFFSET).log10() * LOG_SCALE;
    (ecliptic_to_scene(p) * (r / dist)).as_vec3()
}

/// Scene distance of a point `dist` AU from the Sun.
pub fn scaled_distance(dist: f64) -> f64 {
    (dist + LOG_OFFSET).log10() * LOG_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_stays_at_origin() {
        assert_eq!(scale_3d(DVec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_one_au_on_x_axis() {
        let v = scale_3d(DVec3::X);
        assert_relative_eq!(v.x as f64, 2.5f64.log10() * 800.0, epsilon = 1e-3);
        assert_eq!(v.y, 0.0);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn test_axes_are_remapped() {
        let up = scale_3d(DVec3::Z);
        assert!(up.y > 0.0 && up.x == 0.0 && up.z == 0.0);

        let ecliptic_y = scale_3d(DVec3::Y);
        assert!(ecliptic_y.z < 0.0 && ecliptic_y.x == 0.0);
    }

    #[test]
    fn test_direction_preserved_and_monotonic() {
        let near = scale_3d(DVec3::new(0.3, 0.4, 0.0));
        let far = scale_3d(DVec3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(near.normalize().dot(far.normalize()), 1.0, epsilon = 1e-6);
        assert!(far.length() > near.length());
        assert_relative_eq!(far.length() as f64, scaled_distance(5.0), epsilon = 1e-2);
    }
}
