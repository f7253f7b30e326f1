/*
 * Vector Helpers
 *
 * Extra operations on nannou's Vec2 used by the kinematics and the
 * flocking rules. Everything works on the one vector type.
 */

use nannou::prelude::{vec2, Vec2};

pub trait VecExt: Sized {
    /// Rescale to `limit` when longer than it, otherwise return unchanged.
    fn clamp_magnitude(self, limit: f32) -> Self;

    /// Rotate counter-clockwise by `degrees`.
    fn rotated_degrees(self, degrees: f32) -> Self;

    /// Heading angle in radians, in `(-PI, PI]`.
    fn heading(self) -> f32;

    /// Wrap each component into `[0, width) x [0, height)`.
    fn wrap_into(self, width: f32, height: f32) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn clamp_magnitude(self, limit: f32) -> Self {
        let length = self.length();
        if length > limit {
            self * (limit / length)
        } else {
            self
        }
    }

    #[inline]
    fn rotated_degrees(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        vec2(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn wrap_into(self, width: f32, height: f32) -> Self {
        vec2(wrap_axis(self.x, width), wrap_axis(self.y, height))
    }
}

// rem_euclid can round a tiny negative value up to exactly `extent`
#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clamp_never_amplifies() {
        let short = vec2(0.3, 0.4);
        assert_eq!(short.clamp_magnitude(1.0), short);

        let long = vec2(30.0, 40.0).clamp_magnitude(5.0);
        assert_abs_diff_eq!(long.length(), 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(long.x, 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(long.y, 4.0, epsilon = 1e-5);

        assert_eq!(Vec2::ZERO.clamp_magnitude(0.0), Vec2::ZERO);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = vec2(3.0, 4.0);
        let turned = v.rotated_degrees(90.0);
        assert_abs_diff_eq!(turned.x, -4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(turned.y, 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(v.rotated_degrees(-37.5).length(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn wraps_both_directions() {
        let wrapped = vec2(-5.0, 705.0).wrap_into(1400.0, 700.0);
        assert_abs_diff_eq!(wrapped.x, 1395.0, epsilon = 1e-4);
        assert_abs_diff_eq!(wrapped.y, 5.0, epsilon = 1e-4);

        let edge = vec2(1400.0, 0.0).wrap_into(1400.0, 700.0);
        assert_eq!(edge.x, 0.0);

        let tiny = vec2(-1e-9, 10.0).wrap_into(1400.0, 700.0);
        assert!(tiny.x < 1400.0 && tiny.x >= 0.0);
    }
}
