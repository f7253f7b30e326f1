/*
 * Derived Visual Attributes
 *
 * Size and colour of an agent are pure functions of its velocity. They are
 * recomputed every tick and only consumed by the renderer.
 */

use nannou::prelude::Vec2;
use std::f32::consts::PI;

use crate::params::SimulationConfig;
use crate::vector::VecExt;

/// Grows linearly from `base_size` at rest to twice that at `max_speed`.
pub fn size_for(velocity: Vec2, config: &SimulationConfig) -> f32 {
    if config.max_speed <= 0.0 {
        return config.base_size;
    }
    velocity.length() * config.base_size / config.max_speed + config.base_size
}

/// Fully saturated colour whose hue follows the heading, as RGBA bytes.
pub fn hue_for(velocity: Vec2, alpha: u8) -> [u8; 4] {
    let hue = (velocity.heading() + PI) / (2.0 * PI);
    let (r, g, b) = hsv_to_rgb(hue, 1.0, 1.0);
    [to_byte(r), to_byte(g), to_byte(b), alpha]
}

/// Components in `[0, 1]`; `h` wraps every whole turn.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[inline]
fn to_byte(component: f32) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nannou::prelude::vec2;

    #[test]
    fn size_scales_with_speed() {
        let config = SimulationConfig::default();
        assert_abs_diff_eq!(size_for(Vec2::ZERO, &config), 6.0);
        assert_abs_diff_eq!(size_for(vec2(200.0, 0.0), &config), 12.0, epsilon = 1e-5);
        assert_abs_diff_eq!(size_for(vec2(0.0, 100.0), &config), 9.0, epsilon = 1e-5);

        let frozen = SimulationConfig {
            max_speed: 0.0,
            ..config
        };
        assert_eq!(size_for(vec2(1.0, 1.0), &frozen), 6.0);
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0).1, 1.0);
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), (1.0, 0.0, 0.0));
    }

    #[test]
    fn heading_drives_colour() {
        // Heading -PI maps to hue 0: red
        let west = hue_for(vec2(-1.0, -0.0), 255);
        assert_eq!(west[3], 255);

        // Heading 0 maps to hue 0.5: cyan
        let east = hue_for(vec2(1.0, 0.0), 200);
        assert_eq!(east, [0, 255, 255, 200]);
    }
}
