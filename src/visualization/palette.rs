//! Pure helpers a renderer uses to draw particles
//!
//! Nothing here touches the engine state; both functions derive their
//! output from a particle's `kind`, `position` and `orientation`.

use crate::simulation::geometry::unit_vector;
use crate::simulation::states::{NVec2, Particle};

/// Tail length used by the reference viewer
pub const TAIL_LENGTH: f32 = 10.0;

/// Hue spacing: sixteen evenly spaced hues regardless of `type_count`
const HUE_STEP: f32 = 360.0 / 16.0;

/// RGB colour of a particle kind.
///
/// `hue = (kind mod type_count) · 22.5°`, converted from HSL with full
/// saturation and lightness 0.5. Hues of 360° or more (only reachable with
/// `type_count > 16`) fall outside every sector and come out grey.
pub fn type_color(kind: i32, type_count: i32) -> [u8; 3] {
    let type_count = type_count.max(1);
    let hue = kind.rem_euclid(type_count) as f32 * HUE_STEP;

    let saturation = 1.0f32;
    let lightness = 0.5f32;

    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match hue {
        h if (0.0..60.0).contains(&h) => (c, x, 0.0),
        h if (60.0..120.0).contains(&h) => (x, c, 0.0),
        h if (120.0..180.0).contains(&h) => (0.0, c, x),
        h if (180.0..240.0).contains(&h) => (0.0, x, c),
        h if (240.0..300.0).contains(&h) => (x, 0.0, c),
        h if (300.0..360.0).contains(&h) => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    [channel(r + m), channel(g + m), channel(b + m)]
}

fn channel(v: f32) -> u8 {
    (v * 255.0) as u8
}

/// Heading indicator: from the particle's position, `length` along its orientation
pub fn tail_segment(p: &Particle, length: f32) -> (NVec2, NVec2) {
    (p.position, p.position + unit_vector(p.orientation) * length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(type_color(0, 16), [255, 0, 0]);
        // 8 · 22.5 = 180° → cyan
        assert_eq!(type_color(8, 16), [0, 255, 255]);
        // 12 · 22.5 = 270° → between blue and magenta
        assert_eq!(type_color(12, 16), [127, 0, 255]);
    }

    #[test]
    fn kinds_wrap_by_type_count() {
        assert_eq!(type_color(18, 16), type_color(2, 16));
        assert_eq!(type_color(-1, 16), type_color(15, 16));
        assert_eq!(type_color(5, 4), type_color(1, 4));
    }

    #[test]
    fn hues_past_full_turn_are_grey() {
        // 20 · 22.5 = 450°
        assert_eq!(type_color(20, 32), [127, 127, 127]);
    }

    #[test]
    fn tail_points_along_heading() {
        let p = Particle::new(NVec2::new(1.0, 2.0), NVec2::zeros(), std::f32::consts::FRAC_PI_2, 0);
        let (start, end) = tail_segment(&p, TAIL_LENGTH);
        assert_eq!(start, p.position);
        assert!((end.x - 1.0).abs() < 1e-5);
        assert!((end.y - 12.0).abs() < 1e-5);
    }
}
