use super::{Argb, Pixel, PixelBuffer, P2};

use crate::math::Vec2;

pub const HIGHLIGHT_ALPHA: u8 = 150;

/// Alpha lost per pixel step inward when drawing a soft bubble.
pub const SOFT_FALLOFF: u8 = 2;

impl PixelBuffer {
    // Using Bresenham's line algorithm.
    pub fn line(&mut self, ps: P2, pe: P2) {
        let dx = (pe.0 - ps.0).abs();
        let sx = if ps.0 < pe.0 { 1 } else { -1 };
        let dy = -(pe.1 - ps.1).abs();
        let sy = if ps.1 < pe.1 { 1 } else { -1 };
        let mut error = dx + dy;

        let mut p = ps;

        loop {
            self.plot(p);

            if p == pe {
                return;
            }
            let e2 = error * 2;

            if e2 >= dy {
                if p.0 == pe.0 {
                    return;
                }
                error += dy;
                p.0 += sx;
            }

            if e2 <= dx {
                if p.1 == pe.1 {
                    return;
                }
                error += dx;
                p.1 += sy;
            }
        }
    }

    /// Midpoint circle outline, eight symmetric points per step.
    pub fn circle(&mut self, center: P2, radius: i32) {
        let P2(x, y) = center;

        let mut ox = 0;
        let mut oy = radius;
        let mut d = radius - 1;

        while oy >= ox {
            for (px, py) in [
                (x + ox, y + oy),
                (x + oy, y + ox),
                (x - ox, y + oy),
                (x - oy, y + ox),
                (x + ox, y - oy),
                (x + oy, y - ox),
                (x - ox, y - oy),
                (x - oy, y - ox),
            ] {
                self.plot(P2(px, py));
            }

            if d >= 2 * ox {
                d -= 2 * ox + 1;
                ox += 1;
            } else if d < 2 * (radius - oy) {
                d += 2 * oy - 1;
                oy -= 1;
            } else {
                d += 2 * (oy - ox - 1);
                oy -= 1;
                ox += 1;
            }
        }
    }

    /// Concentric rings fading towards the centre, topped with a small
    /// highlight ring up and to the left.
    pub fn soft_bubble(&mut self, center: P2, radius: i32, base: Argb) {
        let base_alpha = base.alpha();

        for r in (1..=radius).rev() {
            let step = (radius - r).clamp(0, u8::MAX as i32) as u8;
            let alpha = base_alpha.saturating_sub(step.saturating_mul(SOFT_FALLOFF));
            self.color(base.set_alpha(alpha));
            self.circle(center, r);
        }

        self.color(Argb::white().set_alpha(HIGHLIGHT_ALPHA));
        self.circle(
            P2(center.0 - radius / 3, center.1 - radius / 3),
            radius / 4,
        );
    }

    pub fn triangle(&mut self, vertices: [P2; 3]) {
        let [a, b, c] = vertices;
        self.line(a, b);
        self.line(b, c);
        self.line(c, a);
    }
}

/// Corners of an equilateral triangle inscribed in a circle of `size`
/// around `center`, the first one at `angle` radians.
pub fn triangle_vertices(center: Vec2<f32>, size: f32, angle: f32) -> [Vec2<f32>; 3] {
    const THIRD: f32 = std::f32::consts::TAU / 3.0;

    [0.0, THIRD, 2.0 * THIRD].map(|offset| {
        let (sin, cos) = (angle + offset).sin_cos();
        Vec2::new(center.x + size * cos, center.y + size * sin)
    })
}
