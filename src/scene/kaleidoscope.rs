use std::collections::HashSet;

use super::{physics::reflect_axis, Scene};
use crate::{
    graphics::{draw::triangle_vertices, Argb, PixelBuffer, P2},
    math::{rng::Rng, wrap_angle, Vec2, TAU},
};

pub const SIZE_MIN: f32 = 20.0;
pub const SIZE_MAX: f32 = 50.0;
pub const SPEED_MAX: f32 = 3.0;
pub const SPIN_MAX: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    pub pos: Vec2<f32>,
    pub vel: Vec2<f32>,
    pub size: f32,
    pub angle: f32,
    pub spin: f32,
    pub color: Argb,
}

fn place(dim: f32, extent: f32, rng: &mut Rng) -> f32 {
    if dim < 2.0 * extent {
        return dim / 2.0;
    }
    rng.float_incl(extent..=dim - extent)
}

impl Pattern {
    pub fn random(bounds: Vec2<f32>, rng: &mut Rng) -> Self {
        let size = rng.float(SIZE_MIN..SIZE_MAX);

        Self {
            pos: Vec2::new(place(bounds.x, size, rng), place(bounds.y, size, rng)),
            vel: Vec2::new(
                rng.float_incl(-SPEED_MAX..=SPEED_MAX),
                rng.float_incl(-SPEED_MAX..=SPEED_MAX),
            ),
            size,
            angle: rng.float(0.0..TAU),
            spin: rng.float_incl(-SPIN_MAX..=SPIN_MAX),
            color: rng.color(0..=u8::MAX, u8::MAX),
        }
    }

    pub fn step(&mut self, bounds: Vec2<f32>) {
        self.pos += self.vel;
        self.angle = wrap_angle(self.angle + self.spin);

        reflect_axis(self.pos.x, self.size, &mut self.vel.x, bounds.x);
        reflect_axis(self.pos.y, self.size, &mut self.vel.y, bounds.y);
    }

    /// Close enough to trade velocities with `other`.
    pub fn is_near(&self, other: &Pattern) -> bool {
        self.pos.dist(other.pos) < (self.size + other.size) / 2.0
    }

    pub fn vertices(&self) -> [P2; 3] {
        triangle_vertices(self.pos, self.size, self.angle).map(|v| v.to_p2())
    }
}

pub fn generate_patterns(count: usize, bounds: P2, rng: &mut Rng) -> Vec<Pattern> {
    let bounds = bounds.to_vec2();
    (0..count).map(|_| Pattern::random(bounds, rng)).collect()
}

/// Fixed population of spinning triangles that bounce off the window
/// edges and swap velocities when two of them get close.
pub struct Kaleidoscope {
    patterns: Vec<Pattern>,
    bounds: Vec2<f32>,
    rng: Rng,

    // Pairs (i < j) that already swapped this frame.
    swapped: HashSet<(usize, usize)>,
}

impl Kaleidoscope {
    pub fn new(count: usize, bounds: P2, mut rng: Rng) -> Self {
        let patterns = generate_patterns(count, bounds, &mut rng);

        Self {
            swapped: HashSet::new(),
            patterns,
            bounds: bounds.to_vec2(),
            rng,
        }
    }

    #[cfg(test)]
    pub fn from_patterns(patterns: Vec<Pattern>, bounds: P2) -> Self {
        Self {
            swapped: HashSet::new(),
            patterns,
            bounds: bounds.to_vec2(),
            rng: Rng::new(0),
        }
    }

    #[cfg(test)]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    #[cfg(test)]
    pub fn swapped_pairs(&self) -> (usize, usize) {
        (self.swapped.len(), self.swapped.capacity())
    }

    /// Moves every pattern on its own and opens a new collision frame.
    pub fn step(&mut self) {
        self.swapped.clear();

        for p in self.patterns.iter_mut() {
            p.step(self.bounds);
        }
    }

    /// Swaps velocities of every close pair that has not swapped yet this
    /// frame. Returns the number of swaps.
    pub fn collide(&mut self) -> usize {
        let n = self.patterns.len();
        let mut swaps = 0;

        for i in 0..n {
            for j in i + 1..n {
                if !self.patterns[i].is_near(&self.patterns[j]) || !self.swapped.insert((i, j)) {
                    continue;
                }

                let (head, tail) = self.patterns.split_at_mut(j);
                std::mem::swap(&mut head[i].vel, &mut tail[0].vel);

                swaps += 1;
            }
        }

        swaps
    }

    /// Draws each pattern with a freshly rolled colour.
    pub fn draw(&mut self, pix: &mut PixelBuffer) {
        for p in self.patterns.iter_mut() {
            p.color = self.rng.color(0..=u8::MAX, u8::MAX);
            pix.color(p.color);
            pix.triangle(p.vertices());
        }
    }
}

impl Scene for Kaleidoscope {
    fn name(&self) -> &'static str {
        "kaleidoscope"
    }

    fn perform(&mut self, pix: &mut PixelBuffer, _cursor: Option<P2>) {
        self.step();
        self.collide();
        self.draw(pix);
    }

    fn population(&self) -> usize {
        self.patterns.len()
    }
}
