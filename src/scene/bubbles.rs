use rayon::prelude::*;

use super::{physics::reflect_axis, Scene};
use crate::{
    graphics::{Argb, PixelBuffer, P2},
    math::rng::Rng,
};

pub const RADIUS_MIN: i32 = 20;
pub const RADIUS_MAX: i32 = 49;
pub const SPEED_MAX: i32 = 5;
pub const BUBBLE_ALPHA: u8 = 128;
pub const CHANNEL_MIN: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub pos: P2,
    pub vel: P2,
    pub radius: i32,
    pub color: Argb,
}

// Centre coordinate that keeps `[c - extent, c + extent]` inside `[0, dim]`.
fn place(dim: i32, extent: i32, rng: &mut Rng) -> i32 {
    if dim < 2 * extent {
        return dim / 2;
    }
    rng.int(extent..=dim - extent)
}

impl Bubble {
    pub fn random(bounds: P2, rng: &mut Rng) -> Self {
        let radius = rng.int(RADIUS_MIN..=RADIUS_MAX);

        let pos = P2(place(bounds.0, radius, rng), place(bounds.1, radius, rng));

        let vel = P2(
            rng.int(1..=SPEED_MAX) * rng.sign(),
            rng.int(1..=SPEED_MAX) * rng.sign(),
        );

        Self {
            pos,
            vel,
            radius,
            color: rng.color(CHANNEL_MIN..=u8::MAX, BUBBLE_ALPHA),
        }
    }

    pub fn is_touched(&self, cursor: P2) -> bool {
        self.pos.dist_sq(cursor) <= (self.radius as i64).pow(2)
    }

    /// Moves, bounces, then checks the cursor. Returns `false` when the
    /// bubble popped and has to leave the population.
    pub fn step(&mut self, bounds: P2, cursor: Option<P2>) -> bool {
        self.pos += self.vel;

        reflect_axis(self.pos.0, self.radius, &mut self.vel.0, bounds.0);
        reflect_axis(self.pos.1, self.radius, &mut self.vel.1, bounds.1);

        !cursor.is_some_and(|c| self.is_touched(c))
    }

    pub fn draw(&self, pix: &mut PixelBuffer) {
        pix.soft_bubble(self.pos, self.radius, self.color);
    }
}

/// Generates `count` bubbles. A non-positive count gives an empty population.
pub fn generate_bubbles(count: i64, bounds: P2, rng: &mut Rng) -> Vec<Bubble> {
    (0..count.max(0)).map(|_| Bubble::random(bounds, rng)).collect()
}

pub struct BubbleField {
    bubbles: Vec<Bubble>,
    count: i64,
    bounds: P2,
    rng: Rng,
    parallel: bool,

    // One keep/pop flag per slot, filled by the parallel pass.
    keep: Vec<bool>,
    generations: u64,
}

impl BubbleField {
    pub fn new(count: i64, bounds: P2, mut rng: Rng, parallel: bool) -> Self {
        if count <= 0 {
            log::warn!("Bubble count is {count}, the screen will stay empty.");
        }

        let bubbles = generate_bubbles(count, bounds, &mut rng);

        Self {
            keep: Vec::with_capacity(bubbles.len()),
            bubbles,
            count,
            bounds,
            rng,
            parallel,
            generations: 1,
        }
    }

    #[cfg(test)]
    pub fn from_population(bubbles: Vec<Bubble>, count: i64, bounds: P2, parallel: bool) -> Self {
        Self {
            keep: Vec::with_capacity(bubbles.len()),
            bubbles,
            count,
            bounds,
            rng: Rng::new(0),
            parallel,
            generations: 1,
        }
    }

    #[cfg(test)]
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    #[cfg(test)]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Steps every bubble and drops the ones the cursor popped.
    pub fn update(&mut self, cursor: Option<P2>) {
        let bounds = self.bounds;

        if !self.parallel {
            self.bubbles.retain_mut(|b| b.step(bounds, cursor));
            return;
        }

        // Decide in parallel, compact serially: no slot moves while the
        // parallel pass is still indexing into the population.
        self.bubbles
            .par_iter_mut()
            .map(|b| b.step(bounds, cursor))
            .collect_into_vec(&mut self.keep);

        let mut keep = self.keep.iter().copied();
        self.bubbles.retain(|_| keep.next().unwrap_or(true));
    }

    pub fn draw(&self, pix: &mut PixelBuffer) {
        for b in &self.bubbles {
            b.draw(pix);
        }
    }

    /// Refills the population with the originally requested count once
    /// every bubble has popped.
    pub fn regenerate_if_empty(&mut self) -> bool {
        if !self.bubbles.is_empty() {
            return false;
        }

        self.bubbles = generate_bubbles(self.count, self.bounds, &mut self.rng);
        self.generations += 1;

        if !self.bubbles.is_empty() {
            log::debug!(
                "All bubbles popped, spawning generation {} ({} bubbles).",
                self.generations,
                self.bubbles.len()
            );
        }

        true
    }
}

impl Scene for BubbleField {
    fn name(&self) -> &'static str {
        if self.parallel {
            "bubbles (parallel)"
        } else {
            "bubbles"
        }
    }

    fn perform(&mut self, pix: &mut PixelBuffer, cursor: Option<P2>) {
        self.update(cursor);
        self.draw(pix);
        self.regenerate_if_empty();
    }

    fn population(&self) -> usize {
        self.bubbles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::math::rng::Rng;

    const BOUNDS: P2 = P2(640, 480);
    const FAR: Option<P2> = Some(P2(-10_000, -10_000));

    fn bubble(pos: P2, vel: P2, radius: i32) -> Bubble {
        Bubble {
            pos,
            vel,
            radius,
            color: 0x80_FF_FF_FF,
        }
    }

    fn fits(b: &Bubble, bounds: P2) -> bool {
        b.pos.0 - b.radius >= 0
            && b.pos.0 + b.radius <= bounds.0
            && b.pos.1 - b.radius >= 0
            && b.pos.1 + b.radius <= bounds.1
    }

    proptest! {
        #[test]
        fn generated_bubbles_fit_the_window(
            seed in any::<u64>(),
            count in 0i64..64,
            w in 100i32..1920,
            h in 100i32..1080,
        ) {
            let mut rng = Rng::new(seed);
            let bubbles = generate_bubbles(count, P2(w, h), &mut rng);

            prop_assert_eq!(bubbles.len() as i64, count);
            for b in &bubbles {
                prop_assert!(b.radius >= RADIUS_MIN && b.radius <= RADIUS_MAX);
                prop_assert!(fits(b, P2(w, h)));
                prop_assert!(b.vel.0 != 0 && b.vel.1 != 0);
                prop_assert!(b.vel.0.abs() <= SPEED_MAX && b.vel.1.abs() <= SPEED_MAX);
            }
        }

        #[test]
        fn popped_iff_cursor_within_radius(
            seed in any::<u64>(),
            cx in 0i32..640,
            cy in 0i32..480,
        ) {
            let cursor = P2(cx, cy);
            let mut field = BubbleField::new(40, BOUNDS, Rng::new(seed), false);

            let expected: Vec<Bubble> = field
                .bubbles()
                .iter()
                .copied()
                .filter_map(|mut b| b.step(BOUNDS, Some(cursor)).then_some(b))
                .collect();
            let popped = field.population() - expected.len();

            field.update(Some(cursor));

            prop_assert_eq!(field.bubbles(), &expected[..]);
            prop_assert_eq!(field.population(), 40 - popped);
            prop_assert!(field.bubbles().iter().all(|b| !b.is_touched(cursor)));
        }

        #[test]
        fn parallel_pass_matches_serial_pass(
            seed in any::<u64>(),
            cursors in proptest::collection::vec((0i32..640, 0i32..480), 1..40),
        ) {
            let mut serial = BubbleField::new(60, BOUNDS, Rng::new(seed), false);
            let mut parallel = BubbleField::new(60, BOUNDS, Rng::new(seed), true);

            for (x, y) in cursors {
                serial.update(Some(P2(x, y)));
                parallel.update(Some(P2(x, y)));
                prop_assert_eq!(serial.bubbles(), parallel.bubbles());
            }
        }
    }

    #[test]
    fn velocity_flips_only_on_the_crossing_axis() {
        let mut b = bubble(P2(22, 200), P2(-3, 2), 20);
        assert!(b.step(BOUNDS, None));

        assert_eq!(b.pos, P2(19, 202));
        assert_eq!(b.vel, P2(3, 2));
    }

    #[test]
    fn corner_hit_flips_both_axes() {
        let mut b = bubble(P2(618, 458), P2(4, 5), 20);
        b.step(BOUNDS, None);

        assert_eq!(b.pos, P2(622, 463));
        assert_eq!(b.vel, P2(-4, -5));
    }

    #[test]
    fn three_bubbles_with_a_distant_cursor_follow_their_paths() {
        let mut rng = Rng::new(0xB0B);
        let mut field = BubbleField::new(3, BOUNDS, Rng::new(0xB0B), false);
        let start = generate_bubbles(3, BOUNDS, &mut rng);
        assert_eq!(field.bubbles(), &start[..]);

        for _ in 0..10 {
            field.update(FAR);
        }

        assert_eq!(field.population(), 3);

        for (b, s) in field.bubbles().iter().zip(&start) {
            let (mut pos, mut vel) = (s.pos, s.vel);
            for _ in 0..10 {
                pos += vel;
                if pos.0 - s.radius < 0 || pos.0 + s.radius > BOUNDS.0 {
                    vel.0 = -vel.0;
                }
                if pos.1 - s.radius < 0 || pos.1 + s.radius > BOUNDS.1 {
                    vel.1 = -vel.1;
                }
            }
            assert_eq!((b.pos, b.vel), (pos, vel));
        }
    }

    #[test]
    fn straight_run_without_walls_is_ten_velocity_steps() {
        let start = bubble(P2(320, 240), P2(3, -2), 20);
        let mut field = BubbleField::from_population(vec![start], 1, BOUNDS, false);

        for _ in 0..10 {
            field.update(FAR);
        }

        assert_eq!(field.bubbles()[0].pos, P2(320 + 30, 240 - 20));
        assert_eq!(field.bubbles()[0].vel, start.vel);
    }

    #[test]
    fn popping_the_last_bubble_regenerates_the_requested_count() {
        let target = bubble(P2(100, 100), P2(2, 2), 25);
        let mut field = BubbleField::from_population(vec![target], 5, BOUNDS, false);

        field.update(Some(target.pos));
        assert_eq!(field.population(), 0);

        assert!(field.regenerate_if_empty());
        assert_eq!(field.population(), 5);
        assert_eq!(field.generations(), 2);
        assert!(field.bubbles().iter().all(|b| fits(b, BOUNDS)));

        assert!(!field.regenerate_if_empty());
    }

    #[test]
    fn single_bubble_under_the_cursor_pops_and_comes_back() {
        let mut field = BubbleField::new(1, BOUNDS, Rng::new(11), true);
        let center = field.bubbles()[0].pos;

        field.update(Some(center));
        assert_eq!(field.population(), 0);

        field.regenerate_if_empty();
        assert_eq!(field.population(), 1);
    }

    #[test]
    fn perform_closes_the_empty_state_within_the_frame() {
        let target = bubble(P2(300, 300), P2(1, 1), 30);
        let mut field = BubbleField::from_population(vec![target], 3, BOUNDS, false);
        let mut pix = PixelBuffer::new(640, 480);

        field.perform(&mut pix, Some(target.pos));

        assert_eq!(field.population(), 3);
        // Popped bubble was not drawn and the new ones draw next frame.
        assert!(pix.as_slice().iter().all(|&c| c == 0));
    }

    #[test]
    fn surviving_bubbles_are_drawn() {
        let b = bubble(P2(100, 100), P2(1, 0), 20);
        let mut field = BubbleField::from_population(vec![b], 1, BOUNDS, false);
        let mut pix = PixelBuffer::new(640, 480);

        field.perform(&mut pix, None);

        assert!(pix.pixel_xy(P2(121, 100)).is_some_and(|c| c != 0));
    }

    #[test]
    fn non_positive_count_stays_empty() {
        for count in [0, -4] {
            let mut field = BubbleField::new(count, BOUNDS, Rng::new(5), false);
            let mut pix = PixelBuffer::new(640, 480);

            assert_eq!(field.population(), 0);
            field.perform(&mut pix, Some(P2(10, 10)));
            assert_eq!(field.population(), 0);
        }
    }

    #[test]
    fn tiny_window_centres_the_bubble() {
        let mut rng = Rng::new(9);
        let b = Bubble::random(P2(30, 30), &mut rng);
        assert_eq!(b.pos, P2(15, 15));
    }
}
