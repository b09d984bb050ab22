pub mod bubbles;
pub mod kaleidoscope;
pub mod physics;

use crate::graphics::{PixelBuffer, P2};
use crate::math::rng::Rng;

/// Something that animates a population of shapes into the pixel buffer,
/// one call per frame.
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Advance one frame and draw it. `cursor` is the last known pointer
    /// position inside the window, if any.
    fn perform(&mut self, pix: &mut PixelBuffer, cursor: Option<P2>);

    /// Number of live shapes.
    fn population(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Bubbles,
    ParallelBubbles,
    Kaleidoscope,
}

impl Variant {
    pub fn title(self) -> &'static str {
        match self {
            Variant::Bubbles | Variant::ParallelBubbles => "Bubbles",
            Variant::Kaleidoscope => "Kaleidoscope",
        }
    }

    /// Whether a non-positive shape count is refused up front.
    pub fn requires_positive_count(self) -> bool {
        self == Variant::Kaleidoscope
    }
}

pub fn build(variant: Variant, count: i64, bounds: P2, rng: Rng) -> Box<dyn Scene> {
    match variant {
        Variant::Bubbles => Box::new(bubbles::BubbleField::new(count, bounds, rng, false)),
        Variant::ParallelBubbles => Box::new(bubbles::BubbleField::new(count, bounds, rng, true)),
        Variant::Kaleidoscope => Box::new(kaleidoscope::Kaleidoscope::new(
            count.max(0) as usize,
            bounds,
            rng,
        )),
    }
}
