pub mod rng;
pub mod vec2;

pub use vec2::Vec2;

pub const TAU: f32 = std::f32::consts::TAU;

/// Wraps an angle into `[0, TAU)`.
pub fn wrap_angle(a: f32) -> f32 {
    let w = a.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs.
    if w >= TAU {
        0.0
    } else {
        w
    }
}
