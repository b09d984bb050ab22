use std::ops::{Add, Neg, Sub};

/// Flips `vel` when the interval `[pos - extent, pos + extent]` has left
/// `[0, dimension]`. Called after the move, so the shape may overshoot the
/// edge for one step before it turns around.
pub fn reflect_axis<T>(pos: T, extent: T, vel: &mut T, dimension: T) -> bool
where
    T: Copy + Default + PartialOrd + Add<Output = T> + Sub<Output = T> + Neg<Output = T>,
{
    let out = pos - extent < T::default() || pos + extent > dimension;
    if out {
        *vel = -*vel;
    }
    out
}
