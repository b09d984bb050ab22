pub mod blend;
pub mod draw;
pub mod text;

use std::ops;

use blend::Mixer;

use crate::math::Vec2;

pub type Argb = u32;

pub(crate) trait Pixel: Copy + Clone + Sized + std::fmt::Debug {
    fn black() -> Self;
    fn white() -> Self;
    fn trans() -> Self;

    fn over(self, other: Self) -> Self;
    fn mix(self, other: Self) -> Self;

    fn set_alpha(self, alpha: u8) -> Self;
    fn alpha(self) -> u8;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;
}

/// Software frame buffer every scene draws into.
///
/// Pixels are straight (non-premultiplied) ARGB. The buffer is cleared to
/// fully transparent each frame and composited over `background` when it is
/// copied out to a window surface.
pub struct PixelBuffer {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    color: Argb,
    mixer: Mixer,

    background: Argb,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct P2(pub i32, pub i32);

impl P2 {
    pub fn to_vec2(self) -> Vec2<f32> {
        Vec2::new(self.0 as f32, self.1 as f32)
    }

    /// Squared euclidean distance, widened so large coordinates can't overflow.
    pub fn dist_sq(self, other: P2) -> i64 {
        let dx = (self.0 - other.0) as i64;
        let dy = (self.1 - other.1) as i64;
        dx * dx + dy * dy
    }
}

impl ops::AddAssign for P2 {
    fn add_assign(&mut self, other: P2) {
        self.0 += other.0;
        self.1 += other.1;
    }
}

impl PixelBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            color: Argb::white(),
            mixer: u32::mix,

            background: Argb::black(),
        }
    }

    pub fn color(&mut self, c: Argb) {
        self.color = c;
    }

    pub fn mixerd(&mut self) {
        self.mixer = u32::over;
    }

    pub fn mixerm(&mut self) {
        self.mixer = u32::mix;
    }

    pub fn size(&self) -> P2 {
        P2(self.width as i32, self.height as i32)
    }

    pub fn sizeu(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Argb::trans());
    }

    pub fn is_in_bound(&self, p: P2) -> bool {
        p.0 >= 0 && p.1 >= 0 && (p.0 as usize) < self.width && (p.1 as usize) < self.height
    }

    pub fn pixel_xy(&self, p: P2) -> Option<Argb> {
        if !self.is_in_bound(p) {
            return None;
        }
        self.buffer.get(p.1 as usize * self.width + p.0 as usize).copied()
    }

    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer
    }

    pub(crate) fn plot(&mut self, p: P2) {
        if !self.is_in_bound(p) {
            return;
        }
        let i = p.1 as usize * self.width + p.0 as usize;
        if let Some(px) = self.buffer.get_mut(i) {
            *px = (self.mixer)(*px, self.color);
        }
    }

    // Window surfaces may be wider than the buffer (Wayland does not honour
    // resize increments), so rows are laid out with the destination width.
    pub fn present_to(&self, dest: &mut [u32], dst_width: usize) {
        if self.width == 0 || dst_width == 0 {
            return;
        }

        self.buffer
            .chunks_exact(self.width) // source lines
            .zip(dest.chunks_mut(dst_width)) // with destination lines
            .for_each(|(src_row, dst_row)| {
                for (dst, src) in dst_row.iter_mut().zip(src_row) {
                    *dst = self.background.mix(*src) & 0x00_FF_FF_FF;
                }
            });
    }
}
