use super::Argb;

pub type Mixer = fn(Argb, Argb) -> Argb;

use super::Pixel;

/// Source-over compositing of `c2` on top of `c1`.
pub fn composite_u32(c1: Argb, c2: Argb) -> Argb {
    let [a1, r1, g1, b1] = c1.decompose();
    let [a2, r2, g2, b2] = c2.decompose();

    let (a, a3) = {
        let a1 = a1 as u16;
        let a2 = a2 as u16;

        let a3 = (a1 * (255 - a2)) / 256;

        (a2 + a3, a3)
    };

    if a == 0 {
        return Argb::compose([0, 0, 0, 0]);
    }

    let composite_channel = |c1: u8, c2: u8| -> u8 {
        let c1 = c1 as u16;
        let c2 = c2 as u16;
        let a2 = a2 as u16;

        ((c2 * a2 + c1 * a3) / a) as u8
    };

    Argb::compose([
        a as u8,
        composite_channel(r1, r2),
        composite_channel(g1, g2),
        composite_channel(b1, b2),
    ])
}

impl Pixel for Argb {
    fn black() -> Argb {
        0xFF_00_00_00
    }

    fn white() -> Argb {
        0xFF_FF_FF_FF
    }

    fn trans() -> Argb {
        0x0
    }

    fn set_alpha(self, alpha: u8) -> Argb {
        (self & 0x00_FF_FF_FF) | (alpha as Argb) << 24
    }

    fn alpha(self) -> u8 {
        self.to_be_bytes()[0]
    }

    fn decompose(self) -> [u8; 4] {
        self.to_be_bytes()
    }

    fn compose(array: [u8; 4]) -> Argb {
        Argb::from_be_bytes(array)
    }

    fn over(self, other: Argb) -> Argb {
        other
    }

    fn mix(self, other: Argb) -> Argb {
        composite_u32(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces_destination() {
        assert_eq!(composite_u32(0xFF_12_34_56, 0xFF_AB_CD_EF), 0xFF_AB_CD_EF);
    }

    #[test]
    fn transparent_source_keeps_destination_colour() {
        let out = composite_u32(0xFF_80_40_20, 0x00_FF_FF_FF);
        let [_, r, g, b] = out.decompose();
        assert_eq!([r, g, b], [0x80, 0x40, 0x20]);
    }

    #[test]
    fn half_alpha_lands_between_colours() {
        let out = composite_u32(0xFF_00_00_00, 0x80_FF_FF_FF);
        let [a, r, _, _] = out.decompose();
        assert!(a >= 0xFE);
        assert!((0x70..=0x90).contains(&r), "red channel {r:#x}");
    }
}
