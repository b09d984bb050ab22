use super::{Argb, PixelBuffer, P2};

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;

#[cfg(feature = "ttf")]
pub const TTF_PX: f32 = 24.0;

// 5x7 cells, one row per byte, most significant of the low five bits on the left.
fn glyph_5x7(c: char) -> [u8; 7] {
    match c {
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],

        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b10000, 0b11110, 0b00001, 0b00001, 0b11110],
        '6' => [0b01110, 0b10000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110],

        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        _ => [0; 7],
    }
}

/// Face used for on-screen labels.
pub enum FontFace {
    /// Built-in 5x7 glyphs, each cell scaled up by an integer factor.
    Bitmap { scale: i32 },

    #[cfg(feature = "ttf")]
    TrueType(rusttype::Font<'static>),
}

impl Default for FontFace {
    fn default() -> Self {
        FontFace::Bitmap { scale: 2 }
    }
}

impl FontFace {
    #[cfg(feature = "ttf")]
    pub fn load(path: &std::path::Path) -> Result<Self, crate::error::BackendError> {
        use crate::error::BackendError;

        let bytes = std::fs::read(path)
            .map_err(|e| BackendError::Font(format!("{}: {e}", path.display())))?;

        rusttype::Font::try_from_vec(bytes)
            .map(FontFace::TrueType)
            .ok_or_else(|| BackendError::Font(format!("{}: not a usable font", path.display())))
    }

    pub fn draw_text(&self, pix: &mut PixelBuffer, at: P2, text: &str, color: Argb) {
        match self {
            FontFace::Bitmap { scale } => draw_bitmap_text(pix, at, text, (*scale).max(1), color),

            #[cfg(feature = "ttf")]
            FontFace::TrueType(font) => draw_ttf_text(pix, font, at, text, color),
        }
    }
}

fn draw_bitmap_text(pix: &mut PixelBuffer, at: P2, text: &str, scale: i32, color: Argb) {
    pix.color(color);
    pix.mixerd();

    let mut x = at.0;

    for c in text.chars().map(|c| c.to_ascii_uppercase()) {
        for (row, bits) in glyph_5x7(c).iter().enumerate().take(GLYPH_H as usize) {
            for col in 0..GLYPH_W {
                if (bits >> (GLYPH_W - 1 - col)) & 1 == 0 {
                    continue;
                }

                for sy in 0..scale {
                    for sx in 0..scale {
                        pix.plot(P2(x + col * scale + sx, at.1 + row as i32 * scale + sy));
                    }
                }
            }
        }

        x += (GLYPH_W + 1) * scale;
    }

    pix.mixerm();
}

#[cfg(feature = "ttf")]
fn draw_ttf_text(
    pix: &mut PixelBuffer,
    font: &rusttype::Font<'static>,
    at: P2,
    text: &str,
    color: Argb,
) {
    use super::Pixel;
    use rusttype::{point, Scale};

    let scale = Scale::uniform(TTF_PX);
    let ascent = font.v_metrics(scale).ascent;
    let base_alpha = color.alpha() as f32;

    for glyph in font.layout(text, scale, point(at.0 as f32, at.1 as f32 + ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };

        glyph.draw(|gx, gy, coverage| {
            let alpha = (coverage * base_alpha) as u8;
            if alpha == 0 {
                return;
            }
            pix.color(color.set_alpha(alpha));
            pix.plot(P2(bb.min.x + gx as i32, bb.min.y + gy as i32));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap_text_width(text: &str, scale: i32) -> i32 {
        let n = text.chars().count() as i32;
        n * (GLYPH_W + 1) * scale - scale
    }

    #[test]
    fn label_occupies_its_measured_box() {
        let mut pix = PixelBuffer::new(200, 40);
        let text = "FPS: 60";

        FontFace::Bitmap { scale: 2 }.draw_text(&mut pix, P2(10, 10), text, 0xFF_FF_FF_FF);

        let width = bitmap_text_width(text, 2);
        let lit: Vec<P2> = (0..40)
            .flat_map(|y| (0..200).map(move |x| P2(x, y)))
            .filter(|&p| pix.pixel_xy(p).is_some_and(|c| c != 0))
            .collect();

        assert!(!lit.is_empty());
        assert!(lit.iter().all(|p| p.0 >= 10 && p.0 < 10 + width));
        assert!(lit.iter().all(|p| p.1 >= 10 && p.1 < 10 + GLYPH_H * 2));
    }

    #[test]
    fn top_bar_of_f_is_solid() {
        let mut pix = PixelBuffer::new(10, 10);
        FontFace::Bitmap { scale: 1 }.draw_text(&mut pix, P2(0, 0), "F", 0xFF_FF_FF_FF);

        for x in 0..5 {
            assert_eq!(pix.pixel_xy(P2(x, 0)), Some(0xFF_FF_FF_FF));
        }
        assert_eq!(pix.pixel_xy(P2(1, 1)), Some(0));
    }

    #[test]
    fn unknown_characters_render_blank() {
        let mut pix = PixelBuffer::new(10, 10);
        FontFace::default().draw_text(&mut pix, P2(0, 0), "#", 0xFF_FF_FF_FF);
        assert!(pix.as_slice().iter().all(|&c| c == 0));
    }
}
