//! Shaping and glyph drawing
//!
//! Measurement and drawing both start from a rustybuzz shaping pass, so a
//! measured width always agrees with the advances used while drawing.
//! Rasterization goes through swash; the resulting alpha masks are cut to
//! hard edges before they reach the target, which only supports flat
//! pixel overwrites.

use rustybuzz::UnicodeBuffer;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use tracing::warn;

use exprint_core::{Color, Fixed, FixedPoint, RasterTarget, TextPainter};

use crate::font::FontFace;

/// Alpha at or above this is drawn; everything below is dropped.
const COVERAGE_CUTOFF: u8 = 128;

/// A [`TextPainter`] over one loaded font face.
pub struct TextEngine {
    face: FontFace,
}

impl TextEngine {
    pub fn new(face: FontFace) -> Self {
        Self { face }
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Shape `text`, returning glyph ids with their advances and offsets
    /// in font units. Returns `None` when the face data cannot be
    /// re-parsed (corrupt TTC index, for instance).
    fn shape(&self, text: &str) -> Option<Vec<ShapedGlyph>> {
        let face = rustybuzz::Face::from_slice(self.face.data(), self.face.face_index())?;
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        let output = rustybuzz::shape(&face, &[], buffer);

        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                x_advance: pos.x_advance,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
            })
            .collect();
        Some(glyphs)
    }
}

struct ShapedGlyph {
    glyph_id: u16,
    x_advance: i32,
    x_offset: i32,
    y_offset: i32,
}

impl TextPainter for TextEngine {
    fn measure_str(&self, text: &str, size: f64) -> Fixed {
        let Some(glyphs) = self.shape(text) else {
            warn!(text, "font face failed to shape; reporting zero width");
            return Fixed::ZERO;
        };
        let advance: i32 = glyphs.iter().map(|g| g.x_advance).sum();
        Fixed::from_f64(self.face.to_points(advance, size))
    }

    fn draw_str(
        &self,
        target: &mut dyn RasterTarget,
        color: Color,
        anchor: FixedPoint,
        text: &str,
        size: f64,
    ) {
        let Some(glyphs) = self.shape(text) else {
            warn!(text, "font face failed to shape; skipping draw");
            return;
        };

        let font = match swash::FontRef::from_index(self.face.data(), self.face.face_index() as usize)
        {
            Some(font) => font,
            None => {
                warn!("swash rejected the font face; skipping draw");
                return;
            }
        };
        let mut scale_ctx = ScaleContext::new();
        let mut scaler = scale_ctx.builder(font).size(size as f32).build();
        let mut render = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ]);
        render.format(Format::Alpha);

        let (base_x, base_y) = anchor.to_f64();
        let mut pen_x = base_x;
        for glyph in glyphs {
            let Some(image) = render.render(&mut scaler, glyph.glyph_id) else {
                pen_x += self.face.to_points(glyph.x_advance, size);
                continue;
            };
            let origin_x =
                (pen_x + self.face.to_points(glyph.x_offset, size)).floor() as i32;
            let origin_y =
                (base_y - self.face.to_points(glyph.y_offset, size)).floor() as i32;
            let left = image.placement.left;
            let top = image.placement.top;
            let width = image.placement.width as usize;
            for (i, &alpha) in image.data.iter().enumerate() {
                if alpha < COVERAGE_CUTOFF || width == 0 {
                    continue;
                }
                let col = (i % width) as i32;
                let row = (i / width) as i32;
                target.set_pixel(origin_x + left + col, origin_y - top + row, color);
            }
            pen_x += self.face.to_points(glyph.x_advance, size);
        }
    }
}
