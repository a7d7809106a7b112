use crate::glyph::GlyphMetrics;
use crate::units::Px;
use crate::LayoutError;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};

/// A parsed TrueType or OpenType font, used to measure text for layout and to map characters
/// to glyph ids when painting.
///
/// Base text and annotations are measured with the same face; mixing faces for the two rows is
/// left to custom [`GlyphMetrics`] implementations.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LayoutError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        log::debug!(
            "loaded font face with {} glyphs, {} units per em",
            face.as_face_ref().number_of_glyphs(),
            face.as_face_ref().units_per_em()
        );

        Ok(Font { face })
    }

    fn scaling(&self, size: Px) -> f32 {
        *size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face.as_face_ref().ascender() as f32)
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face.as_face_ref().descender() as f32)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face.as_face_ref().glyph_index('\u{FFFD}').map(|i| i.0)
    }

    /// The glyph drawn for `ch`: its own glyph, else the replacement character, else `?`,
    /// else the `.notdef` glyph
    pub fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }
}

impl GlyphMetrics for Font {
    fn measure_width(&self, text: &str, size: Px) -> Px {
        let face = self.face.as_face_ref();
        let units: u32 = text
            .chars()
            .map(|ch| {
                face.glyph_hor_advance(GlyphId(self.glyph_id_or_replacement(ch)))
                    .unwrap_or_default() as u32
            })
            .sum();
        Px(self.scaling(size) * units as f32)
    }

    fn measure_height(&self, sample: &str, size: Px) -> Px {
        let face = self.face.as_face_ref();
        let (y_min, y_max) = sample
            .chars()
            .filter_map(|ch| face.glyph_bounding_box(GlyphId(self.glyph_id(ch)?)))
            .fold((i16::MAX, i16::MIN), |(lo, hi), bbox| {
                (lo.min(bbox.y_min), hi.max(bbox.y_max))
            });

        if y_min > y_max {
            // nothing in the sample has an outline; fall back to the font's vertical metrics
            return self.ascent(size) - self.descent(size);
        }

        Px(self.scaling(size) * (y_max as f32 - y_min as f32))
    }
}
