//! Glyph measurement.
//!
//! Layout never touches fonts directly; everything it needs to know about glyphs comes
//! through [`GlyphMetrics`]. [`Font`](crate::Font) answers from a parsed TrueType/OpenType
//! face, [`HeuristicMetrics`] answers from Unicode cell widths alone.

use crate::metrics::Metrics;
use crate::token::DisplayMode;
use crate::units::Px;
use unicode_width::UnicodeWidthChar;

/// Sample of base text used to derive the base line height
pub const BASE_CALIBRATION: &str = "你好";

/// Sample of annotation glyphs, covering tone marks, ascenders, and descenders, used to derive
/// the annotation line height
pub const ANNOTATION_CALIBRATION: &str = "āáǎàaHhJjPpYyG";

/// Measures text for layout. Implementations must be deterministic: the same text at the same
/// size always measures the same.
pub trait GlyphMetrics {
    /// The advance width of `text` set at `size`
    fn measure_width(&self, text: &str, size: Px) -> Px;

    /// The height of the bounding box of all glyphs in `sample` set at `size`, from the top of
    /// the tallest glyph to the bottom of the lowest one
    fn measure_height(&self, sample: &str, size: Px) -> Px;
}

impl<M: GlyphMetrics + ?Sized> GlyphMetrics for &M {
    fn measure_width(&self, text: &str, size: Px) -> Px {
        (**self).measure_width(text, size)
    }

    fn measure_height(&self, sample: &str, size: Px) -> Px {
        (**self).measure_height(sample, size)
    }
}

/// Font-free measurement: narrow characters advance half an em, wide (East Asian) characters a
/// full em. Samples containing wide characters are 1.2em tall, others 1em.
///
/// Good enough for tests, previews, and terminals; use [`Font`](crate::Font) for real output.
#[derive(Debug, Default, Copy, Clone)]
pub struct HeuristicMetrics;

impl GlyphMetrics for HeuristicMetrics {
    fn measure_width(&self, text: &str, size: Px) -> Px {
        let half_ems: usize = text
            .chars()
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        size * (half_ems as f32 * 0.5)
    }

    fn measure_height(&self, sample: &str, size: Px) -> Px {
        if sample.chars().any(|ch| UnicodeWidthChar::width(ch) == Some(2)) {
            size * 6.0 / 5.0
        } else if sample.is_empty() {
            Px::ZERO
        } else {
            size
        }
    }
}

/// The reference heights of both text rows, measured from the calibration samples rather than
/// from content so that independently laid out texts with equal metrics line up.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Calibration {
    pub base_height: Px,
    pub annotation_height: Px,
}

impl Calibration {
    /// Measure the calibration samples. In [`DisplayMode::AnnotationOnly`] the annotation is
    /// drawn at the base font size, so it is measured at that size too.
    pub fn measure<M: GlyphMetrics + ?Sized>(
        glyphs: &M,
        metrics: &Metrics,
        mode: DisplayMode,
    ) -> Calibration {
        let annotation_size = annotation_font_size(metrics, mode);
        let calibration = Calibration {
            base_height: glyphs.measure_height(BASE_CALIBRATION, metrics.base_font_size()),
            annotation_height: glyphs.measure_height(ANNOTATION_CALIBRATION, annotation_size),
        };
        log::debug!(
            "calibrated {mode:?} at {}: base {}, annotation {}",
            metrics.base_font_size(),
            calibration.base_height,
            calibration.annotation_height
        );
        calibration
    }

    /// Vertical distance between the tops of consecutive annotated lines
    pub fn line_block(&self, metrics: &Metrics) -> Px {
        self.annotation_height
            + metrics.annotation_to_base_spacing
            + self.base_height
            + metrics.line_spacing
    }
}

/// The font size annotations are set at in `mode`
pub(crate) fn annotation_font_size(metrics: &Metrics, mode: DisplayMode) -> Px {
    match mode {
        DisplayMode::AnnotationOnly => metrics.base_font_size(),
        DisplayMode::PlainText | DisplayMode::Annotated => metrics.annotation_font_size(),
    }
}
