#![allow(dead_code)]

use ruby_layout::{GlyphMetrics, Metrics, Px, Token, ANNOTATION_CALIBRATION, BASE_CALIBRATION};

/// Widths in ems of the texts used by the tests; anything else is half an em per character
const WIDTHS: &[(&str, f32)] = &[
    ("这", 1.0),
    ("是", 1.0),
    ("一", 1.0),
    ("个", 1.0),
    ("，", 1.0),
    ("。", 1.0),
    ("zhè", 1.5),
    ("shì", 1.5),
    ("yī", 1.0),
    ("gè", 1.0),
];

/// A measurer answering from a fixed table, so expected geometry can be worked out by hand
#[derive(Debug, Default, Copy, Clone)]
pub struct FixedMetrics;

impl GlyphMetrics for FixedMetrics {
    fn measure_width(&self, text: &str, size: Px) -> Px {
        let ems = WIDTHS
            .iter()
            .find(|(t, _)| *t == text)
            .map(|&(_, ems)| ems)
            .unwrap_or(text.chars().count() as f32 * 0.5);
        size * ems
    }

    fn measure_height(&self, sample: &str, size: Px) -> Px {
        match sample {
            BASE_CALIBRATION => size * 1.25,
            ANNOTATION_CALIBRATION => size,
            _ => size * 1.5,
        }
    }
}

/// 40px base text, 20px annotations, 6px between tokens. Calibrated heights are 50px for the
/// base row and 20px for the annotation row, so one line block is 20 + 2 + 50 + 10 = 82px.
pub fn metrics() -> Metrics {
    Metrics::new(Px(40.0))
        .expect("valid size")
        .with_annotation_font_size(Px(20.0))
        .expect("valid size")
        .with_horizontal_spacing(Px(6.0))
        .with_annotation_to_base_spacing(Px(2.0))
        .with_line_spacing(Px(10.0))
}

pub const LINE_BLOCK: Px = Px(82.0);

pub fn tokens(pairs: &[(&str, &str)]) -> Vec<Token> {
    pairs.iter().copied().map(Token::from).collect()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
