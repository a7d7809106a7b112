//! Layout of annotated text.
//!
//! [`LayoutEngine::layout`] turns a sequence of [`Token`]s into geometry. What that geometry
//! looks like depends on the [`DisplayMode`]:
//!
//! - [`DisplayMode::Annotated`] lays out tokens as atomic boxes with the annotation centred
//!   above the base text, wrapping with the greedy [`LineBreaker`]. Every token gets a
//!   [`TokenGeometry`].
//! - [`DisplayMode::PlainText`] and [`DisplayMode::AnnotationOnly`] flow one text row as an
//!   ordinary paragraph (see [`wrap_paragraph`]). Only per-line boxes and placed runs are
//!   produced; tokens have no geometry of their own.
//!
//! Layout is a pure function of its inputs: the same tokens, mode, width, and metrics always
//! produce the same [`LayoutResult`], and nothing is retained between calls.
//!
//! # Example
//!
//! ```
//! use ruby_layout::{DisplayMode, HeuristicMetrics, Metrics, Px, Token};
//! use ruby_layout::layout::LayoutEngine;
//!
//! let engine = LayoutEngine::new(HeuristicMetrics);
//! let metrics = Metrics::new(Px(20.0))?;
//! let tokens = [Token::new("这", "zhè"), Token::new("是", "shì"), Token::new("，", "")];
//!
//! let result = engine.layout(&tokens, DisplayMode::Annotated, Px(200.0), &metrics);
//! assert_eq!(result.line_count, 1);
//! assert_eq!(result.per_token.len(), 3);
//! // the comma's borrowed annotation takes up space but is not drawn
//! assert!(!result.per_token[2].annotation_visible);
//! # Ok::<(), ruby_layout::LayoutError>(())
//! ```

mod line_break;
mod padding;
mod paragraph;

pub use line_break::*;
pub use padding::*;
pub use paragraph::*;

use crate::glyph::{Calibration, GlyphMetrics};
use crate::metrics::Metrics;
use crate::punctuation::{CjkPunctuation, PunctuationClassifier};
use crate::rect::Rect;
use crate::token::{DisplayMode, Token};
use crate::units::Px;
use std::ops::Range;

/// The boxes of one token in [`DisplayMode::Annotated`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenGeometry {
    /// Line the token was placed on
    pub line: usize,
    pub annotation_box: Rect,
    pub base_box: Rect,
    /// Spans the annotation's top to the base text's bottom, as wide as the wider of the two
    pub combined_box: Rect,
    /// `false` when the annotation is punctuation: it keeps its space but is not painted
    pub annotation_visible: bool,
    /// `false` when the base text is punctuation
    pub underline_visible: bool,
}

/// One visual line of a layout
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    pub rect: Rect,
    /// Tokens with content on this line
    pub tokens: Range<usize>,
    /// Text placed on this line; only filled for the paragraph modes
    pub runs: Vec<PlacedRun>,
}

/// Everything a layout pass produced. Created fresh by each call to
/// [`LayoutEngine::layout`] and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub mode: DisplayMode,
    /// One entry per token in [`DisplayMode::Annotated`], empty otherwise
    pub per_token: Vec<TokenGeometry>,
    pub lines: Vec<LineBox>,
    pub content_width: Px,
    pub content_height: Px,
    pub line_count: usize,
    /// The calibration the layout was computed with
    pub calibration: Calibration,
    /// The metrics the layout was computed with
    pub metrics: Metrics,
}

impl LayoutResult {
    fn empty(mode: DisplayMode, metrics: &Metrics, calibration: &Calibration) -> LayoutResult {
        LayoutResult {
            mode,
            per_token: Vec::new(),
            lines: Vec::new(),
            content_width: Px::ZERO,
            content_height: Px::ZERO,
            line_count: 0,
            calibration: *calibration,
            metrics: *metrics,
        }
    }
}

/// Lays out tokens using an injected glyph measurer and punctuation classifier.
///
/// The engine holds no layout state, so one engine can serve any number of texts.
#[derive(Debug, Clone)]
pub struct LayoutEngine<M, C = CjkPunctuation> {
    glyphs: M,
    classifier: C,
}

impl<M: GlyphMetrics> LayoutEngine<M> {
    /// Create an engine using the default CJK punctuation table
    pub fn new(glyphs: M) -> LayoutEngine<M> {
        LayoutEngine {
            glyphs,
            classifier: CjkPunctuation,
        }
    }
}

impl<M: GlyphMetrics, C: PunctuationClassifier> LayoutEngine<M, C> {
    pub fn with_classifier(glyphs: M, classifier: C) -> LayoutEngine<M, C> {
        LayoutEngine { glyphs, classifier }
    }

    pub fn glyphs(&self) -> &M {
        &self.glyphs
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Measure the reference line heights for `metrics` in `mode`. The result only depends on
    /// its arguments, so callers laying out repeatedly may keep it and use
    /// [`LayoutEngine::layout_calibrated`].
    pub fn calibrate(&self, metrics: &Metrics, mode: DisplayMode) -> Calibration {
        Calibration::measure(&self.glyphs, metrics, mode)
    }

    /// Lay out `tokens` within `max_width` (or [`Px::UNBOUNDED`] for their natural width)
    pub fn layout(
        &self,
        tokens: &[Token],
        mode: DisplayMode,
        max_width: Px,
        metrics: &Metrics,
    ) -> LayoutResult {
        let calibration = self.calibrate(metrics, mode);
        self.layout_calibrated(tokens, mode, max_width, metrics, &calibration)
    }

    /// [`LayoutEngine::layout`] with a previously measured calibration. `calibration` must
    /// have been measured for the same metrics and mode.
    pub fn layout_calibrated(
        &self,
        tokens: &[Token],
        mode: DisplayMode,
        max_width: Px,
        metrics: &Metrics,
        calibration: &Calibration,
    ) -> LayoutResult {
        let result = match mode {
            DisplayMode::Annotated => {
                self.layout_annotated(tokens, max_width, metrics, calibration)
            }
            DisplayMode::PlainText | DisplayMode::AnnotationOnly => {
                self.layout_paragraph(tokens, mode, max_width, metrics, calibration)
            }
        };
        log::debug!(
            "laid out {} tokens as {:?} in {}: {} lines, {} x {}",
            tokens.len(),
            mode,
            max_width,
            result.line_count,
            result.content_width,
            result.content_height
        );
        result
    }

    fn layout_annotated(
        &self,
        tokens: &[Token],
        max_width: Px,
        metrics: &Metrics,
        calibration: &Calibration,
    ) -> LayoutResult {
        let mut result = LayoutResult::empty(DisplayMode::Annotated, metrics, calibration);
        if tokens.is_empty() {
            return result;
        }

        // (base width, annotation width) of every token
        let widths: Vec<(Px, Px)> = tokens
            .iter()
            .map(|token| {
                let annotation = token.display_annotation(&self.classifier);
                (
                    self.glyphs
                        .measure_width(&token.base_text, metrics.base_font_size())
                        .ceil(),
                    self.glyphs
                        .measure_width(annotation, metrics.annotation_font_size())
                        .ceil(),
                )
            })
            .collect();
        let token_widths: Vec<Px> = widths.iter().map(|&(b, a)| b.max(a)).collect();

        let breaks =
            LineBreaker::new(max_width, metrics.horizontal_spacing).break_lines(&token_widths);
        let line_block = calibration.line_block(metrics);

        result.per_token = tokens
            .iter()
            .zip(widths.iter().zip(token_widths.iter()))
            .zip(breaks.placements.iter())
            .map(|((token, (&(base_width, annotation_width), &width)), placement)| {
                let top = line_block * placement.line as f32;
                let left = placement.x;

                let annotation_box = Rect::from_origin_size(
                    left + (width - annotation_width) / 2.0,
                    top,
                    annotation_width,
                    calibration.annotation_height,
                );
                let base_box = Rect::from_origin_size(
                    left + (width - base_width) / 2.0,
                    annotation_box.bottom() + metrics.annotation_to_base_spacing,
                    base_width,
                    calibration.base_height,
                );
                let annotation = token.display_annotation(&self.classifier);

                TokenGeometry {
                    line: placement.line,
                    annotation_box,
                    base_box,
                    combined_box: annotation_box.union(&base_box),
                    annotation_visible: !self.classifier.is_punctuation_text(annotation),
                    underline_visible: !self.classifier.is_punctuation_text(&token.base_text),
                }
            })
            .collect();

        result.lines = breaks
            .lines
            .iter()
            .enumerate()
            .map(|(index, extent)| {
                let top = line_block * index as f32;
                LineBox {
                    rect: Rect::from_origin_size(
                        Px::ZERO,
                        top,
                        extent.width,
                        line_block - metrics.line_spacing,
                    ),
                    tokens: extent.first..extent.first + extent.len,
                    runs: Vec::new(),
                }
            })
            .collect();

        let widest = breaks
            .lines
            .iter()
            .map(|extent| extent.width)
            .fold(Px::ZERO, Px::max);
        let last_top = line_block * (breaks.lines.len() - 1) as f32;

        result.line_count = breaks.lines.len();
        result.content_width = widest.min(max_width);
        // a quarter of the base height leaves room for descenders below the last line
        result.content_height = last_top
            + calibration.annotation_height
            + metrics.annotation_to_base_spacing
            + calibration.base_height
            + calibration.base_height / 4.0
            + underline_allowance(metrics);
        result
    }

    fn layout_paragraph(
        &self,
        tokens: &[Token],
        mode: DisplayMode,
        max_width: Px,
        metrics: &Metrics,
        calibration: &Calibration,
    ) -> LayoutResult {
        let mut result = LayoutResult::empty(mode, metrics, calibration);

        let runs: Vec<Run> = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| Run {
                token: index,
                text: token.display_text(mode, &self.classifier),
                colour: token.display_colour(mode),
            })
            .collect();
        let line_height = match mode {
            DisplayMode::AnnotationOnly => calibration.annotation_height,
            DisplayMode::PlainText | DisplayMode::Annotated => calibration.base_height,
        };
        let style = ParagraphStyle {
            // both paragraph modes set their text at the base size
            font_size: metrics.base_font_size(),
            line_height,
            line_spacing: metrics.line_spacing,
            max_width,
        };

        let lines = wrap_paragraph(&runs, &style, &self.glyphs, &self.classifier);
        if lines.is_empty() {
            return result;
        }

        let pitch = line_height + metrics.line_spacing;
        result.lines = lines
            .into_iter()
            .enumerate()
            .map(|(index, runs)| {
                let width = runs.last().map(|run| run.rect.right()).unwrap_or_default();
                let tokens = match (runs.first(), runs.last()) {
                    (Some(first), Some(last)) => first.token..last.token + 1,
                    _ => 0..0,
                };
                LineBox {
                    rect: Rect::from_origin_size(Px::ZERO, pitch * index as f32, width, line_height),
                    tokens,
                    runs,
                }
            })
            .collect();

        let widest = result
            .lines
            .iter()
            .map(|line| line.rect.width())
            .fold(Px::ZERO, Px::max);
        let n = result.lines.len();

        result.line_count = n;
        result.content_width = widest.min(max_width);
        result.content_height = line_height * n as f32
            + metrics.line_spacing * (n - 1) as f32
            + underline_allowance(metrics);
        result
    }
}

fn underline_allowance(metrics: &Metrics) -> Px {
    if metrics.show_underline {
        metrics.underline_offset
    } else {
        Px::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::HeuristicMetrics;
    use pretty_assertions::assert_eq;

    fn engine() -> LayoutEngine<HeuristicMetrics> {
        LayoutEngine::new(HeuristicMetrics)
    }

    fn metrics() -> Metrics {
        Metrics::new(Px(20.0))
            .expect("valid size")
            .with_horizontal_spacing(Px(6.0))
            .with_annotation_to_base_spacing(Px(3.0))
            .with_line_spacing(Px(10.0))
    }

    #[test]
    fn empty_sequences_are_empty_in_every_mode() {
        for mode in [
            DisplayMode::PlainText,
            DisplayMode::Annotated,
            DisplayMode::AnnotationOnly,
        ] {
            let result = engine().layout(&[], mode, Px(100.0), &metrics().with_underline(true));
            assert_eq!(result.line_count, 0);
            assert_eq!(result.content_width, Px::ZERO);
            assert_eq!(result.content_height, Px::ZERO);
            assert!(result.per_token.is_empty());
        }
    }

    #[test]
    fn annotated_boxes_are_centred() {
        // 这: base 20px, zhè: annotation 15px at 10px
        let result = engine().layout(
            &[Token::new("这", "zhè")],
            DisplayMode::Annotated,
            Px::UNBOUNDED,
            &metrics(),
        );
        let geometry = result.per_token[0];
        assert_eq!(
            geometry.annotation_box,
            Rect::from_origin_size(Px(2.5), Px(0.0), Px(15.0), Px(10.0))
        );
        assert_eq!(
            geometry.base_box,
            Rect::from_origin_size(Px(0.0), Px(13.0), Px(20.0), Px(24.0))
        );
        assert_eq!(
            geometry.combined_box,
            Rect::from_origin_size(Px(0.0), Px(0.0), Px(20.0), Px(37.0))
        );
        assert!(geometry.annotation_visible);
        assert!(geometry.underline_visible);
    }

    #[test]
    fn widths_are_rounded_up() {
        // five narrow glyphs at 10px * 0.5 = 25px, but at 9px = 22.5px
        let metrics = metrics()
            .with_annotation_font_size(Px(9.0))
            .expect("valid size");
        let result = engine().layout(
            &[Token::new("", "abcde")],
            DisplayMode::Annotated,
            Px::UNBOUNDED,
            &metrics,
        );
        assert_eq!(result.per_token[0].annotation_box.width(), Px(23.0));
    }

    #[test]
    fn annotated_content_size() {
        let result = engine().layout(
            &[Token::new("这", "zhè"), Token::new("是", "shì")],
            DisplayMode::Annotated,
            Px(30.0),
            &metrics(),
        );
        assert_eq!(result.line_count, 2);
        assert_eq!(result.content_width, Px(20.0));
        // second line starts one block (10 + 3 + 24 + 10) down, plus rows and descent room
        assert_eq!(result.content_height, Px(47.0 + 10.0 + 3.0 + 24.0 + 6.0));
        assert_eq!(result.lines[1].tokens, 1..2);
    }

    #[test]
    fn underline_adds_to_height() {
        let tokens = [Token::new("这", "zhè")];
        let without = engine().layout(&tokens, DisplayMode::Annotated, Px::UNBOUNDED, &metrics());
        let with = engine().layout(
            &tokens,
            DisplayMode::Annotated,
            Px::UNBOUNDED,
            &metrics().with_underline(true).with_underline_offset(Px(14.0)),
        );
        assert_eq!(with.content_height - without.content_height, Px(14.0));
    }

    #[test]
    fn plain_text_flows_base_text() {
        let tokens = [Token::new("这是", "zhè shì"), Token::new("，", "")];
        let result = engine().layout(&tokens, DisplayMode::PlainText, Px::UNBOUNDED, &metrics());
        assert_eq!(result.line_count, 1);
        assert!(result.per_token.is_empty());
        let text: String = result.lines[0].runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, "这是，");
        assert_eq!(result.content_width, Px(60.0));
        assert_eq!(result.content_height, Px(24.0));
        assert_eq!(result.lines[0].tokens, 0..2);
    }

    #[test]
    fn annotation_only_flows_annotations_at_base_size() {
        let tokens = [Token::new("这", "zhè"), Token::new("，", "")];
        let result = engine().layout(
            &tokens,
            DisplayMode::AnnotationOnly,
            Px::UNBOUNDED,
            &metrics(),
        );
        let text: String = result.lines[0].runs.iter().map(|r| r.text.as_str()).collect();
        // the comma is borrowed into the annotation row
        assert_eq!(text, "zhè，");
        // 3 narrow glyphs at 20px, then a wide comma
        assert_eq!(result.content_width, Px(50.0));
        assert_eq!(result.content_height, Px(20.0));
    }

    #[test]
    fn paragraph_wraps_within_width() {
        let tokens: Vec<Token> = "这是一个拼音组件"
            .chars()
            .map(|ch| Token::new(ch.to_string(), ""))
            .collect();
        let result = engine().layout(&tokens, DisplayMode::PlainText, Px(70.0), &metrics());
        assert_eq!(result.line_count, 3);
        assert_eq!(result.content_width, Px(60.0));
        // three 24px lines with two 10px gaps
        assert_eq!(result.content_height, Px(92.0));
        assert_eq!(result.lines[2].rect.top(), Px(68.0));
    }
}
