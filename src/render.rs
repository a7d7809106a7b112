//! Projection of a [`LayoutResult`] into paint commands.
//!
//! A [`RenderPlan`] is what a host surface needs to draw laid out text: which strings to draw
//! where, in which colour and size, and where underlines go. Producing a plan has no side
//! effects; drawing it is up to the surface (see [`PdfSurface`](crate::PdfSurface) for one).

use crate::colour::Colour;
use crate::layout::LayoutResult;
use crate::metrics::Metrics;
use crate::punctuation::PunctuationClassifier;
use crate::rect::Rect;
use crate::token::{DisplayMode, Token};
use crate::units::Px;

/// One drawing operation, in layout space (y grows downwards)
#[derive(Clone, PartialEq, Debug)]
pub enum PaintCommand {
    /// Draw `text` with its baseline starting at `baseline`. `rect` is the box the text was
    /// laid out in; the baseline is its bottom-left corner.
    DrawRun {
        text: String,
        rect: Rect,
        baseline: (Px, Px),
        colour: Colour,
        font_size: Px,
    },
    /// Draw a straight line, used for underlines
    DrawLineSegment { x1: Px, y1: Px, x2: Px, y2: Px },
    /// Outline a rectangle, used to visualise layout boxes
    DrawRect { rect: Rect },
}

/// Options controlling what goes into a [`RenderPlan`]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PlanOptions {
    pub show_underline: bool,
    /// Outline every layout box, for debugging layouts
    pub debug_bounds: bool,
    /// Added to every coordinate, e.g. to apply padding
    pub origin: (Px, Px),
}

impl PlanOptions {
    /// Options taking the underline setting from `metrics`
    pub fn from_metrics(metrics: &Metrics) -> PlanOptions {
        PlanOptions {
            show_underline: metrics.show_underline,
            ..PlanOptions::default()
        }
    }

    pub fn with_debug_bounds(self, debug_bounds: bool) -> PlanOptions {
        PlanOptions {
            debug_bounds,
            ..self
        }
    }

    pub fn with_origin(self, x: Px, y: Px) -> PlanOptions {
        PlanOptions {
            origin: (x, y),
            ..self
        }
    }
}

/// An ordered list of paint commands
#[derive(Clone, PartialEq, Debug, Default)]
pub struct RenderPlan {
    pub commands: Vec<PaintCommand>,
}

impl RenderPlan {
    /// Plan the drawing of `layout`, which must have been produced from `tokens`.
    ///
    /// In [`DisplayMode::Annotated`] every token emits, in order: its annotation (unless it is
    /// suppressed punctuation), its base text, then its underline. The underline runs from
    /// the left of the token's combined box past its right edge by the horizontal spacing, so
    /// the underlines of neighbouring tokens join up.
    ///
    /// In the paragraph modes every placed run is drawn, followed by one underline along the
    /// bottom of each line.
    pub fn plan<C: PunctuationClassifier + ?Sized>(
        layout: &LayoutResult,
        tokens: &[Token],
        options: &PlanOptions,
        classifier: &C,
    ) -> RenderPlan {
        let mut plan = RenderPlan::default();
        match layout.mode {
            DisplayMode::Annotated => plan.plan_annotated(layout, tokens, options, classifier),
            DisplayMode::PlainText | DisplayMode::AnnotationOnly => {
                plan.plan_paragraph(layout, tokens, options, classifier)
            }
        }
        log::trace!(
            "planned {} paint commands for {} lines",
            plan.commands.len(),
            layout.line_count
        );
        plan
    }

    fn plan_annotated<C: PunctuationClassifier + ?Sized>(
        &mut self,
        layout: &LayoutResult,
        tokens: &[Token],
        options: &PlanOptions,
        classifier: &C,
    ) {
        let metrics = &layout.metrics;
        let (dx, dy) = options.origin;

        for (token, geometry) in tokens.iter().zip(layout.per_token.iter()) {
            let annotation = token.display_annotation(classifier);
            if geometry.annotation_visible && !annotation.is_empty() {
                self.push_run(
                    annotation,
                    geometry.annotation_box.offset(dx, dy),
                    token.annotation_colour,
                    metrics.annotation_font_size(),
                );
            }

            if !token.base_text.is_empty() {
                self.push_run(
                    &token.base_text,
                    geometry.base_box.offset(dx, dy),
                    token.base_colour,
                    metrics.base_font_size(),
                );
            }

            if options.show_underline && geometry.underline_visible {
                let combined = geometry.combined_box.offset(dx, dy);
                let y = combined.bottom() + metrics.underline_offset;
                self.commands.push(PaintCommand::DrawLineSegment {
                    x1: combined.left(),
                    y1: y,
                    x2: combined.right() + metrics.horizontal_spacing,
                    y2: y,
                });
            }

            if options.debug_bounds {
                for rect in [
                    geometry.base_box,
                    geometry.annotation_box,
                    geometry.combined_box,
                ] {
                    self.commands.push(PaintCommand::DrawRect {
                        rect: rect.offset(dx, dy),
                    });
                }
            }
        }
    }

    fn plan_paragraph<C: PunctuationClassifier + ?Sized>(
        &mut self,
        layout: &LayoutResult,
        tokens: &[Token],
        options: &PlanOptions,
        classifier: &C,
    ) {
        let metrics = &layout.metrics;
        let (dx, dy) = options.origin;

        for line in layout.lines.iter() {
            for run in line.runs.iter() {
                self.push_run(
                    &run.text,
                    run.rect.offset(dx, dy),
                    run.colour,
                    metrics.base_font_size(),
                );
            }
        }

        // a lone punctuation mark is never underlined
        let whole: String = tokens
            .iter()
            .map(|token| token.display_text(layout.mode, classifier))
            .collect();
        if options.show_underline && !classifier.is_punctuation_text(&whole) {
            // paragraph underlines sit on the line bottom; the offset only reserves height
            for line in layout.lines.iter() {
                let rect = line.rect.offset(dx, dy);
                self.commands.push(PaintCommand::DrawLineSegment {
                    x1: rect.left(),
                    y1: rect.bottom(),
                    x2: rect.right(),
                    y2: rect.bottom(),
                });
            }
        }

        if options.debug_bounds {
            for line in layout.lines.iter() {
                self.commands.push(PaintCommand::DrawRect {
                    rect: line.rect.offset(dx, dy),
                });
            }
        }
    }

    fn push_run(&mut self, text: &str, rect: Rect, colour: Colour, font_size: Px) {
        self.commands.push(PaintCommand::DrawRun {
            text: text.to_string(),
            rect,
            baseline: (rect.left(), rect.bottom()),
            colour,
            font_size,
        });
    }

    /// The text runs of the plan, in drawing order
    pub fn runs(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PaintCommand::DrawRun { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// The number of line segments (underlines) in the plan
    pub fn line_segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PaintCommand::DrawLineSegment { .. }))
            .count()
    }
}
