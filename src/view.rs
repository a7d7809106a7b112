use crate::colour::Colour;
use crate::error::LayoutError;
use crate::glyph::{Calibration, GlyphMetrics};
use crate::layout::{LayoutEngine, LayoutResult, Padding};
use crate::metrics::Metrics;
use crate::punctuation::{CjkPunctuation, PunctuationClassifier};
use crate::render::{PlanOptions, RenderPlan};
use crate::token::{DisplayMode, Token};
use crate::units::Px;

/// A block of annotated text as a host would hold it: the tokens, how to show them, and the
/// most recent layout.
///
/// `AnnotatedText` has no layout logic of its own. It validates configuration changes, keeps the
/// calibration for the current metrics and mode so that repeated layouts skip re-measuring the
/// calibration samples, and applies padding around whatever the [`LayoutEngine`] produces.
///
/// Any change to the content or configuration drops the last layout; call
/// [`AnnotatedText::measure`] again before planning.
///
/// # Example
///
/// ```
/// use ruby_layout::{AnnotatedText, DisplayMode, HeuristicMetrics, PlanOptions, Px};
/// use ruby_layout::layout::Padding;
///
/// let mut text = AnnotatedText::new(HeuristicMetrics);
/// text.set_pairs([("拼", "pīn"), ("音", "yīn"), ("。", "")]);
/// text.set_mode(DisplayMode::Annotated);
/// text.set_padding(Padding::all(Px(4.0)));
/// text.set_base_font_size(Px(20.0))?;
///
/// let (width, height) = text.measure(Px(300.0));
/// assert!(width > Px(8.0) && height > Px(8.0));
///
/// let plan = text.plan(PlanOptions::default());
/// assert_eq!(plan.runs().collect::<Vec<_>>(), vec!["pīn", "拼", "yīn", "音", "。"]);
/// # Ok::<(), ruby_layout::LayoutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AnnotatedText<M, C = CjkPunctuation> {
    engine: LayoutEngine<M, C>,
    tokens: Vec<Token>,
    metrics: Metrics,
    mode: DisplayMode,
    padding: Padding,
    base_colour: Colour,
    annotation_colour: Colour,
    /// Set through [`AnnotatedText::set_plain_text`]: laid out as a paragraph in every mode
    plain: bool,
    calibration: Option<(Metrics, DisplayMode, Calibration)>,
    last_layout: Option<LayoutResult>,
}

impl<M: GlyphMetrics> AnnotatedText<M> {
    pub fn new(glyphs: M) -> AnnotatedText<M> {
        AnnotatedText::with_engine(LayoutEngine::new(glyphs))
    }
}

impl<M: GlyphMetrics, C: PunctuationClassifier> AnnotatedText<M, C> {
    /// Create an empty text in [`DisplayMode::PlainText`] with default metrics
    pub fn with_engine(engine: LayoutEngine<M, C>) -> AnnotatedText<M, C> {
        AnnotatedText {
            engine,
            tokens: Vec::new(),
            metrics: Metrics::default(),
            mode: DisplayMode::default(),
            padding: Padding::empty(),
            base_colour: Colour::default(),
            annotation_colour: Colour::default(),
            plain: false,
            calibration: None,
            last_layout: None,
        }
    }

    pub fn engine(&self) -> &LayoutEngine<M, C> {
        &self.engine
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// The layout computed by the last call to [`AnnotatedText::measure`], if nothing has
    /// changed since
    pub fn last_layout(&self) -> Option<&LayoutResult> {
        self.last_layout.as_ref()
    }

    /// Whether the text was set with [`AnnotatedText::set_plain_text`]
    pub fn is_plain(&self) -> bool {
        self.plain
    }

    /// Replace the tokens
    pub fn set_tokens<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        self.tokens = tokens.into_iter().collect();
        self.plain = false;
        self.last_layout = None;
    }

    /// Replace the tokens with `(base, annotation)` pairs drawn in the default colours
    pub fn set_pairs<I, B, A>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (B, A)>,
        B: Into<String>,
        A: Into<String>,
    {
        let (base_colour, annotation_colour) = (self.base_colour, self.annotation_colour);
        self.set_tokens(pairs.into_iter().map(|(base, annotation)| {
            Token::new(base, annotation).with_colours(base_colour, annotation_colour)
        }));
    }

    /// Show `text` without annotations. Switches to [`DisplayMode::PlainText`].
    ///
    /// Plain text has nothing to annotate, so it is wrapped as an ordinary paragraph of base
    /// text whatever mode is set afterwards, until new tokens or pairs replace it.
    pub fn set_plain_text<S: Into<String>>(&mut self, text: S) {
        let text: String = text.into();
        if text.is_empty() {
            self.set_tokens(Vec::new());
        } else {
            let token = Token::new(text, "").with_colours(self.base_colour, self.annotation_colour);
            self.set_tokens([token]);
        }
        self.plain = true;
        self.set_mode(DisplayMode::PlainText);
    }

    /// Set the base text and annotation colours, recolouring every token already held. The
    /// colours also apply to later [`AnnotatedText::set_pairs`] and
    /// [`AnnotatedText::set_plain_text`] calls.
    pub fn set_default_colours(&mut self, base_colour: Colour, annotation_colour: Colour) {
        self.set_base_colour(base_colour);
        self.set_annotation_colour(annotation_colour);
    }

    /// Recolour the base text of every token
    pub fn set_base_colour(&mut self, colour: Colour) {
        self.base_colour = colour;
        for token in self.tokens.iter_mut() {
            token.base_colour = colour;
        }
        self.last_layout = None;
    }

    /// Recolour the annotation of every token
    pub fn set_annotation_colour(&mut self, colour: Colour) {
        self.annotation_colour = colour;
        for token in self.tokens.iter_mut() {
            token.annotation_colour = colour;
        }
        self.last_layout = None;
    }

    /// The mode layout actually runs in: plain text is always a base-text paragraph
    fn layout_mode(&self) -> DisplayMode {
        if self.plain {
            DisplayMode::PlainText
        } else {
            self.mode
        }
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            self.mode = mode;
            self.last_layout = None;
        }
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.last_layout = None;
    }

    /// Replace all metrics at once
    pub fn set_metrics(&mut self, metrics: Metrics) {
        if self.metrics != metrics {
            self.metrics = metrics;
            self.last_layout = None;
        }
    }

    /// Set the base font size, which also resets the annotation size to half of it. An invalid
    /// size is rejected and the previous metrics are kept.
    pub fn set_base_font_size(&mut self, size: Px) -> Result<(), LayoutError> {
        let metrics = self.metrics.with_base_font_size(size).inspect_err(|e| {
            log::warn!("rejected base font size: {e}");
        })?;
        self.set_metrics(metrics);
        Ok(())
    }

    /// Set the annotation font size. An invalid size is rejected and the previous metrics are
    /// kept.
    pub fn set_annotation_font_size(&mut self, size: Px) -> Result<(), LayoutError> {
        let metrics = self
            .metrics
            .with_annotation_font_size(size)
            .inspect_err(|e| {
                log::warn!("rejected annotation font size: {e}");
            })?;
        self.set_metrics(metrics);
        Ok(())
    }

    /// The calibration for the current metrics and mode, measured at most once per change
    pub fn calibration(&mut self) -> Calibration {
        let mode = self.layout_mode();
        match self.calibration {
            Some((metrics, cached, calibration)) if metrics == self.metrics && cached == mode => {
                calibration
            }
            _ => {
                let calibration = self.engine.calibrate(&self.metrics, mode);
                self.calibration = Some((self.metrics, mode, calibration));
                calibration
            }
        }
    }

    /// Lay the text out within `available_width` (padding included) and return the size it
    /// needs, padding included. [`Px::UNBOUNDED`] asks for the natural size.
    pub fn measure(&mut self, available_width: Px) -> (Px, Px) {
        let calibration = self.calibration();
        let layout = self.engine.layout_calibrated(
            &self.tokens,
            self.layout_mode(),
            self.padding.inner_width(available_width),
            &self.metrics,
            &calibration,
        );
        let size = (
            layout.content_width + self.padding.horizontal(),
            layout.content_height + self.padding.vertical(),
        );
        self.last_layout = Some(layout);
        size
    }

    /// Plan painting of the last layout, offset by the padding. Empty when there is no
    /// current layout.
    pub fn plan(&self, options: PlanOptions) -> RenderPlan {
        let Some(layout) = self.last_layout.as_ref() else {
            log::debug!("no current layout to plan");
            return RenderPlan::default();
        };
        let (x, y) = options.origin;
        let options = options.with_origin(x + self.padding.left, y + self.padding.top);
        RenderPlan::plan(layout, &self.tokens, &options, self.engine.classifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::glyph::HeuristicMetrics;
    use crate::render::PaintCommand;
    use std::cell::Cell;

    /// Counts calibration measurements
    struct Counting<'a> {
        heights: &'a Cell<usize>,
    }

    impl GlyphMetrics for Counting<'_> {
        fn measure_width(&self, text: &str, size: Px) -> Px {
            HeuristicMetrics.measure_width(text, size)
        }

        fn measure_height(&self, sample: &str, size: Px) -> Px {
            self.heights.set(self.heights.get() + 1);
            HeuristicMetrics.measure_height(sample, size)
        }
    }

    #[test]
    fn rejected_sizes_keep_previous_metrics() {
        let mut text = AnnotatedText::new(HeuristicMetrics);
        text.set_base_font_size(Px(20.0)).expect("valid size");
        assert!(text.set_base_font_size(Px(1.0)).is_err());
        assert!(text.set_annotation_font_size(Px(0.5)).is_err());
        assert_eq!(text.metrics().base_font_size(), Px(20.0));
        assert_eq!(text.metrics().annotation_font_size(), Px(10.0));
    }

    #[test]
    fn calibration_is_memoized() {
        let heights = Cell::new(0);
        let mut text = AnnotatedText::new(Counting { heights: &heights });
        text.set_pairs([("这", "zhè")]);
        text.set_mode(DisplayMode::Annotated);

        text.measure(Px(100.0));
        text.measure(Px(50.0));
        assert_eq!(heights.get(), 2);

        text.set_base_font_size(Px(30.0)).expect("valid size");
        text.measure(Px(100.0));
        assert_eq!(heights.get(), 4);

        text.set_mode(DisplayMode::AnnotationOnly);
        text.measure(Px(100.0));
        assert_eq!(heights.get(), 6);
    }

    #[test]
    fn measure_includes_padding() {
        let mut text = AnnotatedText::new(HeuristicMetrics);
        text.set_base_font_size(Px(20.0)).expect("valid size");
        text.set_plain_text("这是");
        text.set_padding(Padding::symmetric(Px(3.0), Px(5.0)));

        assert_eq!(text.measure(Px::UNBOUNDED), (Px(50.0), Px(30.0)));
        // the padding comes out of the available width
        assert_eq!(text.measure(Px(40.0)), (Px(30.0), Px(30.0 + 24.0 + 10.0)));
        assert_eq!(text.last_layout().map(|l| l.line_count), Some(2));
    }

    #[test]
    fn empty_text_measures_as_padding() {
        let mut text = AnnotatedText::new(HeuristicMetrics);
        text.set_plain_text("");
        text.set_padding(Padding::all(Px(2.0)));
        assert_eq!(text.measure(Px(100.0)), (Px(4.0), Px(4.0)));
        assert!(text.plan(PlanOptions::default()).commands.is_empty());
    }

    #[test]
    fn plan_is_offset_by_padding() {
        let mut text = AnnotatedText::new(HeuristicMetrics);
        text.set_base_font_size(Px(20.0)).expect("valid size");
        text.set_plain_text("这");
        text.set_padding(Padding::trbl(Px(7.0), Px(0.0), Px(0.0), Px(3.0)));
        text.measure(Px::UNBOUNDED);

        match &text.plan(PlanOptions::default()).commands[..] {
            [PaintCommand::DrawRun { baseline, .. }] => {
                assert_eq!(*baseline, (Px(3.0), Px(7.0 + 24.0)));
            }
            other => panic!("expected a single run, got {other:?}"),
        }
    }

    #[test]
    fn changes_drop_the_last_layout() {
        let mut text = AnnotatedText::new(HeuristicMetrics);
        text.set_plain_text("这");
        text.measure(Px(100.0));
        assert!(text.last_layout().is_some());

        text.set_mode(DisplayMode::Annotated);
        assert!(text.last_layout().is_none());
        assert!(text.plan(PlanOptions::default()).commands.is_empty());
    }

    #[test]
    fn pairs_use_default_colours() {
        let mut text = AnnotatedText::new(HeuristicMetrics);
        text.set_default_colours(colours::RED, colours::BLUE);
        text.set_pairs([("这", "zhè")]);
        assert_eq!(text.tokens()[0].base_colour, colours::RED);
        assert_eq!(text.tokens()[0].annotation_colour, colours::BLUE);
    }

    #[test]
    fn recolouring_applies_to_held_tokens() {
        let mut text = AnnotatedText::new(HeuristicMetrics);
        text.set_pairs([("这", "zhè"), ("是", "shì")]);
        text.measure(Px(100.0));

        text.set_base_colour(colours::RED);
        assert!(text.last_layout().is_none());
        text.set_annotation_colour(colours::BLUE);
        assert!(text
            .tokens()
            .iter()
            .all(|t| t.base_colour == colours::RED && t.annotation_colour == colours::BLUE));

        text.set_mode(DisplayMode::Annotated);
        text.measure(Px(100.0));
        let colours_drawn: Vec<Colour> = text
            .plan(PlanOptions::default())
            .commands
            .iter()
            .filter_map(|command| match command {
                PaintCommand::DrawRun { colour, .. } => Some(*colour),
                _ => None,
            })
            .collect();
        assert_eq!(
            colours_drawn,
            vec![colours::BLUE, colours::RED, colours::BLUE, colours::RED]
        );
    }

    #[test]
    fn plain_text_wraps_as_a_paragraph_in_every_mode() {
        let sentence = "这是一个很长的拼音组件文本内容";
        for mode in [
            DisplayMode::PlainText,
            DisplayMode::Annotated,
            DisplayMode::AnnotationOnly,
        ] {
            let mut text = AnnotatedText::new(HeuristicMetrics);
            text.set_base_font_size(Px(20.0)).expect("valid size");
            text.set_plain_text(sentence);
            text.set_mode(mode);
            assert!(text.is_plain());

            // five 20px ideographs per line, three 24px lines with 10px gaps
            assert_eq!(text.measure(Px(100.0)), (Px(100.0), Px(92.0)), "{mode:?}");
            let layout = text.last_layout().expect("measured");
            assert_eq!(layout.mode, DisplayMode::PlainText);
            assert_eq!(layout.line_count, 3);
            assert!(layout.per_token.is_empty());

            let drawn: String = text.plan(PlanOptions::default()).runs().collect();
            assert_eq!(drawn, sentence, "{mode:?}");
        }
    }

    #[test]
    fn pairs_replace_plain_text() {
        let mut text = AnnotatedText::new(HeuristicMetrics);
        text.set_plain_text("这是");
        text.set_pairs([("这", "zhè")]);
        text.set_mode(DisplayMode::Annotated);
        assert!(!text.is_plain());
        text.measure(Px::UNBOUNDED);
        assert_eq!(text.last_layout().map(|l| l.per_token.len()), Some(1));
    }
}
