use crate::colour::Colour;
use crate::punctuation::PunctuationClassifier;

/// Which text runs of each token are laid out and drawn
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Only the base text, wrapped like an ordinary paragraph
    #[default]
    PlainText,
    /// The annotation above the base text for every token
    Annotated,
    /// Only the annotation text, wrapped like an ordinary paragraph at the base font size
    AnnotationOnly,
}

/// One base-text/annotation pair, e.g. `("拼音", "pīn yīn")`. Either text may be empty.
///
/// Tokens are plain values: layout reads them but never changes them.
#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    pub base_text: String,
    pub base_colour: Colour,
    pub annotation_text: String,
    pub annotation_colour: Colour,
}

impl Token {
    /// Create a token drawn in the default colour
    pub fn new<B: Into<String>, A: Into<String>>(base_text: B, annotation_text: A) -> Token {
        Token {
            base_text: base_text.into(),
            base_colour: Colour::default(),
            annotation_text: annotation_text.into(),
            annotation_colour: Colour::default(),
        }
    }

    /// Set the colours of the base text and annotation runs
    pub fn with_colours(mut self, base_colour: Colour, annotation_colour: Colour) -> Token {
        self.base_colour = base_colour;
        self.annotation_colour = annotation_colour;
        self
    }

    /// The annotation as it is laid out and painted. A token without an annotation whose base
    /// text is a single punctuation character shows that punctuation in the annotation slot,
    /// so that annotation-only text keeps its commas and full stops.
    pub fn display_annotation<C: PunctuationClassifier + ?Sized>(&self, classifier: &C) -> &str {
        if self.annotation_text.is_empty() && classifier.is_punctuation_text(&self.base_text) {
            &self.base_text
        } else {
            &self.annotation_text
        }
    }

    /// The text this token contributes in the given mode
    pub fn display_text<C: PunctuationClassifier + ?Sized>(
        &self,
        mode: DisplayMode,
        classifier: &C,
    ) -> &str {
        match mode {
            DisplayMode::PlainText | DisplayMode::Annotated => &self.base_text,
            DisplayMode::AnnotationOnly => self.display_annotation(classifier),
        }
    }

    /// The colour of the run this token contributes in the given mode
    pub fn display_colour(&self, mode: DisplayMode) -> Colour {
        match mode {
            DisplayMode::PlainText | DisplayMode::Annotated => self.base_colour,
            DisplayMode::AnnotationOnly => self.annotation_colour,
        }
    }
}

impl<B: Into<String>, A: Into<String>> From<(B, A)> for Token {
    fn from((base, annotation): (B, A)) -> Self {
        Token::new(base, annotation)
    }
}
