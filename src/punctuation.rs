//! Punctuation classification.
//!
//! Layout only ever asks one question of this module: "is this character punctuation?". The
//! answer decides whether a token with no annotation borrows its base text as the annotation,
//! and whether that borrowed annotation and the token's underline are drawn. Classifiers are
//! injected into [`LayoutEngine`](crate::layout::LayoutEngine) so locale-specific tables can be
//! swapped in without touching layout.

/// A pure, stateless punctuation predicate
pub trait PunctuationClassifier {
    fn is_punctuation(&self, ch: char) -> bool;

    /// Whether `text` is exactly one punctuation character, ignoring surrounding whitespace
    fn is_punctuation_text(&self, text: &str) -> bool {
        let mut chars = text.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.is_punctuation(ch),
            _ => false,
        }
    }
}

impl<F: Fn(char) -> bool> PunctuationClassifier for F {
    fn is_punctuation(&self, ch: char) -> bool {
        self(ch)
    }
}

/// The default classifier: CJK punctuation, full-width forms, general punctuation quotes, and
/// ASCII sentence punctuation.
///
/// Symbols such as `@`, `#`, brackets, and maths operators are deliberately *not*
/// punctuation here; they keep their own annotation slot.
#[derive(Debug, Default, Copy, Clone)]
pub struct CjkPunctuation;

impl PunctuationClassifier for CjkPunctuation {
    fn is_punctuation(&self, ch: char) -> bool {
        matches!(
            ch,
            // ideographic comma, full stop, ditto mark
            '\u{3001}'..='\u{3003}'
            // double prime quotation marks
            | '\u{301D}'..='\u{301F}'
            // ! "
            | '\u{21}'..='\u{22}'
            // ' , . : ; ?
            | '\u{27}' | '\u{2C}' | '\u{2E}' | '\u{3A}' | '\u{3B}' | '\u{3F}'
            // curly quotes
            | '\u{2018}'..='\u{201F}'
            // full-width ！ ＂ ＇ ， ． ： ； ？
            | '\u{FF01}' | '\u{FF02}' | '\u{FF07}' | '\u{FF0C}' | '\u{FF0E}'
            | '\u{FF1A}' | '\u{FF1B}' | '\u{FF1F}'
            // half-width ideographic full stop, katakana middle dot
            | '\u{FF61}' | '\u{FF65}'
        )
    }
}
