use crate::colour::Colour;
use crate::glyph::GlyphMetrics;
use crate::punctuation::PunctuationClassifier;
use crate::rect::Rect;
use crate::units::Px;
use unicode_width::UnicodeWidthChar;

/// One coloured run of paragraph input; `token` is the index of the token it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Run<'a> {
    pub token: usize,
    pub text: &'a str,
    pub colour: Colour,
}

/// A run of text placed on a line, in a single colour
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    /// Index of the token this text belongs to
    pub token: usize,
    pub text: String,
    pub colour: Colour,
    pub rect: Rect,
}

/// How a paragraph is set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub font_size: Px,
    pub line_height: Px,
    pub line_spacing: Px,
    pub max_width: Px,
}

#[derive(Debug, Clone, Copy)]
struct Glyph {
    token: usize,
    ch: char,
    colour: Colour,
    width: Px,
}

/// Wraps coloured runs like an ordinary paragraph, returning the runs placed on each line.
///
/// # Wrapping Behavior
///
/// The wrapper tracks potential break points and rewinds to the most recent one when a line
/// overflows. Break points are recorded:
///
/// 1. **After whitespace**
/// 2. **At run boundaries** (each run is one token, so words stay intact)
/// 3. **Around East Asian wide characters**, which may break anywhere
///
/// A line never starts with punctuation when it can be avoided. If no break point exists
/// (e.g. one very long word) the line is broken between characters instead. Whitespace at the
/// end of a wrapped line is dropped, as is whitespace at the start of the next one. `'\n'`
/// always starts a new line.
pub fn wrap_paragraph<M, C>(
    runs: &[Run],
    style: &ParagraphStyle,
    glyphs: &M,
    classifier: &C,
) -> Vec<Vec<PlacedRun>>
where
    M: GlyphMetrics + ?Sized,
    C: PunctuationClassifier + ?Sized,
{
    let mut lines: Vec<Vec<Glyph>> = Vec::new();
    let mut current: Vec<Glyph> = Vec::new();
    let mut x = Px::ZERO;
    // index into `current` where the next line could begin
    let mut last_break: Option<usize> = None;
    let mut prev: Option<Glyph> = None;

    let mut buf = [0u8; 4];
    for run in runs {
        // normalize newlines
        let text = run.text.replace("\r\n", "\n").replace('\r', "\n");

        for ch in text.chars() {
            if ch == '\n' {
                lines.push(std::mem::take(&mut current));
                x = Px::ZERO;
                last_break = None;
                prev = None;
                continue;
            }

            let glyph = Glyph {
                token: run.token,
                ch,
                colour: run.colour,
                width: glyphs.measure_width(ch.encode_utf8(&mut buf), style.font_size),
            };

            if let Some(prev) = prev {
                if !current.is_empty() && can_break_between(&prev, &glyph, classifier) {
                    last_break = Some(current.len());
                }
            }
            prev = Some(glyph);

            if !current.is_empty() && x + glyph.width > style.max_width {
                if ch.is_whitespace() {
                    // overflowing whitespace just ends the line
                    lines.push(finish_line(std::mem::take(&mut current)));
                    x = Px::ZERO;
                    last_break = None;
                    continue;
                }

                match last_break.take().filter(|&at| at > 0) {
                    Some(at) => {
                        // rewind to the break point, carrying the tail onto the next line
                        let carried = current.split_off(at);
                        lines.push(finish_line(std::mem::replace(&mut current, carried)));
                        current.retain(|g| !g.ch.is_whitespace());
                    }
                    None => {
                        // no break point: split between characters
                        lines.push(finish_line(std::mem::take(&mut current)));
                    }
                }
                x = current.iter().map(|g| g.width).sum();
            }

            if current.is_empty() && ch.is_whitespace() && !lines.is_empty() {
                // don't start a wrapped line with whitespace
                continue;
            }

            current.push(glyph);
            x += glyph.width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let pitch = style.line_height + style.line_spacing;
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| place_line(&line, pitch * index as f32, style.line_height))
        .collect()
}

fn can_break_between<C: PunctuationClassifier + ?Sized>(
    prev: &Glyph,
    next: &Glyph,
    classifier: &C,
) -> bool {
    if next.ch.is_whitespace() {
        return false;
    }
    if prev.ch.is_whitespace() {
        return true;
    }
    if classifier.is_punctuation(next.ch) {
        return false;
    }
    prev.token != next.token || is_wide(prev.ch) || is_wide(next.ch)
}

fn is_wide(ch: char) -> bool {
    UnicodeWidthChar::width(ch) == Some(2)
}

fn finish_line(mut line: Vec<Glyph>) -> Vec<Glyph> {
    while line.last().is_some_and(|g| g.ch.is_whitespace()) {
        line.pop();
    }
    line
}

/// Coalesce a line's glyphs into runs of consecutive glyphs from the same token
fn place_line(line: &[Glyph], top: Px, line_height: Px) -> Vec<PlacedRun> {
    let mut runs: Vec<PlacedRun> = Vec::new();
    let mut x = Px::ZERO;
    for glyph in line {
        match runs.last_mut() {
            Some(run) if run.token == glyph.token && run.colour == glyph.colour => {
                run.text.push(glyph.ch);
                run.rect.x2 += glyph.width;
            }
            _ => runs.push(PlacedRun {
                token: glyph.token,
                text: glyph.ch.to_string(),
                colour: glyph.colour,
                rect: Rect::from_origin_size(x, top, glyph.width, line_height),
            }),
        }
        x += glyph.width;
    }
    runs
}
