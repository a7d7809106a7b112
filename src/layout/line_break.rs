use crate::units::Px;

/// Where the [`LineBreaker`] put a token
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    /// 0-based line index
    pub line: usize,
    /// Offset of the token's left edge from the start of its line
    pub x: Px,
}

/// The tokens making up one line
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineExtent {
    /// Index of the first token on the line
    pub first: usize,
    /// Number of tokens on the line, always at least 1
    pub len: usize,
    /// Width of the line from the left edge of its first token to the right edge of its last
    pub width: Px,
}

/// Output of [`LineBreaker::break_lines`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Breaks {
    /// One placement per input width, in order
    pub placements: Vec<Placement>,
    pub lines: Vec<LineExtent>,
}

/// Greedy, single-pass line breaking of atomic tokens.
///
/// Tokens are placed left to right and a new line is started as soon as the next token (plus
/// the spacing in front of it) would not fit. There is no look-ahead, so lines are not
/// balanced, and tokens are never split: a token wider than the available width sits alone on
/// its own line and overflows it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineBreaker {
    max_width: Px,
    spacing: Px,
}

impl LineBreaker {
    /// `max_width` may be [`Px::UNBOUNDED`], in which case everything lands on line 0.
    /// `spacing` is inserted between neighbouring tokens on the same line.
    pub fn new(max_width: Px, spacing: Px) -> LineBreaker {
        LineBreaker { max_width, spacing }
    }

    pub fn break_lines(&self, widths: &[Px]) -> Breaks {
        let mut breaks = Breaks {
            placements: Vec::with_capacity(widths.len()),
            lines: Vec::new(),
        };

        let mut line = 0usize;
        let mut column = 0usize;
        let mut line_length = Px::ZERO;

        for (index, &width) in widths.iter().enumerate() {
            let incremental = if column == 0 {
                width
            } else {
                width + self.spacing
            };

            if column > 0 && line_length + incremental > self.max_width {
                breaks.lines.push(LineExtent {
                    first: index - column,
                    len: column,
                    width: line_length,
                });
                log::trace!("line {line} full at {line_length} with {column} tokens");

                line += 1;
                column = 0;
                line_length = width;
            } else {
                line_length += incremental;
            }
            column += 1;

            if width > self.max_width {
                log::warn!(
                    "token {index} is {width} wide and overflows the available {}",
                    self.max_width
                );
            }

            breaks.placements.push(Placement {
                line,
                x: line_length - width,
            });
        }

        if column > 0 {
            breaks.lines.push(LineExtent {
                first: widths.len() - column,
                len: column,
                width: line_length,
            });
        }

        breaks
    }
}
