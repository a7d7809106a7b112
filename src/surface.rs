//! Painting render plans into PDF content streams.

use crate::colour::{colours, Colour};
use crate::font::Font;
use crate::render::{PaintCommand, RenderPlan};
use crate::units::Px;
use pdf_writer::{Content, Name, Str};

/// Paints a [`RenderPlan`] as a PDF content stream.
///
/// Text is shown with two-byte glyph ids, so the font resource named by `font_name` must be a
/// Type0 font with the Identity-H encoding. Layout space is top-down while PDF space is
/// bottom-up; every y coordinate is flipped around the `page_top` passed to
/// [`PdfSurface::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct PdfSurface {
    /// Name of the font in the page's resource dictionary
    pub font_name: String,
    /// Dash pattern for underlines, `None` for solid lines
    pub dash: Option<[f32; 2]>,
    pub line_width: f32,
    pub line_colour: Colour,
    /// Colour of debug bounds outlines
    pub bounds_colour: Colour,
}

impl Default for PdfSurface {
    fn default() -> Self {
        PdfSurface {
            font_name: "F0".to_string(),
            dash: Some([2.0, 2.0]),
            line_width: 1.0,
            line_colour: colours::DEFAULT_TEXT,
            bounds_colour: colours::RED,
        }
    }
}

impl PdfSurface {
    pub fn with_font_name<S: Into<String>>(mut self, font_name: S) -> PdfSurface {
        self.font_name = font_name.into();
        self
    }

    pub fn with_dash(mut self, dash: Option<[f32; 2]>) -> PdfSurface {
        self.dash = dash;
        self
    }

    /// Paint `plan` using `font` for glyph lookup. `page_top` is the PDF y coordinate that
    /// layout y = 0 maps to.
    pub fn render(&self, plan: &RenderPlan, font: &Font, page_top: Px) -> Vec<u8> {
        self.render_with(plan, page_top, |ch| font.glyph_id_or_replacement(ch))
    }

    /// Paint `plan`, mapping characters to glyph ids with `glyph_id`
    pub fn render_with<G: Fn(char) -> u16>(
        &self,
        plan: &RenderPlan,
        page_top: Px,
        glyph_id: G,
    ) -> Vec<u8> {
        let mut content = Content::new();
        if plan.commands.is_empty() {
            return content.finish();
        }

        let flip = |y: Px| *(page_top - y);

        content.save_state();
        let mut current_fill: Option<Colour> = None;
        let mut current_size: Option<Px> = None;

        for command in plan.commands.iter() {
            match command {
                PaintCommand::DrawRun {
                    text,
                    baseline,
                    colour,
                    font_size,
                    ..
                } => {
                    if current_fill != Some(*colour) {
                        write_fill(&mut content, *colour);
                        current_fill = Some(*colour);
                    }

                    let glyphs: Vec<u8> = text
                        .chars()
                        .flat_map(|ch| glyph_id(ch).to_be_bytes())
                        .collect();

                    content.begin_text();
                    // Tf is part of the text state, which persists across text objects
                    if current_size != Some(*font_size) {
                        content.set_font(Name(self.font_name.as_bytes()), **font_size);
                        current_size = Some(*font_size);
                    }
                    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, *baseline.0, flip(baseline.1)]);
                    content.show(Str(&glyphs));
                    content.end_text();
                }
                PaintCommand::DrawLineSegment { x1, y1, x2, y2 } => {
                    content.save_state();
                    write_stroke(&mut content, self.line_colour);
                    content.set_line_width(self.line_width);
                    if let Some(dash) = self.dash {
                        content.set_dash_pattern(dash, 0.0);
                    }
                    content.move_to(**x1, flip(*y1));
                    content.line_to(**x2, flip(*y2));
                    content.stroke();
                    content.restore_state();
                }
                PaintCommand::DrawRect { rect } => {
                    content.save_state();
                    write_stroke(&mut content, self.bounds_colour);
                    content.set_line_width(0.5);
                    content.rect(
                        *rect.left(),
                        flip(rect.bottom()),
                        *rect.width(),
                        *rect.height(),
                    );
                    content.stroke();
                    content.restore_state();
                }
            }
        }

        content.restore_state();
        log::trace!(
            "painted {} commands into a PDF content stream",
            plan.commands.len()
        );
        content.finish()
    }
}

fn write_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn write_stroke(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;

    fn run(text: &str, x: f32, y: f32) -> PaintCommand {
        PaintCommand::DrawRun {
            text: text.to_string(),
            rect: Rect::from_origin_size(Px(x), Px(y - 10.0), Px(10.0), Px(10.0)),
            baseline: (Px(x), Px(y)),
            colour: colours::BLACK,
            font_size: Px(10.0),
        }
    }

    fn render(commands: Vec<PaintCommand>, surface: &PdfSurface) -> String {
        let plan = RenderPlan { commands };
        let bytes = surface.render_with(&plan, Px(100.0), |ch| ch as u16);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn empty_plan_paints_nothing() {
        assert_eq!(render(Vec::new(), &PdfSurface::default()), "");
    }

    #[test]
    fn runs_are_flipped_and_encoded() {
        let out = render(vec![run("A", 5.0, 30.0)], &PdfSurface::default());
        assert!(out.contains("/F0 10 Tf"), "{out}");
        assert!(out.contains("1 0 0 1 5 70 Tm"), "{out}");
        assert_eq!(out.matches(" Tj").count(), 1, "{out}");
        assert!(out.contains("BT") && out.contains("ET"), "{out}");
    }

    #[test]
    fn font_is_only_set_when_it_changes() {
        let out = render(
            vec![run("A", 0.0, 10.0), run("B", 10.0, 10.0)],
            &PdfSurface::default().with_font_name("Han"),
        );
        assert_eq!(out.matches("/Han 10 Tf").count(), 1, "{out}");
        assert_eq!(out.matches("Tj").count(), 2, "{out}");
    }

    #[test]
    fn underlines_are_dashed_by_default() {
        let line = PaintCommand::DrawLineSegment {
            x1: Px(0.0),
            y1: Px(20.0),
            x2: Px(50.0),
            y2: Px(20.0),
        };
        let dashed = render(vec![line.clone()], &PdfSurface::default());
        assert!(dashed.contains("[2 2] 0 d"), "{dashed}");
        assert!(dashed.contains("0 80 m"), "{dashed}");
        assert!(dashed.contains("50 80 l"), "{dashed}");

        let solid = render(vec![line], &PdfSurface::default().with_dash(None));
        assert!(!solid.contains(" d\n"), "{solid}");
    }

    #[test]
    fn rects_use_their_bottom_edge() {
        let out = render(
            vec![PaintCommand::DrawRect {
                rect: Rect::from_origin_size(Px(1.0), Px(10.0), Px(20.0), Px(30.0)),
            }],
            &PdfSurface::default(),
        );
        assert!(out.contains("1 60 20 30 re"), "{out}");
    }
}
