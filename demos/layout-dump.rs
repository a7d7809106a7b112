//! Lays out a short annotated sentence in every display mode and prints the paint commands.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example layout-dump -- 120 path/to/NotoSansSC-Regular.ttf
//! ```
//!
//! The first argument is the available width in pixels (unbounded if omitted). With a font
//! path the text is measured with that font and the annotated plan is also painted into
//! `layout-dump.content` as a PDF content stream.

use ruby_layout::layout::Padding;
use ruby_layout::{
    colours, AnnotatedText, DisplayMode, Font, GlyphMetrics, HeuristicMetrics, PaintCommand,
    PdfSurface, PlanOptions, Px, RenderPlan,
};

const SENTENCE: &[(&str, &str)] = &[
    ("这", "zhè"),
    ("是", "shì"),
    ("一个", "yí gè"),
    ("拼音", "pīn yīn"),
    ("组件", "zǔ jiàn"),
    ("，", ""),
    ("你好", "nǐ hǎo"),
    ("。", ""),
];

fn dump<M: GlyphMetrics>(glyphs: M, width: Px) -> RenderPlan {
    let mut text = AnnotatedText::new(glyphs);
    text.set_default_colours(colours::DEFAULT_TEXT, colours::BLUE);
    text.set_pairs(SENTENCE.iter().copied());
    text.set_padding(Padding::all(Px(4.0)));
    text.set_base_font_size(Px(20.0)).expect("valid font size");

    let mut annotated = RenderPlan::default();
    for mode in [
        DisplayMode::PlainText,
        DisplayMode::Annotated,
        DisplayMode::AnnotationOnly,
    ] {
        text.set_mode(mode);
        text.set_metrics(text.metrics().with_underline(mode == DisplayMode::Annotated));
        let (w, h) = text.measure(width);
        println!("{mode:?}: {w} x {h}");

        let plan = text.plan(PlanOptions::from_metrics(text.metrics()));
        for command in plan.commands.iter() {
            match command {
                PaintCommand::DrawRun {
                    text, baseline, font_size, ..
                } => println!("  run {text:?} at ({}, {}) size {font_size}", baseline.0, baseline.1),
                PaintCommand::DrawLineSegment { x1, y1, x2, .. } => {
                    println!("  underline {x1}..{x2} at {y1}")
                }
                PaintCommand::DrawRect { rect } => println!("  bounds {rect:?}"),
            }
        }
        if mode == DisplayMode::Annotated {
            annotated = plan;
        }
    }
    annotated
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let width = args
        .next()
        .map(|w| Px(w.parse().expect("width is a number")))
        .unwrap_or(Px::UNBOUNDED);

    match args.next() {
        Some(path) => {
            let bytes = std::fs::read(&path).expect("can read font");
            let font = Font::load(bytes).expect("can load font");
            let plan = dump(&font, width);
            let content = PdfSurface::default().render(&plan, &font, Px(842.0));
            std::fs::write("layout-dump.content", content).expect("can write content stream");
        }
        None => {
            dump(HeuristicMetrics, width);
        }
    }
}
