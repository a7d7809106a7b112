//! Layout of annotated ("ruby") text: base text such as Chinese characters, with phonetic
//! annotations such as pinyin set above it.
//!
//! Text is a sequence of [`Token`]s, each pairing a base text with its annotation. A
//! [`LayoutEngine`](layout::LayoutEngine) computes where everything goes for a
//! [`DisplayMode`] and a width, a [`RenderPlan`] turns that into paint commands, and a surface
//! such as [`PdfSurface`] draws them. Glyph measurement and punctuation classification are
//! injected through the [`GlyphMetrics`] and [`PunctuationClassifier`] traits.
//!
//! ```
//! use ruby_layout::layout::LayoutEngine;
//! use ruby_layout::{DisplayMode, HeuristicMetrics, Metrics, PlanOptions, Px, RenderPlan, Token};
//!
//! let tokens: Vec<Token> = [("拼", "pīn"), ("音", "yīn")].into_iter().map(Token::from).collect();
//! let metrics = Metrics::new(Px(20.0))?.with_underline(true);
//!
//! let engine = LayoutEngine::new(HeuristicMetrics);
//! let layout = engine.layout(&tokens, DisplayMode::Annotated, Px::UNBOUNDED, &metrics);
//! let plan = RenderPlan::plan(
//!     &layout,
//!     &tokens,
//!     &PlanOptions::from_metrics(&metrics),
//!     engine.classifier(),
//! );
//! assert_eq!(plan.runs().collect::<Vec<_>>(), vec!["pīn", "拼", "yīn", "音"]);
//! assert_eq!(plan.line_segment_count(), 2);
//! # Ok::<(), ruby_layout::LayoutError>(())
//! ```

mod colour;
pub use colour::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod glyph;
pub use glyph::*;

/// Line breaking, paragraph wrapping, and the layout engine
pub mod layout;

mod metrics;
pub use metrics::*;

mod punctuation;
pub use punctuation::*;

mod rect;
pub use rect::*;

mod render;
pub use render::*;

mod surface;
pub use surface::*;

mod token;
pub use token::*;

mod units;
pub use units::*;

mod view;
pub use view::*;

/// Re-export PDF-writer functionality, mostly for wrapping painted content streams in pages
pub use pdf_writer;
