use crate::error::LayoutError;
use crate::units::Px;

/// Ratio of the annotation font size to the base font size unless set explicitly
pub const ANNOTATION_SIZE_RATIO: f32 = 0.5;

/// Smallest accepted base font size
pub const MIN_BASE_FONT_SIZE: Px = Px(2.0);

/// Smallest accepted annotation font size
pub const MIN_ANNOTATION_FONT_SIZE: Px = Px(1.0);

/// Font sizes and spacings controlling a layout pass.
///
/// Metrics are validated when they are set, so a `Metrics` value always holds a usable
/// configuration:
///
/// ```
/// use ruby_layout::{Metrics, Px};
///
/// let metrics = Metrics::new(Px(32.0))?
///     .with_horizontal_spacing(Px(6.0))
///     .with_underline(true);
/// assert_eq!(metrics.annotation_font_size(), Px(16.0));
///
/// assert!(Metrics::new(Px(1.0)).is_err());
/// # Ok::<(), ruby_layout::LayoutError>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Metrics {
    base_font_size: Px,
    annotation_font_size: Px,
    /// Gap between neighbouring tokens on a line
    pub horizontal_spacing: Px,
    /// Gap between wrapped lines
    pub line_spacing: Px,
    /// Gap between a token's annotation and its base text
    pub annotation_to_base_spacing: Px,
    /// Distance from the bottom of a line to its underline
    pub underline_offset: Px,
    pub show_underline: bool,
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics {
            base_font_size: Px(14.0),
            annotation_font_size: Px(14.0) * ANNOTATION_SIZE_RATIO,
            horizontal_spacing: Px(5.0),
            line_spacing: Px(10.0),
            annotation_to_base_spacing: Px(2.0),
            underline_offset: Px(14.0),
            show_underline: false,
        }
    }
}

impl Metrics {
    /// Create metrics for the given base font size, with the annotation at half that size and
    /// default spacings
    pub fn new(base_font_size: Px) -> Result<Metrics, LayoutError> {
        Metrics::default().with_base_font_size(base_font_size)
    }

    pub fn base_font_size(&self) -> Px {
        self.base_font_size
    }

    pub fn annotation_font_size(&self) -> Px {
        self.annotation_font_size
    }

    /// Change the base font size. This also resets the annotation font size to half the base
    /// size, so call [`Metrics::with_annotation_font_size`] afterwards to override it.
    pub fn with_base_font_size(self, px: Px) -> Result<Metrics, LayoutError> {
        check("base_font_size", px, MIN_BASE_FONT_SIZE)?;
        Metrics {
            base_font_size: px,
            ..self
        }
        .with_annotation_font_size(px * ANNOTATION_SIZE_RATIO)
    }

    pub fn with_annotation_font_size(self, px: Px) -> Result<Metrics, LayoutError> {
        check("annotation_font_size", px, MIN_ANNOTATION_FONT_SIZE)?;
        Ok(Metrics {
            annotation_font_size: px,
            ..self
        })
    }

    pub fn with_horizontal_spacing(self, px: Px) -> Metrics {
        Metrics {
            horizontal_spacing: px,
            ..self
        }
    }

    pub fn with_line_spacing(self, px: Px) -> Metrics {
        Metrics {
            line_spacing: px,
            ..self
        }
    }

    pub fn with_annotation_to_base_spacing(self, px: Px) -> Metrics {
        Metrics {
            annotation_to_base_spacing: px,
            ..self
        }
    }

    pub fn with_underline_offset(self, px: Px) -> Metrics {
        Metrics {
            underline_offset: px,
            ..self
        }
    }

    pub fn with_underline(self, show_underline: bool) -> Metrics {
        Metrics {
            show_underline,
            ..self
        }
    }
}

fn check(field: &'static str, value: Px, minimum: Px) -> Result<(), LayoutError> {
    if value.is_finite() && value >= minimum {
        Ok(())
    } else {
        Err(LayoutError::InvalidMetrics {
            field,
            value: *value,
            minimum: *minimum,
        })
    }
}
