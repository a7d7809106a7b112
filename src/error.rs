use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A size in [`Metrics`](crate::Metrics) was below its minimum (or not finite). The
    /// configuration is rejected rather than clamped.
    #[error("invalid metrics: {field} must be at least {minimum}px, got {value}px")]
    InvalidMetrics {
        field: &'static str,
        value: f32,
        minimum: f32,
    },

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),
}
