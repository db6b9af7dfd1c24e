use thiserror::Error;

/// Errors raised by grid accessors and configuration. Search outcomes are never
/// errors: a missing path is an empty [Path](crate::Path).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("coordinate ({x}, {y}) does not map to a grid cell")]
    NonFinite { x: f32, y: f32 },

    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),
}
