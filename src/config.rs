use crate::GridError;

/// Rule used to pick the next open cell to expand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Lowest propagated cost first.
    SingleSource,
    /// Lowest Manhattan distance to the goal first, ignoring the cost so far.
    Greedy,
}

/// Grid dimensions, cell spacing and search mode, supplied once before the grid
/// is generated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub spacing: f32,
    pub use_single_source_mode: bool,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: 1,
            height: 1,
            spacing: 1.0,
            use_single_source_mode: true,
        }
    }
}

impl GridConfig {
    pub fn new(width: usize, height: usize, spacing: f32) -> GridConfig {
        GridConfig {
            width,
            height,
            spacing,
            ..Default::default()
        }
    }

    pub fn with_single_source_mode(mut self, use_single_source_mode: bool) -> GridConfig {
        self.use_single_source_mode = use_single_source_mode;
        self
    }

    pub fn search_mode(&self) -> SearchMode {
        if self.use_single_source_mode {
            SearchMode::SingleSource
        } else {
            SearchMode::Greedy
        }
    }

    /// Checks that both dimensions are non-zero and the spacing is a positive finite number.
    pub fn validate(&self) -> Result<(), GridError> {
        validate_dimensions(self.width, self.height, self.spacing)
    }
}

pub(crate) fn validate_dimensions(
    width: usize,
    height: usize,
    spacing: f32,
) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidConfig(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    // Cell coordinates are i32 throughout.
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(GridError::InvalidConfig(format!(
            "dimensions {width}x{height} exceed the addressable range"
        )));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(GridError::InvalidConfig(format!(
            "spacing must be positive and finite, got {spacing}"
        )));
    }
    Ok(())
}
