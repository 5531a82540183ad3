use alloc::string::String;
use core::fmt;

/// Invalid engine options, reported by the engine constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Variable-height mode (no `item_height`) was requested without an estimate function.
    MissingEstimate,
    /// `item_height` was set to zero.
    ZeroItemHeight,
    /// `scrolling_delay_ms` was set to zero.
    ZeroScrollingDelay,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEstimate => f.write_str(
                "variable-height mode requires an estimate_height function (or set item_height)",
            ),
            Self::ZeroItemHeight => f.write_str("item_height must be positive"),
            Self::ZeroScrollingDelay => f.write_str("scrolling_delay_ms must be positive"),
        }
    }
}

impl core::error::Error for ConfigurationError {}

/// A measurement that could not be attributed to an item.
///
/// Rejecting a measurement leaves the engine state untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The rendered element carries no index attribute.
    MissingIndex,
    /// The index attribute is not a non-negative integer.
    InvalidIndex { value: String },
    /// The index does not address an item of the current sequence.
    IndexOutOfRange { index: usize, count: usize },
    /// Measured heights must be positive.
    ZeroHeight { index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIndex => f.write_str(
                "measured element has no index attribute; attach the item index before measuring",
            ),
            Self::InvalidIndex { value } => {
                write!(f, "item index must be a non-negative integer, got {value:?}")
            }
            Self::IndexOutOfRange { index, count } => {
                write!(f, "item index {index} is out of range (count={count})")
            }
            Self::ZeroHeight { index } => {
                write!(f, "measured height of item {index} must be positive")
            }
        }
    }
}

impl core::error::Error for ValidationError {}

/// Errors surfaced by the windowing engine and its adapters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Configuration(ConfigurationError),
    Validation(ValidationError),
    /// The scrollable container is not attached.
    MissingCollaborator,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "configuration error: {e}"),
            Self::Validation(e) => write!(f, "validation error: {e}"),
            Self::MissingCollaborator => f.write_str("scroll element is not attached"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::MissingCollaborator => None,
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
