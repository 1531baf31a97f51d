use thiserror::Error;

/// Validation errors for configuration values parsed from strings.
///
/// The animation and speed sets are closed enums, so a constructed
/// configuration is always valid; these errors can only occur at the string
/// boundary (host data-attributes, config files).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    /// The animation name is not `slide` or `fade`.
    #[error("unknown animation: {0}")]
    UnknownAnimation(String),

    /// The speed is not `slow`, `normal`, `fast` or a millisecond count.
    #[error("unknown speed: {0}")]
    UnknownSpeed(String),
}
