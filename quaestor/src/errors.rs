use thiserror::Error;

/// Errors produced by element lookups, property reads and simulated input.
///
/// Expected failure modes of test scenarios (a control that is disabled,
/// read-only, off-screen or simply absent) are ordinary variants here so that
/// assertions can match on them without any exception ceremony.
#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element is not visible: {0}")]
    ElementNotVisible(String),

    #[error("Element is not enabled: {0}")]
    ElementNotEnabled(String),

    #[error("Element is read-only: {0}")]
    ElementReadOnly(String),

    #[error("Property is not supported by the element: {0}")]
    PropertyNotSupported(String),

    #[error("Control pattern is not supported by the element: {0}")]
    PatternNotSupported(String),

    #[error("Property value has an unexpected type: {0}")]
    TypeMismatch(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to scroll element into view: {0}")]
    ScrollFailed(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Platform-specific error: {0}")]
    PlatformError(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}
