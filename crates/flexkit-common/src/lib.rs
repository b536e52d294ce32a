//! # FlexKit Common
//!
//! Error types and logging configuration shared by the FlexKit crates.
//!
//! ## Features
//!
//! - Unified error type with backtrace support for internal failures
//! - Logging configuration and setup
//! - Result extension traits

use thiserror::Error;

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};

/// Unified error type for FlexKit.
#[derive(Error, Debug)]
pub enum FlexkitError {
    /// Rejected style input.
    #[error("Style error: {message}")]
    Style {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Tree or layout errors.
    #[error("Layout error: {message}")]
    Layout {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed or unreadable layout fixture.
    #[error("Fixture error: {message}")]
    Fixture {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors.
    #[error("Config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal error (unexpected).
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        backtrace: Option<backtrace::Backtrace>,
    },
}

impl FlexkitError {
    /// Create a style error.
    pub fn style(message: impl Into<String>) -> Self {
        Self::Style {
            message: message.into(),
            source: None,
        }
    }

    /// Create a style error with source.
    pub fn style_with_source<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Style {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a layout error.
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
            source: None,
        }
    }

    /// Create a layout error with source.
    pub fn layout_with_source<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Layout {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a fixture error.
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::Fixture {
            message: message.into(),
            source: None,
        }
    }

    /// Create a fixture error with source.
    pub fn fixture_with_source<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Fixture {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error with backtrace.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            backtrace: Some(backtrace::Backtrace::new()),
        }
    }

    /// Whether the error was caused by caller input rather than the engine.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, FlexkitError::Io(_) | FlexkitError::Internal { .. })
    }

    /// Get the error category for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            FlexkitError::Style { .. } => "style",
            FlexkitError::Layout { .. } => "layout",
            FlexkitError::Fixture { .. } => "fixture",
            FlexkitError::Config { .. } => "config",
            FlexkitError::Io(_) => "io",
            FlexkitError::NotFound(_) => "not_found",
            FlexkitError::InvalidArgument(_) => "invalid_argument",
            FlexkitError::Internal { .. } => "internal",
        }
    }
}

/// Result type alias for FlexKit operations.
pub type Result<T> = std::result::Result<T, FlexkitError>;

/// Extension trait for Result.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Convert to a different error type.
    fn map_err_to<E: Into<FlexkitError>>(self, f: impl FnOnce() -> E) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| FlexkitError::Internal {
            message: format!("{}: {}", message.into(), e),
            backtrace: Some(backtrace::Backtrace::new()),
        })
    }

    fn map_err_to<E2: Into<FlexkitError>>(self, f: impl FnOnce() -> E2) -> Result<T> {
        self.map_err(|_| f().into())
    }
}

/// Extension trait for Option.
pub trait OptionExt<T> {
    /// Convert None to a NotFound error.
    fn ok_or_not_found(self, resource: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, resource: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| FlexkitError::NotFound(resource.into()))
    }
}
