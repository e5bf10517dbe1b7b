//! # Error Handling
//!
//! Error taxonomy for resource resolution and rendering.
//!
//! ## Architecture
//!
//! - **Error Types**: one enum, [`DensifyError`], whose variants each carry an
//!   [`ErrorContext`] (operation, free-form context, recovery suggestion,
//!   severity, metadata)
//! - **Classification**: the [`classify`] module decides whether an error only
//!   skips the resource it belongs to or must abort a whole batch
//! - **Conversions**: `From` impls for the I/O, JSON, image codec and
//!   scaler errors that surface through `?`
//!
//! Unrecognized qualifier segments and "no matching variant" are *not*
//! errors; they never reach this module.
//!
//! ## Usage
//!
//! ```rust
//! use densify::error::{DensifyError, classify};
//!
//! let error = DensifyError::invalid_resource_name("icon.svg", "missing '-' separator")
//!     .with_operation("parse_resource")
//!     .with_recovery_suggestion("rename the file to <name>-<density>.svg");
//!
//! assert!(classify::skips_resource(&error));
//! assert!(!classify::aborts_batch(&error));
//! ```

use std::{error::Error as StdError, fmt};

use densify_scale::cpu::ScaleError;

/// Severity levels for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Errors that affect one resource
    Error,
    /// Errors that prevent any work from starting
    Fatal,
}

/// Metadata about when and where an error occurred
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    pub context: Option<String>,
    pub recovery_suggestion: Option<String>,
    pub severity: ErrorSeverity,
    /// Additional metadata as key-value pairs
    pub metadata: std::collections::BTreeMap<String, String>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            operation: None,
            context: None,
            recovery_suggestion: None,
            severity: ErrorSeverity::Error,
            metadata: std::collections::BTreeMap::new(),
        }
    }
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn fatal() -> Self {
        Self {
            severity: ErrorSeverity::Fatal,
            ..Self::default()
        }
    }
}

/// Base error type for densify
#[derive(Debug)]
pub enum DensifyError {
    /// Resource file name cannot be split into name + qualifiers
    InvalidResourceName {
        name: String,
        reason: String,
        context: ErrorContext,
    },
    /// A qualifier value (density) that matched a pattern but cannot be interpreted
    InvalidQualifier {
        qualifier: String,
        reason: String,
        context: ErrorContext,
    },
    /// A zone segment whose stop precedes its start
    InvalidZone {
        variant: String,
        start: u32,
        stop: u32,
        context: ErrorContext,
    },
    /// A variant name pattern that is not a valid regular expression
    InvalidPattern {
        pattern: String,
        source: regex::Error,
        context: ErrorContext,
    },
    /// Run configuration errors
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },
    /// Scaling or nine-patch painting failures
    Raster {
        operation: String,
        reason: String,
        context: ErrorContext,
    },
    /// I/O errors
    Io {
        operation: String,
        path: Option<String>,
        source: std::io::Error,
        context: ErrorContext,
    },
    /// External library errors
    External {
        library: String,
        source: Box<dyn StdError + Send + Sync>,
        context: ErrorContext,
    },
}

impl DensifyError {
    pub fn invalid_resource_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResourceName {
            name: name.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn invalid_qualifier(qualifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQualifier {
            qualifier: qualifier.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn invalid_zone(variant: impl Into<String>, start: u32, stop: u32) -> Self {
        Self::InvalidZone {
            variant: variant.into(),
            start,
            stop,
            context: ErrorContext::fatal(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
            context: ErrorContext::fatal(),
        }
    }

    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::fatal(),
        }
    }

    pub fn raster(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Raster {
            operation: operation.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: None,
            source,
            context: ErrorContext::new(),
        }
    }

    /// Attach the path an I/O error happened on. No-op for other variants.
    pub fn with_path(mut self, p: impl AsRef<std::path::Path>) -> Self {
        if let Self::Io { path, .. } = &mut self {
            *path = Some(p.as_ref().display().to_string());
        }
        self
    }

    /// Create an external library error
    pub fn external(
        library: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            library: library.into(),
            source: Box::new(source),
            context: ErrorContext::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.context_mut().severity = severity;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context_mut().metadata.insert(key.into(), value.into());
        self
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::InvalidResourceName { context, .. } => context,
            Self::InvalidQualifier { context, .. } => context,
            Self::InvalidZone { context, .. } => context,
            Self::InvalidPattern { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Raster { context, .. } => context,
            Self::Io { context, .. } => context,
            Self::External { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::InvalidResourceName { context, .. } => context,
            Self::InvalidQualifier { context, .. } => context,
            Self::InvalidZone { context, .. } => context,
            Self::InvalidPattern { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Raster { context, .. } => context,
            Self::Io { context, .. } => context,
            Self::External { context, .. } => context,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidResourceName { .. } => "invalid_resource_name",
            Self::InvalidQualifier { .. } => "invalid_qualifier",
            Self::InvalidZone { .. } => "invalid_zone",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::Config { .. } => "config",
            Self::Raster { .. } => "raster",
            Self::Io { .. } => "io",
            Self::External { .. } => "external",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.context().severity
    }

    pub fn recovery_suggestion(&self) -> Option<&str> {
        self.context().recovery_suggestion.as_deref()
    }
}

impl fmt::Display for DensifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DensifyError::InvalidResourceName { name, reason, .. } => {
                write!(f, "Invalid resource name '{}': {}", name, reason)
            }
            DensifyError::InvalidQualifier {
                qualifier, reason, ..
            } => {
                write!(f, "Invalid qualifier '{}': {}", qualifier, reason)
            }
            DensifyError::InvalidZone {
                variant,
                start,
                stop,
                ..
            } => {
                write!(
                    f,
                    "Invalid zone segment [{}, {}] in variant '{}': stop precedes start",
                    start, stop, variant
                )
            }
            DensifyError::InvalidPattern {
                pattern, source, ..
            } => {
                write!(f, "Invalid name pattern '{}': {}", pattern, source)
            }
            DensifyError::Config {
                field,
                value,
                reason,
                ..
            } => {
                write!(
                    f,
                    "Configuration error in '{}': {} (value: {})",
                    field, reason, value
                )
            }
            DensifyError::Raster {
                operation, reason, ..
            } => {
                write!(f, "Raster operation {} failed: {}", operation, reason)
            }
            DensifyError::Io {
                operation,
                path,
                source,
                ..
            } => {
                if let Some(path) = path {
                    write!(
                        f,
                        "I/O error during {} on '{}': {}",
                        operation, path, source
                    )
                } else {
                    write!(f, "I/O error during {}: {}", operation, source)
                }
            }
            DensifyError::External {
                library, source, ..
            } => {
                write!(f, "External library error in {}: {}", library, source)
            }
        }
    }
}

impl StdError for DensifyError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::External { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type alias using our custom error type
pub type DensifyResult<T> = Result<T, DensifyError>;

/// Error classification utilities
pub mod classify {
    use super::*;

    /// Errors confined to a single resource: the batch logs them and moves on.
    pub fn skips_resource(error: &DensifyError) -> bool {
        !aborts_batch(error)
    }

    /// Errors in shared inputs (run configuration, variant pool) that make
    /// every resource in the batch wrong.
    pub fn aborts_batch(error: &DensifyError) -> bool {
        matches!(
            error,
            DensifyError::Config { .. }
                | DensifyError::InvalidPattern { .. }
                | DensifyError::InvalidZone { .. }
        ) || error.severity() == ErrorSeverity::Fatal
    }
}

impl From<std::io::Error> for DensifyError {
    fn from(error: std::io::Error) -> Self {
        Self::io("unknown", error)
    }
}

impl From<serde_json::Error> for DensifyError {
    fn from(error: serde_json::Error) -> Self {
        Self::external("serde_json", error).with_severity(ErrorSeverity::Fatal)
    }
}

impl From<image::ImageError> for DensifyError {
    fn from(error: image::ImageError) -> Self {
        Self::external("image", error)
    }
}

impl From<ScaleError> for DensifyError {
    fn from(error: ScaleError) -> Self {
        match error {
            ScaleError::InvalidSegment { start, stop } => Self::invalid_zone("<unnamed>", start, stop),
            other => Self::raster("scale", other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = DensifyError::config("targets", "", "at least one target density is required");
        assert_eq!(error.category(), "config");
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert!(classify::aborts_batch(&error));
    }

    #[test]
    fn test_error_with_context() {
        let error = DensifyError::invalid_qualifier("w0mdpi", "constrained size must be positive")
            .with_context("parsing icon-w0mdpi.png")
            .with_recovery_suggestion("use a positive pixel size")
            .with_metadata("file", "icon-w0mdpi.png");

        assert_eq!(error.category(), "invalid_qualifier");
        assert!(classify::skips_resource(&error));
        assert_eq!(error.recovery_suggestion(), Some("use a positive pixel size"));
        assert_eq!(
            error.context().metadata.get("file").map(String::as_str),
            Some("icon-w0mdpi.png")
        );
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let error = DensifyError::io(
            "write_output",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .with_path("out/drawable-hdpi/icon.png");
        let text = error.to_string();
        assert!(text.contains("write_output"));
        assert!(text.contains("out/drawable-hdpi/icon.png"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_scale_error_conversion() {
        let zone: DensifyError = ScaleError::InvalidSegment { start: 5, stop: 2 }.into();
        assert_eq!(zone.category(), "invalid_zone");
        let raster: DensifyError = ScaleError::BufferTooSmall.into();
        assert_eq!(raster.category(), "raster");
        assert!(classify::skips_resource(&raster));

        let oversized: DensifyError = ScaleError::OutputTooLarge { w: u32::MAX, h: 1 }.into();
        assert_eq!(oversized.category(), "raster");
        assert_eq!(oversized.severity(), ErrorSeverity::Error);
        assert!(oversized.to_string().contains("canvas limit"));
    }
}
