//! Error types for generation failures.

use std::fmt;

use crate::config::ConfigError;

/// Error type for everything that can go wrong while generating a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// `Gen::pick` was called while no generation context was active
    NoActiveContext,

    /// A type-erased value was read back as a type it does not hold
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A strategy was unable to produce a value
    GenerationFailed {
        message: String,
        context: Option<String>,
    },

    /// Configuration rejected before generation started
    InvalidConfig(ConfigError),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::NoActiveContext => write!(
                f,
                "No active generation context: Gen::pick is only allowed inside exec"
            ),
            GenError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            GenError::GenerationFailed { message, context } => {
                write!(f, "Generation failed: {}", message)?;
                if let Some(ctx) = context {
                    write!(f, " (context: {})", ctx)?;
                }
                Ok(())
            }
            GenError::InvalidConfig(err) => write!(f, "Invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for GenError {
    fn from(err: ConfigError) -> Self {
        GenError::InvalidConfig(err)
    }
}

impl GenError {
    /// Create a generation failed error
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
            context: None,
        }
    }

    /// Create a generation failed error with context
    pub fn generation_failed_with_context(
        message: impl Into<String>,
        context: Option<impl Into<String>>,
    ) -> Self {
        Self::GenerationFailed {
            message: message.into(),
            context: context.map(|c| c.into()),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_no_active_context_display() {
        let error = GenError::NoActiveContext;
        assert_eq!(
            format!("{}", error),
            "No active generation context: Gen::pick is only allowed inside exec"
        );
    }

    #[test]
    fn test_generation_failed_display() {
        let error = GenError::generation_failed("empty range");
        assert_eq!(format!("{}", error), "Generation failed: empty range");

        let error = GenError::generation_failed_with_context("empty range", Some("5..5"));
        assert_eq!(
            format!("{}", error),
            "Generation failed: empty range (context: 5..5)"
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let error = GenError::type_mismatch("u8", "bool");
        assert_eq!(format!("{}", error), "Type mismatch: expected u8, found bool");
    }

    #[test]
    fn test_config_error_conversion_keeps_source() {
        let error: GenError = ConfigError::InvalidSamples(0).into();
        assert_eq!(error, GenError::InvalidConfig(ConfigError::InvalidSamples(0)));
        assert!(error.source().is_some());
        assert!(GenError::NoActiveContext.source().is_none());
    }
}
