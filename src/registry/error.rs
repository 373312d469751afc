//! Registry error types
//!
//! `RegistryError` covers registration failures; `ObserverError` is what an
//! observer reports back to the fan-out loop when it fails.

use std::any::Any;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Topic already holds the configured maximum of live observers
    ObserverLimitReached {
        /// Debug rendering of the topic key
        topic: String,
        /// Configured limit
        limit: usize,
    },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::ObserverLimitReached { topic, limit } => {
                write!(f, "Observer limit of {} reached for topic {}", limit, topic)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Failure reported by a single observer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    /// Create an observer error from any displayable value
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// Build an error from a caught panic payload
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            format!("panicked: {}", s)
        } else if let Some(s) = payload.downcast_ref::<String>() {
            format!("panicked: {}", s)
        } else {
            "panicked".to_string()
        };
        Self { message }
    }

    /// Error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ObserverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ObserverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_display() {
        let err = RegistryError::ObserverLimitReached {
            topic: "\"chat\"".to_string(),
            limit: 3,
        };
        assert_eq!(
            err.to_string(),
            "Observer limit of 3 reached for topic \"chat\""
        );
    }

    #[test]
    fn test_panic_payloads() {
        let err = ObserverError::from_panic(Box::new("boom"));
        assert_eq!(err.message(), "panicked: boom");

        let err = ObserverError::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(err.message(), "panicked: owned boom");

        let err = ObserverError::from_panic(Box::new(42u8));
        assert_eq!(err.message(), "panicked");
    }
}
