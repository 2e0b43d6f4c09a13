use thiserror::Error;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that host tools can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    /// Two members of one surface share the same identity key
    DuplicateKey,
    /// Surface snapshot bytes could not be decoded
    InvalidSurface,
    /// Configuration document could not be decoded
    InvalidConfig,
    NotFound,

    // Integration
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::InvalidSurface => "ERR_INVALID_SURFACE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling and optional
/// context (operation, member key) for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    member_key: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            member_key: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add member key context
    pub fn with_member_key(mut self, key: impl Into<String>) -> Self {
        self.member_key = Some(key.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn member_key(&self) -> Option<&str> {
        self.member_key.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.member_key {
            write!(f, " (member_key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for apidelta operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiDeltaError {
    /// Two members in one surface produced the same identity key
    #[error("Duplicate {scope} key in {surface} surface: {key}")]
    DuplicateMemberKey {
        surface: String,
        scope: String,
        key: String,
    },

    /// Surface snapshot could not be decoded
    #[error("Invalid surface snapshot: {reason}")]
    InvalidSurface { reason: String },

    /// Configuration could not be decoded
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A release index did not refer to a release in the document
    #[error("Release index {index} is out of range for a document with {len} releases")]
    ReleaseIndexOutOfRange { index: usize, len: usize },

    /// No release in the document has this version
    #[error("No changelog entry found for version {version}")]
    ReleaseNotFound { version: String },

    /// Caller supplied an empty or malformed value
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // ===== Generic Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<ApiDeltaError> for ExError {
    fn from(err: ApiDeltaError) -> Self {
        match err {
            ApiDeltaError::DuplicateMemberKey {
                surface,
                scope,
                key,
            } => ExError::new(ExErrorKind::DuplicateKey)
                .with_member_key(key)
                .with_message(format!(
                    "Duplicate {} key in {} surface",
                    scope, surface
                )),

            ApiDeltaError::InvalidSurface { reason } => ExError::new(ExErrorKind::InvalidSurface)
                .with_message(format!("Invalid surface snapshot: {}", reason)),

            ApiDeltaError::InvalidConfig { reason } => ExError::new(ExErrorKind::InvalidConfig)
                .with_message(format!("Invalid configuration: {}", reason)),

            ApiDeltaError::ReleaseIndexOutOfRange { index, len } => {
                ExError::new(ExErrorKind::NotFound).with_message(format!(
                    "Release index {} is out of range (document has {} releases)",
                    index, len
                ))
            }

            ApiDeltaError::ReleaseNotFound { version } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("No changelog entry found for version {}", version))
                .with_member_key(version),

            ApiDeltaError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            ApiDeltaError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ApiDeltaError {
    fn from(err: serde_json::Error) -> Self {
        ApiDeltaError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_maps_to_kind_and_key() {
        let err = ApiDeltaError::DuplicateMemberKey {
            surface: "current".to_string(),
            scope: "method".to_string(),
            key: "M(Int32)".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::DuplicateKey);
        assert_eq!(ex.code(), "ERR_DUPLICATE_KEY");
        assert_eq!(ex.member_key(), Some("M(Int32)"));
        assert!(ex.message().contains("current"));
    }

    #[test]
    fn test_index_out_of_range_is_not_found() {
        let ex: ExError = ApiDeltaError::ReleaseIndexOutOfRange { index: 3, len: 1 }.into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert!(ex.message().contains("3"));
    }

    #[test]
    fn test_release_not_found_carries_version() {
        let ex: ExError = ApiDeltaError::ReleaseNotFound {
            version: "2.0.0".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert_eq!(ex.member_key(), Some("2.0.0"));
        assert!(ex.message().contains("2.0.0"));
    }

    #[test]
    fn test_display_includes_code_op_and_key() {
        let ex = ExError::new(ExErrorKind::DuplicateKey)
            .with_op("validate_surface")
            .with_member_key("Azure.Foo")
            .with_message("Duplicate type key");
        let s = ex.to_string();
        assert!(s.starts_with("[ERR_DUPLICATE_KEY]"));
        assert!(s.contains("validate_surface"));
        assert!(s.contains("Azure.Foo"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Serialization).with_message("bad json");
        let outer = ExError::new(ExErrorKind::InvalidSurface).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Serialization)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
