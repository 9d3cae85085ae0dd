//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Rivet container
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// No binding registered for the requested key
    #[error("No binding found for {key}")]
    BindingNotFound {
        /// Display form of the binding key
        key: String,
    },

    /// Two bindings declared for the same (type, qualifier) pair
    #[error("Duplicate binding for {key}")]
    DuplicateBinding {
        /// Display form of the binding key
        key: String,
    },

    /// A resolution path re-entered a binding that is still being built
    #[error("Circular dependency detected: {}", path.join(" -> "))]
    CircularDependency {
        /// Keys on the resolution path, first to last, ending with the repeated key
        path: Vec<String>,
    },

    /// A context-scoped binding was resolved outside any scope context
    #[error("No active scope context for context-scoped binding {key}")]
    ScopeNotActive {
        /// Display form of the binding key
        key: String,
    },

    /// A stored instance did not have the type recorded in its binding
    #[error("Type mismatch: expected {expected}")]
    TypeMismatch {
        /// Name of the expected type
        expected: String,
    },

    /// No remote factory is registered for the URL protocol
    #[error("Unsupported protocol: {protocol}")]
    UnsupportedProtocol {
        /// The offending protocol token (lowercase)
        protocol: String,
    },

    /// Two remote factory providers declared the same protocol
    #[error("Protocol '{protocol}' declared by both '{first}' and '{second}'")]
    ProtocolCollision {
        /// Colliding protocol token
        protocol: String,
        /// Provider registered first
        first: String,
        /// Provider that collided
        second: String,
    },

    /// URL could not be parsed into protocol and address
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Remote invocation failed
    #[error("Remote invocation error: {message}")]
    Remote {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A subscriber channel is closed and cannot accept events
    #[error("Event channel closed")]
    ChannelClosed,

    /// Component provider failed while building an instance
    #[error("Provider error: {message}")]
    Provider {
        /// Description of the provider failure
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure failure (file system, logging, process environment)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Binding and resolution error creation methods
impl Error {
    /// Create a binding-not-found error
    pub fn binding_not_found<S: Into<String>>(key: S) -> Self {
        Self::BindingNotFound { key: key.into() }
    }

    /// Create a duplicate binding error
    pub fn duplicate_binding<S: Into<String>>(key: S) -> Self {
        Self::DuplicateBinding { key: key.into() }
    }

    /// Create a circular dependency error from a resolution path
    pub fn circular_dependency(path: Vec<String>) -> Self {
        Self::CircularDependency { path }
    }

    /// Create a scope-not-active error
    pub fn scope_not_active<S: Into<String>>(key: S) -> Self {
        Self::ScopeNotActive { key: key.into() }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<S: Into<String>>(expected: S) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
        }
    }

    /// Create a provider failure error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether this error is an assembly-time configuration failure
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateBinding { .. }
                | Self::CircularDependency { .. }
                | Self::ProtocolCollision { .. }
                | Self::Configuration { .. }
        )
    }
}

// Remote error creation methods
impl Error {
    /// Create an unsupported protocol error
    pub fn unsupported_protocol<S: Into<String>>(protocol: S) -> Self {
        Self::UnsupportedProtocol {
            protocol: protocol.into(),
        }
    }

    /// Create a protocol collision error
    pub fn protocol_collision(
        protocol: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::ProtocolCollision {
            protocol: protocol.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a remote invocation error
    pub fn remote<S: Into<String>>(message: S) -> Self {
        Self::Remote {
            message: message.into(),
            source: None,
        }
    }

    /// Create a remote invocation error with source
    pub fn remote_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Remote {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
