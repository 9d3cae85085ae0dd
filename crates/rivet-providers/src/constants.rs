//! Provider constants

// ============================================================================
// HTTP remote transport
// ============================================================================

/// Protocols served by the HTTP remote factory
pub const HTTP_PROTOCOLS: [&str; 2] = ["http", "https"];

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Request body field carrying positional arguments
pub const ARGUMENTS_FIELD: &str = "arguments";

/// Reply body field carrying the return value
pub const RESULT_FIELD: &str = "result";

/// Reply body field carrying a remote failure message
pub const ERROR_FIELD: &str = "error";

// ============================================================================
// Server-sent events
// ============================================================================

/// Events buffered per subscriber channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Send timeout per subscriber, in milliseconds
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 5_000;

/// Reconnection delay advertised to clients, in milliseconds
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 3_000;

/// Content type of an event stream
pub const CONTENT_TYPE_EVENT_STREAM: &str = "text/event-stream";
