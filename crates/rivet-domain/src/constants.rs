//! Domain constants
//!
//! Annotation marker names recognised by the capability adapter. Scanners
//! report annotations by these names; several names may map to the same
//! capability when an older marker namespace is still in use.

// ============================================================================
// ANNOTATION MARKERS
// ============================================================================

/// Current remote-exposure marker
pub const REMOTE_MARKER: &str = "rivet::Remote";

/// Legacy remote-exposure marker, treated exactly like [`REMOTE_MARKER`]
pub const LEGACY_REMOTE_MARKER: &str = "rivet::rmi::Remote";

/// Resource path marker for REST resources and path-mapped methods
pub const PATH_MARKER: &str = "rivet::Path";

/// Legacy resource path marker
pub const LEGACY_PATH_MARKER: &str = "rivet::rest::Path";

/// Marker for classes that are client-side proxies of a remote interface
pub const REMOTE_CLIENT_MARKER: &str = "rivet::RemoteClient";

/// Marker carrying an explicit scope attribute
pub const SCOPE_MARKER: &str = "rivet::Scope";

/// Marker excluding a method from remote exposure
pub const LOCAL_MARKER: &str = "rivet::Local";

// ============================================================================
// ANNOTATION ATTRIBUTES
// ============================================================================

/// Attribute holding an annotation's primary value (paths, scope names)
pub const VALUE_ATTRIBUTE: &str = "value";

/// Attribute holding a remote URL on [`REMOTE_CLIENT_MARKER`]
pub const URL_ATTRIBUTE: &str = "url";

// ============================================================================
// PROTOCOLS
// ============================================================================

/// Separator between protocol and address in a remote URL
pub const PROTOCOL_SEPARATOR: &str = "://";
