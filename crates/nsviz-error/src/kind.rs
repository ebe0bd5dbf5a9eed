//! Error kinds for nsviz operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to tell configuration mistakes apart from
/// contract violations and plain I/O failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Invalid configuration value (negative group length, unknown mode, ...)
    ConfigInvalid,

    /// A layout provider has no style dictionary for a requested key
    StyleMissing,

    // =========================================================================
    // Graph errors
    // =========================================================================
    /// An edge for the ordered pair already exists
    EdgeExists,

    /// A vertex id does not belong to the graph
    VertexNotFound,

    /// A fully-qualified name has no segments
    InvalidName,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Deserialization failed
    DeserializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Configuration errors are fixed by the user, not by the code.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ErrorKind::ConfigInvalid | ErrorKind::StyleMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_matches_variant_name() {
        assert_eq!(ErrorKind::StyleMissing.to_string(), "StyleMissing");
        assert_eq!(ErrorKind::EdgeExists.as_str(), "EdgeExists");
    }

    #[test]
    fn configuration_kinds() {
        assert!(ErrorKind::ConfigInvalid.is_configuration());
        assert!(ErrorKind::StyleMissing.is_configuration());
        assert!(!ErrorKind::EdgeExists.is_configuration());
        assert!(!ErrorKind::IoFailed.is_configuration());
    }
}
