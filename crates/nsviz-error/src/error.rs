//! The main Error type for nsviz.

use crate::ErrorKind;
use std::fmt;

/// Unified error type for all nsviz operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Look up the first context value stored under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    /// `Kind: message (in operation) [key=value, ...]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if !self.operation.is_empty() {
            write!(f, " (in {})", self.operation)?;
        }
        if let Some(((first_key, first_value), rest)) = self.context.split_first() {
            write!(f, " [{first_key}={first_value}")?;
            for (key, value) in rest {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    /// Display form, then every source in the chain on its own line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")?;
        let mut source = self
            .source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static));
        while let Some(err) = source {
            write!(f, "\n  caused by: {err}")?;
            source = err.source();
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::new(ErrorKind::Unexpected, msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::new(ErrorKind::Unexpected, msg)
    }
}

impl Error {
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a StyleMissing error for the named style dictionary.
    pub fn style_missing(style: impl Into<String>) -> Self {
        let style = style.into();
        Self::new(
            ErrorKind::StyleMissing,
            format!("layout provides no '{}' style", style),
        )
        .with_context("style", style)
    }

    /// Create an EdgeExists error for the ordered pair `from -> to`.
    pub fn edge_exists(from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        Self::new(
            ErrorKind::EdgeExists,
            format!("edge '{}' -> '{}' already exists", from, to),
        )
        .with_context("from", from)
        .with_context("to", to)
    }

    pub fn vertex_not_found(vertex: impl Into<String>) -> Self {
        let vertex = vertex.into();
        Self::new(
            ErrorKind::VertexNotFound,
            format!("vertex '{}' not found", vertex),
        )
        .with_context("vertex", vertex)
    }

    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidName, message)
    }

    pub fn deserialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeserializationFailed, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_creation() {
        let err = Error::new(ErrorKind::ConfigInvalid, "group length must not be negative");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.message(), "group length must not be negative");
        assert!(err.context().is_empty());
    }

    #[test]
    fn operation_chaining_keeps_the_callee() {
        let err = Error::style_missing("edge_extend")
            .with_operation("layout::require")
            .with_operation("builder::create");

        assert_eq!(err.operation(), "builder::create");
        assert_eq!(err.context_value("called"), Some("layout::require"));
        assert_eq!(err.context_value("style"), Some("edge_extend"));
    }

    #[test]
    fn display_is_one_line() {
        let err = Error::edge_exists("App\\A", "App\\B").with_operation("graph::create_edge");

        assert_eq!(
            err.to_string(),
            "EdgeExists: edge 'App\\A' -> 'App\\B' already exists (in graph::create_edge) \
             [from=App\\A, to=App\\B]"
        );
    }

    #[test]
    fn io_errors_map_to_file_kinds() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.source_ref().is_some());
        assert!(format!("{err:?}").ends_with("caused by: gone"));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }
}
