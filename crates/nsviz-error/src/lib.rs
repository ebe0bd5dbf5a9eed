//! # nsviz-error
//!
//! Unified error handling for nsviz.
//!
//! - **ErrorKind**: what went wrong (e.g. `StyleMissing`, `ConfigInvalid`)
//! - **Operation**: where it went wrong, chained as the error travels up
//! - **Context**: key/value pairs that help locate the cause
//! - **Source**: the wrapped underlying error, if any
//!
//! ```rust
//! use nsviz_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::StyleMissing, "no edge style")
//!         .with_operation("builder::create")
//!         .with_context("style", "edge_implement"))
//! }
//! ```
//!
//! Nothing in nsviz retries: the graph build is in-memory and bounded, so every
//! error is surfaced to the caller as-is.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the nsviz Error
pub type Result<T> = std::result::Result<T, Error>;
