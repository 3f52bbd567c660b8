//! Foundation types for the front end.
//!
//! This module provides fundamental types used throughout the type checker:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`Location`] - A range within a specific file
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{Location, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
