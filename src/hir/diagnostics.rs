//! Diagnostics: semantic error reporting.
//!
//! This module provides diagnostic types for type-checking errors. A
//! diagnostic is anchored at one primary location and may carry any number
//! of additional ranges (e.g. every candidate of an ambiguous path).
//! Rendering to text is the driver's job; this layer only aggregates.

use std::sync::Arc;

use crate::base::{FileId, Location};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// A primary location plus the secondary ranges attached to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RichLocation {
    primary: Location,
    ranges: Vec<Location>,
}

impl RichLocation {
    /// Create a rich location anchored at `primary`.
    pub fn new(primary: Location) -> Self {
        Self {
            primary,
            ranges: Vec::new(),
        }
    }

    /// Attach another range, in order.
    pub fn add_range(&mut self, range: Location) {
        self.ranges.push(range);
    }

    /// The anchor location.
    pub fn primary(&self) -> Location {
        self.primary
    }

    /// The attached ranges, in the order they were added.
    pub fn ranges(&self) -> &[Location] {
        &self.ranges
    }

    /// Whether `loc` is the primary location or one of the ranges.
    pub fn covers(&self, loc: Location) -> bool {
        self.primary == loc || self.ranges.contains(&loc)
    }
}

impl From<Location> for RichLocation {
    fn from(primary: Location) -> Self {
        Self::new(primary)
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Where the diagnostic points.
    pub location: RichLocation,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0002").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(location: impl Into<RichLocation>, message: impl Into<Arc<str>>) -> Self {
        Self {
            location: location.into(),
            severity: Severity::Error,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(location: impl Into<RichLocation>, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(location, message)
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// The file of the primary location.
    pub fn file(&self) -> FileId {
        self.location.primary().file
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes for type-checking errors.
pub mod codes {
    /// Undefined reference (name not found).
    pub const UNDEFINED_REFERENCE: &str = "E0001";
    /// Ambiguous reference (multiple candidates).
    pub const AMBIGUOUS_REFERENCE: &str = "E0002";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during type checking.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add an ambiguous reference error spanning every range in `location`.
    pub fn ambiguous_reference(&mut self, location: RichLocation, name: &str) {
        self.add(
            Diagnostic::error(location, format!("multiple applicable items in scope for: {}", name))
                .with_code(codes::AMBIGUOUS_REFERENCE),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics anchored in a specific file.
    pub fn diagnostics_for_file(&self, file: FileId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.file() == file).collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(file: u32, start: u32) -> Location {
        Location::from_offsets(FileId::new(file), start, start + 3)
    }

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error(loc(0, 10), "test error");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.location.primary(), loc(0, 10));
        assert!(diag.location.ranges().is_empty());
    }

    #[test]
    fn test_diagnostic_with_code() {
        let diag = Diagnostic::warning(loc(0, 0), "test").with_code(codes::UNDEFINED_REFERENCE);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.code.as_deref(), Some("E0001"));
    }

    #[test]
    fn test_rich_location_covers() {
        let mut rich = RichLocation::new(loc(0, 0));
        rich.add_range(loc(1, 4));
        rich.add_range(loc(0, 8));

        assert_eq!(rich.ranges(), &[loc(1, 4), loc(0, 8)]);
        assert!(rich.covers(loc(0, 0)));
        assert!(rich.covers(loc(1, 4)));
        assert!(!rich.covers(loc(1, 0)));
    }

    #[test]
    fn test_collector_ambiguous_reference() {
        let mut collector = DiagnosticCollector::new();
        let mut rich = RichLocation::new(loc(0, 0));
        rich.add_range(loc(0, 20));
        collector.ambiguous_reference(rich, "run");

        assert_eq!(collector.error_count(), 1);
        let diag = &collector.diagnostics()[0];
        assert_eq!(&*diag.message, "multiple applicable items in scope for: run");
        assert_eq!(diag.code.as_deref(), Some(codes::AMBIGUOUS_REFERENCE));
    }

    #[test]
    fn test_collector_by_file_and_take() {
        let mut collector = DiagnosticCollector::new();
        collector.add(Diagnostic::error(loc(0, 0), "file 0"));
        collector.add(Diagnostic::error(loc(1, 0), "file 1"));
        collector.add(Diagnostic::warning(loc(0, 5), "file 0 again"));

        assert_eq!(collector.diagnostics_for_file(FileId::new(0)).len(), 2);
        assert_eq!(collector.error_count(), 2);
        assert!(collector.has_errors());

        let taken = collector.take();
        assert_eq!(taken.len(), 3);
        assert!(!collector.has_errors());
    }
}
