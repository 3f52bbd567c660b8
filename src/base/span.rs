//! Source text positions and ranges.

use std::fmt;

use super::FileId;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// A range of source text inside a specific file.
///
/// Every declaration node carries one of these. Nodes synthesized by the
/// compiler (and the error sentinels) use [`Location::DUMMY`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// The file containing the range
    pub file: FileId,
    /// Byte range within the file
    pub range: TextRange,
}

impl Location {
    /// Location of nodes that do not originate from source text.
    pub const DUMMY: Location = Location {
        file: FileId::DETACHED,
        range: TextRange::empty(TextSize::new(0)),
    };

    /// Create a new location.
    #[inline]
    pub const fn new(file: FileId, range: TextRange) -> Self {
        Self { file, range }
    }

    /// Create a location from raw byte offsets.
    pub fn from_offsets(file: FileId, start: u32, end: u32) -> Self {
        Self::new(file, TextRange::new(TextSize::from(start), TextSize::from(end)))
    }

    /// Whether this is the placeholder location.
    pub fn is_dummy(&self) -> bool {
        *self == Self::DUMMY
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::DUMMY
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.file, self.range)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}..{}",
            self.file,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}
