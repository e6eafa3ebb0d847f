/// Sentinel used for every coordinate of a position that was never assigned.
pub const NOT_SET: i32 = -1;

/// A position in a source file.
///
/// Lines are 1-based, columns are 0-based byte columns within the line and
/// offsets are byte offsets from the start of the file. Tokens created by
/// model edits carry [`FilePosition::unset`] until the file is re-parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePosition {
    pub line: i32,
    pub column: i32,
    pub offset: i32,
}

impl FilePosition {
    pub fn new(line: i32, column: i32, offset: i32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// A position with all coordinates set to [`NOT_SET`]
    pub const fn unset() -> Self {
        Self {
            line: NOT_SET,
            column: NOT_SET,
            offset: NOT_SET,
        }
    }

    pub fn is_not_set(&self) -> bool {
        self.line == NOT_SET && self.column == NOT_SET && self.offset == NOT_SET
    }

    pub fn is_set(&self) -> bool {
        !self.is_not_set()
    }

    /// Position shifted right by `delta` bytes on the same line
    pub fn shifted(&self, delta: i32) -> Self {
        if self.is_not_set() {
            return *self;
        }
        Self {
            line: self.line,
            column: self.column + delta,
            offset: self.offset + delta,
        }
    }
}

impl Default for FilePosition {
    fn default() -> Self {
        Self::unset()
    }
}

impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_not_set() {
            write!(f, "<unset>")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}
