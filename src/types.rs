use std::fmt;
use std::path::PathBuf;

/// A file whose contents were decoded and are about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// The path as yielded by the walker, rooted at the input directory.
    pub path: PathBuf,
    /// The decoded UTF-8 contents, unmodified.
    pub content: String,
}

/// Why a file was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    /// The contents are not valid UTF-8.
    InvalidEncoding,
    /// The process may not read the file.
    PermissionDenied,
    /// Any other read failure, only skipped under [`SkipPolicy::AllReadErrors`].
    ///
    /// [`SkipPolicy::AllReadErrors`]: crate::SkipPolicy::AllReadErrors
    Other,
}

/// A file excluded from the output, with the error that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub kind: SkipKind,
    /// The rendered I/O error.
    pub reason: String,
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// What happened to a single file during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Merged(FileRecord),
    Skipped(SkippedFile),
}

/// Summary of a completed merge.
#[derive(Debug, Default)]
pub struct MergeReport {
    /// The file that was written.
    pub output: PathBuf,
    /// Merged paths, in the order their blocks appear in the output.
    pub merged: Vec<PathBuf>,
    /// Files left out, in traversal order.
    pub skipped: Vec<SkippedFile>,
}
