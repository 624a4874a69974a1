//! Output writing for merge runs.
//!
//! Every merged file becomes one block: a blank line, a separator, an
//! `Archivo: <path>` header, a second separator, the raw content and a
//! trailing blank line. Blocks are concatenated with no overall header or
//! footer.

use crate::MergeError;
use crate::types::FileRecord;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The line written above and below each header.
pub const SEPARATOR: &str = "=======================================";

/// Label that precedes the path in each header.
pub const HEADER_LABEL: &str = "Archivo:";

/// Writes one header+content block for `path` into `writer`.
pub fn write_block<W: Write>(writer: &mut W, path: &Path, content: &str) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{SEPARATOR}")?;
    writeln!(writer, "{HEADER_LABEL} {}", path.display())?;
    writeln!(writer, "{SEPARATOR}")?;
    writer.write_all(content.as_bytes())?;
    writer.write_all(b"\n\n")
}

/// Formats one block into a string.
pub fn format_block(path: &Path, content: &str) -> String {
    format!(
        "\n{SEPARATOR}\n{HEADER_LABEL} {}\n{SEPARATOR}\n{content}\n\n",
        path.display()
    )
}

/// Mode the finished output should carry: the replaced file's, or the
/// usual `0644` for a new one.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

enum Target {
    Direct(BufWriter<File>),
    Atomic(BufWriter<NamedTempFile>),
}

/// The single output stream of a run.
///
/// Dropping the sink without calling [`OutputSink::finish`] closes the
/// handle; in atomic mode it also removes the temporary file, leaving the
/// destination untouched.
pub(crate) struct OutputSink {
    path: PathBuf,
    target: Target,
}

impl OutputSink {
    pub(crate) fn create(path: &Path, atomic: bool) -> Result<Self, MergeError> {
        let target = if atomic {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let temp = NamedTempFile::new_in(dir).map_err(|e| MergeError::io(dir, e))?;
            Target::Atomic(BufWriter::new(temp))
        } else {
            let file = File::create(path).map_err(|e| MergeError::io(path, e))?;
            Target::Direct(BufWriter::new(file))
        };
        Ok(Self {
            path: path.to_path_buf(),
            target,
        })
    }

    pub(crate) fn write_record(&mut self, record: &FileRecord) -> Result<(), MergeError> {
        let result = match &mut self.target {
            Target::Direct(w) => write_block(w, &record.path, &record.content),
            Target::Atomic(w) => write_block(w, &record.path, &record.content),
        };
        result.map_err(|e| MergeError::io(&self.path, e))
    }

    /// Flushes everything and, in atomic mode, moves the temporary file over
    /// the destination.
    pub(crate) fn finish(self) -> Result<(), MergeError> {
        let path = self.path;
        match self.target {
            Target::Direct(mut w) => w.flush().map_err(|e| MergeError::io(&path, e)),
            Target::Atomic(w) => {
                let temp = w
                    .into_inner()
                    .map_err(|e| MergeError::io(&path, e.into_error()))?;
                if let Some(perms) = target_permissions(&path) {
                    temp.as_file()
                        .set_permissions(perms)
                        .map_err(|e| MergeError::io(&path, e))?;
                }
                temp.persist(&path).map_err(|e| MergeError::Persist {
                    path: path.clone(),
                    source: e.error,
                })?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_layout() {
        let block = format_block(Path::new("src/a.txt"), "hello");
        assert_eq!(
            block,
            "\n=======================================\n\
             Archivo: src/a.txt\n\
             =======================================\n\
             hello\n\n"
        );
    }

    #[test]
    fn separator_is_fixed_width() {
        assert_eq!(SEPARATOR.len(), 39);
        assert!(SEPARATOR.chars().all(|c| c == '='));
    }

    #[test]
    fn streamed_block_matches_formatted_block() {
        let path = Path::new("dir/notes.md");
        let mut streamed = Vec::new();
        write_block(&mut streamed, path, "# title\nbody").unwrap();
        assert_eq!(
            String::from_utf8(streamed).unwrap(),
            format_block(path, "# title\nbody")
        );
    }

    #[cfg(unix)]
    #[test]
    fn atomic_output_keeps_replaced_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("existing.txt");
        fs::write(&existing, "old").unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o640)).unwrap();
        let fresh = dir.path().join("fresh.txt");
        let record = FileRecord {
            path: PathBuf::from("a.txt"),
            content: "a".to_string(),
        };
        for target in [&existing, &fresh] {
            let mut sink = OutputSink::create(target, true).unwrap();
            sink.write_record(&record).unwrap();
            sink.finish().unwrap();
        }
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&existing), 0o640);
        assert_eq!(mode(&fresh), 0o644);
        assert_eq!(
            fs::read_to_string(&existing).unwrap(),
            format_block(Path::new("a.txt"), "a")
        );
    }

    #[test]
    fn content_is_not_altered() {
        let content = "line one\r\nline two\n\n\ttabbed";
        let block = format_block(Path::new("x"), content);
        assert!(block.contains(content));
        assert!(block.ends_with("\ttabbed\n\n"));
    }
}
