use crate::error::MergeError;
use crate::options::{MergeOptions, SkipPolicy};
use crate::output::OutputSink;
use crate::types::{FileOutcome, FileRecord, MergeReport, SkipKind, SkippedFile};
use ignore::WalkBuilder;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(options: &MergeOptions) -> Self {
        let mut builder = WalkBuilder::new(&options.input);
        builder
            .standard_filters(false)
            .follow_links(options.follow_links);
        if options.sort_by_path {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }
        Self {
            inner: builder.build(),
        }
    }
    fn into_files(self) -> impl Iterator<Item = Result<PathBuf, MergeError>> {
        self.inner.filter_map(|result| match result {
            Ok(entry) if is_file_entry(&entry) => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) if is_unlistable_directory(&e) => {
                #[cfg(feature = "logging")]
                tracing::debug!("Skipping unreadable directory: {}", e);
                None
            }
            Err(e) => Some(Err(MergeError::Walk(e.to_string()))),
        })
    }
}
/// Directories count as containers; everything else the walker yields is
/// handed to the reader, dangling symlinks included.
fn is_file_entry(entry: &ignore::DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => false,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        Some(_) => true,
        None => false,
    }
}
/// A subdirectory that vanished or cannot be listed is passed over silently.
fn is_unlistable_directory(err: &ignore::Error) -> bool {
    matches!(
        err.io_error().map(io::Error::kind),
        Some(io::ErrorKind::PermissionDenied | io::ErrorKind::NotFound)
    )
}
fn read_text(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content)
}
/// Maps a read failure to a skip reason, or `None` when it must abort the run.
pub(crate) fn classify_read_error(err: &io::Error, policy: SkipPolicy) -> Option<SkipKind> {
    match err.kind() {
        io::ErrorKind::InvalidData => Some(SkipKind::InvalidEncoding),
        io::ErrorKind::PermissionDenied => Some(SkipKind::PermissionDenied),
        _ if policy == SkipPolicy::AllReadErrors => Some(SkipKind::Other),
        _ => None,
    }
}
fn read_file(path: PathBuf, policy: SkipPolicy) -> Result<FileOutcome, MergeError> {
    match read_text(&path) {
        Ok(content) => Ok(FileOutcome::Merged(FileRecord { path, content })),
        Err(e) => match classify_read_error(&e, policy) {
            Some(kind) => {
                #[cfg(feature = "logging")]
                tracing::debug!("Skipping {} ({:?}): {}", path.display(), kind, e);
                Ok(FileOutcome::Skipped(SkippedFile {
                    path,
                    kind,
                    reason: e.to_string(),
                }))
            }
            None => Err(MergeError::io(path, e)),
        },
    }
}
fn validate_input(input: &Path) -> Result<(), MergeError> {
    if input.is_dir() {
        Ok(())
    } else {
        Err(MergeError::InvalidInputDirectory(input.to_path_buf()))
    }
}
/// Lazily walks the input directory and reads one file per step.
///
/// Yields files in traversal order. Anticipated read failures come back as
/// [`FileOutcome::Skipped`]; anything else is an `Err` and the caller is
/// expected to stop.
pub struct FileStream {
    path_iter: Box<dyn Iterator<Item = Result<PathBuf, MergeError>> + Send>,
    skip_policy: SkipPolicy,
}
impl FileStream {
    pub fn new(options: &MergeOptions) -> Result<Self, MergeError> {
        validate_input(&options.input)?;
        let path_iter = Box::new(Walker::new(options).into_files());
        Ok(Self {
            path_iter,
            skip_policy: options.skip_policy,
        })
    }
}
impl Iterator for FileStream {
    type Item = Result<FileOutcome, MergeError>;
    fn next(&mut self) -> Option<Self::Item> {
        let path = match self.path_iter.next()? {
            Ok(p) => p,
            Err(e) => return Some(Err(e)),
        };
        Some(read_file(path, self.skip_policy))
    }
}
/// Merges every readable file under `options.input` into `options.output`.
pub fn merge(options: MergeOptions) -> Result<MergeReport, MergeError> {
    merge_with(options, |_| {})
}
/// Like [`merge`], calling `observer` after each file has been handled.
///
/// The input directory is validated before the output is opened, so an
/// invalid input never touches an existing output file.
pub fn merge_with<F>(options: MergeOptions, mut observer: F) -> Result<MergeReport, MergeError>
where
    F: FnMut(&FileOutcome),
{
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Merging {} into {}",
        options.input.display(),
        options.output.display()
    );
    let stream = FileStream::new(&options)?;
    let mut sink = OutputSink::create(&options.output, options.atomic)?;
    let mut report = MergeReport {
        output: options.output.clone(),
        ..Default::default()
    };
    for outcome in stream {
        let outcome = outcome?;
        match &outcome {
            FileOutcome::Merged(record) => {
                sink.write_record(record)?;
                report.merged.push(record.path.clone());
            }
            FileOutcome::Skipped(skipped) => report.skipped.push(skipped.clone()),
        }
        observer(&outcome);
    }
    sink.finish()?;
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Merged {} files, skipped {}",
        report.merged.len(),
        report.skipped.len()
    );
    Ok(report)
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_and_permission_errors_are_skipped() {
        let bad_utf8 = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(
            classify_read_error(&bad_utf8, SkipPolicy::Anticipated),
            Some(SkipKind::InvalidEncoding)
        );
        assert_eq!(
            classify_read_error(&denied, SkipPolicy::Anticipated),
            Some(SkipKind::PermissionDenied)
        );
    }

    #[test]
    fn other_errors_depend_on_policy() {
        let gone = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(classify_read_error(&gone, SkipPolicy::Anticipated), None);
        assert_eq!(
            classify_read_error(&gone, SkipPolicy::AllReadErrors),
            Some(SkipKind::Other)
        );
    }

    #[test]
    fn regular_file_is_not_a_valid_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            validate_input(&file),
            Err(MergeError::InvalidInputDirectory(p)) if p == file
        ));
        assert!(validate_input(dir.path()).is_ok());
    }
}
