//! # Dirmerge
//!
//! `dirmerge` walks a directory tree and concatenates the text of every readable file into a
//! single output file, each file preceded by a header naming its path.
//!
//! Files that are not valid UTF-8, or that the process may not read, are skipped and reported;
//! other read failures abort the run unless [`SkipPolicy::AllReadErrors`] is selected.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use dirmerge::{FileOutcome, MergeBuilder, merge_with};
//!
//! let options = MergeBuilder::new("src", "snapshot.txt")
//!     .sort_by_path(true)
//!     .atomic(true)
//!     .build();
//!
//! let report = merge_with(options, |outcome| {
//!     if let FileOutcome::Skipped(skipped) = outcome {
//!         println!("skipped {}", skipped);
//!     }
//! })
//! .expect("Failed to merge directory");
//!
//! println!("{} files written to {}", report.merged.len(), report.output.display());
//! ```

mod engine;
mod error;
mod options;
pub mod output;
mod types;

pub use engine::{FileStream, merge, merge_with};
pub use error::MergeError;
pub use options::{MergeBuilder, MergeOptions, SkipPolicy};
pub use types::{FileOutcome, FileRecord, MergeReport, SkipKind, SkippedFile};
