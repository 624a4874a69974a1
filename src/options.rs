use serde::{Deserialize, Serialize};
use std::path::PathBuf;
/// Which per-file read failures are skipped instead of aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkipPolicy {
    /// Only undecodable and permission-denied files are skipped.
    #[default]
    Anticipated,
    /// Every read error on an individual file is skipped.
    AllReadErrors,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub follow_links: bool,
    pub sort_by_path: bool,
    pub skip_policy: SkipPolicy,
    pub atomic: bool,
}
impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            output: PathBuf::from("merged.txt"),
            follow_links: false,
            sort_by_path: false,
            skip_policy: SkipPolicy::Anticipated,
            atomic: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct MergeBuilder {
    options: MergeOptions,
}
impl MergeBuilder {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            options: MergeOptions {
                input: input.into(),
                output: output.into(),
                ..Default::default()
            },
        }
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn sort_by_path(mut self, yes: bool) -> Self {
        self.options.sort_by_path = yes;
        self
    }
    pub fn skip_policy(mut self, policy: SkipPolicy) -> Self {
        self.options.skip_policy = policy;
        self
    }
    pub fn atomic(mut self, yes: bool) -> Self {
        self.options.atomic = yes;
        self
    }
    pub fn build(self) -> MergeOptions {
        self.options
    }
}
