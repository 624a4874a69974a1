//! Command-line interface for dirmerge.
//!
//! Merges every readable file below a directory into one text file.

use clap::Parser;
use clap::error::ErrorKind;
use dirmerge::{FileOutcome, MergeBuilder, MergeError, MergeOptions, SkipPolicy, merge_with};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::exit;

const USAGE: &str = "Uso: dirmerge <directorio_entrada> <archivo_salida>";

/// dirmerge — flatten a directory tree into a single text file
#[derive(Parser)]
#[command(name = "dirmerge", version, about, long_about = None)]
struct Cli {
    /// Directory to walk
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,

    /// File to write (overwritten if it exists)
    #[arg(allow_hyphen_values = true)]
    output: PathBuf,

    /// Anything after the output file is ignored
    #[arg(hide = true, num_args = 0.., allow_hyphen_values = true)]
    _rest: Vec<OsString>,

    /// Follow symlinks to directories
    #[arg(long)]
    follow_links: bool,

    /// Visit entries in lexicographic order for reproducible output
    #[arg(long)]
    sort: bool,

    /// Skip and warn on every per-file read error instead of aborting
    #[arg(long)]
    skip_all_errors: bool,

    /// Write to a temporary file and rename it into place on success
    #[arg(long)]
    atomic: bool,
}

impl Cli {
    fn into_options(self) -> MergeOptions {
        let policy = if self.skip_all_errors {
            SkipPolicy::AllReadErrors
        } else {
            SkipPolicy::Anticipated
        };
        MergeBuilder::new(self.input, self.output)
            .follow_links(self.follow_links)
            .sort_by_path(self.sort)
            .skip_policy(policy)
            .atomic(self.atomic)
            .build()
    }
}

#[cfg(feature = "logging")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
}

fn main() {
    #[cfg(feature = "logging")]
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            println!("{}", USAGE);
            eprintln!("{}", e);
            exit(1);
        }
    };

    run(cli.into_options());
}

fn run(options: MergeOptions) {
    let result = merge_with(options, |outcome| {
        if let FileOutcome::Skipped(skipped) = outcome {
            println!("[Aviso] No se pudo leer {}", skipped);
        }
    });
    match result {
        Ok(report) => {
            println!("¡Hecho! Archivo generado: {}", report.output.display());
        }
        Err(e @ MergeError::InvalidInputDirectory(_)) => {
            println!("Error: {}", e);
            exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
