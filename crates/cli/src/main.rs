mod args;
mod logging;
mod progress;

use std::io;
use std::path::PathBuf;

use args::Args;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use orphanthumb_core::report::Reporter;
use orphanthumb_core::sweep::{sweep_cache_with_progress, BucketOutcome};
use orphanthumb_core::Error;
use progress::SweepProgressBar;
use tracing::{debug, info};

/// Thumbnail cache directory under the user's home.
const CACHE_DIR: &str = ".thumbnails";

fn main() {
    logging::init_logger();

    let args = match Args::try_parse() {
        Ok(v) => v,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            let _ = args::write_usage_error(&err, &mut io::stderr().lock());
            std::process::exit(1);
        }
    };

    if args.version {
        println!("{} {}", progname(), env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(err) = real_main(&args) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}

fn real_main(args: &Args) -> orphanthumb_core::Result<()> {
    let config = args.to_config();
    let cache_root = cache_root()?;
    debug!(cache_root = %cache_root.display(), ?config, "starting sweep");

    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    let mut bar = config.summary_only().then(SweepProgressBar::new);

    let outcomes = sweep_cache_with_progress(&cache_root, &config, &mut reporter, |p| {
        if let Some(bar) = bar.as_mut() {
            bar.update(p);
        }
    })?;
    if let Some(bar) = bar.as_mut() {
        bar.finish();
    }

    for (bucket, outcome) in outcomes {
        match outcome {
            BucketOutcome::Swept(stats) => info!(
                bucket = %bucket,
                orphans = stats.thumbnails_orphan,
                bytes = stats.bytes_recovered,
                "bucket done"
            ),
            BucketOutcome::Missing => debug!(bucket = %bucket, "bucket missing"),
            BucketOutcome::Failed(err) => debug!(bucket = %bucket, "bucket skipped: {err}"),
        }
    }
    Ok(())
}

fn cache_root() -> orphanthumb_core::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        Error::InvalidArgument("cannot determine home directory".to_string())
    })?;
    Ok(home.join(CACHE_DIR))
}

fn progname() -> String {
    std::env::args()
        .next()
        .map(PathBuf::from)
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| Args::command().get_name().to_string())
}
