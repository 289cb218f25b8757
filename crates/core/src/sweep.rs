use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{
    Bucket, ClassificationResult, RunConfig, RunStatistics, ThumbnailEntry, ThumbnailMetadata,
};
use crate::report::Reporter;
use crate::scan::list_bucket;
use crate::thumbnail::ThumbnailFile;
use crate::uri::uri_to_path;

#[derive(Debug, Clone)]
pub struct SweepProgress {
    pub bucket: Bucket,
    pub entries_seen: u64,
    pub entries_total: u64,
    pub current_path: PathBuf,
}

#[derive(Debug)]
pub enum BucketOutcome {
    Swept(RunStatistics),
    /// The bucket directory does not exist yet.
    Missing,
    /// Listing the bucket failed; nothing in it was processed.
    Failed(Error),
}

pub fn sweep_cache<W: Write>(
    cache_root: &Path,
    config: &RunConfig,
    reporter: &mut Reporter<W>,
) -> Result<Vec<(Bucket, BucketOutcome)>> {
    sweep_cache_with_progress(cache_root, config, reporter, |_| {})
}

/// Sweeps both buckets in order. A missing or unreadable bucket never stops
/// the other one; only a failing report sink aborts the run.
pub fn sweep_cache_with_progress<W, F>(
    cache_root: &Path,
    config: &RunConfig,
    reporter: &mut Reporter<W>,
    mut on_progress: F,
) -> Result<Vec<(Bucket, BucketOutcome)>>
where
    W: Write,
    F: FnMut(&SweepProgress),
{
    let mut outcomes = Vec::with_capacity(Bucket::ALL.len());
    for bucket in Bucket::ALL {
        let outcome = match sweep_bucket(cache_root, bucket, config, reporter, &mut on_progress) {
            Ok(stats) => BucketOutcome::Swept(stats),
            Err(Error::CacheDirNotFound(dir)) => {
                debug!(bucket = %bucket, dir = %dir.display(), "thumbnail bucket missing");
                if !config.orphan_only() {
                    reporter.directory_missing(&dir)?;
                }
                BucketOutcome::Missing
            }
            Err(err @ Error::Scan { .. }) => {
                warn!(bucket = %bucket, "{err}");
                BucketOutcome::Failed(err)
            }
            Err(err) => return Err(err),
        };
        outcomes.push((bucket, outcome));
    }
    reporter.flush()?;
    Ok(outcomes)
}

pub fn sweep_bucket<W, F>(
    cache_root: &Path,
    bucket: Bucket,
    config: &RunConfig,
    reporter: &mut Reporter<W>,
    mut on_progress: F,
) -> Result<RunStatistics>
where
    W: Write,
    F: FnMut(&SweepProgress),
{
    let dir = bucket.path_in(cache_root);
    if !config.orphan_only() {
        reporter.directory_header(&dir)?;
    }

    let entries = list_bucket(&dir)?;
    let entries_total = entries.len() as u64;
    let mut stats = RunStatistics {
        files_total: entries_total,
        ..Default::default()
    };

    for (idx, entry) in entries.into_iter().enumerate() {
        if entry.is_candidate() {
            process_entry(&entry, config, reporter, &mut stats)?;
        }
        on_progress(&SweepProgress {
            bucket,
            entries_seen: idx as u64 + 1,
            entries_total,
            current_path: entry.full_path,
        });
    }

    debug!(bucket = %bucket, ?stats, "bucket sweep finished");
    if config.shows_summary() {
        reporter.summary(&stats, config.delete_enabled())?;
    }
    Ok(stats)
}

fn process_entry<W: Write>(
    entry: &ThumbnailEntry,
    config: &RunConfig,
    reporter: &mut Reporter<W>,
    stats: &mut RunStatistics,
) -> Result<()> {
    let thumb = match ThumbnailFile::open(&entry.full_path) {
        Ok(v) => v,
        Err(Error::NotPng(_)) => {
            warn!("{} is not PNG, skip", entry.file_name);
            return Ok(());
        }
        Err(err) => {
            warn!("error opening {}, skip: {err}", entry.file_name);
            return Ok(());
        }
    };
    stats.thumbnails_total += 1;

    let metadata = match thumb.read_metadata() {
        Ok(Some(v)) => v,
        Ok(None) => {
            debug!("{} has no Thumb::URI", entry.file_name);
            return Ok(());
        }
        Err(err) => {
            warn!("{err}, skip");
            stats.thumbnails_errored += 1;
            return Ok(());
        }
    };

    let result = match classify(entry, &metadata, config) {
        Ok(v) => v,
        Err(err) => {
            warn!("{}: {err}, skip", entry.file_name);
            stats.thumbnails_errored += 1;
            return Ok(());
        }
    };

    if result.is_excluded {
        debug!("{} excluded ({})", entry.file_name, result.decoded_path.display());
        stats.thumbnails_excluded += 1;
        return Ok(());
    }

    if result.is_orphan {
        stats.thumbnails_orphan += 1;
        stats.bytes_recovered += result.thumbnail_byte_size;
    }

    dispatch(entry, &result, config, reporter, stats)
}

/// Decodes the recorded URI and decides whether the thumbnail is excluded
/// or orphaned. Any failure to stat the original, including permission
/// errors, counts as orphan.
pub fn classify(
    entry: &ThumbnailEntry,
    metadata: &ThumbnailMetadata,
    config: &RunConfig,
) -> Result<ClassificationResult> {
    let decoded_path = uri_to_path(&metadata.original_uri)?;
    if config.is_excluded(&decoded_path) {
        return Ok(ClassificationResult {
            is_orphan: false,
            is_excluded: true,
            decoded_path,
            thumbnail_byte_size: 0,
        });
    }

    let is_orphan = fs::metadata(&decoded_path).is_err();
    let thumbnail_byte_size = fs::metadata(&entry.full_path)
        .map(|md| md.len())
        .unwrap_or(0);

    Ok(ClassificationResult {
        is_orphan,
        is_excluded: false,
        decoded_path,
        thumbnail_byte_size,
    })
}

fn dispatch<W: Write>(
    entry: &ThumbnailEntry,
    result: &ClassificationResult,
    config: &RunConfig,
    reporter: &mut Reporter<W>,
    stats: &mut RunStatistics,
) -> Result<()> {
    let name = entry.file_name.as_str();

    if !result.is_orphan {
        if !(config.orphan_only() || config.summary_only() || config.delete_enabled()) {
            reporter.entry_block(name, &result.decoded_path, false)?;
        }
        return Ok(());
    }

    if config.orphan_only() {
        reporter.orphan_name(name)?;
    } else if config.delete_enabled() {
        match fs::remove_file(&entry.full_path) {
            Ok(()) => {
                debug!("{name} deleted");
                if !config.quiet_delete() {
                    reporter.deleted(name)?;
                }
            }
            Err(err) => {
                warn!("{name} cannot be deleted: {err}");
                stats.thumbnails_errored += 1;
                if !config.quiet_delete() {
                    reporter.delete_failed(name, &err)?;
                }
            }
        }
    } else if !config.summary_only() {
        reporter.entry_block(name, &result.decoded_path, true)?;
    }
    Ok(())
}
