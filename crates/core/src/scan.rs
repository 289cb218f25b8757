use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::models::ThumbnailEntry;

/// Lists the direct children of a thumbnail bucket in byte order of their
/// file names. Nothing is filtered here so every entry counts toward the
/// file total.
///
/// A missing directory maps to [`Error::CacheDirNotFound`]; any other
/// listing failure maps to [`Error::Scan`].
pub fn list_bucket(dir: &Path) -> Result<Vec<ThumbnailEntry>> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(v) => v,
            Err(err) if err.depth() == 0 && is_not_found(&err) => {
                return Err(Error::CacheDirNotFound(dir.to_path_buf()));
            }
            Err(err) => {
                return Err(Error::Scan {
                    path: dir.to_path_buf(),
                    source: err,
                });
            }
        };

        entries.push(ThumbnailEntry {
            file_name: entry.file_name().to_string_lossy().into_owned(),
            full_path: entry.into_path(),
        });
    }

    Ok(entries)
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|e| e.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}
