use std::io::{self, Write};
use std::path::Path;

use crate::models::RunStatistics;

/// Writes the human-readable report for a sweep to any sink.
pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn directory_header(&mut self, dir: &Path) -> io::Result<()> {
        writeln!(self.out, "\nThumbnail directory: {}/\n", dir.display())
    }

    pub fn directory_missing(&mut self, dir: &Path) -> io::Result<()> {
        writeln!(self.out, "Thumbnail directory not found: {}", dir.display())
    }

    pub fn entry_block(&mut self, thumbnail: &str, file: &Path, orphan: bool) -> io::Result<()> {
        writeln!(self.out, "Thumbnail: {thumbnail}")?;
        writeln!(self.out, "File:      {}", file.display())?;
        writeln!(self.out, "Orphan:    {}\n", if orphan { "yes" } else { "no" })
    }

    pub fn orphan_name(&mut self, thumbnail: &str) -> io::Result<()> {
        writeln!(self.out, "{thumbnail}")
    }

    pub fn deleted(&mut self, thumbnail: &str) -> io::Result<()> {
        writeln!(self.out, "{thumbnail} deleted.")
    }

    pub fn delete_failed(&mut self, thumbnail: &str, err: &io::Error) -> io::Result<()> {
        writeln!(self.out, "{thumbnail} cannot be deleted -- skip.")?;
        writeln!(self.out, "remove: {err}")
    }

    pub fn summary(&mut self, stats: &RunStatistics, deleted: bool) -> io::Result<()> {
        writeln!(self.out, "{} files total", stats.files_total)?;
        writeln!(self.out, "{} thumbnail total", stats.thumbnails_total)?;
        writeln!(self.out, "{} thumbnail excluded", stats.thumbnails_excluded)?;
        writeln!(self.out, "{} thumbnail orphan", stats.thumbnails_orphan)?;
        writeln!(
            self.out,
            "{} thumbnail successfully processed",
            stats.thumbnails_processed()
        )?;
        let verb = if deleted { "recovered" } else { "recoverable" };
        writeln!(self.out, "{} byte {verb}", stats.bytes_recovered)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
