use std::fmt;
use std::path::{Path, PathBuf};

/// Size category subdirectory of the thumbnail cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Normal,
    Large,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::Normal, Bucket::Large];

    pub fn dir_name(self) -> &'static str {
        match self {
            Bucket::Normal => "normal",
            Bucket::Large => "large",
        }
    }

    pub fn path_in(self, cache_root: &Path) -> PathBuf {
        cache_root.join(self.dir_name())
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Settings for one invocation. Built once and shared by reference.
///
/// The accessors apply the flag precedence rules: `orphan_only` overrides
/// `summary_only`, and `quiet_delete` only takes effect with deletion on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    delete: bool,
    quiet: bool,
    orphan_only: bool,
    summary_only: bool,
    exclude: Option<PathBuf>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delete(mut self, on: bool) -> Self {
        self.delete = on;
        self
    }

    pub fn with_quiet(mut self, on: bool) -> Self {
        self.quiet = on;
        self
    }

    pub fn with_orphan_only(mut self, on: bool) -> Self {
        self.orphan_only = on;
        self
    }

    pub fn with_summary_only(mut self, on: bool) -> Self {
        self.summary_only = on;
        self
    }

    pub fn with_exclude(mut self, prefix: Option<PathBuf>) -> Self {
        self.exclude = prefix;
        self
    }

    pub fn delete_enabled(&self) -> bool {
        self.delete
    }

    pub fn quiet_delete(&self) -> bool {
        self.delete && self.quiet
    }

    pub fn orphan_only(&self) -> bool {
        self.orphan_only
    }

    pub fn summary_only(&self) -> bool {
        self.summary_only && !self.orphan_only
    }

    pub fn exclude_path(&self) -> Option<&Path> {
        self.exclude.as_deref()
    }

    /// Plain byte-prefix match; `/home/a` also excludes `/home/ab`.
    pub fn is_excluded(&self, decoded: &Path) -> bool {
        match &self.exclude {
            Some(prefix) => crate::uri::path_bytes(decoded)
                .starts_with(&crate::uri::path_bytes(prefix)),
            None => false,
        }
    }

    pub fn shows_summary(&self) -> bool {
        !(self.orphan_only || self.quiet_delete())
    }
}

#[derive(Debug, Clone)]
pub struct ThumbnailEntry {
    pub file_name: String,
    pub full_path: PathBuf,
}

impl ThumbnailEntry {
    /// Candidates are entries whose name ends in `.png`, any case.
    pub fn is_candidate(&self) -> bool {
        let name = self.file_name.as_bytes();
        name.len() >= 4 && name[name.len() - 4..].eq_ignore_ascii_case(b".png")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailMetadata {
    /// Raw bytes of the `Thumb::URI` value, still percent-encoded.
    pub original_uri: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub is_orphan: bool,
    pub is_excluded: bool,
    pub decoded_path: PathBuf,
    pub thumbnail_byte_size: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStatistics {
    pub files_total: u64,
    pub thumbnails_total: u64,
    pub thumbnails_excluded: u64,
    pub thumbnails_orphan: u64,
    pub thumbnails_errored: u64,
    pub bytes_recovered: u64,
}

impl RunStatistics {
    pub fn thumbnails_processed(&self) -> u64 {
        self.thumbnails_total.saturating_sub(self.thumbnails_errored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orphan_only_wins_over_summary() {
        let cfg = RunConfig::new().with_orphan_only(true).with_summary_only(true);
        assert!(cfg.orphan_only());
        assert!(!cfg.summary_only());
    }

    #[test]
    fn quiet_needs_delete() {
        assert!(!RunConfig::new().with_quiet(true).quiet_delete());
        assert!(RunConfig::new().with_quiet(true).with_delete(true).quiet_delete());
        assert!(RunConfig::new().with_quiet(true).shows_summary());
        assert!(!RunConfig::new()
            .with_quiet(true)
            .with_delete(true)
            .shows_summary());
    }

    #[test]
    fn exclude_is_byte_prefix() {
        let cfg = RunConfig::new().with_exclude(Some(PathBuf::from("/home/user/Pictures")));
        assert!(cfg.is_excluded(Path::new("/home/user/Pictures/a.jpg")));
        assert!(cfg.is_excluded(Path::new("/home/user/Pictures2/b.jpg")));
        assert!(!cfg.is_excluded(Path::new("/home/user/Music/c.ogg")));
        assert!(!RunConfig::new().is_excluded(Path::new("/anything")));
    }

    #[test]
    fn candidate_suffix_is_case_insensitive() {
        let entry = |name: &str| ThumbnailEntry {
            file_name: name.to_string(),
            full_path: PathBuf::from(name),
        };
        assert!(entry("abc.png").is_candidate());
        assert!(entry("ABC.PNG").is_candidate());
        assert!(!entry("abc.png.tmp").is_candidate());
        assert!(!entry("png").is_candidate());
    }
}
