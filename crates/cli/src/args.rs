use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use orphanthumb_core::RunConfig;

#[derive(Debug, Parser)]
#[command(name = "orphan-thumbnail")]
#[command(about = "A program to find orphan GNOME thumbnails.", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Delete orphan thumbnail(s)
    #[arg(short, long)]
    pub delete: bool,

    /// List only orphan thumbnail(s)
    #[arg(short, long)]
    pub orphan: bool,

    /// Quiet mode, only if -d is specified
    #[arg(short, long)]
    pub quiet: bool,

    /// Show only a progress indicator and the summary
    #[arg(short, long)]
    pub summary: bool,

    /// Skip thumbnails whose original path starts with PATH
    #[arg(short = 'x', long, value_name = "PATH")]
    pub exclude: Option<PathBuf>,

    /// Show version
    #[arg(short = 'v', long)]
    pub version: bool,
}

impl Args {
    pub fn to_config(&self) -> RunConfig {
        RunConfig::new()
            .with_delete(self.delete)
            .with_quiet(self.quiet)
            .with_orphan_only(self.orphan)
            .with_summary_only(self.summary)
            .with_exclude(self.exclude.clone())
    }
}

/// Writes a parse error followed by the full usage text.
pub fn write_usage_error<W: Write>(err: &clap::Error, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", err.render())?;
    write!(out, "{}", Args::command().render_help())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn short_flags_build_config() {
        let args = Args::try_parse_from(["orphan-thumbnail", "-d", "-q", "-x", "/media"]).unwrap();
        let config = args.to_config();
        assert!(config.delete_enabled());
        assert!(config.quiet_delete());
        assert_eq!(config.exclude_path(), Some(Path::new("/media")));
    }

    #[test]
    fn long_exclude_with_equals() {
        let args =
            Args::try_parse_from(["orphan-thumbnail", "--orphan", "--summary", "--exclude=/a b"])
                .unwrap();
        let config = args.to_config();
        assert!(config.orphan_only());
        assert!(!config.summary_only());
        assert_eq!(config.exclude_path(), Some(Path::new("/a b")));
    }

    #[test]
    fn version_is_lowercase_v() {
        let args = Args::try_parse_from(["orphan-thumbnail", "-v"]).unwrap();
        assert!(args.version);
        assert!(Args::try_parse_from(["orphan-thumbnail", "-V"]).is_err());
    }

    #[test]
    fn help_and_unknown_options() {
        let help = Args::try_parse_from(["orphan-thumbnail", "-h"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let unknown = Args::try_parse_from(["orphan-thumbnail", "--bogus"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn usage_error_carries_message_and_help() {
        let err = Args::try_parse_from(["orphan-thumbnail", "--bogus"]).unwrap_err();
        let mut out = Vec::new();
        write_usage_error(&err, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("--bogus"));
        assert!(text.contains("Usage: orphan-thumbnail"));
        assert!(text.contains("--exclude <PATH>"));
    }
}
