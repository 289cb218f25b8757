use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use orphanthumb_core::sweep::SweepProgress;

/// Per-bucket progress bar for summary mode, drawn on stderr.
pub struct SweepProgressBar {
    bar: Option<ProgressBar>,
}

impl SweepProgressBar {
    pub fn new() -> Self {
        Self { bar: None }
    }

    pub fn update(&mut self, progress: &SweepProgress) {
        if progress.entries_seen == 1 {
            self.finish();
            self.bar = Some(new_bar(progress));
        }
        if let Some(bar) = self.bar.as_ref() {
            bar.set_position(progress.entries_seen);
        }
        if progress.entries_seen >= progress.entries_total {
            self.finish();
        }
    }

    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn new_bar(progress: &SweepProgress) -> ProgressBar {
    let bar = ProgressBar::new(progress.entries_total);
    let style = ProgressStyle::with_template(
        "  {spinner:.cyan} {msg} [{bar:30.cyan/dim}] {pos}/{len} files",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━╸─");
    bar.set_style(style);
    bar.set_message(progress.bucket.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
