//! Progress display on stderr.
//!
//! Stdout carries the conversion report, so bars always draw to stderr. When
//! stderr is not a terminal indicatif hides them on its own.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

const OUTER_TEMPLATE: &str = "{prefix:>10.bold} [{bar:30}] {pos}/{len} {wide_msg}";
const INNER_TEMPLATE: &str = "{prefix:>10.dim} [{bar:30}] {pos}/{len} {wide_msg}";

/// Two-level progress: one outer bar for the scanned level and one child
/// bar per item inside it.
pub struct Progress {
    multi: MultiProgress,
}

impl Progress {
    pub fn stderr() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
        }
    }

    /// No output at all. Used by tests.
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    pub fn outer(&self, prefix: &str, len: usize) -> ProgressBar {
        self.add(OUTER_TEMPLATE, prefix, len)
    }

    pub fn inner(&self, prefix: &str, len: usize) -> ProgressBar {
        self.add(INNER_TEMPLATE, prefix, len)
    }

    fn add(&self, template: &str, prefix: &str, len: usize) -> ProgressBar {
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = self.multi.add(ProgressBar::new(len as u64));
        bar.set_style(style);
        bar.set_prefix(prefix.to_string());
        bar
    }
}

/// Short label for a path: its file name, or the whole path when it has none.
pub(crate) fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn hidden_bars_still_count() {
        let progress = Progress::hidden();
        let bar = progress.outer("Scanning", 2);
        bar.inc(1);
        assert_eq!(bar.position(), 1);
        assert_eq!(bar.length(), Some(2));
    }

    #[test]
    fn display_name_prefers_file_name() {
        assert_eq!(display_name(Path::new("a/Campaign1")), "Campaign1");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
