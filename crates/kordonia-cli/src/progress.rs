//! Terminal progress rendering.
//!
//! Presentation-only module. Renders an indicatif bar on a terminal and
//! falls back to plain line output when stdout is piped.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use kordonia_core::task::Progress;

/// Progress display that automatically selects terminal or plain output.
pub struct ProgressPrinter {
    inner: Render,
}

enum Render {
    Fancy(ProgressBar),
    Plain(PlainProgress),
}

impl ProgressPrinter {
    /// Create a new printer, auto-detecting terminal capability.
    #[must_use]
    pub fn new() -> Self {
        if io::stdout().is_terminal() {
            Self {
                inner: Render::Fancy(fancy_bar()),
            }
        } else {
            Self {
                inner: Render::Plain(PlainProgress::default()),
            }
        }
    }

    /// Update the display with the latest progress value.
    pub fn update(&mut self, progress: Progress) {
        match &mut self.inner {
            Render::Fancy(bar) => bar.set_position(percent(progress)),
            Render::Plain(plain) => plain.update(progress),
        }
    }

    /// Finish the display, leaving the final state visible.
    pub fn finish(&mut self) {
        match &mut self.inner {
            Render::Fancy(bar) => bar.finish(),
            Render::Plain(plain) => plain.finish(),
        }
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

fn fancy_bar() -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stdout());
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}%")
            .unwrap()
            .progress_chars("█▓░"),
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Whole-percent position for the bar, saturating at 100.
fn percent(progress: Progress) -> u64 {
    let rounded = progress.value().round();
    if rounded >= 100.0 { 100 } else { rounded as u64 }
}

/// Line-per-change output for non-terminal stdout.
#[derive(Default)]
struct PlainProgress {
    last: Option<u64>,
}

impl PlainProgress {
    fn update(&mut self, progress: Progress) {
        let pct = percent(progress);
        if self.last != Some(pct) {
            println!("progress: {pct}%");
            self.last = Some(pct);
        }
    }

    fn finish(&mut self) {
        if let Some(pct) = self.last {
            println!("done at {pct}%");
        }
    }
}
