//! Terminal progress display for running eliminations

use crate::algorithm::observer::{EliminationObserver, EliminationStep};
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_UPDATE_INTERVAL};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Elimination observer drawing one progress bar per pass
///
/// The bar counts eliminated samples and is refreshed every
/// [`PROGRESS_UPDATE_INTERVAL`] eliminations to keep drawing cheap.
pub struct ProgressObserver {
    bar: ProgressBar,
    passes: usize,
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver {
    /// Create an observer drawing to standard error
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// Create an observer that tracks progress without drawing anything
    pub fn hidden() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_draw_target(ProgressDrawTarget::hidden());
        Self::with_bar(bar)
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar, passes: 0 }
    }

    /// Number of passes started so far
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Samples eliminated in the current pass, as last drawn
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl<F> EliminationObserver<F> for ProgressObserver {
    fn on_pass_start(&mut self, pass: usize, input_size: usize, output_size: usize) {
        self.passes += 1;
        self.bar.reset();
        self.bar
            .set_length(input_size.saturating_sub(output_size) as u64);
        self.bar.set_prefix(if pass == 0 {
            "eliminate".to_string()
        } else {
            format!("refine {pass}")
        });
        self.bar.set_message(format!("{input_size} -> {output_size}"));
    }

    fn on_step(&mut self, step: &EliminationStep<'_, F>) {
        let done = step.iteration + 1;
        if done % PROGRESS_UPDATE_INTERVAL == 0 || step.remaining == step.target {
            self.bar.set_position(done as u64);
        }
    }

    fn on_pass_end(&mut self, _pass: usize) {
        if let Some(length) = self.bar.length() {
            self.bar.set_position(length);
        }
    }
}
