//! Progress reporting for interactive comparisons

use crate::compare::DiffProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Spinner while fetching, then a bar advancing per diffed sheet
#[derive(Debug)]
pub struct ProgressReporter {
    pub fetch_pb: Option<ProgressBar>,
    pub sheets_pb: Option<ProgressBar>,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create progress reporter for a comparison
    pub fn new_for_compare() -> Self {
        Self {
            fetch_pb: Some(create_spinner("Fetching documents...")),
            sheets_pb: None,
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            fetch_pb: None,
            sheets_pb: None,
            show_progress: false,
        }
    }

    /// Finish fetching and prepare the per-sheet bar
    pub fn finish_fetch(&mut self, message: &str) {
        if let Some(pb) = self.fetch_pb.take() {
            pb.finish_with_message(message.to_string());
        }
        if self.show_progress && self.sheets_pb.is_none() {
            self.sheets_pb = Some(create_progress_bar(0, "Diffing sheets"));
        }
    }

    pub fn finish_sheets(&mut self, message: &str) {
        if let Some(pb) = self.sheets_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl DiffProgress for ProgressReporter {
    fn on_sheets_matched(&self, total: usize) {
        if let Some(pb) = &self.sheets_pb {
            pb.set_length(total as u64);
        }
    }

    fn on_sheet_done(&self, sheet_name: &str) {
        if let Some(pb) = &self.sheets_pb {
            pb.set_message(sheet_name.to_string());
            pb.inc(1);
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Ensure all progress bars are cleaned up silently
        if let Some(pb) = self.fetch_pb.take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.sheets_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
