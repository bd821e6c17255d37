//! Progress reporting while an input file is parsed

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner shown while a file is being read
#[derive(Debug)]
pub struct ProgressReporter {
    pub load_pb: Option<ProgressBar>,
    start_time: std::time::Instant,
}

impl ProgressReporter {
    /// Create progress reporter for a file load
    pub fn new_for_load(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            load_pb: Some(create_spinner(&format!("Reading {}...", name))),
            start_time: std::time::Instant::now(),
        }
    }

    /// Create minimal progress reporter (no progress bars), used for
    /// machine-readable output
    pub fn new_minimal() -> Self {
        Self {
            load_pb: None,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn finish_load(&mut self, rows: usize) {
        if let Some(pb) = self.load_pb.take() {
            pb.finish_with_message(format!(
                "Loaded {} rows in {:.1}s",
                rows,
                self.start_time.elapsed().as_secs_f64()
            ));
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(pb) = self.load_pb.take() {
            pb.finish_and_clear();
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    // stdout may carry JSON; keep the spinner on stderr
    pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
