use std::sync::Mutex;

use fleetcheck_core::pipeline::{PipelineStage, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};

/// Drives one terminal progress bar per pipeline stage.
#[derive(Default)]
pub struct BarReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        let mut guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        let pb = match total_items {
            Some(total) => {
                let pb = ProgressBar::new(total as u64);
                if let Ok(style) = ProgressStyle::default_bar().template("{msg:20} [{bar:40}] {pos}/{len}") {
                    pb.set_style(style.progress_chars("=> "));
                }
                pb
            }
            None => ProgressBar::new_spinner(),
        };
        pb.set_message(stage.to_string());
        self.with_bar(|slot| {
            if let Some(old) = slot.replace(pb) {
                old.finish_and_clear();
            }
        });
    }

    fn advance(&self, items_done: usize) {
        self.with_bar(|slot| {
            if let Some(pb) = slot {
                if pb.length().is_some() {
                    pb.set_position(items_done as u64);
                } else {
                    pb.tick();
                }
            }
        });
    }

    fn finish_stage(&self) {
        self.with_bar(|slot| {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        });
    }
}
