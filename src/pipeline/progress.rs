// file: src/pipeline/progress.rs
// description: stage progress bar and statistics for one generation run
// reference: uses indicatif for progress bars

use crate::models::stage::Stage;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub stages_run: usize,
    pub stages_failed: usize,
    pub provider_calls: usize,
    pub planner_defaulted: bool,
    pub duration_secs: u64,
}

impl RunStats {
    pub fn success_rate(&self) -> f64 {
        if self.stages_run == 0 {
            return 0.0;
        }
        ((self.stages_run - self.stages_failed) as f64 / self.stages_run as f64) * 100.0
    }
}

pub struct RunProgress {
    bar: ProgressBar,
    stages_run: AtomicUsize,
    stages_failed: AtomicUsize,
    provider_calls: AtomicUsize,
    planner_defaulted: std::sync::atomic::AtomicBool,
    start_time: Instant,
}

impl RunProgress {
    pub fn new(colored: bool) -> Self {
        let bar = ProgressBar::new(Stage::SEQUENCE.len() as u64);
        if colored {
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                    .expect("Failed to create progress bar template")
                    .progress_chars("█▓▒░"),
            );
        } else {
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner} [{elapsed_precise}] [{bar:30}] {pos}/{len} {msg}")
                    .expect("Failed to create progress bar template")
                    .progress_chars("=>-"),
            );
        }

        Self {
            bar,
            stages_run: AtomicUsize::new(0),
            stages_failed: AtomicUsize::new(0),
            provider_calls: AtomicUsize::new(0),
            planner_defaulted: std::sync::atomic::AtomicBool::new(false),
            start_time: Instant::now(),
        }
    }

    pub fn stage_started(&self, stage: Stage) {
        self.bar.set_message(format!("running {}", stage.name()));
    }

    pub fn stage_completed(&self, stage: Stage) {
        self.stages_run.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
        self.bar.set_message(format!("{} done", stage.name()));
    }

    pub fn stage_failed(&self, stage: Stage) {
        self.stages_run.fetch_add(1, Ordering::SeqCst);
        self.stages_failed.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
        self.bar.set_message(format!("{} failed", stage.name()));
    }

    pub fn provider_call(&self) {
        self.provider_calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn planner_defaulted(&self) {
        self.planner_defaulted.store(true, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("pipeline complete");
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            stages_run: self.stages_run.load(Ordering::SeqCst),
            stages_failed: self.stages_failed.load(Ordering::SeqCst),
            provider_calls: self.provider_calls.load(Ordering::SeqCst),
            planner_defaulted: self.planner_defaulted.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Drop for RunProgress {
    fn drop(&mut self) {
        self.finish();
    }
}
