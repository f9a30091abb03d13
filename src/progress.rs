//! Progress display for the pipeline phases.
//!
//! A [`Phase`] owns one spinner. Interactive runs see the spinner and its row
//! count; in log-only mode the spinner is hidden and the same information goes
//! through `tracing` as periodic lines, which keeps redirected output readable.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Rows between progress updates.
pub const PROGRESS_INTERVAL: usize = 10_000;

static LOG_ONLY: AtomicBool = AtomicBool::new(false);

pub fn set_log_only(value: bool) {
    LOG_ONLY.store(value, Ordering::Relaxed);
}

pub fn is_log_only() -> bool {
    LOG_ONLY.load(Ordering::Relaxed)
}

/// Seconds below a minute, minutes above.
pub fn format_duration(d: Duration) -> String {
    match d.as_secs_f64() {
        secs if secs < 60.0 => format!("{:.1}s", secs),
        secs => format!("{:.1}m", secs / 60.0),
    }
}

/// Whether `count` processed rows is a point to report progress at.
pub fn at_interval(count: usize, interval: usize) -> bool {
    interval > 0 && count > 0 && count % interval == 0
}

/// One named pipeline phase.
pub struct Phase {
    name: String,
    started: Instant,
    pb: ProgressBar,
}

impl Phase {
    pub fn start(name: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if is_log_only() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
            tracing::info!("{} ...", name);
        } else {
            if let Ok(style) = ProgressStyle::default_spinner().template("{msg} {spinner} [{elapsed_precise}]") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        pb.set_message(name.to_string());
        Phase {
            name: name.to_string(),
            started: Instant::now(),
            pb,
        }
    }

    /// Report `count` rows done so far. Only every [`PROGRESS_INTERVAL`]th
    /// call does any work.
    pub fn tick(&self, count: usize) {
        if !at_interval(count, PROGRESS_INTERVAL) {
            return;
        }
        if is_log_only() {
            tracing::info!("[{}] {} rows ({})", self.name, count, format_duration(self.started.elapsed()));
        } else {
            self.pb.set_message(format!("{} ({} rows)", self.name, count));
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.pb.is_hidden()
    }

    /// Close the spinner with a summary line.
    pub fn finish(self, summary: String) {
        let line = format!("{} in {}", summary, format_duration(self.started.elapsed()));
        if is_log_only() {
            tracing::info!("{}", line);
        }
        self.pb.finish_with_message(line);
    }
}
