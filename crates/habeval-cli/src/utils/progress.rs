use habeval::core::models::evaluation::EvaluationStatus;
use habeval::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Layouts that did not score, split by cause.
#[derive(Default)]
struct Tally {
    rejected: AtomicU64,
    failed: AtomicU64,
}

impl Tally {
    fn record(&self, status: EvaluationStatus) -> bool {
        let counter = match status {
            EvaluationStatus::Scored => return false,
            EvaluationStatus::Rejected => &self.rejected,
            EvaluationStatus::CalculationError => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn message(&self) -> String {
        let rejected = self.rejected.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let mut parts = Vec::new();
        if rejected > 0 {
            parts.push(format!("{} rejected", rejected));
        }
        if failed > 0 {
            parts.push(format!("{} failed", failed));
        }
        if parts.is_empty() {
            "Evaluating".to_string()
        } else {
            format!("Evaluating ({})", parts.join(", "))
        }
    }
}

/// Drives a progress bar from batch evaluation events.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    tally: Arc<Tally>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(target);

        Self {
            pb: Arc::new(Mutex::new(pb)),
            tally: Arc::new(Tally::default()),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let tally_clone = self.tally.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { total } => {
                    pb_guard.reset();
                    pb_guard.set_length(total);
                    pb_guard.set_position(0);
                    pb_guard.set_message("Evaluating");
                }
                Progress::LayoutFinished { status, .. } => {
                    if tally_clone.record(status) {
                        pb_guard.set_message(tally_clone.message());
                    }
                    pb_guard.inc(1);
                }
                Progress::BatchFinish => {
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::Message(msg) => {
                    pb_guard.println(format!("  {}", msg));
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
