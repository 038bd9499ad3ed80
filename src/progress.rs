use crate::ui;
use std::time::{Duration, Instant};

/// A simple progress tracker for CLI operations
pub struct ProgressTracker {
    operation_name: String,
    start_time: Instant,
    steps: Vec<String>,
    current_step: usize,
}

impl ProgressTracker {
    /// Create a new progress tracker with the given operation name
    pub fn new(operation_name: &str) -> Self {
        ui::section_header(operation_name);
        Self {
            operation_name: operation_name.to_string(),
            start_time: Instant::now(),
            steps: Vec::new(),
            current_step: 0,
        }
    }

    /// Add steps to the tracker
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Start the next step
    pub fn start_step(&self) {
        if let Some(step) = self.steps.get(self.current_step) {
            ui::status_message(step);
        }
    }

    /// Complete the current step
    pub fn complete_step(&mut self) {
        if let Some(step) = self.steps.get(self.current_step) {
            ui::success_message(step);
            self.current_step += 1;
        }
    }

    /// Skip the current step
    pub fn skip_step(&mut self, reason: &str) {
        if let Some(step) = self.steps.get(self.current_step) {
            ui::warning_message(&format!("Skipped: {step} ({reason})"));
            self.current_step += 1;
        }
    }

    /// Complete the operation
    pub fn complete(&self) {
        ui::success_message(&format!(
            "{} completed in {}",
            self.operation_name,
            format_duration(self.start_time.elapsed())
        ));
    }
}

/// Format a duration in a human-readable way
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis} ms")
    } else {
        format!("{:.1} seconds", duration.as_secs_f64())
    }
}
