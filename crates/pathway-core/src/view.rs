/// Presentation snapshot of the active step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub title: &'static str,
    pub index: usize,
    pub total: usize,
    pub in_flight: bool,
    pub submitted: bool,
}

impl StepView {
    pub fn position_label(&self) -> String {
        format!("Step {} of {}", self.index + 1, self.total)
    }

    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.index + 1) as f64 / self.total as f64 * 100.0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total
    }

    pub fn show_back(&self) -> bool {
        self.index > 0 && !self.submitted
    }

    pub fn submit_label(&self) -> &'static str {
        if self.in_flight {
            "Saving progress..."
        } else if self.is_last() {
            "Submit"
        } else {
            "Continue"
        }
    }

    /// Fixed-width text bar, e.g. `[####------]`.
    pub fn progress_bar(&self, width: usize) -> String {
        let filled = ((self.progress_percent() / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }
}
