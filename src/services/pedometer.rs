/// Rough estimate used across the app: one step burns 0.04 kcal.
pub const CALORIES_PER_STEP: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepUpdate {
    pub steps: i64,
    pub calories: f64,
}

/// Session-relative step counter over the platform's monotonically increasing
/// cumulative count. The baseline is sampled once at session start; when the
/// time-range query is unavailable the first reading establishes it instead.
#[derive(Debug, Default)]
pub struct StepCounter {
    baseline: Option<i64>,
    current_steps: i64,
}

impl StepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the baseline from the platform's step history query.
    pub fn set_baseline(&mut self, cumulative: i64) {
        self.baseline = Some(cumulative);
        log::debug!("[StepCounter] baseline set to {}", cumulative);
    }

    /// Feed one cumulative count from the step stream. Reported steps are
    /// clamped at 0: the baseline sampling can race the stream and land above
    /// the first reported count.
    pub fn update(&mut self, cumulative: i64) -> StepUpdate {
        let baseline = *self.baseline.get_or_insert(cumulative);
        self.current_steps = (cumulative - baseline).max(0);
        StepUpdate {
            steps: self.current_steps,
            calories: self.current_steps as f64 * CALORIES_PER_STEP,
        }
    }

    pub fn current_steps(&self) -> i64 {
        self.current_steps
    }

    pub fn reset(&mut self) {
        self.baseline = None;
        self.current_steps = 0;
        log::debug!("[StepCounter] reset");
    }
}
